pub mod path;
pub mod validate;
