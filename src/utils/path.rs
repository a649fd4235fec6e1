//! Database path helpers

/// Normalise a database path to `/a/b` form.
///
/// Leading and trailing slashes are collapsed, empty segments are dropped
/// and the database root becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = segments(path).collect();
    format!("/{}", segments.join("/"))
}

/// Non-empty segments of a database path
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').map(str::trim).filter(|s| !s.is_empty())
}
