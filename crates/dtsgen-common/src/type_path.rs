//! Helpers for qualified type names such as `sap.ui.core.Control` or
//! `sap/ui/core/Control`.

/// Characters separating the segments of a qualified type path.
pub const TYPE_SEPARATORS: [char; 2] = ['.', '/'];

/// Split a qualified path on `.` and `/`.
pub fn split_type_path(path: &str) -> Vec<&str> {
    path.split(TYPE_SEPARATORS).collect()
}

/// Whether the token names something inside a module path.
pub fn is_qualified(token: &str) -> bool {
    token.contains(TYPE_SEPARATORS)
}

/// The short name of a qualified path (`sap.m.Button` -> `Button`).
pub fn last_segment(path: &str) -> &str {
    path.rsplit(TYPE_SEPARATORS).next().unwrap_or(path)
}

/// The module that declares a qualified path, joined with `/`
/// (`sap.m.Button` -> `sap/m`). Unqualified names have no module.
pub fn module_of(path: &str) -> String {
    let segments = split_type_path(path);
    if segments.len() < 2 {
        return String::new();
    }
    segments[..segments.len() - 1].join("/")
}

/// Upper-case the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
