//! Metadata headers
//!
//! Builders for the headers a metadata-only response carries.

/// `Content-Length` header pair for a blob of `size` bytes
pub fn content_length(size: u64) -> (&'static str, String) {
    ("Content-Length", size.to_string())
}

/// `Content-Disposition` header pair naming the last segment of `path`
///
/// # Examples
/// `/repo/pkg/file.tar.gz` -> `attachment; filename="file.tar.gz"`
pub fn content_file_name(path: &str) -> (&'static str, String) {
    (
        "Content-Disposition",
        format!("attachment; filename=\"{}\"", quote(file_name(path))),
    )
}

/// Last non-empty segment of a URI path, empty for the root
fn file_name(path: &str) -> &str {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
}

/// Escape `"` and `\\` for use inside a quoted-string
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted
}
