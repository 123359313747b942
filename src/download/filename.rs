//! Entry names and `Content-Disposition` values for downloaded files.

/// Fallback name when a resource path has no usable last segment.
pub const FALLBACK_FILENAME: &str = "download";

/// Last segment of a provider resource path (`/a/b/report.pdf` → `report.pdf`).
///
/// Resource paths are provider locators, not local paths, so only `/` is a
/// separator. Trailing slashes are ignored.
#[must_use]
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_FILENAME)
}

/// Replaces characters that are unsafe in a filename or header value.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match sanitized.as_str() {
        "" => FALLBACK_FILENAME.to_string(),
        "." | ".." => sanitized.replace('.', "_"),
        _ => sanitized,
    }
}

/// Forced-attachment `Content-Disposition` value for `filename`.
///
/// Carries an ASCII `filename=` fallback plus an RFC 5987 `filename*=` with
/// the full UTF-8 name.
#[must_use]
pub fn attachment_disposition(filename: &str) -> String {
    let sanitized = sanitize_filename(filename);
    let ascii: String = sanitized
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    let encoded = urlencoding::encode(&sanitized);
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
