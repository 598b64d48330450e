//! MIME type and file extension lookups.

const KNOWN_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
    ("image/svg+xml", "svg"),
    ("image/x-icon", "ico"),
    ("application/pdf", "pdf"),
    ("video/mp4", "mp4"),
    ("video/webm", "webm"),
    ("audio/mpeg", "mp3"),
    ("audio/ogg", "ogg"),
    ("audio/wav", "wav"),
    ("text/plain", "txt"),
    ("text/html", "html"),
    ("text/csv", "csv"),
    ("application/json", "json"),
];

/// File extension for a well-known MIME type, if any.
///
/// ```
/// use folio_core::extension_for_mime;
///
/// assert_eq!(extension_for_mime("image/png"), Some("png"));
/// assert_eq!(extension_for_mime("application/x-unknown"), None);
/// ```
pub fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    KNOWN_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(mime_type))
        .map(|(_, ext)| *ext)
}

/// Content type for a file extension, falling back to `application/octet-stream`.
pub fn content_type_for_extension(extension: &str) -> &'static str {
    let extension = extension.to_ascii_lowercase();
    match extension.as_str() {
        "jpeg" => "image/jpeg",
        "htm" => "text/html",
        _ => KNOWN_TYPES
            .iter()
            .find(|(_, ext)| *ext == extension)
            .map(|(mime, _)| *mime)
            .unwrap_or("application/octet-stream"),
    }
}
