//! MIME inference for staged attachments.

/// Returns the MIME type for a file name based on its extension.
///
/// Unknown or missing extensions fall back to `application/octet-stream`.
pub fn mime_type_for_path(path: &str) -> &'static str {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") | Some("md") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(mime_type_for_path("report.pdf"), "application/pdf");
        assert_eq!(mime_type_for_path("photo.JPG"), "image/jpeg");
        assert_eq!(mime_type_for_path("/tmp/data.csv"), "text/csv");
    }

    #[test]
    fn test_unknown_extension_falls_back() {
        assert_eq!(mime_type_for_path("archive.xyz"), "application/octet-stream");
        assert_eq!(mime_type_for_path("Makefile"), "application/octet-stream");
    }
}
