// src/proxy/content_type.rs
// =============================================================================
// Maps a download's filename to the Content-Type it is served with.
//
// Only the extension is looked at; GitHub's own Content-Type header is not
// passed through. Anything not in the table is served as
// application/octet-stream.
// =============================================================================

const FALLBACK: &str = "application/octet-stream";

const BY_EXTENSION: &[(&str, &str)] = &[
    (".zip", "application/zip"),
    (".tar.gz", "application/gzip"),
    (".js", "application/javascript"),
    (".css", "text/css"),
    (".html", "text/html"),
    (".json", "application/json"),
];

// Looks up the Content-Type for a filename
//
// Example:
//   "repo-main.zip" -> "application/zip"
//   "app.exe"       -> "application/octet-stream"
pub fn content_type_for(filename: &str) -> &'static str {
    BY_EXTENSION
        .iter()
        .find(|(ext, _)| filename.ends_with(ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for("repo-main.zip"), "application/zip");
        assert_eq!(content_type_for("src.tar.gz"), "application/gzip");
        assert_eq!(content_type_for("app.js"), "application/javascript");
        assert_eq!(content_type_for("site.css"), "text/css");
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("package.json"), "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type_for("app.exe"), FALLBACK);
        assert_eq!(content_type_for("file.txt"), FALLBACK);
        assert_eq!(content_type_for("archive.gz"), FALLBACK);
        assert_eq!(content_type_for("Makefile"), FALLBACK);
    }
}
