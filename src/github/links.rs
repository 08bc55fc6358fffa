// src/github/links.rs
// =============================================================================
// This module answers two questions about a GitHub URL without touching the
// network:
//
// 1. Is it a GitHub URL at all? (hostname check)
// 2. What should the downloaded file be called? (path heuristics)
//
// Accepted hosts:
//   - github.com
//   - any subdomain of github.com (codeload.github.com, gist.github.com, ...)
//   - raw.githubusercontent.com
//
// Rust concepts:
// - Url::parse: Returns Result, so bad input never panics
// - Option combinators: and_then / map / unwrap_or
// - Slices: Looking at path segments without copying them
// =============================================================================

use url::Url;

/// Host that serves raw file contents.
pub const RAW_HOST: &str = "raw.githubusercontent.com";

/// Name used when nothing better can be inferred from the URL.
pub const DEFAULT_FILENAME: &str = "github-download.zip";

// Checks whether a string is a URL that points at GitHub
//
// Returns: true only if the URL parses and its hostname is accepted.
// Any parse error is reported as false.
//
// Example:
//   "https://github.com/rust-lang/rust" -> true
//   "https://gitlab.com/user/repo"      -> false
//   "not-a-url"                          -> false
pub fn is_valid_github_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().is_some_and(is_github_host),
        Err(_) => false,
    }
}

fn is_github_host(host: &str) -> bool {
    host == "github.com" || host.ends_with(".github.com") || host == RAW_HOST
}

// Infers the filename a download should be saved under
//
// Supported shapes:
//   - https://github.com/owner/repo/archive/refs/heads/main.zip -> repo-main.zip
//   - https://github.com/owner/repo/archive/refs/tags/v1.0.zip  -> repo-v1.0.zip
//   - https://github.com/owner/repo/releases/download/v1/app.exe -> app.exe
//   - https://raw.githubusercontent.com/owner/repo/main/file.txt -> file.txt
//
// Anything else (including unparseable input) gets DEFAULT_FILENAME.
pub fn filename_from_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return DEFAULT_FILENAME.to_string();
    };

    let path = parsed.path();

    // Splitting "/owner/repo/..." on '/' yields ["", "owner", "repo", ...]
    let parts: Vec<&str> = path.split('/').collect();
    let last = parts.last().copied().unwrap_or_default();

    let name = if path.contains("/archive/refs/heads/") || path.contains("/archive/refs/tags/") {
        let repo = parts.get(2).copied().unwrap_or_default();
        let reference = last.strip_suffix(".zip").unwrap_or(last);
        Some(format!("{}-{}.zip", repo, reference))
    } else if path.contains("/releases/download/") || parsed.host_str() == Some(RAW_HOST) {
        Some(last.to_string())
    } else {
        None
    };

    // A trailing slash leaves an empty last segment; that is not a filename
    match name {
        Some(name) if !last.is_empty() => name,
        _ => DEFAULT_FILENAME.to_string(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - Binds a pattern or runs the else block, which must return
//    - `let Ok(parsed) = Url::parse(url) else { return ...; };`
//      keeps the happy path unindented
//
// 2. Why host_str() instead of comparing the whole URL string?
//    - "https://github.com.evil.io" starts with "https://github.com"
//    - Only the parsed hostname says which server is actually contacted
//
// 3. What does strip_suffix return?
//    - Some(rest) if the string ends with the suffix, None otherwise
//    - `.unwrap_or(last)` keeps the original when there is no ".zip"
// -----------------------------------------------------------------------------
