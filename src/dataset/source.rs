// Data source references — a local path or a remote URL.
//
// The reference is opaque to every stage after the loader; it only serves as
// the fetch target and as the cache key.

use std::fmt;
use std::path::PathBuf;

/// Where a dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl DataSource {
    /// Interpret a user-supplied reference.
    ///
    /// Anything starting with `http://` or `https://` is a URL; everything
    /// else is a filesystem path. GitHub "blob" page URLs are rewritten to
    /// their raw-content equivalent so the fetch returns CSV, not HTML.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            DataSource::Url(github_blob_to_raw(reference))
        } else {
            DataSource::Path(PathBuf::from(reference))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

/// Convert a GitHub blob URL to a raw.githubusercontent.com URL.
///
/// Blob format: `https://github.com/owner/repo/blob/ref/path/to/file.csv`
/// Raw format:  `https://raw.githubusercontent.com/owner/repo/ref/path/to/file.csv`
fn github_blob_to_raw(url: &str) -> String {
    let rest = match url.strip_prefix("https://github.com/") {
        Some(r) => r,
        None => return url.to_string(),
    };

    // owner / repo / "blob" / ref / path...
    let parts: Vec<&str> = rest.splitn(5, '/').collect();
    if parts.len() != 5 || parts[2] != "blob" {
        return url.to_string();
    }
    let (owner, repo, git_ref, path) = (parts[0], parts[1], parts[3], parts[4]);
    let path = path.split(['?', '#']).next().unwrap_or(path);

    format!("https://raw.githubusercontent.com/{owner}/{repo}/{git_ref}/{path}")
}
