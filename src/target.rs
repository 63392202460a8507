// Target classification: decides whether the single positional argument
// names a remote URL or a local file path. Purely syntactic — no
// filesystem or network access happens here.

use std::path::PathBuf;

use url::Url;

/// What the user asked us to upload. Produced once per invocation and
/// consumed exactly once by the upload client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    LocalFile(PathBuf),
    RemoteUrl(String),
}

/// Classify the raw argument. An input counts as a remote URL only when it
/// parses with an `http` or `https` scheme and a non-empty host; everything
/// else (relative paths, other schemes, empty strings, malformed URIs) is
/// treated as a filesystem path and left for the upload client to reject
/// if it does not exist.
pub fn classify(input: &str) -> UploadTarget {
    match Url::parse(input) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty()) =>
        {
            UploadTarget::RemoteUrl(input.to_string())
        }
        _ => UploadTarget::LocalFile(PathBuf::from(input)),
    }
}
