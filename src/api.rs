// API client module: contains a small blocking HTTP client that talks to
// the Catbox upload endpoint. Both upload shapes (local file, remote URL)
// go through the same response validation, since Catbox reports some
// failures as plain-text 200 responses rather than HTTP error codes.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

/// The fixed upload endpoint. Not configurable at runtime.
const CATBOX_API: &str = "https://catbox.moe/user/api.php";

/// Every genuine success response is a link starting with this prefix.
const LINK_PREFIX: &str = "https://files.catbox.moe/";

/// Catbox rejects anonymous uploads above this size.
const MAX_SIZE_MB: u64 = 199;
const MAX_SIZE_BYTES: u64 = MAX_SIZE_MB * 1024 * 1024;

/// File uploads push the whole body over the wire, so they get a generous
/// deadline; URL uploads only send a short form and wait for the remote
/// fetch to finish server-side.
const FILE_TIMEOUT: Duration = Duration::from_secs(120);
const URL_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything that can go wrong during one upload. All variants are
/// terminal: the caller reports them and exits, there is no retry.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("file is {size} bytes, over the {limit_mb} MB limit")]
    TooLarge { size: u64, limit_mb: u64 },

    #[error("HTTP {0}: upload failed")]
    Http(StatusCode),

    /// Catbox answered 200 with an error message instead of a link. The
    /// message is carried verbatim.
    #[error("{0}")]
    RemoteRejected(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Wraps the opened file so every chunk reqwest pulls out of it is reported
/// to the progress callback before it goes on the wire. The callback
/// receives chunk sizes, so the running total is non-decreasing and lands
/// exactly on the file size when the read completes.
struct ProgressReader<R> {
    inner: R,
    on_read: Box<dyn FnMut(u64) + Send>,
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            (self.on_read)(n as u64);
        }
        Ok(n)
    }
}

/// Upload client holding the blocking reqwest client and the endpoint URL.
/// One instance serves a whole invocation; both operations reuse the same
/// connection pool.
pub struct CatboxClient {
    client: Client,
    endpoint: String,
}

impl CatboxClient {
    pub fn new() -> Result<Self, UploadError> {
        let client = Client::builder().build()?;
        Ok(CatboxClient {
            client,
            endpoint: CATBOX_API.to_string(),
        })
    }

    /// Point the client at an alternate endpoint, e.g. a local mock server.
    #[cfg(test)]
    fn with_endpoint(endpoint: impl Into<String>) -> Self {
        CatboxClient {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Upload a local file as a streamed multipart form. `on_read` is
    /// called with the size of every chunk read from the file, which is
    /// how the CLI drives its progress bar.
    ///
    /// Preconditions are checked before anything touches the network:
    /// the file must exist, be non-empty, and fit under the size limit.
    pub fn upload_file<F>(&self, path: &Path, on_read: F) -> Result<String, UploadError>
    where
        F: FnMut(u64) + Send + 'static,
    {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(UploadError::NotFound(path.to_path_buf()))
            }
            Err(err) => return Err(err.into()),
        };

        let size = meta.len();
        if size == 0 {
            return Err(UploadError::EmptyFile(path.to_path_buf()));
        }
        if size > MAX_SIZE_BYTES {
            return Err(UploadError::TooLarge {
                size,
                limit_mb: MAX_SIZE_MB,
            });
        }

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.bin")
            .to_string();

        debug!(path = %path.display(), size, mime = %mime, "uploading file");

        // The reader (and with it the file handle) is moved into the
        // request body, so it is released on every exit path once the
        // call returns.
        let reader = ProgressReader {
            inner: File::open(path)?,
            on_read: Box::new(on_read),
        };
        let part = multipart::Part::reader_with_length(reader, size)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = multipart::Form::new()
            .text("reqtype", "fileupload")
            .text("userhash", "")
            .part("fileToUpload", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .timeout(FILE_TIMEOUT)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        validate_response(status, &body)
    }

    /// Ask Catbox to fetch a remote URL itself. No local bytes are
    /// streamed, so there is no quantified progress for this operation.
    pub fn upload_url(&self, url: &str) -> Result<String, UploadError> {
        debug!(url, "requesting remote fetch");

        let params = [("reqtype", "urlupload"), ("userhash", ""), ("url", url)];
        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .timeout(URL_TIMEOUT)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        validate_response(status, &body)
    }
}

/// Check a Catbox response against the expected contract. A non-200 status
/// fails outright and the body is not trusted; a 200 body that is not a
/// canonical link is the endpoint's own error text.
fn validate_response(status: StatusCode, body: &str) -> Result<String, UploadError> {
    if status != StatusCode::OK {
        return Err(UploadError::Http(status));
    }

    let text = body.trim();
    if !text.starts_with(LINK_PREFIX) {
        return Err(UploadError::RemoteRejected(text.to_string()));
    }

    Ok(text.to_string())
}
