//! Temp-file downloads.
//!
//! Download-style endpoints write the rendered PDF to the temp directory and
//! stream it back from disk. The file is owned by a [`TempFile`] guard that
//! travels inside the response body stream, so it is deleted when the body
//! is dropped: after the last chunk is sent, or when the client goes away
//! mid-transfer.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use jiff::Timestamp;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

const CHUNK_SIZE: usize = 64 * 1024;

static LAST_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp for temp names, strictly increasing within the
/// process so two requests in the same millisecond never share a file.
pub fn unique_millis() -> i64 {
    let now = Timestamp::now().as_millisecond();
    let previous = LAST_MILLIS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

/// The temp directory for download-style endpoints.
#[derive(Debug, Clone)]
pub struct TempDownloads {
    dir: PathBuf,
}

impl TempDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` to `{dir}/{name}`, creating the directory on demand.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> io::Result<TempFile> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(name);
        let file = TempFile { path };
        tokio::fs::write(&file.path, bytes).await?;
        debug!(path = %file.path.display(), size = bytes.len(), "wrote temp file");
        Ok(file)
    }
}

/// A file in the temp directory, removed when dropped.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the file as a response body. The guard moves into the stream.
    pub async fn into_body(self) -> io::Result<Body> {
        let file = tokio::fs::File::open(&self.path).await?;
        let stream = futures::stream::unfold(Some((file, self)), |state| async move {
            let (mut file, guard) = state?;
            let mut buf = vec![0u8; CHUNK_SIZE];
            match file.read(&mut buf).await {
                Ok(n) if n > 0 => {
                    buf.truncate(n);
                    Some((Ok(Bytes::from(buf)), Some((file, guard))))
                }
                outcome => {
                    drop(file);
                    drop(guard);
                    outcome.err().map(|e| (Err(e), None))
                }
            }
        });
        Ok(Body::from_stream(stream))
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed temp file"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove temp file"),
        }
    }
}

/// `application/pdf` attachment response.
pub fn attachment(body: impl Into<Body>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body.into(),
    )
        .into_response()
}
