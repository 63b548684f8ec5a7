// Error taxonomy for a single upload. Every variant is terminal: the binary
// prints it once and exits with status 1. Warnings (config file, clipboard)
// never become an `UploadError`.

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    /// The local file could not be opened, stat'ed or read.
    #[error("failed to {action} {}", path.display())]
    File {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The request could not be built, usually a malformed base URL.
    #[error("failed to create request")]
    Request(#[source] reqwest::Error),
    /// The request could not be sent or the response never arrived.
    #[error("failed to send request")]
    Network(#[source] reqwest::Error),
    /// The server answered with anything other than 200 OK.
    #[error("upload failed with status {status}: {body}")]
    Server { status: StatusCode, body: String },
    /// 200 OK, but the body is not the expected JSON document.
    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),
}

impl UploadError {
    pub(crate) fn file(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        UploadError::File {
            action,
            path: path.into(),
            source,
        }
    }

    /// Sort a reqwest failure into "could not build" vs "could not send".
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            UploadError::Request(err)
        } else {
            UploadError::Network(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
