// API client module: a small blocking HTTP client for the temporary file
// server. One multipart POST per process, no retries, no client timeout.

use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, UploadError};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Client holding a reqwest blocking client and the base URL of the
/// upload service (scheme + host, no path).
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// What the server returns for a successful upload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub id: String,
    pub url: String,
    pub expires: DateTime<Utc>,
}

/// A local file opened for upload. The handle is closed when this is
/// dropped, whichever way the upload ends.
#[derive(Debug)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
    file: File,
}

impl LocalFile {
    /// Open `path` and read its size.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| UploadError::file("open", path, e))?;
        let size = file
            .metadata()
            .map_err(|e| UploadError::file("get file info for", path, e))?
            .len();
        Ok(LocalFile {
            path: path.to_path_buf(),
            name: base_name(path),
            size,
            file,
        })
    }

    /// File name with directory components stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Size in mebibytes, as shown in the progress line.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / BYTES_PER_MB
    }

    /// Read the whole file into memory.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        let mut contents = Vec::with_capacity(self.size as usize);
        self.file
            .read_to_end(&mut contents)
            .map_err(|e| UploadError::file("read", &self.path, e))?;
        Ok(contents)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ApiClient {
    /// Build a client for `base_url`. The URL is not validated here; a bad
    /// value shows up as `UploadError::Request` when uploading.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// `<base>/upload`, with exactly one slash between the two.
    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url.trim_end_matches('/'))
    }

    /// POST `contents` as the multipart field `file` and decode the reply.
    ///
    /// Only an exact `200 OK` counts as success; any other status is
    /// returned as `UploadError::Server` with the body text attached.
    pub fn upload(&self, file_name: &str, contents: Vec<u8>) -> Result<UploadResponse> {
        let url = self.upload_url();
        tracing::debug!(%url, bytes = contents.len(), "sending upload");

        let part = multipart::Part::bytes(contents).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);

        let res = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(UploadError::from_send)?;

        let status = res.status();
        tracing::debug!(%status, "upload response");
        let body = res.bytes().map_err(UploadError::Network)?;

        if status != StatusCode::OK {
            return Err(UploadError::Server {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(UploadError::Decode)
    }
}
