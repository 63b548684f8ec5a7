// UI layer: runs the single upload flow and renders its result. Network and
// file work is delegated to `api`; every line goes through an `Output`.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

use crate::api::{ApiClient, LocalFile, UploadResponse};
use crate::clipboard::Clipboard;
use crate::error::Result;
use crate::output::{self, Output, Target, Tone};

/// One upload, as requested on the command line.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub copy_url: bool,
}

/// Open, announce, upload, print, and optionally copy the URL.
///
/// Clipboard problems are reported and swallowed; everything else that goes
/// wrong is returned to the caller.
pub fn upload(
    api: &ApiClient,
    request: &UploadRequest,
    out: &mut dyn Output,
    clipboard: &mut dyn Clipboard,
) -> Result<UploadResponse> {
    let file = LocalFile::open(&request.path)?;
    out.info(&format!(
        "Uploading {} ({:.2} MB)...",
        file.name(),
        file.size_mb()
    ));

    let name = file.name().to_string();
    let contents = file.into_bytes()?;
    let response = output::spin("Waiting for server...", || api.upload(&name, contents))?;

    print_result(out, &response, Utc::now());

    if request.copy_url {
        copy_url(out, clipboard, &response.url);
    }

    Ok(response)
}

/// Render the success block for `response` as seen at `now`.
pub fn print_result(out: &mut dyn Output, response: &UploadResponse, now: DateTime<Utc>) {
    out.blank();
    out.success("Upload successful! 🚀");
    out.link(&format!("URL: {}", response.url));
    let expires = format!("Expires: {} ", response.expires.format("%Y-%m-%d"));
    let remaining = format!("(in {})", format_remaining(response.expires, now));
    out.write_line(
        Target::Stdout,
        &[(Tone::Info, expires.as_str()), (Tone::Plain, remaining.as_str())],
    );
}

/// Time left until `expires`, as `Xd Yh Zm`.
///
/// Components are truncated toward zero, so an expiration in the past gives
/// zero or negative numbers rather than an "expired" label.
pub fn format_remaining(expires: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let left = expires - now;
    let days = left.num_days();
    let hours = left.num_hours() % 24;
    let minutes = left.num_minutes() % 60;
    format!("{days}d {hours}h {minutes}m")
}

fn copy_url(out: &mut dyn Output, clipboard: &mut dyn Clipboard, url: &str) {
    match clipboard.set_text(url) {
        Ok(()) => {
            out.blank();
            out.success("URL copied to clipboard! 📋");
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "clipboard write failed");
            out.blank();
            out.warn("Note: Could not copy to clipboard. URL is displayed above.");
        }
    }
}
