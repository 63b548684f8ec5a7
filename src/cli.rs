use clap::Parser;
use std::path::PathBuf;

use crate::ui::UploadRequest;

#[derive(Parser, Debug)]
#[command(name = "slop")]
#[command(about = "Upload files to the temporary file server")]
#[command(version)]
#[command(long_about = "A CLI tool for uploading files to the temporary file server.
Files are automatically deleted after 7 days.")]
#[command(after_help = "Examples:
  slop image.png               Upload a file and copy URL to clipboard
  slop --no-copy file.txt      Upload without copying to clipboard")]
pub struct Cli {
    /// File to upload
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Don't copy URL to clipboard
    #[arg(long = "no-copy")]
    pub no_copy: bool,
}

impl Cli {
    pub fn request(&self) -> UploadRequest {
        UploadRequest {
            path: self.file.clone(),
            copy_url: !self.no_copy,
        }
    }
}
