// Library root
// -----------
// The binary (`main.rs`) parses arguments and wires these modules together
// for a single upload.
//
// Module responsibilities:
// - `api`: the HTTP client, the server's response type and the local file
//   being uploaded.
// - `config`: resolves the API base URL from env, config file or default.
// - `ui`: the upload flow and how its result is rendered.
// - `output`: where rendered lines go (terminal or a capture buffer).
// - `clipboard`: best-effort copy of the resulting URL.
pub mod api;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod output;
pub mod ui;


pub use error::UploadError;
