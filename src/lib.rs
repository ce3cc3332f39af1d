// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) only parses arguments and hands them to `ui::run`.
//
// Module responsibilities:
// - `config`: Resolves the access token, API base URL and timeout into a
//   single `Config` value that is passed to the client.
// - `api`: Request types, form payloads and the blocking Graph API client.
// - `cli`: The `clap` argument model.
// - `ui`: Front end glue: logging, spinner, dispatch and output.
// - `error`: The error taxonomy shared by all of the above.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use error::{Error, Result};
