// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to perform one upload per invocation.
//
// Module responsibilities:
// - `target`: Decides whether the positional argument names a remote URL
//   or a local file path. Purely syntactic.
// - `api`: The upload client — size checks, multipart/form request
//   construction, progress reporting, and validation of the Catbox
//   response contract.
// - `cli`: The clap argument surface.
// - `ui`: Terminal presentation — progress indicators, styled output,
//   QR rendering, clipboard copy, and the `--json` report.
//
// Keeping this separation makes it possible to test the upload logic
// against a local mock server without any terminal plumbing.
pub mod api;
pub mod cli;
pub mod target;
pub mod ui;
