// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging and the interrupt handler, build
//   the upload client, classify the target, and hand the outcome to the
//   presentation layer.
// - Exit codes: 0 on success, 2 on any upload error, 130 when the user
//   interrupts an in-flight transfer.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catbox_cli::api::{CatboxClient, UploadError};
use catbox_cli::cli::Cli;
use catbox_cli::target::{classify, UploadTarget};
use catbox_cli::ui;

fn main() -> ExitCode {
    let args = Cli::parse();

    let client = match setup() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::from(2);
        }
    };

    match run(&args, &client) {
        Ok(link) => {
            let copied = args.copy && ui::copy_to_clipboard(&link);
            if args.json {
                ui::print_json_success(&link);
            } else {
                ui::print_success(&link, copied);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if args.json {
                ui::print_json_failure(&err);
            } else {
                ui::print_error(&err);
            }
            ExitCode::from(2)
        }
    }
}

/// Logging, the Ctrl+C handler, and the HTTP client. Diagnostic logging
/// goes to stderr and stays quiet unless `RUST_LOG` asks for it.
fn setup() -> anyhow::Result<CatboxClient> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to initialize logging")?;

    // An interrupt aborts the blocked transfer; exiting 130 tells it
    // apart from application errors.
    ctrlc::set_handler(|| {
        eprintln!("\nUpload cancelled by user.");
        std::process::exit(130);
    })
    .context("failed to install interrupt handler")?;

    CatboxClient::new().context("failed to build HTTP client")
}

/// Classify the target and run the matching upload, wiring up the
/// progress indicator that fits it.
fn run(args: &Cli, client: &CatboxClient) -> Result<String, UploadError> {
    match classify(&args.target) {
        UploadTarget::RemoteUrl(url) => {
            let spinner = ui::fetch_spinner();
            let result = client.upload_url(&url);
            spinner.finish_and_clear();
            result
        }
        UploadTarget::LocalFile(path) => {
            // Bar length is best-effort here; a missing or empty file is
            // rejected by the client before any byte is reported.
            let total = std::fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            let bar = ui::transfer_bar(total);
            let progress = bar.clone();
            let result = client.upload_file(&path, move |n| progress.inc(n));
            bar.finish_and_clear();
            result
        }
    }
}
