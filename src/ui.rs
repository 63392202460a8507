// UI layer: progress indicators, styled terminal output, the QR code,
// clipboard copy, and the `--json` report. Progress draws on stderr, so
// stdout carries nothing but the result.

use std::time::Duration;

use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use qrcode::render::unicode;
use qrcode::QrCode;
use serde::Serialize;
use tracing::warn;

use crate::api::UploadError;

/// Byte-scaled progress bar for a file transfer. The upload client reports
/// chunk sizes through its callback; the caller feeds them to `inc`.
pub fn transfer_bar(total: u64) -> ProgressBar {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{msg} {bar:40.green} {bytes}/{total_bytes} ({bytes_per_sec})")
            .unwrap(),
    );
    bar.set_message("Uploading");
    bar
}

/// Indeterminate spinner for URL uploads — the fetch happens server-side,
/// so there are no local bytes to count.
pub fn fetch_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Asking Catbox to fetch the URL...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Put the link on the system clipboard. Returns whether it worked; a
/// missing or broken clipboard is only worth a log line, not a failure.
pub fn copy_to_clipboard(text: &str) -> bool {
    let attempt = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match attempt {
        Ok(()) => true,
        Err(err) => {
            warn!("clipboard unavailable: {err}");
            false
        }
    }
}

/// Success output for humans: the link, a copy note when applicable, and
/// a scannable QR code.
pub fn print_success(link: &str, copied: bool) {
    println!("\n{}", "✅ Upload successful!".green().bold());
    println!("{}", link.cyan().bold());
    if copied {
        println!("{}", "📋 Copied to clipboard".dim());
    }
    print_qr(link);
}

/// One marked error line on stderr.
pub fn print_error(err: &UploadError) {
    eprintln!("{}", format!("❌ {err}").red());
}

pub fn print_json_success(link: &str) {
    println!("{}", success_report(link));
}

pub fn print_json_failure(err: &UploadError) {
    println!("{}", failure_report(&err.to_string()));
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

fn success_report(link: &str) -> String {
    serde_json::to_string(&JsonReport {
        success: true,
        url: Some(link),
        error: None,
    })
    .unwrap()
}

fn failure_report(message: &str) -> String {
    serde_json::to_string(&JsonReport {
        success: false,
        url: None,
        error: Some(message),
    })
    .unwrap()
}

fn print_qr(link: &str) {
    match QrCode::new(link.as_bytes()) {
        Ok(code) => {
            // Light-on-dark works better in most terminals.
            let image = code
                .render::<unicode::Dense1x2>()
                .dark_color(unicode::Dense1x2::Light)
                .light_color(unicode::Dense1x2::Dark)
                .build();
            println!("\n📱 QR Code:\n");
            println!("{image}");
        }
        Err(err) => warn!("could not render QR code: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_success_shape() {
        assert_eq!(
            success_report("https://files.catbox.moe/abc.png"),
            r#"{"success":true,"url":"https://files.catbox.moe/abc.png"}"#
        );
    }

    #[test]
    fn json_failure_shape() {
        assert_eq!(
            failure_report("file does not exist: /no/such/file"),
            r#"{"success":false,"error":"file does not exist: /no/such/file"}"#
        );
    }
}
