//! Best-effort external URL opening.
//!
//! Uses the platform opener: `open` on macOS, `xdg-open` elsewhere.
//! Failures are reported to the caller, never propagated as fatal - the
//! caller falls back to showing the URL.

use std::process::Command;

/// Open a URL in the user's browser.
pub fn open_external(url: &str) -> Result<(), String> {
    let opener = if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    Command::new(opener)
        .arg(url)
        .output()
        .map_err(|e| format!("{opener} failed: {e}"))
        .and_then(|output| {
            if output.status.success() {
                Ok(())
            } else {
                Err(format!("{opener} exited with: {}", output.status))
            }
        })
}
