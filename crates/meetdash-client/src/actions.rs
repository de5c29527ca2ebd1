//! Link actions: open in browser, copy to clipboard, timed redirect.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use meetdash_core::{RedirectCountdown, ShareState};

use crate::error::{ClientError, ClientResult};

/// Opens a URL in the default browser.
pub fn open_url(url: &str) -> ClientResult<()> {
    info!(url = %url, "opening URL");
    open::that(url).map_err(|e| ClientError::Action(format!("failed to open URL: {}", e)))?;
    Ok(())
}

/// Copies a URL to the clipboard and records the copied indicator.
pub fn copy_url(state: &mut ShareState, url: &str) -> ClientResult<()> {
    info!(url = %url, "copying URL to clipboard");

    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| ClientError::Action(format!("failed to access clipboard: {}", e)))?;
    clipboard
        .set_text(url)
        .map_err(|e| ClientError::Action(format!("failed to copy to clipboard: {}", e)))?;

    state.mark_copied(Utc::now());
    Ok(())
}

/// Drives a redirect countdown to completion, then opens the URL.
///
/// Prints one line per remaining second. Dropping the future (Ctrl-C,
/// dialog dismissed) cancels the redirect before it fires.
pub async fn redirect_after_countdown(mut countdown: RedirectCountdown) -> ClientResult<()> {
    while !countdown.is_done() {
        println!(
            "Opening {} in {}s... (Ctrl-C to cancel)",
            countdown.url(),
            countdown.remaining_secs()
        );
        tokio::time::sleep(Duration::from_secs(1)).await;
        countdown.tick();
    }
    open_url(countdown.url())
}
