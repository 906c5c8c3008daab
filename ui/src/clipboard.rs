use crate::error::{AppError, AppResult};
use copypasta::{ClipboardContext, ClipboardProvider};

/// Puts `text` on the system clipboard.
pub fn copy_to_clipboard(text: &str) -> AppResult<()> {
    let mut ctx = ClipboardContext::new()
        .map_err(|e| AppError::Clipboard(format!("Failed to create clipboard context: {e}")))?;

    ctx.set_contents(text.to_owned())
        .map_err(|e| AppError::Clipboard(format!("Failed to set clipboard contents: {e}")))?;

    log::debug!("Copied {} characters to the clipboard", text.chars().count());
    Ok(())
}
