//! Puts the terminal back (raw mode off, main screen, mouse released, cursor
//! shown) on every exit path.

use crossterm::{
    cursor::Show,
    event::DisableMouseCapture,
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Restores the terminal on drop unless [`TerminalGuard::cleanup`] already did.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Create right after enabling raw mode.
    pub fn new() -> Self {
        Self { active: true }
    }

    /// Restore now and report errors; Drop then does nothing.
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore_terminal()
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore_terminal() {
                tracing::debug!(error = %e, "Terminal cleanup failed in Drop");
            }
        }
    }
}

fn restore_terminal() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, Show)?;
    stdout.flush()?;
    Ok(())
}

/// Restore the terminal before the default hook prints the panic, so the
/// message is readable.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = restore_terminal() {
            tracing::debug!(error = %e, "Failed to restore terminal in panic hook");
        }
        original_hook(panic_info);
    }));
}
