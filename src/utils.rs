use std::io::{self, Write};
use std::sync::Once;

use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Restore the terminal to a clean state: leave the alternate screen,
/// disable raw mode and show the cursor. Best effort.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout, LeaveAlternateScreen, crossterm::cursor::Show);
    let _ = stdout.flush();
}

/// Install a panic hook that restores terminal state before panicking.
/// Safe to call multiple times - only installs once.
pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            cleanup_terminal();
            default_hook(panic_info);
        }));
    });
}

/// Truncate a string safely by character count, not byte count.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
