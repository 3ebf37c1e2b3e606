//! Lock enforcement for terminal-stage leads.
//!
//! Lock state is derived, never stored: a lead whose stage equals the
//! terminal value gets both controls disabled for the lifetime of the
//! board. `scan_on_load` re-derives it from rendered data at startup, which
//! keeps locking idempotent across reloads.

use tracing::debug;

use super::board::LeadBoard;

/// Tooltip set on both controls of a locked lead.
pub const LOCKED_TOOLTIP: &str =
    "This enquiry is locked and cannot be modified after fulfillment";

/// Disable the stage and status controls of a lead and mark its row.
pub fn apply_lock(board: &mut LeadBoard, lead_id: u64) {
    if let Some(row) = board.row_mut(lead_id) {
        row.stage.lock(LOCKED_TOOLTIP);
        row.status.lock(LOCKED_TOOLTIP);
        row.locked = true;
        debug!(lead_id, "lead locked");
    }
}

/// Lock every lead already at the terminal stage. Returns how many rows
/// were locked.
pub fn scan_on_load(board: &mut LeadBoard) -> usize {
    let terminal: Vec<u64> = board
        .rows()
        .iter()
        .filter(|row| row.stage.displayed().is_terminal())
        .map(|row| row.lead_id)
        .collect();

    for lead_id in &terminal {
        apply_lock(board, *lead_id);
    }
    debug!(count = terminal.len(), "terminal leads locked on load");
    terminal.len()
}
