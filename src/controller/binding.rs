//! Control bindings: the client-held mirror of one selector.
//!
//! Each binding tracks two values: what the selector currently shows
//! (`displayed`) and the last server-confirmed value (`committed`). The
//! committed value is what a rollback restores, so a successful update must
//! commit before any later failure can revert.

/// Which selector of a row a binding represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRole {
    Stage,
    Status,
}

impl std::fmt::Display for ControlRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlRole::Stage => write!(f, "stage"),
            ControlRole::Status => write!(f, "status"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ControlBinding<V: Copy + PartialEq> {
    committed: V,
    displayed: V,
    busy: bool,
    disabled: bool,
    flash: bool,
    tooltip: Option<&'static str>,
}

impl<V: Copy + PartialEq> ControlBinding<V> {
    pub fn new(value: V) -> Self {
        Self {
            committed: value,
            displayed: value,
            busy: false,
            disabled: false,
            flash: false,
            tooltip: None,
        }
    }

    pub fn displayed(&self) -> V {
        self.displayed
    }

    pub fn committed(&self) -> V {
        self.committed
    }

    /// A control accepts input only when neither locked nor mid-update.
    pub fn is_enabled(&self) -> bool {
        !self.disabled && !self.busy
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn tooltip(&self) -> Option<&'static str> {
        self.tooltip
    }

    /// User picked a new value; only the displayed side moves.
    pub fn select(&mut self, value: V) {
        self.displayed = value;
    }

    /// Roll the displayed value back to the last committed one.
    pub fn revert(&mut self) {
        self.displayed = self.committed;
    }

    /// Server confirmed `value`: both sides move and the control flashes.
    pub fn commit(&mut self, value: V) {
        self.committed = value;
        self.displayed = value;
        self.flash = true;
    }

    /// Disable input and show the progress indicator.
    pub fn begin_busy(&mut self) {
        self.busy = true;
    }

    /// Clear the busy state, restoring the control's enabled status unless
    /// it has been locked in the meantime.
    pub fn end_busy(&mut self) {
        self.busy = false;
    }

    /// Permanently disable the control with an explanatory tooltip.
    pub fn lock(&mut self, tooltip: &'static str) {
        self.disabled = true;
        self.tooltip = Some(tooltip);
    }

    pub fn has_flash(&self) -> bool {
        self.flash
    }

    pub fn clear_flash(&mut self) {
        self.flash = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_moves_only_displayed() {
        let mut binding = ControlBinding::new(1);
        binding.select(2);
        assert_eq!(binding.displayed(), 2);
        assert_eq!(binding.committed(), 1);
    }

    #[test]
    fn test_revert_restores_committed() {
        let mut binding = ControlBinding::new(1);
        binding.select(2);
        binding.revert();
        assert_eq!(binding.displayed(), 1);
    }

    #[test]
    fn test_commit_moves_both_and_flashes() {
        let mut binding = ControlBinding::new(1);
        binding.select(2);
        binding.commit(2);
        assert_eq!(binding.committed(), 2);
        assert!(binding.has_flash());

        // A later rollback lands on the new value, not the original.
        binding.select(3);
        binding.revert();
        assert_eq!(binding.displayed(), 2);
    }

    #[test]
    fn test_busy_disables_and_end_busy_restores() {
        let mut binding = ControlBinding::new(1);
        binding.begin_busy();
        assert!(!binding.is_enabled());
        binding.end_busy();
        assert!(binding.is_enabled());
    }

    #[test]
    fn test_lock_survives_end_busy() {
        let mut binding = ControlBinding::new(1);
        binding.begin_busy();
        binding.lock("locked");
        binding.end_busy();
        assert!(!binding.is_enabled());
        assert!(binding.is_disabled());
        assert_eq!(binding.tooltip(), Some("locked"));
    }
}
