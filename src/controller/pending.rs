//! The single pending-transition slot.
//!
//! At most one transition may be awaiting prompt resolution at a time.
//! Every exit path — confirm, cancel, error — must clear the slot; the
//! controller takes the value out with [`PendingTransition::take`] so a
//! forgotten reset is structurally impossible on the happy paths.

use crate::models::stage::EnquiryStage;

/// A stage/status change captured before its prompt resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingTransition {
    /// No transition waiting on user input.
    #[default]
    Idle,

    /// Stage change waiting for an auxiliary number.
    AwaitingNumber { lead_id: u64, target: EnquiryStage },

    /// Status change to not-fulfilled waiting for a reason.
    AwaitingReason { lead_id: u64 },

    /// Terminal-stage guard shown; resolves only to navigation.
    Warning { lead_id: u64 },
}

impl PendingTransition {
    pub fn is_idle(&self) -> bool {
        matches!(self, PendingTransition::Idle)
    }

    /// The lead a pending transition belongs to, if any.
    pub fn lead_id(&self) -> Option<u64> {
        match self {
            PendingTransition::Idle => None,
            PendingTransition::AwaitingNumber { lead_id, .. }
            | PendingTransition::AwaitingReason { lead_id }
            | PendingTransition::Warning { lead_id } => Some(*lead_id),
        }
    }

    /// Take the pending transition out, leaving the slot idle.
    pub fn take(&mut self) -> PendingTransition {
        std::mem::take(self)
    }

    /// Short label for tracing.
    pub fn label(&self) -> &'static str {
        match self {
            PendingTransition::Idle => "idle",
            PendingTransition::AwaitingNumber { .. } => "awaiting-number",
            PendingTransition::AwaitingReason { .. } => "awaiting-reason",
            PendingTransition::Warning { .. } => "warning",
        }
    }
}
