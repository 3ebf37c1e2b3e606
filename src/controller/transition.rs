//! The stage/status transition controller.
//!
//! Owns the single pending-transition slot and drives the
//! optimistic-update/confirm/rollback cycle: a user-driven change is either
//! sent immediately or parked behind a prompt (number entry, reason
//! selection, terminal-stage warning) with the control visually reverted
//! until the prompt resolves. Results are reconciled into the board and
//! surfaced to the frontend as [`UiEffect`]s.

use std::time::Duration;

use tracing::debug;

use crate::api::{append_lead_query, LeadApi};
use crate::models::stage::{EnquiryStage, NumberKind, StageGate};
use crate::models::status::LeadStatus;

use super::board::LeadBoard;
use super::lock;
use super::pending::PendingTransition;

/// How long a successful control flashes before the styling self-clears.
pub const SUCCESS_FLASH: Duration = Duration::from_millis(1000);

/// Delay before the full board reload that follows a reason-flow status
/// update. A reload keeps every dependent view consistent without
/// reconciling each one incrementally.
pub const STATUS_RELOAD_DELAY: Duration = Duration::from_millis(1500);

/// Guidance shown when the user tries to set the terminal stage directly.
pub const INVOICE_FIRST_NOTICE: &str = "Please create an invoice for this enquiry from the \
     Invoices module before marking it as Invoice Sent.";

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    /// Auto-dismiss delay for notices of this level.
    pub fn dismiss_after(&self) -> Duration {
        match self {
            NoticeLevel::Success => Duration::from_millis(3000),
            NoticeLevel::Error => Duration::from_millis(5000),
        }
    }
}

/// Side effects for the frontend to apply after a controller call.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    /// Open the number-entry prompt with the kind's title/label/help.
    OpenNumberPrompt { kind: NumberKind },

    /// Open the reason-selection prompt.
    OpenReasonPrompt,

    /// Open the terminal-stage warning dialog. Frontends without a warning
    /// dialog fall back to showing [`INVOICE_FIRST_NOTICE`] instead.
    OpenInvoiceWarning { lead_id: u64 },

    /// Leave the board for an external view.
    Navigate { url: String },

    /// Reload the board from its data source after the delay.
    ScheduleReload { after: Duration },

    /// Show a transient, auto-dismissing notification.
    Notify { level: NoticeLevel, message: String },
}

fn notify(level: NoticeLevel, message: impl Into<String>) -> UiEffect {
    UiEffect::Notify {
        level,
        message: message.into(),
    }
}

pub struct TransitionController<A: LeadApi> {
    api: A,
    pending: PendingTransition,
    /// Absolute URL of the invoice-creation view the warning navigates to.
    invoice_add_url: String,
}

impl<A: LeadApi> TransitionController<A> {
    pub fn new(api: A, invoice_add_url: impl Into<String>) -> Self {
        Self {
            api,
            pending: PendingTransition::Idle,
            invoice_add_url: invoice_add_url.into(),
        }
    }

    pub fn pending(&self) -> &PendingTransition {
        &self.pending
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// A stage control's value was changed by the user.
    ///
    /// Gated targets revert the displayed value immediately and park the
    /// transition behind a prompt; nothing is sent until the prompt
    /// confirms. The terminal stage never produces an update call at all.
    pub fn request_stage_change(
        &mut self,
        board: &mut LeadBoard,
        lead_id: u64,
        target: EnquiryStage,
    ) -> Vec<UiEffect> {
        let Some(row) = board.row_mut(lead_id) else {
            return Vec::new();
        };
        if !row.stage.is_enabled() {
            return Vec::new();
        }
        row.stage.select(target);
        if target == row.stage.committed() {
            return Vec::new();
        }

        debug!(lead_id, target = target.wire_name(), "stage change requested");
        match target.gate() {
            StageGate::InvoiceFirst => {
                row.stage.revert();
                self.cancel_pending(board);
                self.pending = PendingTransition::Warning { lead_id };
                vec![UiEffect::OpenInvoiceWarning { lead_id }]
            }
            StageGate::NeedsNumber(kind) => {
                row.stage.revert();
                self.cancel_pending(board);
                self.pending = PendingTransition::AwaitingNumber { lead_id, target };
                vec![UiEffect::OpenNumberPrompt { kind }]
            }
            StageGate::Direct => self.perform_stage_update(board, lead_id, target, None),
        }
    }

    /// A status control's value was changed by the user. Only
    /// `not_fulfilled` prompts; everything else updates directly.
    pub fn request_status_change(
        &mut self,
        board: &mut LeadBoard,
        lead_id: u64,
        target: LeadStatus,
    ) -> Vec<UiEffect> {
        let Some(row) = board.row_mut(lead_id) else {
            return Vec::new();
        };
        if !row.status.is_enabled() {
            return Vec::new();
        }
        row.status.select(target);
        if target == row.status.committed() {
            return Vec::new();
        }

        debug!(lead_id, target = target.wire_name(), "status change requested");
        if target.requires_reason() {
            row.status.revert();
            self.cancel_pending(board);
            self.pending = PendingTransition::AwaitingReason { lead_id };
            return vec![UiEffect::OpenReasonPrompt];
        }
        self.perform_status_update(board, lead_id, target, None)
    }

    /// The number prompt confirmed with a validated, non-empty value.
    pub fn confirm_number(&mut self, board: &mut LeadBoard, number: &str) -> Vec<UiEffect> {
        let number = number.trim();
        if number.is_empty() {
            // The prompt blocks empty input; keep the pending slot intact.
            return Vec::new();
        }
        match self.pending.take() {
            PendingTransition::AwaitingNumber { lead_id, target } => {
                self.perform_stage_update(board, lead_id, target, Some(number))
            }
            other => {
                self.pending = other;
                Vec::new()
            }
        }
    }

    /// The reason prompt confirmed with a selected reason.
    pub fn confirm_reason(&mut self, board: &mut LeadBoard, reason_id: u64) -> Vec<UiEffect> {
        match self.pending.take() {
            PendingTransition::AwaitingReason { lead_id } => {
                self.perform_status_update(board, lead_id, LeadStatus::NotFulfilled, Some(reason_id))
            }
            other => {
                self.pending = other;
                Vec::new()
            }
        }
    }

    /// The terminal-stage warning confirmed: navigate to invoice creation.
    /// No local update call is ever issued for the terminal stage.
    pub fn confirm_warning(&mut self) -> Vec<UiEffect> {
        match self.pending.take() {
            PendingTransition::Warning { lead_id } => vec![UiEffect::Navigate {
                url: append_lead_query(&self.invoice_add_url, lead_id),
            }],
            other => {
                self.pending = other;
                Vec::new()
            }
        }
    }

    /// Cancel whatever transition is pending. Covers explicit cancel and
    /// implicit dismissal alike: the originating control is restored and
    /// the slot cleared. Idempotent.
    pub fn cancel_pending(&mut self, board: &mut LeadBoard) {
        match self.pending.take() {
            PendingTransition::Idle => {}
            PendingTransition::AwaitingNumber { lead_id, .. } => {
                debug!(lead_id, "pending stage transition cancelled");
                if let Some(row) = board.row_mut(lead_id) {
                    row.stage.revert();
                }
            }
            PendingTransition::AwaitingReason { lead_id } => {
                debug!(lead_id, "pending status transition cancelled");
                if let Some(row) = board.row_mut(lead_id) {
                    row.status.revert();
                }
            }
            // The control was already reverted when the warning opened.
            PendingTransition::Warning { .. } => {}
        }
    }

    fn perform_stage_update(
        &mut self,
        board: &mut LeadBoard,
        lead_id: u64,
        target: EnquiryStage,
        number: Option<&str>,
    ) -> Vec<UiEffect> {
        let Some(row) = board.row_mut(lead_id) else {
            return Vec::new();
        };
        row.stage.begin_busy();

        let result = self.api.update_stage(lead_id, target, number);

        match result {
            Ok(update) => {
                if let Some(row) = board.row_mut(lead_id) {
                    row.stage.end_busy();
                    row.stage.commit(target);
                    if let Some(pi) = update.proforma_invoice_number {
                        row.pi_number = (!pi.is_empty()).then_some(pi);
                    }
                    if let Some(inv) = update.invoice_number {
                        row.invoice_number = (!inv.is_empty()).then_some(inv);
                    }
                    // The server may auto-fulfil the status alongside.
                    if let Some(status) = update.lead_status {
                        if row.status.committed() != status {
                            row.status.commit(status);
                        }
                    }
                }
                if update.is_locked {
                    lock::apply_lock(board, lead_id);
                }
                let message = update
                    .message
                    .unwrap_or_else(|| "Stage updated successfully".to_string());
                vec![notify(NoticeLevel::Success, message)]
            }
            Err(err) => {
                if let Some(row) = board.row_mut(lead_id) {
                    row.stage.end_busy();
                    row.stage.revert();
                }
                vec![notify(
                    NoticeLevel::Error,
                    format!("Failed to update stage: {err}"),
                )]
            }
        }
    }

    fn perform_status_update(
        &mut self,
        board: &mut LeadBoard,
        lead_id: u64,
        target: LeadStatus,
        reason_id: Option<u64>,
    ) -> Vec<UiEffect> {
        let Some(row) = board.row_mut(lead_id) else {
            return Vec::new();
        };
        row.status.begin_busy();

        let result = self.api.update_status(lead_id, target, reason_id);

        match result {
            Ok(update) => {
                if let Some(row) = board.row_mut(lead_id) {
                    row.status.end_busy();
                    row.status.commit(target);
                }
                let message = update
                    .message
                    .unwrap_or_else(|| "Status updated successfully".to_string());
                let mut effects = vec![notify(NoticeLevel::Success, message)];
                if reason_id.is_some() {
                    effects.push(UiEffect::ScheduleReload {
                        after: STATUS_RELOAD_DELAY,
                    });
                }
                effects
            }
            Err(err) => {
                if let Some(row) = board.row_mut(lead_id) {
                    row.status.end_busy();
                    row.status.revert();
                }
                vec![notify(
                    NoticeLevel::Error,
                    format!("Failed to update status: {err}"),
                )]
            }
        }
    }
}
