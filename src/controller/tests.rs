use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use crate::api::{ApiError, LeadApi, StageUpdate, StatusUpdate};
use crate::controller::lock;
use crate::controller::prompt::{NumberPrompt, ReasonPrompt, REASON_REQUIRED};
use crate::controller::{LeadBoard, NoticeLevel, PendingTransition, TransitionController, UiEffect};
use crate::models::stage::{EnquiryStage, NumberKind};
use crate::models::status::LeadStatus;
use crate::models::{Lead, Reason};
use crate::snapshot::BoardSnapshot;

// =========================================================================
// Test fixtures
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
struct StageCall {
    lead_id: u64,
    stage: EnquiryStage,
    number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct StatusCall {
    lead_id: u64,
    status: LeadStatus,
    reason_id: Option<u64>,
}

enum Scripted<T> {
    Ok(T),
    Rejected(String),
    Malformed,
}

/// Scripted [`LeadApi`]: records every call, answers from a queue, and
/// defaults to a plain success when the queue is empty.
#[derive(Default)]
struct MockApi {
    stage_calls: RefCell<Vec<StageCall>>,
    status_calls: RefCell<Vec<StatusCall>>,
    stage_responses: RefCell<VecDeque<Scripted<StageUpdate>>>,
    status_responses: RefCell<VecDeque<Scripted<StatusUpdate>>>,
}

fn stage_ok() -> StageUpdate {
    StageUpdate {
        success: true,
        error: None,
        message: None,
        enquiry_stage: None,
        lead_status: None,
        is_locked: false,
        proforma_invoice_number: None,
        invoice_number: None,
    }
}

fn status_ok() -> StatusUpdate {
    StatusUpdate {
        success: true,
        error: None,
        message: None,
        status: None,
    }
}

fn json_error() -> serde_json::Error {
    serde_json::from_str::<serde_json::Value>("{").unwrap_err()
}

impl<T> Scripted<T> {
    fn resolve(self) -> Result<T, ApiError> {
        match self {
            Scripted::Ok(body) => Ok(body),
            Scripted::Rejected(message) => Err(ApiError::Rejected(message)),
            Scripted::Malformed => Err(ApiError::MalformedBody(json_error())),
        }
    }
}

impl MockApi {
    fn push_stage(&self, response: Scripted<StageUpdate>) {
        self.stage_responses.borrow_mut().push_back(response);
    }

    fn push_status(&self, response: Scripted<StatusUpdate>) {
        self.status_responses.borrow_mut().push_back(response);
    }

    fn stage_calls(&self) -> Vec<StageCall> {
        self.stage_calls.borrow().clone()
    }

    fn status_calls(&self) -> Vec<StatusCall> {
        self.status_calls.borrow().clone()
    }
}

impl LeadApi for MockApi {
    fn update_stage(
        &self,
        lead_id: u64,
        stage: EnquiryStage,
        number: Option<&str>,
    ) -> Result<StageUpdate, ApiError> {
        self.stage_calls.borrow_mut().push(StageCall {
            lead_id,
            stage,
            number: number.map(str::to_string),
        });
        match self.stage_responses.borrow_mut().pop_front() {
            Some(scripted) => scripted.resolve(),
            None => Ok(stage_ok()),
        }
    }

    fn update_status(
        &self,
        lead_id: u64,
        status: LeadStatus,
        reason_id: Option<u64>,
    ) -> Result<StatusUpdate, ApiError> {
        self.status_calls.borrow_mut().push(StatusCall {
            lead_id,
            status,
            reason_id,
        });
        match self.status_responses.borrow_mut().pop_front() {
            Some(scripted) => scripted.resolve(),
            None => Ok(status_ok()),
        }
    }

    fn lead_products(
        &self,
        _lead_id: u64,
    ) -> Result<Vec<crate::models::LeadProduct>, ApiError> {
        Ok(vec![])
    }
}

fn lead(id: u64, stage: EnquiryStage, status: LeadStatus) -> Lead {
    Lead {
        id,
        contact_name: format!("Contact {id}"),
        company_name: String::new(),
        enquiry_stage: stage,
        lead_status: status,
        proforma_invoice_number: None,
        invoice_number: None,
        is_locked: false,
        updated_at: None,
    }
}

fn test_board() -> LeadBoard {
    let snapshot = BoardSnapshot {
        leads: vec![
            lead(42, EnquiryStage::QuotationSent, LeadStatus::Open),
            lead(7, EnquiryStage::InvoiceSent, LeadStatus::Fulfilled),
            lead(9, EnquiryStage::EnquiryReceived, LeadStatus::Open),
        ],
        reasons: vec![
            Reason {
                id: 1,
                name: "No response".to_string(),
            },
            Reason {
                id: 3,
                name: "Price too high".to_string(),
            },
        ],
    };
    LeadBoard::from_snapshot(&snapshot)
}

fn controller() -> TransitionController<MockApi> {
    TransitionController::new(MockApi::default(), "https://crm.example.com/invoices/add/")
}

fn has_error_notice(effects: &[UiEffect]) -> bool {
    effects.iter().any(|e| {
        matches!(
            e,
            UiEffect::Notify {
                level: NoticeLevel::Error,
                ..
            }
        )
    })
}

// =========================================================================
// Lock enforcer
// =========================================================================

#[test]
fn test_scan_on_load_locks_only_terminal_rows() {
    let mut board = test_board();
    let locked = lock::scan_on_load(&mut board);
    assert_eq!(locked, 1);

    let terminal = board.row(7).unwrap();
    assert!(!terminal.stage.is_enabled());
    assert!(!terminal.status.is_enabled());
    assert!(terminal.locked);
    assert_eq!(terminal.stage.tooltip(), Some(lock::LOCKED_TOOLTIP));

    for id in [42, 9] {
        let row = board.row(id).unwrap();
        assert!(row.stage.is_enabled(), "lead {id} must stay enabled");
        assert!(row.status.is_enabled(), "lead {id} must stay enabled");
        assert!(!row.locked);
    }
}

#[test]
fn test_scan_on_load_is_idempotent() {
    let mut board = test_board();
    assert_eq!(lock::scan_on_load(&mut board), 1);
    assert_eq!(lock::scan_on_load(&mut board), 1);
    assert_eq!(board.locked_count(), 1);
}

#[test]
fn test_changes_on_locked_controls_are_ignored() {
    let mut board = test_board();
    lock::scan_on_load(&mut board);
    let mut ctl = controller();

    let effects = ctl.request_stage_change(&mut board, 7, EnquiryStage::Negotiation);
    assert!(effects.is_empty());
    let effects = ctl.request_status_change(&mut board, 7, LeadStatus::Open);
    assert!(effects.is_empty());
    assert!(ctl.api().stage_calls().is_empty());
    assert!(ctl.api().status_calls().is_empty());
}

// =========================================================================
// Stage gating
// =========================================================================

#[test]
fn test_number_gated_stage_reverts_before_any_network_call() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::ProformaInvoiceSent);

    assert_eq!(
        effects,
        vec![UiEffect::OpenNumberPrompt {
            kind: NumberKind::Proforma
        }]
    );
    let row = board.row(42).unwrap();
    assert_eq!(row.stage.displayed(), EnquiryStage::QuotationSent);
    assert!(ctl.api().stage_calls().is_empty(), "no call before confirm");
    assert_eq!(
        *ctl.pending(),
        PendingTransition::AwaitingNumber {
            lead_id: 42,
            target: EnquiryStage::ProformaInvoiceSent
        }
    );
}

#[test]
fn test_invoice_made_prompts_for_invoice_number() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::InvoiceMade);
    assert_eq!(
        effects,
        vec![UiEffect::OpenNumberPrompt {
            kind: NumberKind::Invoice
        }]
    );
    assert!(ctl.api().stage_calls().is_empty());
}

#[test]
fn test_terminal_stage_never_issues_update_call() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::InvoiceSent);
    assert_eq!(effects, vec![UiEffect::OpenInvoiceWarning { lead_id: 42 }]);
    assert_eq!(
        board.row(42).unwrap().stage.displayed(),
        EnquiryStage::QuotationSent
    );

    let effects = ctl.confirm_warning();
    assert_eq!(
        effects,
        vec![UiEffect::Navigate {
            url: "https://crm.example.com/invoices/add/?lead=42".to_string()
        }]
    );
    assert!(
        ctl.api().stage_calls().is_empty(),
        "terminal stage must never produce an update call"
    );
    assert!(ctl.pending().is_idle());
}

#[test]
fn test_warning_cancel_leaves_no_state_change() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.request_stage_change(&mut board, 42, EnquiryStage::InvoiceSent);
    ctl.cancel_pending(&mut board);

    assert!(ctl.pending().is_idle());
    let row = board.row(42).unwrap();
    assert_eq!(row.stage.displayed(), EnquiryStage::QuotationSent);
    assert_eq!(row.stage.committed(), EnquiryStage::QuotationSent);
    assert!(ctl.api().stage_calls().is_empty());
}

#[test]
fn test_direct_stage_change_updates_immediately() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);

    assert_eq!(
        ctl.api().stage_calls(),
        vec![StageCall {
            lead_id: 42,
            stage: EnquiryStage::Negotiation,
            number: None,
        }]
    );
    let row = board.row(42).unwrap();
    assert_eq!(row.stage.committed(), EnquiryStage::Negotiation);
    assert!(row.stage.has_flash());
    assert!(row.stage.is_enabled());
    assert!(matches!(
        effects.as_slice(),
        [UiEffect::Notify {
            level: NoticeLevel::Success,
            ..
        }]
    ));
}

#[test]
fn test_stage_change_to_current_value_is_a_noop() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::QuotationSent);
    assert!(effects.is_empty());
    assert!(ctl.api().stage_calls().is_empty());
}

// =========================================================================
// Prompt confirm / cancel
// =========================================================================

#[test]
fn test_cancel_restores_value_and_clears_pending_idempotently() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.request_stage_change(&mut board, 42, EnquiryStage::ProformaInvoiceSent);
    assert!(!ctl.pending().is_idle());

    ctl.cancel_pending(&mut board);
    assert!(ctl.pending().is_idle());
    assert_eq!(
        board.row(42).unwrap().stage.displayed(),
        EnquiryStage::QuotationSent
    );

    // Cancelling again has no further effect.
    ctl.cancel_pending(&mut board);
    assert!(ctl.pending().is_idle());
    assert_eq!(
        board.row(42).unwrap().stage.displayed(),
        EnquiryStage::QuotationSent
    );
    assert!(ctl.api().stage_calls().is_empty());
}

#[test]
fn test_proforma_number_flow_end_to_end() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.request_stage_change(&mut board, 42, EnquiryStage::ProformaInvoiceSent);

    // Empty confirm is blocked by the prompt: invalid marker, no call.
    let mut prompt = NumberPrompt::new(NumberKind::Proforma);
    assert_eq!(prompt.confirm(), None);
    assert!(prompt.invalid);
    assert!(ctl.api().stage_calls().is_empty());

    // Typing clears the marker; a valid confirm hands the value over.
    for c in "PI-001".chars() {
        prompt.push_char(c);
    }
    assert!(!prompt.invalid);
    let number = prompt.confirm().unwrap();
    ctl.push_scripted_proforma(); // scripted response below

    let _effects = ctl.confirm_number(&mut board, &number);

    assert_eq!(
        ctl.api().stage_calls(),
        vec![StageCall {
            lead_id: 42,
            stage: EnquiryStage::ProformaInvoiceSent,
            number: Some("PI-001".to_string()),
        }]
    );
    let row = board.row(42).unwrap();
    assert_eq!(row.stage.displayed(), EnquiryStage::ProformaInvoiceSent);
    assert_eq!(row.stage.committed(), EnquiryStage::ProformaInvoiceSent);
    assert_eq!(row.pi_number.as_deref(), Some("PI-001"));
    assert!(ctl.pending().is_idle());
}

#[test]
fn test_confirm_number_without_pending_is_a_noop() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.confirm_number(&mut board, "PI-001");
    assert!(effects.is_empty());
    assert!(ctl.api().stage_calls().is_empty());
}

#[test]
fn test_number_input_is_trimmed() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.request_stage_change(&mut board, 42, EnquiryStage::ProformaInvoiceSent);
    ctl.confirm_number(&mut board, "  PI-001  ");

    assert_eq!(
        ctl.api().stage_calls()[0].number.as_deref(),
        Some("PI-001")
    );
}

#[test]
fn test_reason_flow_end_to_end() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_status_change(&mut board, 42, LeadStatus::NotFulfilled);
    assert_eq!(effects, vec![UiEffect::OpenReasonPrompt]);
    // The control reverts immediately, before any call.
    assert_eq!(board.row(42).unwrap().status.displayed(), LeadStatus::Open);
    assert!(ctl.api().status_calls().is_empty());

    // Confirming with nothing selected blocks with an inline message.
    let mut prompt = ReasonPrompt::default();
    assert_eq!(prompt.confirm(&board.reasons), None);
    assert_eq!(prompt.error, Some(REASON_REQUIRED));
    assert!(ctl.api().status_calls().is_empty());

    // Select "Price too high" (id 3) and confirm.
    prompt.select_next(board.reasons.len());
    prompt.select_next(board.reasons.len());
    let reason_id = prompt.confirm(&board.reasons).unwrap();
    assert_eq!(reason_id, 3);

    let effects = ctl.confirm_reason(&mut board, reason_id);

    assert_eq!(
        ctl.api().status_calls(),
        vec![StatusCall {
            lead_id: 42,
            status: LeadStatus::NotFulfilled,
            reason_id: Some(3),
        }]
    );
    assert_eq!(
        board.row(42).unwrap().status.committed(),
        LeadStatus::NotFulfilled
    );
    assert!(effects.contains(&UiEffect::ScheduleReload {
        after: Duration::from_millis(1500)
    }));
}

#[test]
fn test_direct_status_update_does_not_schedule_reload() {
    let mut board = test_board();
    let mut ctl = controller();

    let effects = ctl.request_status_change(&mut board, 42, LeadStatus::Fulfilled);

    assert_eq!(
        ctl.api().status_calls(),
        vec![StatusCall {
            lead_id: 42,
            status: LeadStatus::Fulfilled,
            reason_id: None,
        }]
    );
    assert!(!effects
        .iter()
        .any(|e| matches!(e, UiEffect::ScheduleReload { .. })));
}

#[test]
fn test_opening_a_second_prompt_cancels_the_first() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.request_stage_change(&mut board, 42, EnquiryStage::ProformaInvoiceSent);
    ctl.request_status_change(&mut board, 9, LeadStatus::NotFulfilled);

    assert_eq!(*ctl.pending(), PendingTransition::AwaitingReason { lead_id: 9 });
    // The first transition's control stays reverted.
    assert_eq!(
        board.row(42).unwrap().stage.displayed(),
        EnquiryStage::QuotationSent
    );
}

// =========================================================================
// Optimistic commit / rollback
// =========================================================================

#[test]
fn test_success_commits_mirror_then_failure_reverts_to_new_value() {
    let mut board = test_board();
    let mut ctl = controller();

    // First update succeeds: quotation_sent -> negotiation.
    ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);
    assert_eq!(
        board.row(42).unwrap().stage.committed(),
        EnquiryStage::Negotiation
    );

    // Second update fails: rollback lands on negotiation, not the original.
    ctl.api()
        .push_stage(Scripted::Rejected("Permission denied".to_string()));
    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::Lost);

    let row = board.row(42).unwrap();
    assert_eq!(row.stage.displayed(), EnquiryStage::Negotiation);
    assert_eq!(row.stage.committed(), EnquiryStage::Negotiation);
    assert!(has_error_notice(&effects));
}

#[test]
fn test_failed_update_leaves_control_enabled_and_reverted() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.api()
        .push_stage(Scripted::Rejected("Invalid stage".to_string()));
    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);

    let row = board.row(42).unwrap();
    assert!(row.stage.is_enabled(), "control must never stay busy");
    assert!(!row.stage.is_busy());
    assert_eq!(row.stage.displayed(), EnquiryStage::QuotationSent);
    assert!(has_error_notice(&effects));
}

#[test]
fn test_malformed_body_is_rolled_back_like_a_rejection() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.api().push_stage(Scripted::Malformed);
    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);

    let row = board.row(42).unwrap();
    assert_eq!(row.stage.displayed(), EnquiryStage::QuotationSent);
    assert!(row.stage.is_enabled());
    assert!(has_error_notice(&effects));
}

#[test]
fn test_failed_status_update_rolls_back() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.api()
        .push_status(Scripted::Rejected("Permission denied".to_string()));
    let effects = ctl.request_status_change(&mut board, 42, LeadStatus::Fulfilled);

    let row = board.row(42).unwrap();
    assert_eq!(row.status.displayed(), LeadStatus::Open);
    assert!(row.status.is_enabled());
    assert!(has_error_notice(&effects));
    assert!(!effects
        .iter()
        .any(|e| matches!(e, UiEffect::ScheduleReload { .. })));
}

// =========================================================================
// Response reconciliation
// =========================================================================

#[test]
fn test_locked_response_locks_both_controls() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.api().push_stage(Scripted::Ok(StageUpdate {
        is_locked: true,
        lead_status: Some(LeadStatus::Fulfilled),
        ..stage_ok()
    }));
    ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);

    let row = board.row(42).unwrap();
    assert!(!row.stage.is_enabled());
    assert!(!row.status.is_enabled());
    assert!(row.locked);
    assert_eq!(row.status.committed(), LeadStatus::Fulfilled);

    // Further changes on the locked lead are ignored.
    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::Lost);
    assert!(effects.is_empty());
    assert_eq!(ctl.api().stage_calls().len(), 1);
}

#[test]
fn test_sibling_cells_reflect_returned_numbers() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.api().push_stage(Scripted::Ok(StageUpdate {
        proforma_invoice_number: Some("PI-001".to_string()),
        invoice_number: Some(String::new()),
        ..stage_ok()
    }));
    ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);

    let row = board.row(42).unwrap();
    assert_eq!(row.pi_number.as_deref(), Some("PI-001"));
    assert_eq!(row.invoice_number, None, "empty string renders as absent");
}

#[test]
fn test_server_message_is_preferred_in_success_notice() {
    let mut board = test_board();
    let mut ctl = controller();

    ctl.api().push_stage(Scripted::Ok(StageUpdate {
        message: Some("Stage updated successfully - Status automatically set to fulfilled".to_string()),
        ..stage_ok()
    }));
    let effects = ctl.request_stage_change(&mut board, 42, EnquiryStage::Negotiation);

    assert_eq!(
        effects,
        vec![UiEffect::Notify {
            level: NoticeLevel::Success,
            message: "Stage updated successfully - Status automatically set to fulfilled"
                .to_string(),
        }]
    );
}

// =========================================================================
// Helpers used by the flow tests
// =========================================================================

impl TransitionController<MockApi> {
    /// Script the canonical proforma success body for the next stage call.
    fn push_scripted_proforma(&self) {
        self.api().push_stage(Scripted::Ok(StageUpdate {
            enquiry_stage: Some(EnquiryStage::ProformaInvoiceSent),
            proforma_invoice_number: Some("PI-001".to_string()),
            ..stage_ok()
        }));
    }
}
