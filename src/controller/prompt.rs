//! Prompt coordination: the modal state machine.
//!
//! Exactly one prompt may be open at a time — the single [`PromptState`]
//! enum makes a second concurrent prompt unrepresentable. Prompts validate
//! their input locally (inline invalid markers, no notifications) and hand
//! confirmed values to the transition controller; any dismissal without a
//! confirm must be routed to `TransitionController::cancel_pending`.

use crate::models::stage::NumberKind;
use crate::models::Reason;

/// Inline message shown when the reason prompt is confirmed with nothing
/// selected.
pub const REASON_REQUIRED: &str = "Please select a reason";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PromptState {
    #[default]
    None,
    Number(NumberPrompt),
    Reason(ReasonPrompt),
    Warning(WarningPrompt),
}

impl PromptState {
    pub fn open_number(&mut self, kind: NumberKind) {
        *self = PromptState::Number(NumberPrompt::new(kind));
    }

    pub fn open_reason(&mut self) {
        *self = PromptState::Reason(ReasonPrompt::default());
    }

    pub fn open_warning(&mut self, lead_id: u64) {
        *self = PromptState::Warning(WarningPrompt { lead_id });
    }

    pub fn close(&mut self) {
        *self = PromptState::None;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, PromptState::None)
    }
}

/// Number-entry prompt for the gated stages.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberPrompt {
    kind: NumberKind,
    pub input: String,
    /// Inline invalid marker; set when confirm is attempted with empty
    /// input, cleared on the next edit.
    pub invalid: bool,
}

impl NumberPrompt {
    pub fn new(kind: NumberKind) -> Self {
        Self {
            kind,
            input: String::new(),
            invalid: false,
        }
    }

    pub fn kind(&self) -> NumberKind {
        self.kind
    }

    pub fn title(&self) -> &'static str {
        self.kind.prompt_title()
    }

    pub fn label(&self) -> &'static str {
        self.kind.prompt_label()
    }

    pub fn help(&self) -> &'static str {
        self.kind.prompt_help()
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.invalid = false;
    }

    pub fn backspace(&mut self) {
        self.input.pop();
        self.invalid = false;
    }

    /// Validate and yield the trimmed value. Empty input marks the prompt
    /// invalid and keeps it open.
    pub fn confirm(&mut self) -> Option<String> {
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            self.invalid = true;
            None
        } else {
            self.invalid = false;
            Some(trimmed.to_string())
        }
    }
}

/// Reason-selection prompt for the not-fulfilled status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReasonPrompt {
    /// Index into the board's reason list.
    pub selected: Option<usize>,
    pub error: Option<&'static str>,
}

impl ReasonPrompt {
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        });
        self.error = None;
    }

    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i > 0 => i - 1,
            _ => 0,
        });
        self.error = None;
    }

    /// Validate and yield the selected reason id. Blocks with an inline
    /// message when nothing is selected.
    pub fn confirm(&mut self, reasons: &[Reason]) -> Option<u64> {
        match self.selected.and_then(|i| reasons.get(i)) {
            Some(reason) => {
                self.error = None;
                Some(reason.id)
            }
            None => {
                self.error = Some(REASON_REQUIRED);
                None
            }
        }
    }
}

/// Terminal-stage warning: informational confirm/cancel only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningPrompt {
    pub lead_id: u64,
}
