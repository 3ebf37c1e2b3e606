//! Board view state: selection, overlays, notifications and timers.

use std::time::Instant;

use uuid::Uuid;

use crate::controller::transition::SUCCESS_FLASH;
use crate::controller::{ControlRole, LeadBoard, NoticeLevel, PromptState};
use crate::models::LeadProduct;

/// A transient, auto-dismissing notification.
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub message: String,
    pub expires_at: Instant,
}

/// The value picker opened on a stage or status control.
#[derive(Debug, Clone)]
pub struct Chooser {
    pub lead_id: u64,
    pub role: ControlRole,
    pub selected: usize,
}

/// Product lines fetched for the popup.
#[derive(Debug, Clone)]
pub struct ProductsView {
    pub lead_id: u64,
    pub items: Vec<LeadProduct>,
}

/// Pending clear of a success flash on one control.
#[derive(Debug, Clone, Copy)]
struct FlashTimer {
    lead_id: u64,
    role: ControlRole,
    clear_at: Instant,
}

/// Which input surface currently receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Chooser,
    NumberPrompt,
    ReasonPrompt,
    Warning,
    Products,
}

pub struct ViewState {
    pub selected_row: usize,
    pub focused: ControlRole,
    pub chooser: Option<Chooser>,
    pub prompt: PromptState,
    pub products: Option<ProductsView>,
    pub notices: Vec<Notice>,
    pub reload_at: Option<Instant>,
    flashes: Vec<FlashTimer>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            selected_row: 0,
            focused: ControlRole::Stage,
            chooser: None,
            prompt: PromptState::None,
            products: None,
            notices: Vec::new(),
            reload_at: None,
            flashes: Vec::new(),
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.chooser.is_some() {
            return InputMode::Chooser;
        }
        if self.products.is_some() {
            return InputMode::Products;
        }
        match self.prompt {
            PromptState::Number(_) => InputMode::NumberPrompt,
            PromptState::Reason(_) => InputMode::ReasonPrompt,
            PromptState::Warning(_) => InputMode::Warning,
            PromptState::None => InputMode::Table,
        }
    }

    pub fn push_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            expires_at: Instant::now() + level.dismiss_after(),
        });
    }

    pub fn expire_notices(&mut self, now: Instant) {
        self.notices.retain(|n| n.expires_at > now);
    }

    /// Start flash timers for any freshly flashed control that does not
    /// have one yet.
    pub fn sync_flashes(&mut self, board: &LeadBoard, now: Instant) {
        for row in board.rows() {
            for role in [ControlRole::Stage, ControlRole::Status] {
                let flashed = match role {
                    ControlRole::Stage => row.stage.has_flash(),
                    ControlRole::Status => row.status.has_flash(),
                };
                let tracked = self
                    .flashes
                    .iter()
                    .any(|f| f.lead_id == row.lead_id && f.role == role);
                if flashed && !tracked {
                    self.flashes.push(FlashTimer {
                        lead_id: row.lead_id,
                        role,
                        clear_at: now + SUCCESS_FLASH,
                    });
                }
            }
        }
    }

    /// Clear flashes whose timer elapsed.
    pub fn clear_expired_flashes(&mut self, board: &mut LeadBoard, now: Instant) {
        let (expired, live): (Vec<_>, Vec<_>) =
            self.flashes.drain(..).partition(|f| f.clear_at <= now);
        self.flashes = live;
        for timer in expired {
            if let Some(row) = board.row_mut(timer.lead_id) {
                match timer.role {
                    ControlRole::Stage => row.stage.clear_flash(),
                    ControlRole::Status => row.status.clear_flash(),
                }
            }
        }
    }

    /// Drop timers and overlays that reference board rows, after a reload.
    pub fn reset_overlays(&mut self) {
        self.chooser = None;
        self.prompt.close();
        self.products = None;
        self.flashes.clear();
        self.reload_at = None;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
