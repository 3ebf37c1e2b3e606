use ratatui::style::{Color, Modifier, Style};

use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;

/// Color scheme for the board.
pub struct BoardColors;

impl BoardColors {
    pub const HEADER: Color = Color::White;
    pub const DIMMED: Color = Color::DarkGray;
    pub const BORDER: Color = Color::Gray;
    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const LOCKED: Color = Color::Rgb(100, 180, 100);

    // Stage accents
    pub const EARLY: Color = Color::Gray;
    pub const QUOTED: Color = Color::Cyan;
    pub const NEGOTIATING: Color = Color::Blue;
    pub const INVOICING: Color = Color::Magenta;
    pub const TERMINAL: Color = Color::Green;
    pub const LOST: Color = Color::Red;
}

/// Theme provides pre-built styles
pub struct Theme;

impl Theme {
    pub fn header() -> Style {
        Style::default().fg(BoardColors::HEADER).add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(BoardColors::DIMMED)
    }

    pub fn selected() -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    pub fn flash() -> Style {
        Style::default()
            .bg(BoardColors::SUCCESS)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn locked() -> Style {
        Style::default().fg(BoardColors::LOCKED)
    }

    pub fn success() -> Style {
        Style::default().fg(BoardColors::SUCCESS)
    }

    pub fn error() -> Style {
        Style::default().fg(BoardColors::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn invalid_input() -> Style {
        Style::default().fg(BoardColors::ERROR)
    }

    pub fn stage(stage: &EnquiryStage) -> Style {
        let color = match stage {
            EnquiryStage::EnquiryReceived => BoardColors::EARLY,
            EnquiryStage::QuotationSent => BoardColors::QUOTED,
            EnquiryStage::Negotiation => BoardColors::NEGOTIATING,
            EnquiryStage::ProformaInvoiceSent | EnquiryStage::InvoiceMade => {
                BoardColors::INVOICING
            }
            EnquiryStage::InvoiceSent => BoardColors::TERMINAL,
            EnquiryStage::Lost => BoardColors::LOST,
        };
        Style::default().fg(color)
    }

    pub fn status(status: &LeadStatus) -> Style {
        let color = match status {
            LeadStatus::Open => BoardColors::WARNING,
            LeadStatus::Fulfilled => BoardColors::SUCCESS,
            LeadStatus::NotFulfilled => BoardColors::ERROR,
        };
        Style::default().fg(color)
    }
}
