use ratatui::layout::Rect;
use ratatui::text::Span;

use super::theme::Theme;
use crate::controller::binding::ControlBinding;
use crate::models::stage::EnquiryStage;
use crate::models::status::LeadStatus;

/// Braille spinner shown in place of a busy control's value.
pub const BUSY_INDICATOR: &str = "\u{283C} updating";

/// Centered popup rectangle of a fixed size, clamped to the area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Cell content for a stage control: value text styled by state.
pub fn stage_cell(binding: &ControlBinding<EnquiryStage>) -> Span<'static> {
    if binding.is_busy() {
        return Span::styled(BUSY_INDICATOR, Theme::dimmed());
    }
    let text = binding.displayed().to_string();
    if binding.has_flash() {
        Span::styled(text, Theme::flash())
    } else if binding.is_disabled() {
        Span::styled(text, Theme::locked())
    } else {
        Span::styled(text, Theme::stage(&binding.displayed()))
    }
}

/// Cell content for a status control.
pub fn status_cell(binding: &ControlBinding<LeadStatus>) -> Span<'static> {
    if binding.is_busy() {
        return Span::styled(BUSY_INDICATOR, Theme::dimmed());
    }
    let text = binding.displayed().to_string();
    if binding.has_flash() {
        Span::styled(text, Theme::flash())
    } else if binding.is_disabled() {
        Span::styled(text, Theme::locked())
    } else {
        Span::styled(text, Theme::status(&binding.displayed()))
    }
}

/// Badge shown on locked rows.
pub fn lock_badge() -> Span<'static> {
    Span::styled("\u{2713}", Theme::locked())
}
