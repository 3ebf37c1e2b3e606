//! Rendering functions for the board.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use super::state::{Chooser, Notice, ProductsView, ViewState};
use super::theme::{BoardColors, Theme};
use super::widgets::{centered_rect, lock_badge, stage_cell, status_cell};
use crate::controller::transition::INVOICE_FIRST_NOTICE;
use crate::controller::{ControlRole, LeadBoard, NoticeLevel, NumberPrompt, PromptState, ReasonPrompt};
use crate::models::stage::ALL_STAGES;
use crate::models::status::ALL_STATUSES;
use crate::models::Reason;

pub fn render(frame: &mut Frame, board: &LeadBoard, view: &ViewState) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], board);
    render_table(frame, chunks[1], board, view);
    render_footer(frame, chunks[2], view);

    if let Some(chooser) = &view.chooser {
        render_chooser(frame, area, chooser);
    }
    match &view.prompt {
        PromptState::Number(prompt) => render_number_prompt(frame, area, prompt),
        PromptState::Reason(prompt) => render_reason_prompt(frame, area, prompt, &board.reasons),
        PromptState::Warning(_) => render_warning(frame, area),
        PromptState::None => {}
    }
    if let Some(products) = &view.products {
        render_products(frame, area, products);
    }
    render_notices(frame, area, &view.notices);
}

fn render_header(frame: &mut Frame, area: Rect, board: &LeadBoard) {
    let mut lines: Vec<Line> = crate::LOGO
        .lines()
        .map(|l| Line::from(Span::styled(l, Theme::header())))
        .collect();
    lines.push(Line::from(vec![
        Span::styled(
            format!("   {} enquiries", board.len()),
            Style::default().fg(BoardColors::HEADER),
        ),
        Span::styled(
            format!("  \u{2502}  {} locked", board.locked_count()),
            Theme::locked(),
        ),
    ]));
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_table(frame: &mut Frame, area: Rect, board: &LeadBoard, view: &ViewState) {
    let block = Block::default()
        .title(" Enquiries ")
        .title_style(Theme::header())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BoardColors::BORDER));

    if board.is_empty() {
        let empty = Paragraph::new("No enquiries in this snapshot")
            .style(Theme::dimmed())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["", "ID", "Contact", "Company", "Stage", "Status", "PI No", "Invoice No"])
        .style(Theme::header())
        .bottom_margin(1);

    let rows: Vec<Row> = board
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let badge = if row.locked {
                lock_badge().content.to_string()
            } else {
                String::new()
            };

            let stage_span = decorate_focus(
                stage_cell(&row.stage),
                view,
                i,
                ControlRole::Stage,
            );
            let status_span = decorate_focus(
                status_cell(&row.status),
                view,
                i,
                ControlRole::Status,
            );

            let mut cells = vec![
                Line::from(badge),
                Line::from(row.lead_id.to_string()),
                Line::from(row.contact_name.clone()),
                Line::from(row.company_name.clone()),
                Line::from(stage_span),
                Line::from(status_span),
                Line::from(row.pi_number.clone().unwrap_or_else(|| "-".to_string())),
                Line::from(row.invoice_number.clone().unwrap_or_else(|| "-".to_string())),
            ];
            if row.locked {
                for cell in &mut cells {
                    *cell = cell.clone().style(Theme::dimmed());
                }
            }

            let row_widget = Row::new(cells);
            if i == view.selected_row {
                row_widget.style(Theme::selected())
            } else {
                row_widget
            }
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(5),
        Constraint::Min(16),
        Constraint::Min(14),
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).block(block).header(header);
    frame.render_widget(table, area);
}

/// Mark the focused cell of the selected row.
fn decorate_focus(
    span: Span<'static>,
    view: &ViewState,
    row_index: usize,
    role: ControlRole,
) -> Span<'static> {
    if row_index == view.selected_row && view.focused == role {
        Span::styled(format!("\u{25B8} {}", span.content), span.style)
    } else {
        span
    }
}

fn render_footer(frame: &mut Frame, area: Rect, view: &ViewState) {
    let hints: &[(&str, &str)] = if view.prompt.is_open() || view.chooser.is_some() {
        &[("Enter", "confirm"), ("Esc", "cancel")]
    } else {
        &[
            ("\u{2191}\u{2193}", "select"),
            ("\u{2190}\u{2192}", "column"),
            ("Enter", "change"),
            ("p", "products"),
            ("r", "reload"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" \u{2502} "));
        }
        spans.push(Span::styled(*key, Theme::header()));
        spans.push(Span::raw(format!(" {action}")));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chooser(frame: &mut Frame, area: Rect, chooser: &Chooser) {
    let (title, options): (&str, Vec<String>) = match chooser.role {
        ControlRole::Stage => (
            " Change Stage ",
            ALL_STAGES.iter().map(|s| s.to_string()).collect(),
        ),
        ControlRole::Status => (
            " Change Status ",
            ALL_STATUSES.iter().map(|s| s.to_string()).collect(),
        ),
    };

    let popup = centered_rect(34, options.len() as u16 + 2, area);
    frame.render_widget(Clear, popup);

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if i == chooser.selected {
                Line::from(Span::styled(format!("\u{25B8} {option}"), Theme::selected()))
            } else {
                Line::from(format!("  {option}"))
            }
        })
        .collect();

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BoardColors::BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_number_prompt(frame: &mut Frame, area: Rect, prompt: &NumberPrompt) {
    let popup = centered_rect(46, 7, area);
    frame.render_widget(Clear, popup);

    let border_style = if prompt.invalid {
        Theme::invalid_input()
    } else {
        Style::default().fg(BoardColors::BORDER)
    };
    let block = Block::default()
        .title(format!(" {} ", prompt.title()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines = vec![
        Line::from(Span::styled(prompt.label(), Theme::header())),
        Line::from(format!("> {}\u{2588}", prompt.input)),
    ];
    if prompt.invalid {
        lines.push(Line::from(Span::styled(
            "A value is required",
            Theme::invalid_input(),
        )));
    } else {
        lines.push(Line::from(Span::styled(prompt.help(), Theme::dimmed())));
    }
    lines.push(Line::from(Span::styled(
        "Enter save \u{2502} Esc cancel",
        Theme::dimmed(),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_reason_prompt(frame: &mut Frame, area: Rect, prompt: &ReasonPrompt, reasons: &[Reason]) {
    let popup = centered_rect(44, reasons.len() as u16 + 5, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Reason Required ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BoardColors::BORDER));

    let mut lines = vec![Line::from(Span::styled(
        "Why was this enquiry not fulfilled?",
        Theme::header(),
    ))];
    if reasons.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no reasons available)",
            Theme::dimmed(),
        )));
    }
    for (i, reason) in reasons.iter().enumerate() {
        if Some(i) == prompt.selected {
            lines.push(Line::from(Span::styled(
                format!("\u{25B8} {}", reason.name),
                Theme::selected(),
            )));
        } else {
            lines.push(Line::from(format!("  {}", reason.name)));
        }
    }
    if let Some(error) = prompt.error {
        lines.push(Line::from(Span::styled(error, Theme::error())));
    }
    lines.push(Line::from(Span::styled(
        "Enter save \u{2502} Esc cancel",
        Theme::dimmed(),
    )));

    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn render_warning(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(56, 7, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Create Invoice First ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BoardColors::WARNING));

    let lines = vec![
        Line::from(INVOICE_FIRST_NOTICE),
        Line::from(""),
        Line::from(Span::styled(
            "Enter go to invoice creation \u{2502} Esc cancel",
            Theme::dimmed(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(ratatui::widgets::Wrap { trim: true }),
        popup,
    );
}

fn render_products(frame: &mut Frame, area: Rect, products: &ProductsView) {
    let popup = centered_rect(64, products.items.len() as u16 + 5, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" Products \u{2014} lead {} ", products.lead_id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BoardColors::BORDER));

    if products.items.is_empty() {
        let empty = Paragraph::new("No products recorded for this enquiry")
            .style(Theme::dimmed())
            .block(block);
        frame.render_widget(empty, popup);
        return;
    }

    let header = Row::new(vec!["Product", "Qty", "Price"]).style(Theme::header());
    let rows: Vec<Row> = products
        .items
        .iter()
        .map(|item| {
            Row::new(vec![
                item.label(),
                item.quantity.map_or("-".to_string(), |q| q.to_string()),
                item.price.map_or("-".to_string(), |p| format!("{p:.2}")),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(30),
        Constraint::Length(8),
        Constraint::Length(10),
    ];
    let table = Table::new(rows, widths).block(block).header(header);
    frame.render_widget(table, popup);
}

fn render_notices(frame: &mut Frame, area: Rect, notices: &[Notice]) {
    let width = 42u16.min(area.width);
    for (i, notice) in notices.iter().enumerate() {
        let y = area.y + 1 + (i as u16) * 3;
        if y + 3 > area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width.saturating_sub(width + 1), y, width, 3);
        frame.render_widget(Clear, rect);

        let (title, style) = match notice.level {
            NoticeLevel::Success => (" Success ", Theme::success()),
            NoticeLevel::Error => (" Error ", Theme::error()),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(style);
        frame.render_widget(
            Paragraph::new(notice.message.clone()).block(block),
            rect,
        );
    }
}
