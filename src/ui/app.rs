//! Board application state and main loop.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::event_handler::{map_key, UiCommand};
use super::renderer;
use super::state::{Chooser, InputMode, ProductsView, ViewState};
use crate::api::{HttpApi, LeadApi};
use crate::controller::lock::{self, LOCKED_TOOLTIP};
use crate::controller::{
    ControlRole, LeadBoard, NoticeLevel, PromptState, TransitionController, UiEffect,
};
use crate::models::stage::ALL_STAGES;
use crate::models::status::ALL_STATUSES;
use crate::snapshot;

/// Poll timeout for the event loop (100ms for responsive UI).
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

enum Flow {
    Continue,
    Exit,
}

/// Interactive board application.
pub struct BoardApp {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    running: Arc<AtomicBool>,
    board: LeadBoard,
    controller: TransitionController<HttpApi>,
    view: ViewState,
    snapshot_path: PathBuf,
    /// Flag to prevent double cleanup in Drop.
    cleaned_up: bool,
}

impl BoardApp {
    pub fn new(
        board: LeadBoard,
        controller: TransitionController<HttpApi>,
        snapshot_path: PathBuf,
    ) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        crate::utils::install_terminal_panic_hook();

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        Ok(Self {
            terminal,
            running: Arc::new(AtomicBool::new(true)),
            board,
            controller,
            view: ViewState::new(),
            snapshot_path,
            cleaned_up: false,
        })
    }

    /// Run the board event loop until quit.
    pub fn run(&mut self) -> Result<()> {
        // Ensure terminal cleanup on signal; Drop may not run on exit.
        let running = self.running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
            crate::utils::cleanup_terminal();
            std::process::exit(0);
        })
        .context("Failed to set Ctrl+C handler")?;

        let result = self.run_event_loop();
        self.cleanup_terminal();
        result
    }

    fn run_event_loop(&mut self) -> Result<()> {
        while self.running.load(Ordering::SeqCst) {
            self.tick();

            if event::poll(POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let command = map_key(self.view.input_mode(), key.code, key.modifiers);
                        if let Flow::Exit = self.handle_command(command) {
                            break;
                        }
                    }
                }
            }

            self.render()?;
        }
        Ok(())
    }

    /// Timer upkeep: notice expiry, flash clearing, deferred reload.
    fn tick(&mut self) {
        let now = Instant::now();
        self.view.expire_notices(now);
        self.view.clear_expired_flashes(&mut self.board, now);

        if let Some(at) = self.view.reload_at {
            if now >= at {
                self.view.reload_at = None;
                self.reload_board();
            }
        }
    }

    fn handle_command(&mut self, command: UiCommand) -> Flow {
        match command {
            UiCommand::Quit => return Flow::Exit,
            UiCommand::None => {}
            UiCommand::MoveUp => self.move_selection(-1),
            UiCommand::MoveDown => self.move_selection(1),
            UiCommand::FocusLeft => self.view.focused = ControlRole::Stage,
            UiCommand::FocusRight => self.view.focused = ControlRole::Status,
            UiCommand::OpenChooser => self.open_chooser(),
            UiCommand::Confirm => self.confirm_overlay(),
            UiCommand::CloseOverlay => self.close_overlay(),
            UiCommand::ShowProducts => self.show_products(),
            UiCommand::ReloadBoard => self.reload_board(),
            UiCommand::InputChar(c) => {
                if let PromptState::Number(prompt) = &mut self.view.prompt {
                    prompt.push_char(c);
                }
            }
            UiCommand::Backspace => {
                if let PromptState::Number(prompt) = &mut self.view.prompt {
                    prompt.backspace();
                }
            }
        }
        Flow::Continue
    }

    fn move_selection(&mut self, delta: i32) {
        match self.view.input_mode() {
            InputMode::Chooser => {
                if let Some(chooser) = &mut self.view.chooser {
                    let len = match chooser.role {
                        ControlRole::Stage => ALL_STAGES.len(),
                        ControlRole::Status => ALL_STATUSES.len(),
                    };
                    chooser.selected = step(chooser.selected, delta, len);
                }
            }
            InputMode::ReasonPrompt => {
                let len = self.board.reasons.len();
                if let PromptState::Reason(prompt) = &mut self.view.prompt {
                    if delta < 0 {
                        prompt.select_prev(len);
                    } else {
                        prompt.select_next(len);
                    }
                }
            }
            _ => {
                self.view.selected_row = step(self.view.selected_row, delta, self.board.len());
            }
        }
    }

    /// Open the value picker on the focused control of the selected row.
    fn open_chooser(&mut self) {
        let Some(row) = self.board.rows().get(self.view.selected_row) else {
            return;
        };
        let (enabled, current) = match self.view.focused {
            ControlRole::Stage => (row.stage.is_enabled(), row.stage.displayed().position()),
            ControlRole::Status => (
                row.status.is_enabled(),
                ALL_STATUSES
                    .iter()
                    .position(|s| *s == row.status.displayed())
                    .unwrap_or(0),
            ),
        };
        if !enabled {
            if row.locked {
                self.view.push_notice(NoticeLevel::Error, LOCKED_TOOLTIP);
            }
            return;
        }
        self.view.chooser = Some(Chooser {
            lead_id: row.lead_id,
            role: self.view.focused,
            selected: current,
        });
    }

    fn confirm_overlay(&mut self) {
        match self.view.input_mode() {
            InputMode::Chooser => {
                let Some(chooser) = self.view.chooser.take() else {
                    return;
                };
                let effects = match chooser.role {
                    ControlRole::Stage => {
                        let target = ALL_STAGES[chooser.selected];
                        self.controller
                            .request_stage_change(&mut self.board, chooser.lead_id, target)
                    }
                    ControlRole::Status => {
                        let target = ALL_STATUSES[chooser.selected];
                        self.controller
                            .request_status_change(&mut self.board, chooser.lead_id, target)
                    }
                };
                self.apply_effects(effects);
            }
            InputMode::NumberPrompt => {
                let value = match &mut self.view.prompt {
                    PromptState::Number(prompt) => prompt.confirm(),
                    _ => None,
                };
                // Invalid input keeps the prompt open with its marker set.
                if let Some(value) = value {
                    let effects = self.controller.confirm_number(&mut self.board, &value);
                    self.view.prompt.close();
                    self.apply_effects(effects);
                }
            }
            InputMode::ReasonPrompt => {
                let reason_id = match &mut self.view.prompt {
                    PromptState::Reason(prompt) => prompt.confirm(&self.board.reasons),
                    _ => None,
                };
                if let Some(reason_id) = reason_id {
                    let effects = self.controller.confirm_reason(&mut self.board, reason_id);
                    self.view.prompt.close();
                    self.apply_effects(effects);
                }
            }
            InputMode::Warning => {
                let effects = self.controller.confirm_warning();
                self.view.prompt.close();
                self.apply_effects(effects);
            }
            InputMode::Products | InputMode::Table => {}
        }
    }

    /// Dismiss the open overlay. For prompts this is the cancel path:
    /// implicit dismissal behaves exactly like explicit cancel.
    fn close_overlay(&mut self) {
        match self.view.input_mode() {
            InputMode::Chooser => self.view.chooser = None,
            InputMode::NumberPrompt | InputMode::ReasonPrompt | InputMode::Warning => {
                self.controller.cancel_pending(&mut self.board);
                self.view.prompt.close();
            }
            InputMode::Products => self.view.products = None,
            InputMode::Table => {}
        }
    }

    fn show_products(&mut self) {
        let Some(row) = self.board.rows().get(self.view.selected_row) else {
            return;
        };
        let lead_id = row.lead_id;
        match self.controller.api().lead_products(lead_id) {
            Ok(items) => self.view.products = Some(ProductsView { lead_id, items }),
            Err(err) => self.view.push_notice(
                NoticeLevel::Error,
                format!("Failed to load products: {err}"),
            ),
        }
    }

    fn apply_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::OpenNumberPrompt { kind } => self.view.prompt.open_number(kind),
                UiEffect::OpenReasonPrompt => self.view.prompt.open_reason(),
                UiEffect::OpenInvoiceWarning { lead_id } => self.view.prompt.open_warning(lead_id),
                UiEffect::Navigate { url } => match crate::commands::open::open_external(&url) {
                    Ok(()) => self
                        .view
                        .push_notice(NoticeLevel::Success, format!("Opening {url}")),
                    Err(err) => self.view.push_notice(
                        NoticeLevel::Error,
                        format!("Open {url} manually ({err})"),
                    ),
                },
                UiEffect::ScheduleReload { after } => {
                    self.view.reload_at = Some(Instant::now() + after);
                }
                UiEffect::Notify { level, message } => self.view.push_notice(level, message),
            }
        }
        self.view.sync_flashes(&self.board, Instant::now());
    }

    /// Reload the board from the snapshot file and re-derive lock state.
    fn reload_board(&mut self) {
        self.controller.cancel_pending(&mut self.board);
        match snapshot::load_snapshot(&self.snapshot_path) {
            Ok(snap) => {
                self.board = LeadBoard::from_snapshot(&snap);
                lock::scan_on_load(&mut self.board);
                self.view.reset_overlays();
                if self.view.selected_row >= self.board.len() {
                    self.view.selected_row = self.board.len().saturating_sub(1);
                }
            }
            Err(err) => self
                .view
                .push_notice(NoticeLevel::Error, format!("Reload failed: {err}")),
        }
    }

    fn render(&mut self) -> Result<()> {
        let Self {
            terminal,
            board,
            view,
            ..
        } = self;
        terminal.draw(|frame| renderer::render(frame, board, view))?;
        Ok(())
    }

    /// Cleanup terminal state (leave alternate screen, disable raw mode).
    fn cleanup_terminal(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;

        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for BoardApp {
    fn drop(&mut self) {
        self.cleanup_terminal();
    }
}

fn step(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as i32 + delta;
    next.clamp(0, len as i32 - 1) as usize
}
