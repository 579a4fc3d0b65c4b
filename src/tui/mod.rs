//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Keys go to the topmost surface only:
//!
//! 1. Ctrl+C quits from anywhere.
//! 2. A pending delete confirmation takes `y` / `n` (Enter / Esc).
//! 3. An open edit form takes everything else while it is shown.
//! 4. Otherwise the active view: Tab switches view, `q` quits, the rest goes
//!    to the fare table.
//!
//! ## Redraw Strategy
//!
//! Draws only after an event or a background result. The poll timeout is
//! short while remote work is pending so results show up promptly, and long
//! when idle.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{FareBackend, HttpFareBackend};
use crate::core::action::{Action, update};
use crate::core::config::{ResolvedConfig, build_credentials};
use crate::core::state::{App, View};
use crate::core::table::LoadState;
use crate::tui::component::EventHandler;
use crate::tui::components::{EditFormState, FareTableState, FormEvent, TableEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::worker;

const BUSY_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub table: FareTableState,
    /// Present exactly while the core has an edit session open.
    pub edit_form: Option<EditFormState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            table: FareTableState::new(),
            edit_form: None,
        }
    }

    /// Opens, rebuilds or drops the edit form to mirror the core session.
    /// Typed values survive as long as the session targets the same fare.
    pub fn sync_edit_form(&mut self, app: &App) {
        match app.mutations.edit().as_open() {
            Some(open) => {
                if self.edit_form.as_ref().map(|form| form.id) != Some(open.id) {
                    self.edit_form = Some(EditFormState::new(&open.original));
                }
            }
            None => self.edit_form = None,
        }
    }
}

/// Map a terminal event to the action it stands for, if any.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.mutations.pending_delete().is_some() {
        return match event {
            TuiEvent::InputChar('y' | 'Y') | TuiEvent::Submit => Some(Action::ConfirmDelete),
            TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(Action::DeclineDelete),
            _ => None,
        };
    }

    if let Some(form) = tui.edit_form.as_mut() {
        let saving = app
            .mutations
            .edit()
            .as_open()
            .is_some_and(|open| open.saving);
        // The form is read-only while its save is in flight; Esc still closes it.
        if saving && !matches!(event, TuiEvent::Escape) {
            return None;
        }
        return match form.handle_event(event)? {
            FormEvent::Submit(fields) => Some(Action::SubmitEdit(fields)),
            FormEvent::Cancel => Some(Action::CancelEdit),
        };
    }

    match event {
        TuiEvent::NextField | TuiEvent::PreviousField => return Some(Action::SwitchView),
        TuiEvent::InputChar('q') => return Some(Action::Quit),
        _ => {}
    }

    if app.view != View::Fares {
        return None;
    }

    let visible = app.fares.visible();
    tui.table.sync(visible.len());
    match tui.table.handle_event(event)? {
        TableEvent::NextPage => Some(Action::NextPage),
        TableEvent::PreviousPage => Some(Action::PreviousPage),
        TableEvent::Reload => Some(Action::Reload),
        TableEvent::Edit(row) => visible.get(row).map(|fare| Action::BeginEdit(fare.id)),
        TableEvent::Delete(row) => visible.get(row).map(|fare| Action::RequestDelete(fare.id)),
    }
}

/// Run an action through the reducer and its effect through the worker.
/// Returns true if the console should quit.
fn apply(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let page_before = app.fares.page().current_page();
    let effect = update(app, action);
    let quit = worker::dispatch(app, effect, tx);
    if app.fares.page().current_page() != page_before {
        tui.table.select_first();
    }
    tui.sync_edit_form(app);
    quit
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Event types let key releases be filtered out; terminals without the
        // protocol ignore the request.
        execute!(
            stdout(),
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Hide);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let credentials = build_credentials(&config);
    let backend: Arc<dyn FareBackend> =
        Arc::new(HttpFareBackend::new(config.base_url.clone(), credentials));
    let mut app = App::from_config(backend, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Initial fetch
    apply(&mut app, &mut tui, Action::Reload, &tx);

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let busy = app.fares.is_loading()
            || *app.overview.load_state() == LoadState::Loading
            || app.notices.visible().is_some();
        let timeout = if busy { BUSY_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = route_event(&app, &mut tui, &event)
                && apply(&mut app, &mut tui, action, &tx)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply(&mut app, &mut tui, action, &tx);
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
