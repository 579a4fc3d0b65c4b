//! # Fare Table Component
//!
//! The paged fare list. One row per fare on the current page:
//!
//! ```text
//! No  Origin          Destination      Duration  Price        Actions
//! 6   Jakarta (CGK)   Denpasar (DPS)   1j 50m    Rp850000     [e]dit [d]elete
//! ...
//!                  < Prev   Page 2/3   Next >
//! ```
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FareTableState` (selected row) lives in `TuiState`
//! - `FareTable` is created each frame with borrowed state and the table props
//!
//! Rows whose fare is locked by a mutation render without actions; the core
//! refuses the request anyway, hiding them keeps the screen honest.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::api::Fare;
use crate::core::mutation::MutationCoordinator;
use crate::core::pagination::PageState;
use crate::core::table::LoadState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const HEADERS: [&str; 6] = ["No", "Origin", "Destination", "Duration", "Price", "Actions"];

/// Events emitted by the fare table. Row indices are relative to the
/// visible page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    NextPage,
    PreviousPage,
    Edit(usize),
    Delete(usize),
    Reload,
}

/// Persistent state for the fare table.
#[derive(Default)]
pub struct FareTableState {
    pub selected: usize,
    pub table_state: TableState,
    rows: usize,
}

impl FareTableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the selection inside the visible page. Call before handling
    /// events and before rendering; the page can shrink under a delete.
    pub fn sync(&mut self, rows: usize) {
        self.rows = rows;
        self.selected = self.selected.min(rows.saturating_sub(1));
        self.table_state
            .select(if rows == 0 { None } else { Some(self.selected) });
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.sync(self.rows);
    }
}

impl EventHandler for FareTableState {
    type Event = TableEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TableEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.sync(self.rows);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.rows.saturating_sub(1));
                self.sync(self.rows);
                None
            }
            TuiEvent::CursorRight | TuiEvent::PageDown | TuiEvent::InputChar('n') => {
                Some(TableEvent::NextPage)
            }
            TuiEvent::CursorLeft | TuiEvent::PageUp | TuiEvent::InputChar('p') => {
                Some(TableEvent::PreviousPage)
            }
            TuiEvent::InputChar('r') => Some(TableEvent::Reload),
            TuiEvent::InputChar('e') | TuiEvent::Submit if self.rows > 0 => {
                Some(TableEvent::Edit(self.selected))
            }
            TuiEvent::InputChar('d') if self.rows > 0 => Some(TableEvent::Delete(self.selected)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the fare table.
pub struct FareTable<'a> {
    state: &'a mut FareTableState,
    fares: &'a [Fare],
    page: &'a PageState,
    load_state: &'a LoadState,
    mutations: &'a MutationCoordinator<Fare>,
}

impl<'a> FareTable<'a> {
    pub fn new(
        state: &'a mut FareTableState,
        fares: &'a [Fare],
        page: &'a PageState,
        load_state: &'a LoadState,
        mutations: &'a MutationCoordinator<Fare>,
    ) -> Self {
        Self {
            state,
            fares,
            page,
            load_state,
            mutations,
        }
    }

    fn row(&self, index: usize, fare: &Fare) -> Row<'static> {
        let actions = if self.mutations.row_actions_enabled(&fare.id) {
            Cell::from("[e]dit [d]elete").style(Style::default().fg(Color::Cyan))
        } else if self.mutations.is_in_flight(&fare.id) {
            Cell::from("working...").style(Style::default().fg(Color::Yellow))
        } else {
            Cell::from("")
        };
        Row::new(vec![
            Cell::from(self.page.item_number(index).to_string()),
            Cell::from(fare.origin_label()),
            Cell::from(fare.destination_label()),
            Cell::from(fare.duration_label()),
            Cell::from(fare.price_label()),
            actions,
        ])
    }

    /// Body text shown instead of rows, if any.
    fn placeholder(&self) -> Option<(String, Style)> {
        match self.load_state {
            LoadState::Failed(reason) => Some((
                format!("Could not load fares: {reason}  (r to retry)"),
                Style::default().fg(Color::Red),
            )),
            LoadState::Loading if self.fares.is_empty() => Some((
                "Loading fares...".to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            LoadState::NotLoaded | LoadState::Loaded if self.fares.is_empty() => Some((
                "No fares.".to_string(),
                Style::default().fg(Color::DarkGray),
            )),
            _ => None,
        }
    }

    pub fn pager_line(page: &PageState) -> Line<'static> {
        let enabled = Style::default().fg(Color::White);
        let disabled = Style::default().fg(Color::DarkGray);
        Line::from(vec![
            Span::styled(
                "< Prev",
                if page.is_first_page() { disabled } else { enabled },
            ),
            Span::raw(format!(
                "   Page {}/{}   ",
                page.current_page(),
                page.page_count()
            )),
            Span::styled(
                "Next >",
                if page.is_last_page() { disabled } else { enabled },
            ),
        ])
        .centered()
    }
}

impl Component for FareTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.fares.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Base prices ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, pager] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        // A failed reload keeps the old rows; show the reason above them.
        let body = match self.placeholder() {
            Some((text, style)) if self.fares.is_empty() => {
                frame.render_widget(Paragraph::new(text).style(style), body);
                frame.render_widget(Self::pager_line(self.page), pager);
                return;
            }
            Some((text, style)) => {
                let [notice, rest] =
                    Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(body);
                frame.render_widget(Paragraph::new(text).style(style), notice);
                rest
            }
            None => body,
        };

        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .fares
            .iter()
            .enumerate()
            .map(|(i, fare)| self.row(i, fare))
            .collect();
        let widths = [
            Constraint::Length(4),
            Constraint::Percentage(24),
            Constraint::Percentage(24),
            Constraint::Length(9),
            Constraint::Length(14),
            Constraint::Min(15),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, body, &mut self.state.table_state);
        frame.render_widget(Self::pager_line(self.page), pager);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::Table as FareTableCore;
    use crate::test_support::fares;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn loaded(n: u64) -> FareTableCore<Fare> {
        let mut table = FareTableCore::new(5);
        table.begin_load();
        table.apply_load(fares(n));
        table
    }

    fn render_to_string(table: &FareTableCore<Fare>, mutations: &MutationCoordinator<Fare>) -> String {
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = FareTableState::new();
        terminal
            .draw(|frame| {
                FareTable::new(
                    &mut state,
                    table.visible(),
                    table.page(),
                    table.load_state(),
                    mutations,
                )
                .render(frame, frame.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_selection_stays_on_page() {
        let mut state = FareTableState::new();
        state.sync(3);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 2);

        // Last page shrank to one row
        state.sync(1);
        assert_eq!(state.selected, 0);
        assert_eq!(state.table_state.selected(), Some(0));
    }

    #[test]
    fn test_row_events_need_rows() {
        let mut state = FareTableState::new();
        state.sync(0);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('e')), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d')), None);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('r')),
            Some(TableEvent::Reload)
        );

        state.sync(2);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(TableEvent::Delete(1))
        );
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(TableEvent::Edit(1)));
    }

    #[test]
    fn test_page_keys() {
        let mut state = FareTableState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::CursorRight),
            Some(TableEvent::NextPage)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::PageUp),
            Some(TableEvent::PreviousPage)
        );
    }

    #[test]
    fn test_render_numbers_rows_by_page() {
        let mut table = loaded(12);
        table.next_page();
        let screen = render_to_string(&table, &MutationCoordinator::new());
        assert!(screen.contains("Page 2/3"));
        assert!(screen.contains("6 "));
        assert!(screen.contains("10 "));
        assert!(screen.contains("City 6 (C06)"));
        assert!(!screen.contains("City 11"));
    }

    #[test]
    fn test_render_hides_actions_for_locked_row() {
        let table = loaded(2);
        let mut mutations = MutationCoordinator::new();
        assert!(mutations.request_delete(&table, 1));
        mutations.confirm_delete();
        let screen = render_to_string(&table, &mutations);
        assert_eq!(screen.matches("[e]dit [d]elete").count(), 1);
        assert!(screen.contains("working..."));
    }

    #[test]
    fn test_render_failed_load() {
        let mut table: FareTableCore<Fare> = FareTableCore::new(5);
        table.begin_load();
        table.fail_load("No token found".to_string());
        let screen = render_to_string(&table, &MutationCoordinator::new());
        assert!(screen.contains("Could not load fares: No token found"));
        assert!(screen.contains("Page 1/1"));
    }
}
