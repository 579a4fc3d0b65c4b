//! # Edit Form Component
//!
//! Overlay with one text field per editable fare attribute. Opened when the
//! core opens an edit session, rebuilt whenever the session target changes.
//!
//! ```text
//! ┌ Edit fare 7 ───────────────────────┐
//! │ From city     Jakarta              │
//! │ From code     CGK                  │
//! │ To city       Denpasar             │
//! │ To code       DPS                  │
//! │ Duration (m)  110                  │
//! │ Price (Rp)    850000               │
//! │                                    │
//! │ Error: locked                      │
//! └── Tab Next  Enter Save  Esc Cancel ┘
//! ```
//!
//! Input is validated locally before anything is submitted: text fields must
//! be non-empty, duration a whole number of minutes, price a non-negative
//! number.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::api::{Fare, FareId, FareUpdate};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const LABELS: [&str; 6] = [
    "From city",
    "From code",
    "To city",
    "To code",
    "Duration (m)",
    "Price (Rp)",
];
const LABEL_WIDTH: u16 = 14;

const DURATION: usize = 4;
const PRICE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit(FareUpdate),
    Cancel,
}

/// Persistent state for the edit overlay.
#[derive(Debug, Clone)]
pub struct EditFormState {
    pub id: FareId,
    pub values: [String; 6],
    pub focused: usize,
    /// Local validation failure, cleared on the next keystroke.
    pub invalid: Option<String>,
}

impl EditFormState {
    pub fn new(fare: &Fare) -> Self {
        Self {
            id: fare.id,
            values: [
                fare.from_city.clone(),
                fare.from_code.clone(),
                fare.to_city.clone(),
                fare.to_code.clone(),
                fare.duration.to_string(),
                fare.price.to_string(),
            ],
            focused: 0,
            invalid: None,
        }
    }

    pub fn validate(&self) -> Result<FareUpdate, String> {
        let text = |i: usize| -> Result<String, String> {
            let value = self.values[i].trim();
            if value.is_empty() {
                Err(format!("{} is required", LABELS[i]))
            } else {
                Ok(value.to_string())
            }
        };
        let duration = self.values[DURATION]
            .trim()
            .parse::<u32>()
            .map_err(|_| "Duration must be a whole number of minutes".to_string())?;
        let price = self.values[PRICE]
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| "Price must be a non-negative number".to_string())?;
        Ok(FareUpdate {
            from_city: text(0)?,
            from_code: text(1)?,
            to_city: text(2)?,
            to_code: text(3)?,
            duration,
            price,
        })
    }

    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % LABELS.len();
    }

    fn focus_previous(&mut self) {
        self.focused = (self.focused + LABELS.len() - 1) % LABELS.len();
    }
}

impl EventHandler for EditFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => Some(FormEvent::Cancel),
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus_next();
                None
            }
            TuiEvent::PreviousField | TuiEvent::CursorUp => {
                self.focus_previous();
                None
            }
            TuiEvent::InputChar(c) => {
                self.values[self.focused].push(*c);
                self.invalid = None;
                None
            }
            TuiEvent::Backspace => {
                self.values[self.focused].pop();
                self.invalid = None;
                None
            }
            TuiEvent::Submit => match self.validate() {
                Ok(update) => Some(FormEvent::Submit(update)),
                Err(reason) => {
                    self.invalid = Some(reason);
                    None
                }
            },
            _ => None,
        }
    }
}

/// Transient render wrapper for the edit overlay.
pub struct EditForm<'a> {
    state: &'a EditFormState,
    saving: bool,
    error: Option<&'a str>,
}

impl<'a> EditForm<'a> {
    /// `error` is the remote failure kept on the open session.
    pub fn new(state: &'a EditFormState, saving: bool, error: Option<&'a str>) -> Self {
        Self {
            state,
            saving,
            error,
        }
    }

    fn status_line(&self) -> Option<Line<'a>> {
        if self.saving {
            return Some(Line::styled(
                "Saving...",
                Style::default().fg(Color::Yellow),
            ));
        }
        let red = Style::default().fg(Color::Red);
        if let Some(reason) = &self.state.invalid {
            return Some(Line::styled(reason.clone(), red));
        }
        self.error.map(|reason| {
            Line::from(vec![
                Span::styled("Error: ", red.add_modifier(Modifier::BOLD)),
                Span::styled(reason, red),
            ])
        })
    }
}

impl Component for EditForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = super::centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" Edit fare {} ", self.state.id))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Tab Next  Enter Save  Esc Cancel ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [fields_area, _, status_area] = Layout::vertical([
            Constraint::Length(LABELS.len() as u16),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        let lines: Vec<Line> = LABELS
            .iter()
            .zip(self.state.values.iter())
            .enumerate()
            .map(|(i, (label, value))| {
                let style = if i == self.state.focused {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", label, width = LABEL_WIDTH as usize),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(value.as_str(), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), fields_area);

        if let Some(line) = self.status_line() {
            frame.render_widget(Paragraph::new(line), status_area);
        }

        if !self.saving {
            let value = &self.state.values[self.state.focused];
            let x = fields_area.x + LABEL_WIDTH + value.width() as u16;
            let y = fields_area.y + self.state.focused as u16;
            if x < fields_area.right() && y < fields_area.bottom() {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }
}
