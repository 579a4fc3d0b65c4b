//! # TitleBar Component
//!
//! Top line: console name, view tabs, status text.
//!
//! ```text
//! fareadmin  [Fares]  Overview  | Page 2 of 3
//! ```
//!
//! Stateless: all three props come from the core `App`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::View;
use crate::tui::component::Component;

pub struct TitleBar {
    pub view: View,
    pub status_message: String,
    pub loading: bool,
}

impl TitleBar {
    pub fn new(view: View, status_message: String, loading: bool) -> Self {
        Self {
            view,
            status_message,
            loading,
        }
    }

    fn tab(&self, view: View) -> Span<'static> {
        if view == self.view {
            Span::styled(
                format!("[{}]", view.label()),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!(" {} ", view.label()),
                Style::default().fg(Color::DarkGray),
            )
        }
    }

    pub fn line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("fareadmin", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            self.tab(View::Fares),
            Span::raw(" "),
            self.tab(View::Overview),
        ];
        if self.loading {
            spans.push(Span::styled(" ⟳", Style::default().fg(Color::Yellow)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!("  | {}", self.status_message)));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
