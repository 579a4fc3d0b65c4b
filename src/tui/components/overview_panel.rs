//! # Overview Panel Component
//!
//! Renders the aggregate figures of the `Overview` view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::api::Fare;
use crate::core::format::format_price;
use crate::core::overview::Overview;
use crate::core::table::LoadState;
use crate::tui::component::Component;

pub struct OverviewPanel<'a> {
    overview: &'a Overview,
}

impl<'a> OverviewPanel<'a> {
    pub fn new(overview: &'a Overview) -> Self {
        Self { overview }
    }

    fn figure(label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<16}"), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        ])
    }

    fn fare_text(fare: Option<&Fare>, detail: impl Fn(&Fare) -> String) -> String {
        fare.map(|f| format!("{}  {}", f.route_label(), detail(f)))
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        match self.overview.load_state() {
            LoadState::Loading => lines.push(Line::styled(
                "Refreshing...",
                Style::default().fg(Color::Yellow),
            )),
            LoadState::Failed(reason) => lines.push(Line::styled(
                format!("Could not load overview: {reason}"),
                Style::default().fg(Color::Red),
            )),
            LoadState::NotLoaded | LoadState::Loaded => {}
        }

        let Some(summary) = self.overview.summary() else {
            if lines.is_empty() {
                lines.push(Line::styled(
                    "No data yet.",
                    Style::default().fg(Color::DarkGray),
                ));
            }
            return lines;
        };

        lines.push(Self::figure("Fares", summary.count.to_string()));
        lines.push(Self::figure(
            "Average price",
            summary
                .average_price
                .map(|p| format_price(p.round()))
                .unwrap_or_else(|| "-".to_string()),
        ));
        lines.push(Self::figure(
            "Cheapest",
            Self::fare_text(summary.cheapest.as_ref(), Fare::price_label),
        ));
        lines.push(Self::figure(
            "Longest",
            Self::fare_text(summary.longest.as_ref(), Fare::duration_label),
        ));
        if let Some(at) = self.overview.refreshed_at() {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                format!("Refreshed {}", at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines
    }
}

impl Component for OverviewPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Overview ")
            .padding(Padding::horizontal(1));
        frame.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}
