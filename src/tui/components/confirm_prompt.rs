//! # Confirm Prompt Component
//!
//! Small overlay asking whether the pending delete should go ahead.
//! Answered with `y` / `n` (or Enter / Esc) in the event loop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::api::Fare;
use crate::tui::component::Component;

pub struct ConfirmPrompt<'a> {
    fare: &'a Fare,
}

impl<'a> ConfirmPrompt<'a> {
    pub fn new(fare: &'a Fare) -> Self {
        Self { fare }
    }

    pub fn lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from("Delete this fare?"),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{}  {}  {}",
                    self.fare.route_label(),
                    self.fare.duration_label(),
                    self.fare.price_label()
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]
    }
}

impl Component for ConfirmPrompt<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = super::centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Confirm ")
            .title_bottom(Line::from(" y Yes  n No ").centered())
            .padding(Padding::uniform(1));

        let paragraph = Paragraph::new(self.lines())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fare;

    #[test]
    fn test_prompt_names_the_fare() {
        let fare = fare(2);
        let lines = ConfirmPrompt::new(&fare).lines();
        let summary: String = lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(summary, "CGK → C02  1j 10m  Rp502000");
    }
}
