//! # NotificationBanner Component
//!
//! One-line success/error banner. Renders nothing once the notification has
//! been dismissed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::notification::{NoticeKind, Notification};
use crate::tui::component::Component;

pub struct NotificationBanner<'a> {
    notification: Option<&'a Notification>,
}

impl<'a> NotificationBanner<'a> {
    /// Pass only a visible notification (see `NotificationTimer::visible`).
    pub fn new(notification: Option<&'a Notification>) -> Self {
        Self { notification }
    }

    pub fn line(&self) -> Option<Line<'a>> {
        let notification = self.notification.filter(|n| n.visible)?;
        let (prefix, color) = match notification.kind {
            NoticeKind::Success => ("Success: ", Color::Green),
            NoticeKind::Error => ("Error: ", Color::Red),
        };
        let style = Style::default().fg(color);
        Some(Line::from(vec![
            Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
            Span::styled(notification.message.as_str(), style),
        ]))
    }
}

impl Component for NotificationBanner<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(line) = self.line() {
            frame.render_widget(line, area);
        }
    }
}
