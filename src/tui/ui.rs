use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::{App, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ConfirmPrompt, EditForm, FareTable, NotificationBanner, OverviewPanel, TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, banner_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(
        app.view,
        app.status_message.clone(),
        app.fares.is_loading(),
    )
    .render(frame, title_area);

    NotificationBanner::new(app.notices.visible()).render(frame, banner_area);

    match app.view {
        View::Fares => {
            FareTable::new(
                &mut tui.table,
                app.fares.visible(),
                app.fares.page(),
                app.fares.load_state(),
                &app.mutations,
            )
            .render(frame, main_area);
        }
        View::Overview => OverviewPanel::new(&app.overview).render(frame, main_area),
    }

    frame.render_widget(help_line(app, tui), help_area);

    // Overlays
    if let Some(fare) = app.pending_delete_fare() {
        ConfirmPrompt::new(fare).render(frame, main_area);
    } else if let (Some(form), Some(session)) = (&tui.edit_form, app.mutations.edit().as_open())
    {
        EditForm::new(form, session.saving, session.error.as_deref()).render(frame, main_area);
    }
}

fn help_line(app: &App, tui: &TuiState) -> Line<'static> {
    let text = if app.pending_delete_fare().is_some() {
        " y Confirm delete  n Keep"
    } else if tui.edit_form.is_some() {
        " Tab Next field  Enter Save  Esc Cancel"
    } else {
        match app.view {
            View::Fares => {
                " ↑↓ Select  ←→ Page  e Edit  d Delete  r Reload  Tab Overview  q Quit"
            }
            View::Overview => " Tab Fares  q Quit",
        }
    };
    Line::styled(text, Style::default().fg(Color::DarkGray))
}
