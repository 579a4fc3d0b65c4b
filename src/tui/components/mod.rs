//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top bar showing the active view and status
//! - `NotificationBanner`: Transient success/error line
//! - `ConfirmPrompt`: Yes/no overlay before a delete
//! - `OverviewPanel`: Aggregate figures of the fare list
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `FareTable`: Paged fare list with row selection
//! - `EditForm`: In-place edit overlay with one text field per attribute
//!
//! Persistent state (`FareTableState`, `EditFormState`) lives in `TuiState`;
//! the render wrappers are created each frame with borrowed state.
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props", not by reaching into the
//! `App`. This makes dependencies explicit and components testable.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! NotificationBanner::new(app.notices.visible()).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! NotificationBanner::render(frame, area); // reads from App
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod confirm_prompt;
pub mod edit_form;
pub mod fare_table;
pub mod notification_banner;
pub mod overview_panel;
mod title_bar;

pub use confirm_prompt::ConfirmPrompt;
pub use edit_form::{EditForm, EditFormState, FormEvent};
pub use fare_table::{FareTable, FareTableState, TableEvent};
pub use notification_banner::NotificationBanner;
pub use overview_panel::OverviewPanel;
pub use title_bar::TitleBar;

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
