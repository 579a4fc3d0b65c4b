//! # Actions
//!
//! Everything that can happen in the console becomes an `Action`.
//! User presses `d` on a row? That's `Action::RequestDelete(id)`.
//! The service answers? That's `Action::DeleteFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns the `Effect` the event loop must run (a remote
//! call, a dismissal timer). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info};

use crate::api::{ApiError, Fare, FareId, FareUpdate};
use crate::core::state::{App, View};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Full reload of the fare table (initial fetch or `r`).
    Reload,
    NextPage,
    PreviousPage,
    SwitchView,

    RequestDelete(FareId),
    ConfirmDelete,
    DeclineDelete,

    BeginEdit(FareId),
    CancelEdit,
    SubmitEdit(FareUpdate),

    // Results reported by background tasks
    FaresLoaded(Result<Vec<Fare>, ApiError>),
    OverviewLoaded(Result<Vec<Fare>, ApiError>),
    DeleteFinished {
        id: FareId,
        result: Result<(), ApiError>,
    },
    UpdateFinished {
        id: FareId,
        result: Result<Fare, ApiError>,
    },
    DismissNotification(u64),
}

/// Which view a full fetch is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTarget {
    Fares,
    Overview,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    Fetch(FetchTarget),
    Delete(FareId),
    Update { id: FareId, update: FareUpdate },
    /// Start the dismissal timer for this notification generation.
    ScheduleDismiss(u64),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        // The stale mark belongs to the Overview; the fare table keeps
        // itself current and never consumes it.
        Action::Reload => reload_fares(app),

        Action::NextPage => {
            if app.fares.next_page() {
                app.status_message = page_status(app);
            }
            Effect::None
        }

        Action::PreviousPage => {
            if app.fares.previous_page() {
                app.status_message = page_status(app);
            }
            Effect::None
        }

        Action::SwitchView => {
            let view = app.view.next();
            app.view = view;
            app.status_message = view.label().to_string();
            match view {
                View::Overview if app.overview.needs_reload(&app.stale) => {
                    app.overview.begin_load();
                    Effect::Fetch(FetchTarget::Overview)
                }
                _ => Effect::None,
            }
        }

        Action::RequestDelete(id) => {
            if app.mutations.request_delete(&app.fares, id) {
                app.status_message = "Delete this fare? (y/n)".to_string();
            }
            Effect::None
        }

        Action::ConfirmDelete => match app.mutations.confirm_delete() {
            Some(id) => {
                app.status_message = "Deleting...".to_string();
                Effect::Delete(id)
            }
            None => Effect::None,
        },

        Action::DeclineDelete => {
            if app.mutations.decline_delete().is_some() {
                app.status_message = "Delete cancelled".to_string();
            }
            Effect::None
        }

        Action::BeginEdit(id) => {
            if app.mutations.begin_edit(&app.fares, id) {
                app.status_message = format!("Editing fare {id}");
            }
            Effect::None
        }

        Action::CancelEdit => {
            app.mutations.cancel_edit();
            Effect::None
        }

        Action::SubmitEdit(fields) => match app.mutations.submit_edit() {
            Some(id) => {
                app.status_message = "Saving...".to_string();
                Effect::Update { id, update: fields }
            }
            None => Effect::None,
        },

        Action::FaresLoaded(Ok(fares)) => {
            app.fares.apply_load(fares);
            app.mutations.reconcile_after_load(&app.fares);
            app.status_message = format!("{} fares", app.fares.store().len());
            Effect::None
        }

        Action::FaresLoaded(Err(e)) => {
            info!("Fare fetch failed: {}", e);
            app.fares.fail_load(e.reason());
            app.status_message = "Fetch failed".to_string();
            Effect::None
        }

        Action::OverviewLoaded(Ok(fares)) => {
            app.overview.apply_load(&fares);
            Effect::None
        }

        Action::OverviewLoaded(Err(e)) => {
            info!("Overview fetch failed: {}", e);
            app.overview.fail_load(e.reason());
            Effect::None
        }

        Action::DeleteFinished { id, result } => {
            let generation = app.mutations.complete_delete(
                &mut app.fares,
                &mut app.notices,
                &app.stale,
                &id,
                result,
            );
            app.status_message = page_status(app);
            Effect::ScheduleDismiss(generation)
        }

        Action::UpdateFinished { id, result } => {
            let generation = app.mutations.complete_update(
                &mut app.fares,
                &mut app.notices,
                &app.stale,
                &id,
                result,
            );
            match generation {
                Some(generation) => {
                    app.status_message = page_status(app);
                    Effect::ScheduleDismiss(generation)
                }
                None => {
                    app.status_message = "Save failed".to_string();
                    Effect::None
                }
            }
        }

        Action::DismissNotification(generation) => {
            if app.notices.expire(generation) {
                debug!("Notification #{} dismissed", generation);
            }
            Effect::None
        }
    }
}

fn reload_fares(app: &mut App) -> Effect {
    app.fares.begin_load();
    app.status_message = "Loading...".to_string();
    Effect::Fetch(FetchTarget::Fares)
}

fn page_status(app: &App) -> String {
    let page = app.fares.page();
    format!("Page {} of {}", page.current_page(), page.page_count())
}
