//! # Application State
//!
//! Core console state. This module contains domain state only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn FareBackend>           // remote fare service
//! ├── fares: Table<Fare>                      // collection + page + load state
//! ├── mutations: MutationCoordinator<Fare>    // edit session, confirmations, locks
//! ├── notices: NotificationTimer              // transient banner
//! ├── stale: StaleFlag                        // shared "data changed" signal
//! ├── overview: Overview                      // sibling view snapshot
//! ├── view: View                              // which view is showing
//! └── status_message: String                  // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::Duration;

use crate::api::{Fare, FareBackend};
use crate::core::config::ResolvedConfig;
use crate::core::mutation::MutationCoordinator;
use crate::core::notification::NotificationTimer;
use crate::core::overview::Overview;
use crate::core::stale::StaleFlag;
use crate::core::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Fares,
    Overview,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Fares => View::Overview,
            View::Overview => View::Fares,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Fares => "Fares",
            View::Overview => "Overview",
        }
    }
}

pub struct App {
    pub backend: Arc<dyn FareBackend>,
    pub fares: Table<Fare>,
    pub mutations: MutationCoordinator<Fare>,
    pub notices: NotificationTimer,
    pub stale: StaleFlag,
    pub overview: Overview,
    pub view: View,
    pub status_message: String,
}

impl App {
    pub fn new(backend: Arc<dyn FareBackend>, page_size: usize, dwell: Duration) -> Self {
        Self {
            backend,
            fares: Table::new(page_size),
            mutations: MutationCoordinator::new(),
            notices: NotificationTimer::new(dwell),
            stale: StaleFlag::new(),
            overview: Overview::new(),
            view: View::Fares,
            status_message: String::from("Welcome to fareadmin!"),
        }
    }

    pub fn from_config(backend: Arc<dyn FareBackend>, config: &ResolvedConfig) -> Self {
        Self::new(backend, config.page_size, config.dwell)
    }

    /// The fare awaiting delete confirmation, if any.
    pub fn pending_delete_fare(&self) -> Option<&Fare> {
        self.mutations
            .pending_delete()
            .and_then(|id| self.fares.get(id))
    }
}
