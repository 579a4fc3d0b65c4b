//! # Background Work
//!
//! Runs the effects `update()` asks for. Every remote call and every
//! dismissal timer is its own tokio task whose result comes back to the UI
//! loop as an `Action` over the channel.
//!
//! If the console is torn down before a task resolves, the receiver is gone,
//! the send fails and the result is dropped. Nothing is applied to state
//! that no longer exists.

use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::api::{FareBackend, FareId, FareUpdate};
use crate::core::action::{Action, Effect, FetchTarget};
use crate::core::state::App;

fn report(tx: &mpsc::Sender<Action>, action: Action) {
    if let Err(e) = tx.send(action) {
        warn!("Dropping {:?}: receiver dropped", e.0);
    }
}

pub fn spawn_fetch(
    backend: Arc<dyn FareBackend>,
    target: FetchTarget,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning fetch for {:?} via {}", target, backend.name());
    tokio::spawn(async move {
        let result = backend.list_fares().await;
        let action = match target {
            FetchTarget::Fares => Action::FaresLoaded(result),
            FetchTarget::Overview => Action::OverviewLoaded(result),
        };
        report(&tx, action);
    })
    .abort_handle()
}

pub fn spawn_delete(
    backend: Arc<dyn FareBackend>,
    id: FareId,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning delete of fare {}", id);
    tokio::spawn(async move {
        let result = backend.delete_fare(id).await;
        report(&tx, Action::DeleteFinished { id, result });
    })
    .abort_handle()
}

pub fn spawn_update(
    backend: Arc<dyn FareBackend>,
    id: FareId,
    update: FareUpdate,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning update of fare {}", id);
    tokio::spawn(async move {
        let result = backend.update_fare(id, &update).await;
        report(&tx, Action::UpdateFinished { id, result });
    })
    .abort_handle()
}

/// Reports `DismissNotification(generation)` after `dwell`.
pub fn spawn_dismiss(generation: u64, dwell: Duration, tx: mpsc::Sender<Action>) -> AbortHandle {
    debug!("Dismissing notification #{} in {:?}", generation, dwell);
    tokio::spawn(async move {
        tokio::time::sleep(dwell).await;
        report(&tx, Action::DismissNotification(generation));
    })
    .abort_handle()
}

/// Runs one effect. Returns true if the console should quit.
pub fn dispatch(app: &mut App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::Fetch(target) => {
            spawn_fetch(app.backend.clone(), target, tx.clone());
        }
        Effect::Delete(id) => {
            spawn_delete(app.backend.clone(), id, tx.clone());
        }
        Effect::Update { id, update } => {
            spawn_update(app.backend.clone(), id, update, tx.clone());
        }
        Effect::ScheduleDismiss(generation) => {
            let handle = spawn_dismiss(generation, app.notices.dwell(), tx.clone());
            app.notices.arm(handle);
        }
    }
    false
}
