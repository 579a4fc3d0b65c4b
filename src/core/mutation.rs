//! # Mutation Coordinator
//!
//! Sequences delete and edit-update against the remote collection and keeps
//! the local table consistent afterwards.
//!
//! ```text
//! delete:  request_delete → confirm_delete ─(remote)→ complete_delete
//!                         ↘ decline_delete (no change, no notification)
//!
//! edit:    begin_edit → submit_edit ─(remote)→ complete_update
//!                     ↘ cancel_edit (no remote call)
//! ```
//!
//! The remote calls themselves happen elsewhere; this type only decides
//! what may start and how results are applied. A record is locked from the
//! moment it is picked for deletion or editing until its remote call
//! resolves, so no second mutation can start on the same id. Different
//! records mutate independently.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::api::ApiError;
use crate::core::edit::EditSession;
use crate::core::notification::NotificationTimer;
use crate::core::record::Record;
use crate::core::stale::StaleFlag;
use crate::core::table::Table;

pub const DELETED_MESSAGE: &str = "Data deleted.";
pub const UPDATED_MESSAGE: &str = "Data updated.";

#[derive(Debug)]
pub struct MutationCoordinator<R: Record> {
    edit: EditSession<R>,
    /// Awaiting the user's yes/no.
    pending_delete: Option<R::Id>,
    /// Ids with a delete or update call in flight.
    in_flight: HashSet<R::Id>,
}

impl<R: Record> Default for MutationCoordinator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> MutationCoordinator<R> {
    pub fn new() -> Self {
        Self {
            edit: EditSession::Closed,
            pending_delete: None,
            in_flight: HashSet::new(),
        }
    }

    pub fn edit(&self) -> &EditSession<R> {
        &self.edit
    }

    pub fn pending_delete(&self) -> Option<&R::Id> {
        self.pending_delete.as_ref()
    }

    pub fn is_in_flight(&self, id: &R::Id) -> bool {
        self.in_flight.contains(id)
    }

    /// Whether the row for `id` may offer its Edit/Delete actions.
    pub fn row_actions_enabled(&self, id: &R::Id) -> bool {
        !self.in_flight.contains(id)
            && !self.edit.targets(id)
            && self.pending_delete.as_ref() != Some(id)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Asks for confirmation before deleting `id`. Refused for locked or
    /// unknown records.
    pub fn request_delete(&mut self, table: &Table<R>, id: R::Id) -> bool {
        if !table.contains(&id) || !self.row_actions_enabled(&id) {
            debug!("Delete of {} refused: record locked or absent", id);
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// The user said no. Nothing else changes.
    pub fn decline_delete(&mut self) -> Option<R::Id> {
        let id = self.pending_delete.take();
        if let Some(ref id) = id {
            debug!("Delete of {} declined", id);
        }
        id
    }

    /// The user said yes. Returns the id to delete remotely, now locked.
    pub fn confirm_delete(&mut self) -> Option<R::Id> {
        let id = self.pending_delete.take()?;
        info!("Deleting {}", id);
        self.in_flight.insert(id.clone());
        Some(id)
    }

    /// Applies the remote outcome of a delete. Always raises a notification
    /// and returns its generation.
    pub fn complete_delete(
        &mut self,
        table: &mut Table<R>,
        notices: &mut NotificationTimer,
        stale: &StaleFlag,
        id: &R::Id,
        result: Result<(), ApiError>,
    ) -> u64 {
        self.in_flight.remove(id);
        match result {
            Ok(()) => {
                if table.remove(id).is_none() {
                    debug!("Deleted record {} was already gone locally", id);
                }
                stale.mark_stale();
                notices.success(DELETED_MESSAGE)
            }
            Err(e) => {
                warn!("Delete of {} failed: {}", id, e);
                notices.error(e.reason())
            }
        }
    }

    // ------------------------------------------------------------------
    // Edit
    // ------------------------------------------------------------------

    /// Opens an edit session for `id`, implicitly cancelling a session open
    /// for another record. Refused for locked or unknown records.
    pub fn begin_edit(&mut self, table: &Table<R>, id: R::Id) -> bool {
        if self.edit.targets(&id) {
            return true;
        }
        if self.in_flight.contains(&id) || self.pending_delete.as_ref() == Some(&id) {
            debug!("Edit of {} refused: record locked", id);
            return false;
        }
        let Some(record) = table.get(&id) else {
            debug!("Edit of {} refused: record absent", id);
            return false;
        };
        let record = record.clone();
        if let Some(previous) = self.edit.close() {
            info!("Edit of {} cancelled by edit of {}", previous.id, id);
        }
        self.edit = EditSession::open(record);
        true
    }

    /// Discards the session without contacting the remote.
    pub fn cancel_edit(&mut self) -> Option<R::Id> {
        let closed = self.edit.close()?;
        debug!("Edit of {} cancelled", closed.id);
        Some(closed.id)
    }

    /// Marks the open session as saving. Returns the id to update remotely,
    /// or `None` if there is no session or a save is already running.
    pub fn submit_edit(&mut self) -> Option<R::Id> {
        let edit = self.edit.as_open_mut()?;
        if edit.saving {
            return None;
        }
        edit.saving = true;
        edit.error = None;
        let id = edit.id.clone();
        info!("Saving {}", id);
        self.in_flight.insert(id.clone());
        Some(id)
    }

    /// Applies the remote outcome of an update. Returns the generation of
    /// the notification raised, or `None` when the failure went to the
    /// still-open edit session instead.
    pub fn complete_update(
        &mut self,
        table: &mut Table<R>,
        notices: &mut NotificationTimer,
        stale: &StaleFlag,
        id: &R::Id,
        result: Result<R, ApiError>,
    ) -> Option<u64> {
        self.in_flight.remove(id);
        let session_open = self.edit.targets(id);
        match result {
            Ok(updated) => {
                if session_open {
                    self.edit.close();
                }
                // The remote changed either way, so siblings must reload.
                stale.mark_stale();
                match table.replace(id, updated) {
                    Ok(()) => Some(notices.success(UPDATED_MESSAGE)),
                    Err(e) => {
                        warn!("Updated record {} could not be applied locally: {}", id, e);
                        Some(notices.error(format!("Update saved but not shown: {e}")))
                    }
                }
            }
            Err(e) => {
                warn!("Update of {} failed: {}", id, e);
                match self.edit.as_open_mut() {
                    Some(edit) if session_open => {
                        edit.saving = false;
                        edit.error = Some(e.reason());
                        None
                    }
                    _ => Some(notices.error(e.reason())),
                }
            }
        }
    }

    /// Drops a session or pending confirmation whose record vanished in a
    /// full reload.
    pub fn reconcile_after_load(&mut self, table: &Table<R>) {
        if let Some(edit) = self.edit.as_open()
            && !edit.saving
            && !table.contains(&edit.id)
        {
            warn!("Record {} under edit disappeared on reload", edit.id);
            self.edit.close();
        }
        if let Some(id) = self.pending_delete.as_ref()
            && !table.contains(id)
        {
            debug!("Record {} awaiting delete confirmation disappeared", id);
            self.pending_delete = None;
        }
    }
}
