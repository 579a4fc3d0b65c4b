//! # Edit Session
//!
//! At most one record is edited at a time. The session is a single tagged
//! value instead of separate "modal shown" / "editing id" / "selected record"
//! flags, so a modal without a record cannot exist.

use crate::core::record::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenEdit<R: Record> {
    pub id: R::Id,
    /// The record as it was when the session opened.
    pub original: R,
    /// True while the update call is in flight.
    pub saving: bool,
    /// Failure of the last save attempt, shown on the edit surface.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditSession<R: Record> {
    Closed,
    Open(OpenEdit<R>),
}

impl<R: Record> Default for EditSession<R> {
    fn default() -> Self {
        EditSession::Closed
    }
}

impl<R: Record> EditSession<R> {
    pub fn open(record: R) -> Self {
        EditSession::Open(OpenEdit {
            id: record.id(),
            original: record,
            saving: false,
            error: None,
        })
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Open(_))
    }

    pub fn target(&self) -> Option<&R::Id> {
        match self {
            EditSession::Open(edit) => Some(&edit.id),
            EditSession::Closed => None,
        }
    }

    pub fn targets(&self, id: &R::Id) -> bool {
        self.target() == Some(id)
    }

    pub fn as_open(&self) -> Option<&OpenEdit<R>> {
        match self {
            EditSession::Open(edit) => Some(edit),
            EditSession::Closed => None,
        }
    }

    pub fn as_open_mut(&mut self) -> Option<&mut OpenEdit<R>> {
        match self {
            EditSession::Open(edit) => Some(edit),
            EditSession::Closed => None,
        }
    }

    /// Closes the session, returning what was open.
    pub fn close(&mut self) -> Option<OpenEdit<R>> {
        match std::mem::take(self) {
            EditSession::Open(edit) => Some(edit),
            EditSession::Closed => None,
        }
    }
}
