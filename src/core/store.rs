//! # Collection Store
//!
//! Holds the full collection mirrored from the remote source. It is the only
//! owner of the records; the page view borrows slices out of it.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use log::warn;

use crate::core::record::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record carries the requested id.
    NotFound(String),
    /// The replacement's id belongs to another record.
    DuplicateId(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "record {id} not found"),
            StoreError::DuplicateId(id) => write!(f, "record {id} already exists"),
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug, Clone)]
pub struct CollectionStore<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for CollectionStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> CollectionStore<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Replaces the entire collection. Later duplicates of an id are dropped.
    pub fn load(&mut self, records: Vec<R>) {
        let mut seen = HashSet::with_capacity(records.len());
        self.records = records
            .into_iter()
            .filter(|record| {
                let fresh = seen.insert(record.id());
                if !fresh {
                    warn!("Dropping duplicate record {} from load", record.id());
                }
                fresh
            })
            .collect();
    }

    /// Removes the record with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &R::Id) -> Option<R> {
        let index = self.position(id)?;
        Some(self.records.remove(index))
    }

    /// Swaps the record with `id` for `updated`, keeping its position.
    pub fn replace(&mut self, id: &R::Id, updated: R) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let new_id = updated.id();
        if &new_id != id && self.position(&new_id).is_some() {
            return Err(StoreError::DuplicateId(new_id.to_string()));
        }
        self.records[index] = updated;
        Ok(())
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|record| &record.id() == id)
    }

    pub fn position(&self, id: &R::Id) -> Option<usize> {
        self.records.iter().position(|record| &record.id() == id)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.position(id).is_some()
    }

    /// Borrow a window of the collection, clipped to its length.
    pub fn slice(&self, range: Range<usize>) -> &[R] {
        let end = range.end.min(self.records.len());
        let start = range.start.min(end);
        &self.records[start..end]
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
