//! # Records
//!
//! The table core manages records it knows almost nothing about. A record
//! only has to expose a stable, comparable key; every other attribute is
//! passed through to the view untouched.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An item of a remote-backed collection, keyed by a unique id.
pub trait Record: Clone + Debug {
    type Id: Clone + Eq + Hash + Debug + Display;

    fn id(&self) -> Self::Id;
}
