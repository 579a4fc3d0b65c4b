//! # Core Console Logic
//!
//! This module contains the fare console's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Table (store + page) │
//!                    │  • MutationCoordinator  │
//!                    │  • NotificationTimer    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │   worker   │      │    api     │
//!     │  Adapter   │      │  (tokio    │      │ (reqwest   │
//!     │ (ratatui)  │      │   tasks)   │      │  backend)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pagination`], [`store`], [`table`]: the paginated collection, generic over [`record::Record`]
//! - [`edit`], [`mutation`]: delete/edit orchestration with per-record locking
//! - [`notification`]: transient banner with generation-checked dismissal
//! - [`stale`]: "data changed" signal shared between views
//! - [`state`]: the `App` struct, all console state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer

pub mod action;
pub mod config;
pub mod edit;
pub mod format;
pub mod mutation;
pub mod notification;
pub mod overview;
pub mod pagination;
pub mod record;
pub mod stale;
pub mod state;
pub mod store;
pub mod table;
