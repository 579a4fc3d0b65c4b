//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::{ApiError, Fare, FareBackend, FareId, FareUpdate};
use crate::core::record::Record;

/// Minimal record for exercising the generic table core.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: u32,
    pub label: String,
}

impl Item {
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
        }
    }
}

impl Record for Item {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// Items with ids `1..=n`, labelled "item <id>".
pub fn items(n: u32) -> Vec<Item> {
    (1..=n).map(|i| Item::new(i, &format!("item {i}"))).collect()
}

pub fn fare(id: FareId) -> Fare {
    Fare {
        id,
        from_city: "Jakarta".to_string(),
        from_code: "CGK".to_string(),
        to_city: format!("City {id}"),
        to_code: format!("C{id:02}"),
        duration: 60 + id as u32 * 5,
        price: 500000.0 + id as f64 * 1000.0,
    }
}

/// Fares with ids `1..=n`.
pub fn fares(n: u64) -> Vec<Fare> {
    (1..=n).map(fare).collect()
}

pub fn sample_fares() -> Vec<Fare> {
    vec![
        Fare {
            id: 1,
            from_city: "Jakarta".into(),
            from_code: "CGK".into(),
            to_city: "Denpasar".into(),
            to_code: "DPS".into(),
            duration: 110,
            price: 850000.0,
        },
        Fare {
            id: 2,
            from_city: "Surabaya".into(),
            from_code: "SUB".into(),
            to_city: "Makassar".into(),
            to_code: "UPG".into(),
            duration: 95,
            price: 720000.0,
        },
        Fare {
            id: 3,
            from_city: "Medan".into(),
            from_code: "KNO".into(),
            to_city: "Jayapura".into(),
            to_code: "DJJ".into(),
            duration: 415,
            price: 3100000.0,
        },
    ]
}

/// A backend that never leaves the process.
pub struct NoopBackend;

#[async_trait]
impl FareBackend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn list_fares(&self) -> Result<Vec<Fare>, ApiError> {
        Ok(Vec::new())
    }

    async fn delete_fare(&self, _id: FareId) -> Result<(), ApiError> {
        Ok(())
    }

    async fn update_fare(&self, id: FareId, update: &FareUpdate) -> Result<Fare, ApiError> {
        Ok(update.clone().into_fare(id))
    }
}

/// Creates a test App with a NoopBackend, page size 5 and a 3s dwell.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend), 5, Duration::from_secs(3))
}
