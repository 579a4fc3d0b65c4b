use serde::{Deserialize, Serialize};

use crate::core::format::{format_duration, format_price};
use crate::core::record::Record;

pub type FareId = u64;

/// Base price of an airport pair, as served by `/airports/baseprice`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub id: FareId,
    pub from_city: String,
    pub from_code: String,
    pub to_city: String,
    pub to_code: String,
    /// Flight duration in minutes.
    pub duration: u32,
    pub price: f64,
}

impl Fare {
    /// "Jakarta (CGK)"
    pub fn origin_label(&self) -> String {
        format!("{} ({})", self.from_city, self.from_code)
    }

    pub fn destination_label(&self) -> String {
        format!("{} ({})", self.to_city, self.to_code)
    }

    pub fn route_label(&self) -> String {
        format!("{} → {}", self.from_code, self.to_code)
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }

    pub fn price_label(&self) -> String {
        format_price(self.price)
    }
}

impl Record for Fare {
    type Id = FareId;

    fn id(&self) -> FareId {
        self.id
    }
}

/// The editable fields of a fare, sent as the body of an update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FareUpdate {
    pub from_city: String,
    pub from_code: String,
    pub to_city: String,
    pub to_code: String,
    pub duration: u32,
    pub price: f64,
}

impl FareUpdate {
    pub fn from_fare(fare: &Fare) -> Self {
        Self {
            from_city: fare.from_city.clone(),
            from_code: fare.from_code.clone(),
            to_city: fare.to_city.clone(),
            to_code: fare.to_code.clone(),
            duration: fare.duration,
            price: fare.price,
        }
    }

    /// The fare these fields describe under `id`.
    pub fn into_fare(self, id: FareId) -> Fare {
        Fare {
            id,
            from_city: self.from_city,
            from_code: self.from_code,
            to_city: self.to_city,
            to_code: self.to_code,
            duration: self.duration,
            price: self.price,
        }
    }
}

/// Response wrapper used by every endpoint: `{ "data": ..., "message": ... }`.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}
