pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::{FareBackend, HttpFareBackend};
pub use credentials::{CredentialProvider, StaticToken, TokenFile};
pub use error::ApiError;
pub use types::{Fare, FareId, FareUpdate};
