//! # Overview
//!
//! Aggregate figures over the fare list. This view keeps its own snapshot
//! from its own fetch and never reads the fare table, so it learns about
//! edits and deletes only through the [`StaleFlag`].

use chrono::{DateTime, Local};
use log::info;

use crate::api::Fare;
use crate::core::stale::StaleFlag;
use crate::core::table::LoadState;

#[derive(Debug, Clone, PartialEq)]
pub struct FareSummary {
    pub count: usize,
    pub cheapest: Option<Fare>,
    pub longest: Option<Fare>,
    pub average_price: Option<f64>,
}

impl FareSummary {
    pub fn from_fares(fares: &[Fare]) -> Self {
        let cheapest = fares
            .iter()
            .min_by(|a, b| a.price.total_cmp(&b.price))
            .cloned();
        let longest = fares.iter().max_by_key(|f| f.duration).cloned();
        let average_price = if fares.is_empty() {
            None
        } else {
            Some(fares.iter().map(|f| f.price).sum::<f64>() / fares.len() as f64)
        };
        Self {
            count: fares.len(),
            cheapest,
            longest,
            average_price,
        }
    }
}

#[derive(Debug, Default)]
pub struct Overview {
    summary: Option<FareSummary>,
    load_state: LoadState,
    refreshed_at: Option<DateTime<Local>>,
}

impl Overview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Option<&FareSummary> {
        self.summary.as_ref()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Local>> {
        self.refreshed_at
    }

    /// Called when the view becomes visible. Consumes the stale mark and
    /// returns true if a full reload is due.
    pub fn needs_reload(&self, stale: &StaleFlag) -> bool {
        let was_stale = stale.consume_stale();
        was_stale || self.load_state == LoadState::NotLoaded
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn apply_load(&mut self, fares: &[Fare]) {
        let summary = FareSummary::from_fares(fares);
        info!("Overview refreshed: {} fares", summary.count);
        self.summary = Some(summary);
        self.load_state = LoadState::Loaded;
        self.refreshed_at = Some(Local::now());
    }

    pub fn fail_load(&mut self, reason: String) {
        self.load_state = LoadState::Failed(reason);
    }
}
