use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{CutoffBoundary, Direction};

/// Knobs for the derivation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Default comparison direction for attempt values.
    pub direction: Direction,
    /// Per-event direction, keyed by event id.
    pub direction_overrides: BTreeMap<String, Direction>,
    /// Whether equalling the cutoff counts as making it.
    pub cutoff_boundary: CutoffBoundary,
    /// Optional cap on the share of a round that may advance, in percent.
    pub max_advancing_percent: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            direction: Direction::LowerIsBetter,
            direction_overrides: BTreeMap::new(),
            cutoff_boundary: CutoffBoundary::Strict,
            max_advancing_percent: None,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Direction that applies to `event_id`.
    pub fn direction_for(&self, event_id: &str) -> Direction {
        self.direction_overrides
            .get(event_id)
            .copied()
            .unwrap_or(self.direction)
    }
}
