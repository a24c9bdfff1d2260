//! Dependency graph between state slots and reactions
//!
//! Each reaction declares the slots it depends on. After an event the
//! controller collects the slots that changed and runs every subscribed
//! reaction once, in declaration order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Named pieces of application state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Keyword,
    Candidates,
    SelectedLocation,
    HazardDataset,
    PeakDataset,
    MapSurface,
    TourismSpots,
}

/// Work triggered by slot changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reaction {
    /// Request tourism spots around the selected location
    FetchNearby,
    /// Classify hazards and peaks and draw them on the map surface
    RenderTerrain,
}

/// A reaction and the slots it depends on
#[derive(Debug, Clone, Copy)]
pub struct Subscription {
    pub reaction: Reaction,
    pub depends_on: &'static [Slot],
}

/// The full dependency table
pub const SUBSCRIPTIONS: &[Subscription] = &[
    Subscription {
        reaction: Reaction::FetchNearby,
        depends_on: &[Slot::SelectedLocation],
    },
    Subscription {
        reaction: Reaction::RenderTerrain,
        depends_on: &[Slot::HazardDataset, Slot::PeakDataset, Slot::MapSurface],
    },
];

/// Slots changed while handling one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    slots: BTreeSet<Slot>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, slot: Slot) {
        self.slots.insert(slot);
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reactions subscribed to any changed slot, each listed once
    pub fn reactions(&self) -> Vec<Reaction> {
        SUBSCRIPTIONS
            .iter()
            .filter(|sub| sub.depends_on.iter().any(|slot| self.contains(*slot)))
            .map(|sub| sub.reaction)
            .collect()
    }
}
