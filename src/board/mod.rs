//! Board state: the region collection and its change-set discipline
//!
//! The `Board` is the single mutable source of truth for a session.
//! Resolvers borrow it, compute on a working copy, and hand back a
//! `RegionChanges` batch; the owner merges the batch by id. No resolver
//! ever mutates the caller's board in place.

pub mod elephant;
pub mod empire;
pub mod region;

pub use elephant::{march, Elephant};
pub use empire::{dominated_count, empire_members, empire_strength};
pub use region::{Neighbor, Region, RegionStatus};

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};
use crate::core::types::RegionId;

/// The region collection for one session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    regions: Vec<Region>,
}

impl Board {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn find(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn get(&self, id: RegionId) -> Result<&Region> {
        self.find(id).ok_or(EngineError::RegionNotFound(id))
    }

    pub fn get_mut(&mut self, id: RegionId) -> Result<&mut Region> {
        self.regions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(EngineError::RegionNotFound(id))
    }

    pub fn regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.regions.iter_mut()
    }

    /// Regions currently dominated by the given capital
    pub fn dominated_by(&self, capital: RegionId) -> impl Iterator<Item = &Region> {
        self.regions
            .iter()
            .filter(move |r| r.status == RegionStatus::Dominated && r.dominator == Some(capital))
    }

    /// Merge a change batch, replacing each changed region by id
    pub fn apply(&mut self, changes: &RegionChanges) {
        for changed in changes.iter() {
            debug_assert!(changed.validate().is_ok(), "invalid region in change batch");
            if let Some(slot) = self.regions.iter_mut().find(|r| r.id == changed.id) {
                *slot = changed.clone();
            }
        }
    }

    /// The regions of `after` that differ from this board
    pub fn diff(&self, after: &Board) -> RegionChanges {
        let mut changes = RegionChanges::default();
        for region in &after.regions {
            if self.find(region.id) != Some(region) {
                changes.set(region.clone());
            }
        }
        changes
    }
}

/// Batch of updated regions keyed by id; later writes to the same id win
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionChanges {
    regions: Vec<Region>,
}

impl RegionChanges {
    pub fn set(&mut self, region: Region) {
        if let Some(slot) = self.regions.iter_mut().find(|r| r.id == region.id) {
            *slot = region;
        } else {
            self.regions.push(region);
        }
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
