//! Event cards
//!
//! Card templates are data owned by the excluded setup layer; the engine
//! only consumes finished cards and never edits one.

use serde::{Deserialize, Serialize};

use crate::core::types::{RegionId, Symbol};

/// One event card. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCard {
    pub kind: CardKind,
    /// Joins the attack side of the crisis this card triggers; may be
    /// negative.
    pub strength: i32,
    /// Drives the elephant's march after resolution.
    pub symbol: Symbol,
    pub region: RegionId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    ForeignInvasion,
    Shuffle,
    Leader,
    Windfall,
    Turmoil,
    Peace,
    ResolveCrisis,
}
