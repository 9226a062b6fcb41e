//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Identity of one of the eight regions on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionId {
    Punjab,
    Delhi,
    Bengal,
    Bombay,
    Madras,
    Hyderabad,
    Mysore,
    Maratha,
}

impl RegionId {
    /// All regions, in board order
    pub const ALL: [RegionId; 8] = [
        RegionId::Punjab,
        RegionId::Delhi,
        RegionId::Bengal,
        RegionId::Bombay,
        RegionId::Madras,
        RegionId::Hyderabad,
        RegionId::Mysore,
        RegionId::Maratha,
    ];
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Company administrative seat that can control regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presidency {
    Bengal,
    Bombay,
    Madras,
}

/// Glyph tagging adjacency edges; event cards carry one and the elephant
/// follows it when picking a march target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Square,
    Circle,
    Triangle,
}

/// Session turn counter (one resolved event or action per turn)
pub type Turn = u32;
