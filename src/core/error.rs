use thiserror::Error;

use crate::board::region::RegionStatus;
use crate::core::types::{RegionId, Symbol};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("region not found: {0}")]
    RegionNotFound(RegionId),

    #[error("region {region} has status {status:?}, expected {expected}")]
    InvalidStatus {
        region: RegionId,
        status: RegionStatus,
        expected: &'static str,
    },

    #[error("crisis at {attacker} needs a target region")]
    TargetRequired { attacker: RegionId },

    #[error("{attacker} against {defender} matches no classifier rule; select the archetype explicitly")]
    CrisisUndetermined {
        attacker: RegionId,
        defender: RegionId,
    },

    #[error("no neighbor of {region} carries symbol {symbol:?}")]
    NoSymbolNeighbor { region: RegionId, symbol: Symbol },

    #[error("no march target found from {0}")]
    NoTargetFound(RegionId),

    #[error("draw pile is empty")]
    DeckEmpty,

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
