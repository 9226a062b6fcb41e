//! Elephant marker and the march algorithm
//!
//! The elephant marks where the next event lands: `main` alone for a
//! Company region, or an attacker/defender pair otherwise. Marching is
//! fully deterministic; the drawn card's symbol is the only input beyond
//! the board.

use serde::{Deserialize, Serialize};

use crate::board::region::RegionStatus;
use crate::board::Board;
use crate::core::error::{EngineError, Result};
use crate::core::types::{RegionId, Symbol};

/// The pending point of conflict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elephant {
    pub main: RegionId,
    pub target: Option<RegionId>,
}

impl Elephant {
    pub fn at(main: RegionId) -> Self {
        Self { main, target: None }
    }

    pub fn aimed(main: RegionId, target: RegionId) -> Self {
        Self {
            main,
            target: Some(target),
        }
    }
}

/// Compute the next elephant position after an event lands on `from`.
///
/// Per region status:
/// - CompanyControlled: the region stands alone.
/// - Dominated: the region faces its own capital.
/// - Sovereign: the first neighbor carrying the symbol becomes the target.
/// - EmpireCapital: if every neighbor is dominated by this capital, the
///   symbol-matching neighbor turns on the capital itself. Otherwise the
///   first symbol-matching neighbor is the target unless this capital
///   already dominates it, in which case the neighbor list is scanned
///   cyclically from that position for the first region outside the
///   empire.
pub fn march(board: &Board, from: RegionId, symbol: Symbol) -> Result<Elephant> {
    let region = board.get(from)?;

    match region.status {
        RegionStatus::CompanyControlled => Ok(Elephant::at(from)),

        RegionStatus::Dominated => {
            let capital = region.dominator.ok_or(EngineError::InvalidStatus {
                region: from,
                status: region.status,
                expected: "a Dominated region with its dominator marker set",
            })?;
            Ok(Elephant::aimed(from, capital))
        }

        RegionStatus::Sovereign => {
            let target = region
                .neighbors
                .iter()
                .find(|n| n.carries(symbol))
                .ok_or(EngineError::NoSymbolNeighbor { region: from, symbol })?;
            Ok(Elephant::aimed(from, target.id))
        }

        RegionStatus::EmpireCapital => {
            let in_own_empire = |id: RegionId| {
                board
                    .find(id)
                    .map_or(false, |r| r.dominator == Some(from))
            };

            // Fully surrounded by its own empire: a vassal turns on the
            // capital instead.
            if region.neighbors.iter().all(|n| in_own_empire(n.id)) {
                let rebel = region
                    .neighbors
                    .iter()
                    .find(|n| n.carries(symbol))
                    .ok_or(EngineError::NoSymbolNeighbor { region: from, symbol })?;
                return Ok(Elephant::aimed(rebel.id, from));
            }

            let primary_idx = region
                .neighbors
                .iter()
                .position(|n| n.carries(symbol))
                .ok_or(EngineError::NoSymbolNeighbor { region: from, symbol })?;

            // Cyclic scan from the primary match for the first neighbor
            // outside this capital's empire. The primary itself is checked
            // first, so an unowned primary is taken directly.
            let count = region.neighbors.len();
            for step in 0..count {
                let neighbor = &region.neighbors[(primary_idx + step) % count];
                if !in_own_empire(neighbor.id) {
                    return Ok(Elephant::aimed(from, neighbor.id));
                }
            }

            tracing::debug!("march from capital {} found no target outside its empire", from);
            Err(EngineError::NoTargetFound(from))
        }
    }
}
