//! Derived empire arithmetic
//!
//! An empire is never stored: it is the capital plus every region whose
//! dominator marker points at it. Strength is the sum of their tower
//! levels.

use crate::board::region::{Region, RegionStatus};
use crate::board::Board;
use crate::core::error::{EngineError, Result};
use crate::core::types::RegionId;

/// Aggregate strength of the empire the given region belongs to.
///
/// Accepts the capital itself or any of its dominated members; anything
/// else is an invalid call.
pub fn empire_strength(board: &Board, id: RegionId) -> Result<u32> {
    let region = board.get(id)?;
    let capital = resolve_capital(board, region)?;
    Ok(capital_strength(board, capital))
}

/// Member ids of the empire whose capital is `capital`: the capital first,
/// then its dominated regions in board order
pub fn empire_members(board: &Board, capital: RegionId) -> Vec<RegionId> {
    let mut members = vec![capital];
    members.extend(board.dominated_by(capital).map(|r| r.id));
    members
}

/// Number of regions currently dominated by `capital`
pub fn dominated_count(board: &Board, capital: RegionId) -> usize {
    board.dominated_by(capital).count()
}

fn resolve_capital<'a>(board: &'a Board, region: &'a Region) -> Result<&'a Region> {
    match region.status {
        RegionStatus::EmpireCapital => Ok(region),
        RegionStatus::Dominated => {
            let capital_id = region.dominator.ok_or(EngineError::InvalidStatus {
                region: region.id,
                status: region.status,
                expected: "a Dominated region with its dominator marker set",
            })?;
            let capital = board.get(capital_id)?;
            if capital.status != RegionStatus::EmpireCapital {
                tracing::warn!(
                    "dominator {} of {} is not an empire capital",
                    capital_id,
                    region.id
                );
                return Err(EngineError::InvalidStatus {
                    region: capital_id,
                    status: capital.status,
                    expected: "EmpireCapital",
                });
            }
            Ok(capital)
        }
        status => {
            tracing::warn!("empire_strength called on {} with status {:?}", region.id, status);
            Err(EngineError::InvalidStatus {
                region: region.id,
                status,
                expected: "EmpireCapital or Dominated",
            })
        }
    }
}

fn capital_strength(board: &Board, capital: &Region) -> u32 {
    capital.tower_level
        + board
            .dominated_by(capital.id)
            .map(|r| r.tower_level)
            .sum::<u32>()
}
