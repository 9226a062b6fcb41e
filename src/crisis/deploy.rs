//! The Company deploy action
//!
//! A deploy is a direct player move against a chosen region, outside the
//! event-driven crisis flow. It always pushes toward Company control:
//! success converts the target (or suppresses its unrest if the Company
//! already holds it) and collects plunder from the towers torn down.

use serde::{Deserialize, Serialize};

use crate::board::empire::empire_strength;
use crate::board::region::RegionStatus;
use crate::board::{Board, RegionChanges};
use crate::core::config::GameRules;
use crate::core::error::Result;
use crate::core::types::{Presidency, RegionId};
use crate::crisis::resolution::{release_subordinates, shatter_check};

/// Result of a deploy. `loot` is the plunder paid out on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployResolution {
    pub changes: RegionChanges,
    pub loot: u32,
}

/// Defense total the deploy must beat, by target status: a sovereign
/// garrison, a whole empire, or the unrest to be put down. The attack
/// side is a manual check and never computed here.
pub fn deploy_strengths(board: &Board, target: RegionId) -> Result<i32> {
    let region = board.get(target)?;
    let defense = match region.status {
        RegionStatus::Sovereign => region.tower_level as i32,
        RegionStatus::Dominated | RegionStatus::EmpireCapital => {
            empire_strength(board, target)? as i32
        }
        RegionStatus::CompanyControlled => region.unrest as i32,
    };
    Ok(defense)
}

/// Apply the reported outcome of a deploy against `target`.
pub fn apply_deploy_outcome(
    board: &Board,
    target: RegionId,
    succeeded: bool,
    presidency: Presidency,
    rules: &GameRules,
) -> Result<DeployResolution> {
    let region = board.get(target)?;

    if !succeeded {
        return Ok(DeployResolution {
            changes: RegionChanges::default(),
            loot: 0,
        });
    }

    let mut work = board.clone();
    let mut loot = 0;

    match region.status {
        RegionStatus::CompanyControlled => {
            // Suppression; a calm region makes the deploy a no-op.
            if region.unrest > 0 {
                work.get_mut(target)?.unrest = 0;
            }
        }
        RegionStatus::Sovereign => {
            loot = convert_to_company(&mut work, target, presidency, rules)?;
        }
        RegionStatus::Dominated => {
            let former = work.get(target)?.dominator;
            loot = convert_to_company(&mut work, target, presidency, rules)?;
            if let Some(capital) = former {
                shatter_check(&mut work, capital)?;
            }
        }
        RegionStatus::EmpireCapital => {
            loot = convert_to_company(&mut work, target, presidency, rules)?;
            release_subordinates(&mut work, target);
        }
    }

    Ok(DeployResolution {
        changes: board.diff(&work),
        loot,
    })
}

fn convert_to_company(
    work: &mut Board,
    target: RegionId,
    presidency: Presidency,
    rules: &GameRules,
) -> Result<u32> {
    let region = work.get_mut(target)?;
    let loot = region.tower_level * rules.loot_per_tower
        + if region.loot_available { region.loot_amount } else { 0 };

    region.status = RegionStatus::CompanyControlled;
    region.presidency = Some(presidency);
    region.dominator = None;
    region.tower_level = 0;
    region.unrest = 0;
    region.loot_available = false;
    tracing::debug!("the Company takes {} for {} loot", target, loot);
    Ok(loot)
}
