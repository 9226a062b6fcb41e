//! Crisis classification and combat resolution
//!
//! A crisis is the conflict between the elephant's main and target
//! regions. Classification is a pure function over the two statuses;
//! resolution computes the strength totals shown to the player and, once
//! the manual check is reported, the resulting board changes.

pub mod deploy;
pub mod resolution;

pub use deploy::{apply_deploy_outcome, deploy_strengths, DeployResolution};
pub use resolution::{
    apply_crisis_outcome, crisis_strengths, secondary_rebellion_candidates, CrisisResolution,
    CrisisStrengths, SecondaryOutcome,
};

use serde::{Deserialize, Serialize};

use crate::board::elephant::Elephant;
use crate::board::region::RegionStatus;
use crate::board::Board;
use crate::core::error::{EngineError, Result};

/// The ten conflict archetypes handled by the resolver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrisisKind {
    CompanyControlledRebels,
    DominatedRebelsAgainstEmpire,
    EmpireInvadesCompany,
    SovereignInvadesCompany,
    EmpireInvadesSovereign,
    SovereignInvadesEmpireCapital,
    SovereignInvadesDominated,
    SovereignInvadesSovereign,
    /// Never produced by `classify`; selected by the caller when an empire
    /// attacks a region dominated by a different empire.
    EmpireInvadesDominated,
    /// Never produced by `classify`; selected by the caller when two
    /// capitals clash directly.
    EmpireCapitalInvadesEmpireCapital,
}

/// Classify the conflict at the elephant's position. First match wins;
/// the rule order is a deliberate tie-break because statuses overlap
/// across the checks.
///
/// Status pairs that only the two caller-selected archetypes describe
/// (rival-empire attacks on a Dominated region or a capital) are reported
/// as `CrisisUndetermined` rather than guessed.
pub fn classify(elephant: &Elephant, board: &Board) -> Result<CrisisKind> {
    let attacker = board.get(elephant.main)?;

    // A Company region in crisis always means internal rebellion; any
    // target is ignored.
    if attacker.status == RegionStatus::CompanyControlled {
        return Ok(CrisisKind::CompanyControlledRebels);
    }

    let target_id = elephant.target.ok_or(EngineError::TargetRequired {
        attacker: attacker.id,
    })?;
    let defender = board.get(target_id)?;

    use RegionStatus::*;
    if attacker.status == Dominated && attacker.dominator == Some(defender.id) {
        return Ok(CrisisKind::DominatedRebelsAgainstEmpire);
    }
    match (attacker.status, defender.status) {
        (EmpireCapital | Dominated, CompanyControlled) => Ok(CrisisKind::EmpireInvadesCompany),
        (Sovereign, CompanyControlled) => Ok(CrisisKind::SovereignInvadesCompany),
        (EmpireCapital | Dominated, Sovereign) => Ok(CrisisKind::EmpireInvadesSovereign),
        (Sovereign, EmpireCapital) => Ok(CrisisKind::SovereignInvadesEmpireCapital),
        (Sovereign, Dominated) => Ok(CrisisKind::SovereignInvadesDominated),
        (Sovereign, Sovereign) => Ok(CrisisKind::SovereignInvadesSovereign),
        _ => Err(EngineError::CrisisUndetermined {
            attacker: attacker.id,
            defender: defender.id,
        }),
    }
}
