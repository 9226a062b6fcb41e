//! Crisis strength arithmetic and outcome application
//!
//! `crisis_strengths` computes the totals presented before the manual
//! military check; `apply_crisis_outcome` turns the reported outcome into
//! a change batch. Resolution works on a working copy of the board and
//! returns the diff, so the caller's board is never half-updated.

use crate::board::elephant::Elephant;
use crate::board::empire::{dominated_count, empire_strength};
use crate::board::region::{Region, RegionStatus};
use crate::board::{Board, RegionChanges};
use crate::core::config::GameRules;
use crate::core::error::{EngineError, Result};
use crate::core::types::RegionId;
use crate::crisis::CrisisKind;
use crate::deck::card::EventCard;

/// Strength totals for one crisis. `defense` is `None` for the Company
/// crises, whose defense is a manual check rather than a number.
#[derive(Debug, Clone, Copy)]
pub struct CrisisStrengths {
    pub attack: i32,
    pub defense: Option<i32>,
}

/// Result of applying a crisis outcome. The resolver never moves the
/// elephant; `attacker_advances` tells the caller whether to march it.
#[derive(Debug, Clone)]
pub struct CrisisResolution {
    pub changes: RegionChanges,
    pub attacker_advances: bool,
}

/// Caller-reported outcome of one secondary rebellion
#[derive(Debug, Clone, Copy)]
pub struct SecondaryOutcome {
    pub region: RegionId,
    pub succeeded: bool,
}

/// Company regions eligible to rise alongside a crisis at `primary`:
/// every other Company region with unrest on it
pub fn secondary_rebellion_candidates(board: &Board, primary: RegionId) -> Vec<RegionId> {
    board
        .regions()
        .iter()
        .filter(|r| r.status == RegionStatus::CompanyControlled && r.unrest > 0 && r.id != primary)
        .map(|r| r.id)
        .collect()
}

/// Compute attack and defense totals for the given archetype.
///
/// The card strength always joins the attack side and may be negative.
/// Against the Company the defender's unrest joins the attack as well,
/// doubled under Sepoy Recruitment.
pub fn crisis_strengths(
    kind: CrisisKind,
    elephant: &Elephant,
    board: &Board,
    card: &EventCard,
    rules: &GameRules,
) -> Result<CrisisStrengths> {
    let attacker = board.get(elephant.main)?;
    let defender = resolve_defender(kind, elephant, board)?;
    validate_kind(kind, attacker, defender)?;

    let s = card.strength;
    let unrest_term = |region: &Region| {
        let unrest = region.unrest as i32;
        if rules.sepoy_recruitment {
            unrest * 2
        } else {
            unrest
        }
    };

    use CrisisKind::*;
    let strengths = match kind {
        SovereignInvadesSovereign => CrisisStrengths {
            attack: attacker.tower_level as i32 + s,
            defense: Some(defender.expect("validated").tower_level as i32),
        },
        SovereignInvadesDominated | SovereignInvadesEmpireCapital => CrisisStrengths {
            attack: attacker.tower_level as i32 + s,
            defense: Some(empire_strength(board, defender.expect("validated").id)? as i32),
        },
        EmpireInvadesSovereign => CrisisStrengths {
            attack: empire_strength(board, attacker.id)? as i32 + s,
            defense: Some(defender.expect("validated").tower_level as i32),
        },
        EmpireInvadesDominated | EmpireCapitalInvadesEmpireCapital => CrisisStrengths {
            attack: empire_strength(board, attacker.id)? as i32 + s,
            defense: Some(empire_strength(board, defender.expect("validated").id)? as i32),
        },
        // A rebel faces the capital's own garrison, not the whole empire.
        DominatedRebelsAgainstEmpire => CrisisStrengths {
            attack: attacker.tower_level as i32 + s,
            defense: Some(defender.expect("validated").tower_level as i32),
        },
        EmpireInvadesCompany => CrisisStrengths {
            attack: empire_strength(board, attacker.id)? as i32
                + s
                + unrest_term(defender.expect("validated")),
            defense: None,
        },
        SovereignInvadesCompany => CrisisStrengths {
            attack: attacker.tower_level as i32 + s + unrest_term(defender.expect("validated")),
            defense: None,
        },
        CompanyControlledRebels => CrisisStrengths {
            attack: attacker.unrest as i32 + s,
            defense: None,
        },
    };
    Ok(strengths)
}

/// Apply the reported outcome of a crisis and return the changed regions.
///
/// `secondary` carries the caller-resolved outcomes of any secondary
/// rebellions; it is only accepted for the Company crises.
pub fn apply_crisis_outcome(
    kind: CrisisKind,
    elephant: &Elephant,
    board: &Board,
    succeeded: bool,
    secondary: &[SecondaryOutcome],
) -> Result<CrisisResolution> {
    let attacker = board.get(elephant.main)?;
    let attacker_id = attacker.id;
    let defender = resolve_defender(kind, elephant, board)?;
    let defender_id = defender.map(|r| r.id);
    validate_kind(kind, attacker, defender)?;

    let mut work = board.clone();

    use CrisisKind::*;
    match kind {
        SovereignInvadesSovereign
        | SovereignInvadesDominated
        | SovereignInvadesEmpireCapital
        | EmpireInvadesSovereign
        | EmpireInvadesDominated
        | EmpireCapitalInvadesEmpireCapital => {
            reject_secondaries(kind, secondary, board)?;
            let defender_id = defender_id.expect("validated");
            if succeeded {
                conquer(&mut work, attacker_id, defender_id)?;
            } else {
                attrition(&mut work, attacker_id)?;
            }
        }

        DominatedRebelsAgainstEmpire => {
            reject_secondaries(kind, secondary, board)?;
            if succeeded {
                liberate(&mut work, attacker_id)?;
            } else {
                attrition(&mut work, attacker_id)?;
            }
        }

        CompanyControlledRebels | EmpireInvadesCompany | SovereignInvadesCompany => {
            let company_id = match kind {
                CompanyControlledRebels => attacker_id,
                _ => defender_id.expect("validated"),
            };
            if succeeded {
                match kind {
                    CompanyControlledRebels => company_revolts(&mut work, company_id)?,
                    _ => company_falls(&mut work, attacker_id, company_id)?,
                }
            } else {
                work.get_mut(company_id)?.unrest = 0;
            }
            for outcome in secondary {
                apply_secondary(&mut work, company_id, outcome)?;
            }
        }
    }

    Ok(CrisisResolution {
        changes: board.diff(&work),
        attacker_advances: succeeded,
    })
}

/// The capital conquests accrue to: the attacker itself when Sovereign
/// (promoted on the spot) or already a capital, its dominator when the
/// attacker fights as a Dominated member of an empire
fn promote_attacker(work: &mut Board, attacker_id: RegionId) -> Result<RegionId> {
    let attacker = work.get_mut(attacker_id)?;
    match attacker.status {
        RegionStatus::Sovereign => {
            attacker.status = RegionStatus::EmpireCapital;
            tracing::debug!("{} rises to empire capital", attacker_id);
            Ok(attacker_id)
        }
        RegionStatus::EmpireCapital => Ok(attacker_id),
        RegionStatus::Dominated => attacker.dominator.ok_or(EngineError::InvalidStatus {
            region: attacker_id,
            status: RegionStatus::Dominated,
            expected: "a Dominated region with its dominator marker set",
        }),
        RegionStatus::CompanyControlled => Err(EngineError::InvalidStatus {
            region: attacker_id,
            status: RegionStatus::CompanyControlled,
            expected: "a non-Company attacker",
        }),
    }
}

fn conquer(work: &mut Board, attacker_id: RegionId, defender_id: RegionId) -> Result<()> {
    let capital_id = promote_attacker(work, attacker_id)?;

    let defender = work.get_mut(defender_id)?;
    let former_status = defender.status;
    let former_dominator = defender.dominator;
    defender.status = RegionStatus::Dominated;
    defender.dominator = Some(capital_id);
    tracing::debug!("{} falls under {}", defender_id, capital_id);

    match former_status {
        // A captured capital cannot dominate: its empire dissolves.
        RegionStatus::EmpireCapital => release_subordinates(work, defender_id),
        RegionStatus::Dominated => {
            if let Some(former) = former_dominator {
                shatter_check(work, former)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn liberate(work: &mut Board, rebel_id: RegionId) -> Result<()> {
    let rebel = work.get_mut(rebel_id)?;
    let capital = rebel.dominator.take().ok_or(EngineError::InvalidStatus {
        region: rebel_id,
        status: rebel.status,
        expected: "a Dominated region with its dominator marker set",
    })?;
    rebel.status = RegionStatus::Sovereign;
    tracing::debug!("{} breaks free of {}", rebel_id, capital);
    shatter_check(work, capital)
}

fn company_falls(work: &mut Board, attacker_id: RegionId, company_id: RegionId) -> Result<()> {
    let capital_id = promote_attacker(work, attacker_id)?;
    let region = work.get_mut(company_id)?;
    region.status = RegionStatus::Dominated;
    region.dominator = Some(capital_id);
    region.presidency = None;
    region.unrest = 0;
    tracing::debug!("the Company loses {} to {}", company_id, capital_id);
    Ok(())
}

fn company_revolts(work: &mut Board, region_id: RegionId) -> Result<()> {
    let region = work.get_mut(region_id)?;
    region.status = RegionStatus::Sovereign;
    region.presidency = None;
    region.unrest = 0;
    tracing::debug!("{} throws off Company rule", region_id);
    Ok(())
}

fn attrition(work: &mut Board, region_id: RegionId) -> Result<()> {
    let region = work.get_mut(region_id)?;
    if region.tower_level > 0 {
        region.tower_level -= 1;
    }
    Ok(())
}

/// Free every region the given capital dominates
pub(crate) fn release_subordinates(work: &mut Board, capital_id: RegionId) {
    for region in work.regions_mut() {
        if region.dominator == Some(capital_id) {
            region.status = RegionStatus::Sovereign;
            region.dominator = None;
        }
    }
}

/// Revert a capital to Sovereign once it dominates nothing. Runs on the
/// post-transfer board state.
pub(crate) fn shatter_check(work: &mut Board, capital_id: RegionId) -> Result<()> {
    if dominated_count(work, capital_id) > 0 {
        return Ok(());
    }
    let capital = work.get_mut(capital_id)?;
    if capital.status == RegionStatus::EmpireCapital {
        capital.status = RegionStatus::Sovereign;
        tracing::debug!("empire of {} shatters", capital_id);
    }
    Ok(())
}

fn apply_secondary(
    work: &mut Board,
    primary_id: RegionId,
    outcome: &SecondaryOutcome,
) -> Result<()> {
    let region = work.get(outcome.region)?;
    if outcome.region == primary_id
        || region.status != RegionStatus::CompanyControlled
        || region.unrest == 0
    {
        return Err(EngineError::InvalidStatus {
            region: outcome.region,
            status: region.status,
            expected: "another CompanyControlled region with unrest",
        });
    }
    if outcome.succeeded {
        company_revolts(work, outcome.region)
    } else {
        work.get_mut(outcome.region)?.unrest = 0;
        Ok(())
    }
}

fn reject_secondaries(
    kind: CrisisKind,
    secondary: &[SecondaryOutcome],
    board: &Board,
) -> Result<()> {
    if let Some(first) = secondary.first() {
        tracing::warn!("secondary rebellions supplied for non-Company crisis {:?}", kind);
        return Err(EngineError::InvalidStatus {
            region: first.region,
            status: board.get(first.region)?.status,
            expected: "a Company crisis for secondary rebellions",
        });
    }
    Ok(())
}

fn resolve_defender<'a>(
    kind: CrisisKind,
    elephant: &Elephant,
    board: &'a Board,
) -> Result<Option<&'a Region>> {
    if kind == CrisisKind::CompanyControlledRebels {
        return Ok(None);
    }
    let target = elephant.target.ok_or(EngineError::TargetRequired {
        attacker: elephant.main,
    })?;
    Ok(Some(board.get(target)?))
}

/// Check that the selected archetype matches the actual statuses. Needed
/// because the two rival-empire archetypes are caller-selected rather
/// than classified.
fn validate_kind(kind: CrisisKind, attacker: &Region, defender: Option<&Region>) -> Result<()> {
    use CrisisKind::*;
    use RegionStatus::*;

    let check = |ok: bool, region: &Region, expected: &'static str| {
        if ok {
            Ok(())
        } else {
            Err(EngineError::InvalidStatus {
                region: region.id,
                status: region.status,
                expected,
            })
        }
    };
    let empire_side = |r: &Region| matches!(r.status, EmpireCapital | Dominated);

    match kind {
        CompanyControlledRebels => check(
            attacker.status == CompanyControlled,
            attacker,
            "CompanyControlled",
        ),
        DominatedRebelsAgainstEmpire => {
            let defender = defender.expect("resolved for this kind");
            check(
                attacker.status == Dominated && attacker.dominator == Some(defender.id),
                attacker,
                "a region dominated by the defending capital",
            )
        }
        SovereignInvadesSovereign => {
            let defender = defender.expect("resolved for this kind");
            check(attacker.status == Sovereign, attacker, "Sovereign")?;
            check(defender.status == Sovereign, defender, "Sovereign")
        }
        SovereignInvadesDominated => {
            let defender = defender.expect("resolved for this kind");
            check(attacker.status == Sovereign, attacker, "Sovereign")?;
            check(defender.status == Dominated, defender, "Dominated")
        }
        SovereignInvadesEmpireCapital => {
            let defender = defender.expect("resolved for this kind");
            check(attacker.status == Sovereign, attacker, "Sovereign")?;
            check(defender.status == EmpireCapital, defender, "EmpireCapital")
        }
        SovereignInvadesCompany => {
            let defender = defender.expect("resolved for this kind");
            check(attacker.status == Sovereign, attacker, "Sovereign")?;
            check(
                defender.status == CompanyControlled,
                defender,
                "CompanyControlled",
            )
        }
        EmpireInvadesSovereign => {
            let defender = defender.expect("resolved for this kind");
            check(empire_side(attacker), attacker, "EmpireCapital or Dominated")?;
            check(defender.status == Sovereign, defender, "Sovereign")
        }
        EmpireInvadesCompany => {
            let defender = defender.expect("resolved for this kind");
            check(empire_side(attacker), attacker, "EmpireCapital or Dominated")?;
            check(
                defender.status == CompanyControlled,
                defender,
                "CompanyControlled",
            )
        }
        EmpireInvadesDominated => {
            let defender = defender.expect("resolved for this kind");
            check(empire_side(attacker), attacker, "EmpireCapital or Dominated")?;
            check(defender.status == Dominated, defender, "Dominated")?;
            let own_capital = match attacker.status {
                EmpireCapital => Some(attacker.id),
                Dominated => attacker.dominator,
                _ => None,
            };
            check(
                defender.dominator != own_capital,
                defender,
                "a region dominated by a different empire",
            )
        }
        EmpireCapitalInvadesEmpireCapital => {
            let defender = defender.expect("resolved for this kind");
            check(attacker.status == EmpireCapital, attacker, "EmpireCapital")?;
            check(defender.status == EmpireCapital, defender, "EmpireCapital")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::elephant::Elephant;
    use crate::core::types::{Presidency, Symbol};
    use crate::deck::card::{CardKind, EventCard};

    fn card(strength: i32) -> EventCard {
        EventCard {
            kind: CardKind::ResolveCrisis,
            strength,
            symbol: Symbol::Square,
            region: RegionId::Delhi,
        }
    }

    fn capital(id: RegionId, tower: u32) -> Region {
        let mut region = Region::sovereign(id, tower);
        region.status = RegionStatus::EmpireCapital;
        region
    }

    fn vassal(id: RegionId, tower: u32, capital: RegionId) -> Region {
        let mut region = Region::sovereign(id, tower);
        region.status = RegionStatus::Dominated;
        region.dominator = Some(capital);
        region
    }

    fn company(id: RegionId, unrest: u32) -> Region {
        let mut region = Region::sovereign(id, 0);
        region.status = RegionStatus::CompanyControlled;
        region.presidency = Some(Presidency::Madras);
        region.unrest = unrest;
        region
    }

    #[test]
    fn test_sovereign_duel_strengths_and_conquest() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            Region::sovereign(RegionId::Madras, 1),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        let strengths = crisis_strengths(
            CrisisKind::SovereignInvadesSovereign,
            &elephant,
            &board,
            &card(1),
            &GameRules::default(),
        )
        .unwrap();
        assert_eq!(strengths.attack, 3);
        assert_eq!(strengths.defense, Some(1));

        let resolution = apply_crisis_outcome(
            CrisisKind::SovereignInvadesSovereign,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();
        assert!(resolution.attacker_advances);

        let attacker = resolution.changes.get(RegionId::Mysore).unwrap();
        assert_eq!(attacker.status, RegionStatus::EmpireCapital);
        let defender = resolution.changes.get(RegionId::Madras).unwrap();
        assert_eq!(defender.status, RegionStatus::Dominated);
        assert_eq!(defender.dominator, Some(RegionId::Mysore));
    }

    #[test]
    fn test_failed_invasion_costs_one_tower() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            Region::sovereign(RegionId::Madras, 4),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        let resolution = apply_crisis_outcome(
            CrisisKind::SovereignInvadesSovereign,
            &elephant,
            &board,
            false,
            &[],
        )
        .unwrap();
        assert!(!resolution.attacker_advances);
        assert_eq!(resolution.changes.len(), 1);
        assert_eq!(resolution.changes.get(RegionId::Mysore).unwrap().tower_level, 1);
    }

    #[test]
    fn test_failed_invasion_at_zero_tower_changes_nothing() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 0),
            Region::sovereign(RegionId::Madras, 4),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        let resolution = apply_crisis_outcome(
            CrisisKind::SovereignInvadesSovereign,
            &elephant,
            &board,
            false,
            &[],
        )
        .unwrap();
        assert!(resolution.changes.is_empty());
    }

    #[test]
    fn test_empire_attack_uses_aggregate_strength() {
        let board = Board::new(vec![
            capital(RegionId::Delhi, 3),
            vassal(RegionId::Punjab, 2, RegionId::Delhi),
            Region::sovereign(RegionId::Maratha, 1),
        ]);
        // The vassal leads the attack; the whole empire backs it.
        let elephant = Elephant::aimed(RegionId::Punjab, RegionId::Maratha);

        let strengths = crisis_strengths(
            CrisisKind::EmpireInvadesSovereign,
            &elephant,
            &board,
            &card(-1),
            &GameRules::default(),
        )
        .unwrap();
        assert_eq!(strengths.attack, 4);
        assert_eq!(strengths.defense, Some(1));
    }

    #[test]
    fn test_conquest_by_vassal_accrues_to_its_capital() {
        let board = Board::new(vec![
            capital(RegionId::Delhi, 3),
            vassal(RegionId::Punjab, 2, RegionId::Delhi),
            Region::sovereign(RegionId::Maratha, 1),
        ]);
        let elephant = Elephant::aimed(RegionId::Punjab, RegionId::Maratha);

        let resolution = apply_crisis_outcome(
            CrisisKind::EmpireInvadesSovereign,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();

        let conquered = resolution.changes.get(RegionId::Maratha).unwrap();
        assert_eq!(conquered.dominator, Some(RegionId::Delhi));
        // The vassal itself is not promoted.
        assert!(resolution.changes.get(RegionId::Punjab).is_none());
    }

    #[test]
    fn test_capturing_capital_releases_its_vassals() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 5),
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 1, RegionId::Delhi),
            vassal(RegionId::Bengal, 1, RegionId::Delhi),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Delhi);

        let resolution = apply_crisis_outcome(
            CrisisKind::SovereignInvadesEmpireCapital,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();

        let fallen = resolution.changes.get(RegionId::Delhi).unwrap();
        assert_eq!(fallen.status, RegionStatus::Dominated);
        assert_eq!(fallen.dominator, Some(RegionId::Mysore));
        for freed in [RegionId::Punjab, RegionId::Bengal] {
            let region = resolution.changes.get(freed).unwrap();
            assert_eq!(region.status, RegionStatus::Sovereign);
            assert_eq!(region.dominator, None);
        }
    }

    #[test]
    fn test_taking_last_vassal_shatters_former_empire() {
        let board = Board::new(vec![
            capital(RegionId::Mysore, 4),
            vassal(RegionId::Madras, 1, RegionId::Mysore),
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 1, RegionId::Delhi),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Punjab);

        let resolution = apply_crisis_outcome(
            CrisisKind::EmpireInvadesDominated,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();

        let taken = resolution.changes.get(RegionId::Punjab).unwrap();
        assert_eq!(taken.dominator, Some(RegionId::Mysore));
        // Delhi lost its only vassal and reverts to Sovereign.
        let former = resolution.changes.get(RegionId::Delhi).unwrap();
        assert_eq!(former.status, RegionStatus::Sovereign);
    }

    #[test]
    fn test_taking_non_last_vassal_leaves_capital_standing() {
        let board = Board::new(vec![
            capital(RegionId::Mysore, 4),
            vassal(RegionId::Madras, 1, RegionId::Mysore),
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 1, RegionId::Delhi),
            vassal(RegionId::Bengal, 1, RegionId::Delhi),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Punjab);

        let resolution = apply_crisis_outcome(
            CrisisKind::EmpireInvadesDominated,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();

        assert!(resolution.changes.get(RegionId::Delhi).is_none());
    }

    #[test]
    fn test_empire_invading_own_vassal_is_rejected() {
        let board = Board::new(vec![
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 1, RegionId::Delhi),
        ]);
        let elephant = Elephant::aimed(RegionId::Delhi, RegionId::Punjab);

        assert!(matches!(
            apply_crisis_outcome(
                CrisisKind::EmpireInvadesDominated,
                &elephant,
                &board,
                true,
                &[],
            ),
            Err(EngineError::InvalidStatus { region: RegionId::Punjab, .. })
        ));
    }

    #[test]
    fn test_successful_rebellion_shatters_one_vassal_empire() {
        let board = Board::new(vec![
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 3, RegionId::Delhi),
        ]);
        let elephant = Elephant::aimed(RegionId::Punjab, RegionId::Delhi);

        let strengths = crisis_strengths(
            CrisisKind::DominatedRebelsAgainstEmpire,
            &elephant,
            &board,
            &card(0),
            &GameRules::default(),
        )
        .unwrap();
        // Rebel tower against the capital's own garrison only.
        assert_eq!(strengths.attack, 3);
        assert_eq!(strengths.defense, Some(2));

        let resolution = apply_crisis_outcome(
            CrisisKind::DominatedRebelsAgainstEmpire,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();

        let rebel = resolution.changes.get(RegionId::Punjab).unwrap();
        assert_eq!(rebel.status, RegionStatus::Sovereign);
        assert_eq!(rebel.dominator, None);
        let former = resolution.changes.get(RegionId::Delhi).unwrap();
        assert_eq!(former.status, RegionStatus::Sovereign);
    }

    #[test]
    fn test_failed_rebellion_keeps_empire_and_costs_tower() {
        let board = Board::new(vec![
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 3, RegionId::Delhi),
        ]);
        let elephant = Elephant::aimed(RegionId::Punjab, RegionId::Delhi);

        let resolution = apply_crisis_outcome(
            CrisisKind::DominatedRebelsAgainstEmpire,
            &elephant,
            &board,
            false,
            &[],
        )
        .unwrap();

        let rebel = resolution.changes.get(RegionId::Punjab).unwrap();
        assert_eq!(rebel.status, RegionStatus::Dominated);
        assert_eq!(rebel.tower_level, 2);
        assert!(resolution.changes.get(RegionId::Delhi).is_none());
    }

    #[test]
    fn test_company_attack_counts_unrest() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            company(RegionId::Madras, 3),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        let strengths = crisis_strengths(
            CrisisKind::SovereignInvadesCompany,
            &elephant,
            &board,
            &card(1),
            &GameRules::default(),
        )
        .unwrap();
        assert_eq!(strengths.attack, 6);
        assert_eq!(strengths.defense, None);
    }

    #[test]
    fn test_sepoy_recruitment_doubles_unrest() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            company(RegionId::Madras, 3),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);
        let rules = GameRules {
            sepoy_recruitment: true,
            ..GameRules::default()
        };

        let strengths = crisis_strengths(
            CrisisKind::SovereignInvadesCompany,
            &elephant,
            &board,
            &card(1),
            &rules,
        )
        .unwrap();
        assert_eq!(strengths.attack, 9);
    }

    #[test]
    fn test_company_rebellion_strength_is_own_unrest() {
        let board = Board::new(vec![company(RegionId::Madras, 3)]);
        let elephant = Elephant::at(RegionId::Madras);

        let strengths = crisis_strengths(
            CrisisKind::CompanyControlledRebels,
            &elephant,
            &board,
            &card(2),
            &GameRules::default(),
        )
        .unwrap();
        assert_eq!(strengths.attack, 5);
        assert_eq!(strengths.defense, None);
    }

    #[test]
    fn test_company_region_falls_to_empire() {
        let board = Board::new(vec![
            capital(RegionId::Delhi, 2),
            vassal(RegionId::Punjab, 1, RegionId::Delhi),
            company(RegionId::Bengal, 2),
        ]);
        let elephant = Elephant::aimed(RegionId::Punjab, RegionId::Bengal);

        let resolution = apply_crisis_outcome(
            CrisisKind::EmpireInvadesCompany,
            &elephant,
            &board,
            true,
            &[],
        )
        .unwrap();

        let taken = resolution.changes.get(RegionId::Bengal).unwrap();
        assert_eq!(taken.status, RegionStatus::Dominated);
        assert_eq!(taken.dominator, Some(RegionId::Delhi));
        assert_eq!(taken.presidency, None);
        assert_eq!(taken.unrest, 0);
    }

    #[test]
    fn test_suppressed_company_crisis_resets_unrest_only() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            company(RegionId::Madras, 3),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        let resolution = apply_crisis_outcome(
            CrisisKind::SovereignInvadesCompany,
            &elephant,
            &board,
            false,
            &[],
        )
        .unwrap();
        assert!(!resolution.attacker_advances);

        let held = resolution.changes.get(RegionId::Madras).unwrap();
        assert_eq!(held.status, RegionStatus::CompanyControlled);
        assert_eq!(held.unrest, 0);
        assert!(resolution.changes.get(RegionId::Mysore).is_none());
    }

    #[test]
    fn test_secondary_rebellions_fold_into_batch() {
        let board = Board::new(vec![
            company(RegionId::Madras, 3),
            company(RegionId::Bengal, 2),
            company(RegionId::Bombay, 1),
            company(RegionId::Mysore, 0),
        ]);
        let elephant = Elephant::at(RegionId::Madras);

        assert_eq!(
            secondary_rebellion_candidates(&board, RegionId::Madras),
            vec![RegionId::Bengal, RegionId::Bombay]
        );

        let resolution = apply_crisis_outcome(
            CrisisKind::CompanyControlledRebels,
            &elephant,
            &board,
            true,
            &[
                SecondaryOutcome { region: RegionId::Bengal, succeeded: true },
                SecondaryOutcome { region: RegionId::Bombay, succeeded: false },
            ],
        )
        .unwrap();

        let primary = resolution.changes.get(RegionId::Madras).unwrap();
        assert_eq!(primary.status, RegionStatus::Sovereign);
        let freed = resolution.changes.get(RegionId::Bengal).unwrap();
        assert_eq!(freed.status, RegionStatus::Sovereign);
        assert_eq!(freed.presidency, None);
        let held = resolution.changes.get(RegionId::Bombay).unwrap();
        assert_eq!(held.status, RegionStatus::CompanyControlled);
        assert_eq!(held.unrest, 0);
        assert!(resolution.changes.get(RegionId::Mysore).is_none());
    }

    #[test]
    fn test_secondary_without_unrest_is_rejected() {
        let board = Board::new(vec![company(RegionId::Madras, 3), company(RegionId::Mysore, 0)]);
        let elephant = Elephant::at(RegionId::Madras);

        assert!(matches!(
            apply_crisis_outcome(
                CrisisKind::CompanyControlledRebels,
                &elephant,
                &board,
                true,
                &[SecondaryOutcome { region: RegionId::Mysore, succeeded: true }],
            ),
            Err(EngineError::InvalidStatus { region: RegionId::Mysore, .. })
        ));
    }

    #[test]
    fn test_secondaries_rejected_for_field_battles() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            Region::sovereign(RegionId::Madras, 1),
            company(RegionId::Bengal, 2),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        assert!(apply_crisis_outcome(
            CrisisKind::SovereignInvadesSovereign,
            &elephant,
            &board,
            true,
            &[SecondaryOutcome { region: RegionId::Bengal, succeeded: true }],
        )
        .is_err());
    }

    #[test]
    fn test_kind_mismatch_is_rejected() {
        let board = Board::new(vec![
            Region::sovereign(RegionId::Mysore, 2),
            Region::sovereign(RegionId::Madras, 1),
        ]);
        let elephant = Elephant::aimed(RegionId::Mysore, RegionId::Madras);

        assert!(matches!(
            crisis_strengths(
                CrisisKind::EmpireInvadesSovereign,
                &elephant,
                &board,
                &card(0),
                &GameRules::default(),
            ),
            Err(EngineError::InvalidStatus { region: RegionId::Mysore, .. })
        ));
    }
}
