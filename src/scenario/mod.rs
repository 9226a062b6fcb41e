//! Scenario setup data
//!
//! Scenarios are plain data supplied by the excluded setup layer: the
//! initial region set, the elephant position, the deck composition, the
//! rule toggles, and the shuffle seed. This module deserializes them from
//! TOML and validates every cross-reference before a session starts, so
//! the engine proper never sees an inconsistent board.

use serde::Deserialize;

use crate::board::elephant::Elephant;
use crate::board::region::{Neighbor, Region, RegionStatus};
use crate::board::Board;
use crate::core::config::GameRules;
use crate::core::error::{EngineError, Result};
use crate::core::types::{Presidency, RegionId, Symbol};
use crate::deck::card::{CardKind, EventCard};
use crate::session::GameSession;

/// A complete scenario as authored in TOML
#[derive(Clone, Debug, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub seed: u64,
    #[serde(default)]
    pub rules: GameRules,
    pub elephant: ElephantSetup,
    pub regions: Vec<RegionSetup>,
    pub cards: Vec<CardSetup>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ElephantSetup {
    pub main: RegionId,
    pub target: Option<RegionId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RegionSetup {
    pub id: RegionId,
    pub status: RegionStatus,
    #[serde(default)]
    pub tower_level: u32,
    #[serde(default)]
    pub dominator: Option<RegionId>,
    #[serde(default)]
    pub presidency: Option<Presidency>,
    #[serde(default)]
    pub unrest: u32,
    #[serde(default)]
    pub loot_available: bool,
    #[serde(default)]
    pub loot_amount: u32,
    #[serde(default)]
    pub neighbors: Vec<NeighborSetup>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NeighborSetup {
    pub id: RegionId,
    pub symbols: Vec<Symbol>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CardSetup {
    pub kind: CardKind,
    #[serde(default)]
    pub strength: i32,
    pub symbol: Symbol,
    pub region: RegionId,
}

impl ScenarioConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate the scenario and start a session from it
    pub fn build(self) -> Result<GameSession> {
        let invalid = |message: String| EngineError::InvalidScenario(message);

        if self.regions.is_empty() {
            return Err(invalid("scenario has no regions".into()));
        }
        if self.cards.is_empty() {
            return Err(invalid("scenario has no event cards".into()));
        }

        let present = |id: RegionId| self.regions.iter().any(|r| r.id == id);
        for setup in &self.regions {
            if self.regions.iter().filter(|r| r.id == setup.id).count() > 1 {
                return Err(invalid(format!("region {} appears twice", setup.id)));
            }
            for neighbor in &setup.neighbors {
                if !present(neighbor.id) {
                    return Err(invalid(format!(
                        "{} lists unknown neighbor {}",
                        setup.id, neighbor.id
                    )));
                }
                if neighbor.symbols.is_empty() {
                    return Err(invalid(format!(
                        "{} has a symbol-less edge to {}",
                        setup.id, neighbor.id
                    )));
                }
            }
            if let Some(dominator) = setup.dominator {
                let capital = self
                    .regions
                    .iter()
                    .find(|r| r.id == dominator)
                    .ok_or_else(|| {
                        invalid(format!("{} has unknown dominator {}", setup.id, dominator))
                    })?;
                if capital.status != RegionStatus::EmpireCapital {
                    return Err(invalid(format!(
                        "dominator {} of {} is not an empire capital",
                        dominator, setup.id
                    )));
                }
            }
        }
        if !present(self.elephant.main) {
            return Err(invalid(format!(
                "elephant starts on unknown region {}",
                self.elephant.main
            )));
        }
        if let Some(target) = self.elephant.target {
            if !present(target) {
                return Err(invalid(format!("elephant targets unknown region {}", target)));
            }
        }
        for card in &self.cards {
            if !present(card.region) {
                return Err(invalid(format!(
                    "card {:?} names unknown region {}",
                    card.kind, card.region
                )));
            }
        }

        let regions: Vec<Region> = self
            .regions
            .into_iter()
            .map(|setup| Region {
                id: setup.id,
                status: setup.status,
                tower_level: setup.tower_level,
                dominator: setup.dominator,
                presidency: setup.presidency,
                unrest: setup.unrest,
                loot_available: setup.loot_available,
                loot_amount: setup.loot_amount,
                neighbors: setup
                    .neighbors
                    .into_iter()
                    .map(|n| Neighbor {
                        id: n.id,
                        symbols: n.symbols,
                    })
                    .collect(),
            })
            .collect();

        let cards: Vec<EventCard> = self
            .cards
            .into_iter()
            .map(|c| EventCard {
                kind: c.kind,
                strength: c.strength,
                symbol: c.symbol,
                region: c.region,
            })
            .collect();

        let elephant = Elephant {
            main: self.elephant.main,
            target: self.elephant.target,
        };

        tracing::debug!("starting scenario '{}' with seed {}", self.name, self.seed);
        GameSession::new(Board::new(regions), elephant, cards, self.rules, self.seed)
    }
}
