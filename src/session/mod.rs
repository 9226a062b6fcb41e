//! Game session driver
//!
//! One `GameSession` owns the authoritative board, the elephant, the
//! deck, the rules, and the seeded generator for a single in-memory game.
//! It runs the resolution flow: draw an event, classify the crisis,
//! present strengths, take the caller's manual outcome, merge the change
//! batch, and march the elephant. All rules arithmetic stays in the pure
//! modules; the session only sequences them and keeps the chronicle.

pub mod log;

pub use log::{Chronicle, ChronicleEntry, ChronicleEvent};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::elephant::{march, Elephant};
use crate::board::region::{Region, RegionStatus};
use crate::board::{Board, RegionChanges};
use crate::core::config::GameRules;
use crate::core::error::{EngineError, Result};
use crate::core::types::{Presidency, RegionId, Symbol, Turn};
use crate::crisis::{
    apply_crisis_outcome, apply_deploy_outcome, classify, crisis_strengths, deploy_strengths,
    CrisisKind, CrisisStrengths, SecondaryOutcome,
};
use crate::deck::{CardKind, EventCard, EventDeck};

/// A single in-memory game session
pub struct GameSession {
    board: Board,
    elephant: Elephant,
    deck: EventDeck,
    rules: GameRules,
    rng: ChaCha8Rng,
    chronicle: Chronicle,
    turn: Turn,
}

/// Serializable view of the session for the UI layer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub turn: Turn,
    pub regions: Vec<Region>,
    pub elephant: Elephant,
}

impl GameSession {
    /// Start a session. The deck is shuffled with the seeded generator,
    /// per game-start rules.
    pub fn new(
        board: Board,
        elephant: Elephant,
        cards: Vec<EventCard>,
        rules: GameRules,
        seed: u64,
    ) -> Result<Self> {
        for region in board.regions() {
            region
                .validate()
                .map_err(EngineError::InvalidScenario)?;
        }
        rules.validate().map_err(EngineError::InvalidScenario)?;
        board.get(elephant.main)?;
        if let Some(target) = elephant.target {
            board.get(target)?;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = EventDeck::new_shuffled(cards, &mut rng);
        Ok(Self {
            board,
            elephant,
            deck,
            rules,
            rng,
            chronicle: Chronicle::new(),
            turn: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn elephant(&self) -> Elephant {
        self.elephant
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn chronicle(&self) -> &Chronicle {
        &self.chronicle
    }

    pub fn deck(&self) -> &EventDeck {
        &self.deck
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Draw the next event card and chronicle it. A Shuffle card is
    /// returned like any other; resolve it with [`reshuffle`].
    ///
    /// [`reshuffle`]: GameSession::reshuffle
    pub fn draw_event(&mut self) -> Result<EventCard> {
        let card = self.deck.draw()?;
        self.chronicle.record(
            ChronicleEvent::CardDrawn {
                kind: card.kind,
                region: card.region,
                symbol: card.symbol,
            },
            self.turn,
        );
        Ok(card)
    }

    /// Put a resolved card on the discard pile
    pub fn discard_card(&mut self, card: EventCard) {
        self.deck.discard(card);
    }

    /// Resolve a drawn Shuffle card: both piles are reshuffled together
    pub fn reshuffle(&mut self, card: EventCard) -> Result<()> {
        if card.kind != CardKind::Shuffle {
            return Err(EngineError::InvalidScenario(format!(
                "reshuffle called with a {:?} card",
                card.kind
            )));
        }
        self.deck.resolve_shuffle(card, &mut self.rng);
        self.chronicle.record(ChronicleEvent::DeckReshuffled, self.turn);
        Ok(())
    }

    /// Classify the crisis at the elephant's current position
    pub fn classify_current(&self) -> Result<CrisisKind> {
        classify(&self.elephant, &self.board)
    }

    /// Strength totals to present before the manual check
    pub fn crisis_strengths(&self, kind: CrisisKind, card: &EventCard) -> Result<CrisisStrengths> {
        crisis_strengths(kind, &self.elephant, &self.board, card, &self.rules)
    }

    /// Defense total a deploy against `target` must beat
    pub fn deploy_strengths(&self, target: RegionId) -> Result<i32> {
        deploy_strengths(&self.board, target)
    }

    /// Resolve the crisis at the elephant's position with the reported
    /// outcome, merge the changes, march the elephant on success, and
    /// advance the turn. Returns the merged change batch.
    pub fn resolve_crisis(
        &mut self,
        kind: CrisisKind,
        card: &EventCard,
        succeeded: bool,
        secondary: &[SecondaryOutcome],
    ) -> Result<RegionChanges> {
        let resolution =
            apply_crisis_outcome(kind, &self.elephant, &self.board, succeeded, secondary)?;

        self.record_shatters(&resolution.changes);
        self.board.apply(&resolution.changes);

        self.chronicle.record(
            ChronicleEvent::CrisisResolved {
                kind,
                attacker: self.elephant.main,
                defender: self.elephant.target,
                succeeded,
            },
            self.turn,
        );
        for outcome in secondary {
            self.chronicle.record(
                ChronicleEvent::SecondaryRebellion {
                    region: outcome.region,
                    succeeded: outcome.succeeded,
                },
                self.turn,
            );
        }

        if resolution.attacker_advances {
            self.advance_elephant(card.symbol)?;
        }
        self.turn += 1;
        Ok(resolution.changes)
    }

    /// Resolve a deploy against `target`, merge the changes, and advance
    /// the turn. Returns the plunder paid out.
    pub fn deploy(
        &mut self,
        target: RegionId,
        succeeded: bool,
        presidency: Presidency,
    ) -> Result<u32> {
        let resolution =
            apply_deploy_outcome(&self.board, target, succeeded, presidency, &self.rules)?;

        self.record_shatters(&resolution.changes);
        self.board.apply(&resolution.changes);
        self.chronicle.record(
            ChronicleEvent::Deployment {
                region: target,
                presidency,
                succeeded,
                loot: resolution.loot,
            },
            self.turn,
        );
        self.turn += 1;
        Ok(resolution.loot)
    }

    /// March the elephant from its main region following `symbol`. A
    /// stalled march (no symbol neighbor, no target outside the empire)
    /// leaves the elephant on its main region with no target; any other
    /// failure propagates.
    pub fn advance_elephant(&mut self, symbol: Symbol) -> Result<Elephant> {
        match march(&self.board, self.elephant.main, symbol) {
            Ok(elephant) => {
                self.elephant = elephant;
                self.chronicle.record(
                    ChronicleEvent::ElephantMoved {
                        main: elephant.main,
                        target: elephant.target,
                    },
                    self.turn,
                );
            }
            Err(EngineError::NoSymbolNeighbor { .. }) | Err(EngineError::NoTargetFound(_)) => {
                self.elephant = Elephant::at(self.elephant.main);
                self.chronicle.record(
                    ChronicleEvent::ElephantStalled {
                        main: self.elephant.main,
                    },
                    self.turn,
                );
            }
            Err(other) => return Err(other),
        }
        Ok(self.elephant)
    }

    /// Reposition the elephant directly (scenario setup or UI override)
    pub fn set_elephant(&mut self, elephant: Elephant) -> Result<()> {
        self.board.get(elephant.main)?;
        if let Some(target) = elephant.target {
            self.board.get(target)?;
        }
        self.elephant = elephant;
        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            turn: self.turn,
            regions: self.board.regions().to_vec(),
            elephant: self.elephant,
        }
    }

    fn record_shatters(&mut self, changes: &RegionChanges) {
        for changed in changes.iter() {
            let was_capital = self
                .board
                .find(changed.id)
                .map_or(false, |r| r.status == RegionStatus::EmpireCapital);
            if was_capital && changed.status == RegionStatus::Sovereign {
                self.chronicle.record(
                    ChronicleEvent::EmpireShattered { capital: changed.id },
                    self.turn,
                );
            }
        }
    }
}
