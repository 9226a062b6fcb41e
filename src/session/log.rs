//! Chronicle of resolved outcomes
//!
//! Every event the session resolves is appended here so the UI layer can
//! replay or display the run. Entries are plain data.

use serde::{Deserialize, Serialize};

use crate::core::types::{Presidency, RegionId, Symbol, Turn};
use crate::crisis::CrisisKind;
use crate::deck::card::CardKind;

/// One chronicle entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChronicleEntry {
    pub id: u32,
    pub turn: Turn,
    pub event: ChronicleEvent,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ChronicleEvent {
    CardDrawn { kind: CardKind, region: RegionId, symbol: Symbol },
    DeckReshuffled,
    CrisisResolved {
        kind: CrisisKind,
        attacker: RegionId,
        defender: Option<RegionId>,
        succeeded: bool,
    },
    SecondaryRebellion { region: RegionId, succeeded: bool },
    Deployment {
        region: RegionId,
        presidency: Presidency,
        succeeded: bool,
        loot: u32,
    },
    EmpireShattered { capital: RegionId },
    ElephantMoved { main: RegionId, target: Option<RegionId> },
    ElephantStalled { main: RegionId },
}

/// The complete session chronicle
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Chronicle {
    pub entries: Vec<ChronicleEntry>,
    next_id: u32,
}

impl Chronicle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ChronicleEvent, turn: Turn) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ChronicleEntry { id, turn, event });
        id
    }

    pub fn entries_for_turn(&self, turn: Turn) -> impl Iterator<Item = &ChronicleEntry> {
        self.entries.iter().filter(move |e| e.turn == turn)
    }

    /// JSON export for the UI layer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_assigns_sequential_ids() {
        let mut chronicle = Chronicle::new();
        let a = chronicle.record(ChronicleEvent::DeckReshuffled, 0);
        let b = chronicle.record(
            ChronicleEvent::EmpireShattered { capital: RegionId::Delhi },
            1,
        );
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(chronicle.entries_for_turn(1).count(), 1);
    }

    #[test]
    fn test_json_export() {
        let mut chronicle = Chronicle::new();
        chronicle.record(ChronicleEvent::DeckReshuffled, 0);
        let json = chronicle.to_json().unwrap();
        assert!(json.contains("DeckReshuffled"));
    }
}
