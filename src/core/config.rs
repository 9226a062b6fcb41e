//! Session rule configuration
//!
//! Optional rules and tuning constants are collected here. The excluded UI
//! layer toggles these at session start; the engine never mutates them.

use serde::{Deserialize, Serialize};

/// Optional rules supplied by the caller at session start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Sepoy Recruitment: a crisis attack against a Company region counts
    /// the region's unrest twice instead of once.
    pub sepoy_recruitment: bool,

    /// Plunder paid per tower level when a deploy converts a region to
    /// Company control. Any loot marker on the region is paid on top.
    pub loot_per_tower: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            sepoy_recruitment: false,
            loot_per_tower: 1,
        }
    }
}

impl GameRules {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.loot_per_tower == 0 {
            return Err("loot_per_tower must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_validate() {
        assert!(GameRules::default().validate().is_ok());
    }

    #[test]
    fn test_zero_loot_rate_rejected() {
        let rules = GameRules {
            loot_per_tower: 0,
            ..GameRules::default()
        };
        assert!(rules.validate().is_err());
    }
}
