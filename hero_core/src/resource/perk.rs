//! PerkResource - Mid-match upgrade tiers

use serde::{Deserialize, Serialize};

/// Highest perk level a hero can reach
pub const MAX_PERK_LEVEL: u8 = 3;

/// Which of the two options offered at a tier was picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerkChoice {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerkResource {
    /// 1, 2 or 3
    pub current_level: u8,
    /// Progress required for level 2 and level 3
    pub thresholds: [f64; 2],
    /// Accumulated progress; never decreases
    pub current: f64,
    /// A tier was reached and its perk has not been chosen yet
    pub available: bool,
    /// Choices made at level 2 and level 3
    pub chosen: [Option<PerkChoice>; 2],
}

impl PerkResource {
    pub fn new(thresholds: [f64; 2]) -> Self {
        PerkResource {
            current_level: 1,
            thresholds,
            current: 0.0,
            available: false,
            chosen: [None, None],
        }
    }

    pub fn is_maxed(&self) -> bool {
        self.current_level >= MAX_PERK_LEVEL
    }

    /// Choice made for `level` (2 or 3), if any
    pub fn choice_at(&self, level: u8) -> Option<PerkChoice> {
        match level {
            2 => self.chosen[0],
            3 => self.chosen[1],
            _ => None,
        }
    }

    /// Level whose perk is waiting to be picked
    pub fn pending_level(&self) -> Option<u8> {
        if !self.available {
            return None;
        }
        (2..=self.current_level).find(|level| self.choice_at(*level).is_none())
    }
}

impl Default for PerkResource {
    fn default() -> Self {
        PerkResource::new([0.0, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_at_level_one() {
        let perk = PerkResource::new([100.0, 250.0]);
        assert_eq!(perk.current_level, 1);
        assert!(!perk.is_maxed());
        assert_eq!(perk.pending_level(), None);
    }

    #[test]
    fn test_pending_level() {
        let mut perk = PerkResource::new([100.0, 250.0]);
        perk.current_level = 2;
        perk.available = true;
        assert_eq!(perk.pending_level(), Some(2));

        perk.chosen[0] = Some(PerkChoice::First);
        perk.current_level = 3;
        assert_eq!(perk.pending_level(), Some(3));
    }
}
