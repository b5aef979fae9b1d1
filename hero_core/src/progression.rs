//! Progression - Ultimate charge and perk tier advancement
//!
//! Awards are driven by the value a hero delivers through the resolver, by
//! passive charge over time, and by pickups. Every operation here is a silent
//! no-op when its precondition fails.

use crate::resource::{PerkChoice, PerkResource, UltimateResource};
use serde::{Deserialize, Serialize};

/// Add ultimate charge, clamping at the cost
///
/// Returns true if this award made the ultimate ready.
pub fn award_ultimate_charge(ultimate: &mut UltimateResource, value: f64) -> bool {
    if ultimate.current == ultimate.cost || value < 0.0 {
        return false;
    }

    if ultimate.current + value >= ultimate.cost {
        ultimate.current = ultimate.cost;
        ultimate.ready = true;
        true
    } else {
        ultimate.current += value;
        false
    }
}

/// Add perk progress and advance at most one tier
///
/// Level 1 → 2 is checked first and level 2 → 3 only in the `else` branch,
/// so a single award can never jump two tiers. Returns the newly reached
/// level, if any.
pub fn award_perk_progress(perk: &mut PerkResource, value: f64) -> Option<u8> {
    if perk.is_maxed() || value < 0.0 {
        return None;
    }

    perk.current += value;

    if perk.current_level == 1 && perk.current >= perk.thresholds[0] {
        perk.current_level = 2;
        perk.available = true;
        Some(2)
    } else if perk.current_level == 2 && perk.current >= perk.thresholds[1] {
        perk.current_level = 3;
        perk.available = true;
        Some(3)
    } else {
        None
    }
}

/// Outcome of picking a perk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerkSelection {
    /// Level the choice was made for
    pub level: u8,
    pub choice: PerkChoice,
    /// Tier reached by the zero-value re-check after choosing
    pub next_tier: Option<u8>,
}

/// Pick one of the two perks offered for the oldest unchosen tier
///
/// After the choice, progress is re-checked with a zero award so that a
/// tier earned while the previous choice was pending is surfaced.
pub fn select_perk(perk: &mut PerkResource, choice: PerkChoice) -> Option<PerkSelection> {
    let level = perk.pending_level()?;

    perk.chosen[(level - 2) as usize] = Some(choice);
    perk.available = (2..=perk.current_level).any(|l| perk.choice_at(l).is_none());

    let next_tier = award_perk_progress(perk, 0.0);

    Some(PerkSelection {
        level,
        choice,
        next_tier,
    })
}
