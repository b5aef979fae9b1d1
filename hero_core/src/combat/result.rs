//! HpUpdate - Outcome of resolving an HpChange

use crate::types::{DeltaKind, EntityId};
use serde::{Deserialize, Serialize};

/// Killing hit attribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalBlow {
    /// Killer; the victim itself for self-inflicted or sourceless deaths
    pub by: EntityId,
    pub victim: EntityId,
    pub ability: Option<String>,
    pub headshot: bool,
    pub ultimate: bool,
}

/// Result of applying one HpChange to a hero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HpUpdate {
    pub target: EntityId,
    pub kind: DeltaKind,
    /// Value after the damage or healing modifier
    pub modified_value: f64,
    /// HP actually removed or restored across every layer
    pub hit_value: f64,

    // === Layer Breakdown ===
    pub shields_change: f64,
    pub armour_change: f64,
    pub health_change: f64,
    /// Damage removed by armour mitigation
    pub mitigated_by_armour: f64,
    /// Damage left over after health reached zero
    pub overkill: f64,

    // === Flags ===
    /// Self damage, or healing that went to self-damage bookkeeping
    pub self_interaction: bool,
    pub died: bool,
    pub final_blow: Option<FinalBlow>,
    /// Entity owed ultimate charge and perk progress of `hit_value`
    pub progression_to: Option<EntityId>,
    /// Signed value for a floating number, if the target shows them
    pub hit_number: Option<f64>,
}

impl HpUpdate {
    pub fn new(target: EntityId, kind: DeltaKind) -> Self {
        HpUpdate {
            target,
            kind,
            modified_value: 0.0,
            hit_value: 0.0,
            shields_change: 0.0,
            armour_change: 0.0,
            health_change: 0.0,
            mitigated_by_armour: 0.0,
            overkill: 0.0,
            self_interaction: false,
            died: false,
            final_blow: None,
            progression_to: None,
            hit_number: None,
        }
    }

    /// Hit value with the sign of the change; negative for damage
    pub fn signed_hit_value(&self) -> f64 {
        if self.kind.is_damage() {
            -self.hit_value
        } else {
            self.hit_value
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        let verb = if self.kind.is_damage() { "damage" } else { "healing" };
        if self.hit_value > 0.0 {
            parts.push(format!("{:.0} {}", self.hit_value, verb));
        }

        if self.shields_change != 0.0 {
            parts.push(format!("{:+.0} shields", self.shields_change));
        }

        if self.armour_change != 0.0 {
            parts.push(format!("{:+.0} armour", self.armour_change));
        }

        if self.mitigated_by_armour > 0.0 {
            parts.push(format!("{:.0} mitigated by armour", self.mitigated_by_armour));
        }

        if self.overkill > 0.0 {
            parts.push(format!("{:.0} overkill", self.overkill));
        }

        if self.died {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            format!("No {}", verb)
        } else {
            parts.join(", ")
        }
    }
}
