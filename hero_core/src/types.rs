//! Core identifiers and enums shared across the simulation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an entity in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Identifier for a barrier's separate health pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BarrierId(pub u32);

/// Identifier for a spawned area of effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AreaId(pub u32);

/// Identifier for a physics collider belonging to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// Team index; entities on the same team never damage each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Team(pub u8);

/// Hero role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tank,
    Damage,
    Support,
}

/// Who drives an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Controller {
    /// The real player; the only controller that earns ultimate charge and perk progress from hits
    Player,
    Bot,
}

/// How an incoming damage value interacts with armour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmourInteraction {
    /// Flat reduction: small hits are halved, large hits lose a flat amount
    #[default]
    Yes,
    /// Beam weapons: scaled by the beam reduction constant
    Beam,
    /// Damage over time: scaled by the DoT reduction constant
    Dot,
    /// Armour behaves like any other layer
    No,
}

/// Whether a value damages or heals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Damage,
    Healing,
}

impl DeltaKind {
    pub fn is_damage(self) -> bool {
        matches!(self, DeltaKind::Damage)
    }
}

/// One of the three hit-point layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Health,
    Armour,
    Shields,
}

impl Layer {
    /// Order in which damage depletes layers
    pub fn damage_order() -> &'static [Layer] {
        &[Layer::Shields, Layer::Armour, Layer::Health]
    }

    /// Order in which healing restores layers
    pub fn healing_order() -> &'static [Layer] {
        &[Layer::Health, Layer::Armour, Layer::Shields]
    }
}

/// Distance range over which a value falls off linearly
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FalloffRange {
    pub start: f64,
    pub end: f64,
}

impl FalloffRange {
    pub fn new(start: f64, end: f64) -> Self {
        FalloffRange { start, end }
    }

    /// A zero range means "no falloff configured"
    pub fn is_zero(&self) -> bool {
        self.start == 0.0 && self.end == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_orders_are_reversed() {
        let mut damage = Layer::damage_order().to_vec();
        damage.reverse();
        assert_eq!(damage, Layer::healing_order());
    }

    #[test]
    fn test_armour_interaction_parses_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: ArmourInteraction,
        }
        let w: Wrapper = toml::from_str("mode = \"beam\"").unwrap();
        assert_eq!(w.mode, ArmourInteraction::Beam);
    }

    #[test]
    fn test_falloff_zero() {
        assert!(FalloffRange::default().is_zero());
        assert!(!FalloffRange::new(10.0, 20.0).is_zero());
    }
}
