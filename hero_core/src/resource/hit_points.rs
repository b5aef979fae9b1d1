//! HitPoints - Layered health pool

use crate::types::Layer;
use serde::{Deserialize, Serialize};

/// Configured maximum for each layer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitPointMaxima {
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub armour: f64,
    #[serde(default)]
    pub shields: f64,
}

impl HitPointMaxima {
    pub fn new(health: f64, armour: f64, shields: f64) -> Self {
        HitPointMaxima {
            health,
            armour,
            shields,
        }
    }

    pub fn total(&self) -> f64 {
        self.health + self.armour + self.shields
    }

    pub fn layer(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Health => self.health,
            Layer::Armour => self.armour,
            Layer::Shields => self.shields,
        }
    }
}

/// Current standing of an entity's hit points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitPoints {
    pub health: f64,
    pub armour: f64,
    pub shields: f64,
    /// Damage the entity dealt to itself and has not yet healed
    pub self_damage: f64,
}

impl HitPoints {
    /// Full hit points for the given maxima
    pub fn full(maxima: &HitPointMaxima) -> Self {
        HitPoints {
            health: maxima.health,
            armour: maxima.armour,
            shields: maxima.shields,
            self_damage: 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.health + self.armour + self.shields
    }

    pub fn is_depleted(&self) -> bool {
        self.total() <= 0.0
    }

    pub fn is_full(&self, maxima: &HitPointMaxima) -> bool {
        self.total() >= maxima.total()
    }

    pub fn layer(&self, layer: Layer) -> f64 {
        match layer {
            Layer::Health => self.health,
            Layer::Armour => self.armour,
            Layer::Shields => self.shields,
        }
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut f64 {
        match layer {
            Layer::Health => &mut self.health,
            Layer::Armour => &mut self.armour,
            Layer::Shields => &mut self.shields,
        }
    }

    /// Restore every layer to its maximum and forget self damage
    pub fn reset(&mut self, maxima: &HitPointMaxima) {
        *self = HitPoints::full(maxima);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_matches_maxima() {
        let maxima = HitPointMaxima::new(200.0, 100.0, 50.0);
        let hp = HitPoints::full(&maxima);
        assert!((hp.total() - 350.0).abs() < f64::EPSILON);
        assert!(hp.is_full(&maxima));
    }

    #[test]
    fn test_reset_clears_self_damage() {
        let maxima = HitPointMaxima::new(200.0, 0.0, 0.0);
        let mut hp = HitPoints::full(&maxima);
        hp.health = 20.0;
        hp.self_damage = 40.0;
        hp.reset(&maxima);
        assert_eq!(hp, HitPoints::full(&maxima));
    }

    #[test]
    fn test_depleted_at_zero() {
        let hp = HitPoints::default();
        assert!(hp.is_depleted());
    }
}
