//! Modifier - Multiplicative buff/debuff stack keyed by source
//!
//! Final value is calculated as `base × Π(1 + factor)` over every active
//! source. Each source contributes at most one factor, so removing it undoes
//! exactly what it added.

use serde::{Deserialize, Serialize};

/// What applied a factor to a modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierSource {
    /// Healing reduction applied by hits from Damage heroes
    DamagePassive,
    /// Effect of an ability while it is active
    Ability(String),
    /// Permanent effect of a chosen perk
    Perk(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub base: f64,
    factors: Vec<(ModifierSource, f64)>,
}

impl Default for Modifier {
    fn default() -> Self {
        Modifier::with_base(1.0)
    }
}

impl Modifier {
    pub fn with_base(base: f64) -> Self {
        Modifier {
            base,
            factors: Vec::new(),
        }
    }

    /// base × Π(1 + factor)
    pub fn compute(&self) -> f64 {
        self.base * self.factors.iter().map(|(_, f)| 1.0 + f).product::<f64>()
    }

    /// Set the factor for a source, replacing any previous one
    ///
    /// A factor of -0.3 means "30% less".
    pub fn set(&mut self, source: ModifierSource, factor: f64) {
        if let Some(entry) = self.factors.iter_mut().find(|(s, _)| *s == source) {
            entry.1 = factor;
        } else {
            self.factors.push((source, factor));
        }
    }

    /// Remove a source's factor; returns whether it was present
    pub fn remove(&mut self, source: &ModifierSource) -> bool {
        let before = self.factors.len();
        self.factors.retain(|(s, _)| s != source);
        self.factors.len() != before
    }

    pub fn has(&self, source: &ModifierSource) -> bool {
        self.factors.iter().any(|(s, _)| s == source)
    }
}

/// The three modifiers every hero carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Scales damage this hero deals
    pub damage: Modifier,
    /// Scales healing this hero receives
    pub healing: Modifier,
    pub movement: Modifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert!((Modifier::default().compute() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_factors_multiply() {
        let mut m = Modifier::default();
        m.set(ModifierSource::DamagePassive, -0.3);
        m.set(ModifierSource::Ability("stim_pack".into()), 0.5);
        // 0.7 × 1.5
        assert!((m.compute() - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_set_replaces() {
        let mut m = Modifier::default();
        m.set(ModifierSource::DamagePassive, -0.3);
        m.set(ModifierSource::DamagePassive, -0.15);
        assert!((m.compute() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_remove_restores_exactly() {
        let mut m = Modifier::default();
        m.set(ModifierSource::DamagePassive, -0.3);
        assert!(m.remove(&ModifierSource::DamagePassive));
        assert_eq!(m.compute(), 1.0);
        assert!(!m.remove(&ModifierSource::DamagePassive));
    }
}
