//! Hero - Resource records and per-tick bookkeeping for one entity
//!
//! A hero exclusively owns its hit points, ultimate and perk records. Other
//! entities never touch them directly; they go through the resolver via the
//! world.

mod passive;

use crate::config::{AbilityEffects, GameConstants, HeroDefinition, PerkDefinition};
use crate::modifier::{ModifierSource, Modifiers};
use crate::resource::{HitPointMaxima, HitPoints, PerkResource, UltimateResource};
use crate::types::Role;

#[derive(Debug, Clone)]
pub struct Hero {
    pub definition: HeroDefinition,
    pub hit_points: HitPoints,
    pub ultimate: UltimateResource,
    pub perk: PerkResource,
    pub modifiers: Modifiers,
    /// Total HP is below max and healing arrived recently
    pub is_healing: bool,
    pub time_since_damage_taken: f64,
    pub time_since_healing_received: f64,
    damage_passive_remaining: f64,
    passive_charge_elapsed: f64,
}

impl Hero {
    pub fn new(definition: HeroDefinition) -> Self {
        Hero {
            hit_points: HitPoints::full(&definition.hit_points),
            ultimate: UltimateResource::new(definition.ultimate_cost),
            perk: PerkResource::new(definition.perk_thresholds),
            modifiers: Modifiers::default(),
            is_healing: false,
            time_since_damage_taken: 0.0,
            time_since_healing_received: 0.0,
            damage_passive_remaining: 0.0,
            passive_charge_elapsed: 0.0,
            definition,
        }
    }

    pub fn role(&self) -> Role {
        self.definition.role
    }

    pub fn maxima(&self) -> &HitPointMaxima {
        &self.definition.hit_points
    }

    pub fn total_hp(&self) -> f64 {
        self.hit_points.total()
    }

    pub fn is_full(&self) -> bool {
        self.hit_points.is_full(&self.definition.hit_points)
    }

    /// Fraction of max total HP remaining
    pub fn hp_percent(&self) -> f64 {
        let max = self.maxima().total();
        if max <= 0.0 {
            return 0.0;
        }
        (self.total_hp() / max).clamp(0.0, 1.0)
    }

    pub fn damage_passive_active(&self) -> bool {
        self.modifiers.healing.has(&ModifierSource::DamagePassive)
    }

    /// Apply or refresh the healing reduction from a Damage-role hit
    pub fn apply_damage_passive(&mut self, constants: &GameConstants) {
        let passive = &constants.damage_passive;
        let reduction = if self.role() == Role::Tank {
            passive.reduction_tanks
        } else {
            passive.reduction
        };
        self.damage_passive_remaining = passive.duration;
        self.modifiers
            .healing
            .set(ModifierSource::DamagePassive, -reduction);
    }

    fn clear_damage_passive(&mut self) {
        self.damage_passive_remaining = 0.0;
        self.modifiers.healing.remove(&ModifierSource::DamagePassive);
    }

    /// Apply the owner-side modifiers of an ability that became active
    pub fn apply_effects(&mut self, source: ModifierSource, effects: &AbilityEffects) {
        if effects.damage != 0.0 {
            self.modifiers.damage.set(source.clone(), effects.damage);
        }
        if effects.healing != 0.0 {
            self.modifiers.healing.set(source.clone(), effects.healing);
        }
        if effects.movement != 0.0 {
            self.modifiers.movement.set(source, effects.movement);
        }
    }

    /// Remove everything `source` contributed
    pub fn remove_effects(&mut self, source: &ModifierSource) {
        self.modifiers.damage.remove(source);
        self.modifiers.healing.remove(source);
        self.modifiers.movement.remove(source);
    }

    /// Apply a chosen perk's permanent modifiers
    pub fn apply_perk(&mut self, perk: &PerkDefinition) {
        self.apply_effects(ModifierSource::Perk(perk.id.clone()), &perk.effects);
    }

    /// Restore hit points after death
    ///
    /// Ultimate charge, perk progress and perk effects survive death.
    pub fn respawn(&mut self) {
        self.hit_points.reset(&self.definition.hit_points);
        self.clear_damage_passive();
        self.is_healing = false;
        self.time_since_damage_taken = 0.0;
        self.time_since_healing_received = 0.0;
    }
}
