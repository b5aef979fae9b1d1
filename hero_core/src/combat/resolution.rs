//! Hit point resolution - Apply an HpChange to a hero's layered pool

use super::armour::calculate_armour_mitigation;
use super::request::{HpChange, SourceSnapshot};
use super::result::{FinalBlow, HpUpdate};
use crate::config::GameConstants;
use crate::hero::Hero;
use crate::types::{Controller, EntityId, Layer, Role};
use tracing::trace;

impl Hero {
    /// Resolve a damage or healing value against this hero
    ///
    /// This is the only place hit points change outside of shield
    /// regeneration and respawn. It:
    /// 1. Scales the value by the source's damage modifier (damage with a
    ///    source) or this hero's healing modifier (everything else)
    /// 2. Depletes shields → armour → health, or restores
    ///    health → armour → shields, capped at each maximum
    /// 3. Tracks self damage and applies the Damage-role passive
    /// 4. Reports death, final blow attribution and who earns progression
    ///
    /// The caller guarantees the hero is alive; liveness lives on the entity.
    pub fn update_hp(
        &mut self,
        target: EntityId,
        change: &HpChange,
        source: Option<&SourceSnapshot>,
        constants: &GameConstants,
    ) -> HpUpdate {
        let mut update = HpUpdate::new(target, change.kind);

        let raw = change.value.max(0.0);
        let value = match source {
            Some(src) if change.is_damage() => raw * src.damage_modifier,
            _ => raw * self.modifiers.healing.compute(),
        };
        update.modified_value = value;

        if change.is_damage() {
            update.self_interaction = source.is_some_and(|src| src.id == target);
            self.absorb_damage(value, change, source, &mut update, constants);
        } else {
            self.restore_hit_points(value, &mut update);
        }

        if self.hit_points.is_depleted() {
            update.died = true;
            update.final_blow = Some(match source {
                Some(src) if !update.self_interaction => FinalBlow {
                    by: src.id,
                    victim: target,
                    ability: change.ability.clone(),
                    headshot: change.headshot,
                    ultimate: change.is_ultimate,
                },
                _ => FinalBlow {
                    by: target,
                    victim: target,
                    ability: None,
                    headshot: false,
                    ultimate: false,
                },
            });
        }

        if !update.self_interaction && !change.is_ultimate && !change.auto_regen {
            if let Some(src) = source.filter(|src| src.controller == Controller::Player) {
                update.progression_to = Some(src.id);
            }
        }

        if self.definition.show_hit_numbers && update.hit_value != 0.0 {
            update.hit_number = Some(update.signed_hit_value());
        }

        trace!(
            entity = %target,
            kind = ?change.kind,
            value,
            hit_value = update.hit_value,
            shields = update.shields_change,
            armour = update.armour_change,
            health = update.health_change,
            died = update.died,
            "resolved hp change"
        );

        update
    }

    fn absorb_damage(
        &mut self,
        value: f64,
        change: &HpChange,
        source: Option<&SourceSnapshot>,
        update: &mut HpUpdate,
        constants: &GameConstants,
    ) {
        self.time_since_damage_taken = 0.0;

        if update.self_interaction {
            // Bookkeeping only; the pools below are still depleted
            self.hit_points.self_damage += value;
        } else if source.is_some_and(|src| src.role == Role::Damage) {
            self.apply_damage_passive(constants);
        }

        let hp = &mut self.hit_points;
        let mut remaining = value;

        if hp.shields > 0.0 {
            let absorbed = remaining.min(hp.shields);
            hp.shields -= absorbed;
            remaining -= absorbed;
            update.shields_change = -absorbed;
        }

        if remaining > 0.0 && hp.armour > 0.0 {
            let after = calculate_armour_mitigation(remaining, value, change.armour, &constants.armour);
            update.mitigated_by_armour = remaining - after;
            remaining = after;

            let absorbed = remaining.min(hp.armour);
            hp.armour -= absorbed;
            remaining -= absorbed;
            update.armour_change = -absorbed;
        }

        if remaining > 0.0 && hp.health > 0.0 {
            let absorbed = remaining.min(hp.health);
            hp.health -= absorbed;
            remaining -= absorbed;
            update.health_change = -absorbed;
        }

        update.overkill = remaining;
        update.hit_value = -(update.shields_change + update.armour_change + update.health_change);
    }

    fn restore_hit_points(&mut self, value: f64, update: &mut HpUpdate) {
        if self.hit_points.self_damage > 0.0 {
            // Healing outstanding self damage never earns progression. The
            // whole value still heals the pools below.
            update.self_interaction = true;
            self.hit_points.self_damage = (self.hit_points.self_damage - value).max(0.0);
        }

        if !self.is_full() {
            self.is_healing = true;
            self.time_since_healing_received = 0.0;
        }

        let maxima = self.definition.hit_points;
        let mut remaining = value;

        for &layer in Layer::healing_order() {
            if remaining <= 0.0 {
                break;
            }

            let current = self.hit_points.layer_mut(layer);
            let restored = remaining.min((maxima.layer(layer) - *current).max(0.0));
            *current += restored;
            remaining -= restored;

            match layer {
                Layer::Health => update.health_change = restored,
                Layer::Armour => update.armour_change = restored,
                Layer::Shields => update.shields_change = restored,
            }
            update.hit_value += restored;
        }

        if self.is_full() {
            self.is_healing = false;
        }
    }
}
