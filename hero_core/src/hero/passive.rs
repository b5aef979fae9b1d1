//! Passive per-tick drivers: damage passive decay, regeneration, passive ultimate charge

use super::Hero;
use crate::config::GameConstants;
use crate::progression::award_ultimate_charge;
use crate::types::Role;

impl Hero {
    /// Advance timers and count down the damage passive
    pub fn advance_timers(&mut self, dt: f64) {
        self.time_since_damage_taken += dt;
        self.time_since_healing_received += dt;

        if self.damage_passive_active() {
            self.damage_passive_remaining -= dt;
            if self.damage_passive_remaining <= 0.0 {
                self.clear_damage_passive();
            }
        }
    }

    /// Grant passive ultimate charge for every whole interval elapsed
    ///
    /// Returns true if the ultimate became ready.
    pub fn charge_ultimate_passively(&mut self, dt: f64, constants: &GameConstants) -> bool {
        let interval = constants.ultimate.passive_interval;
        if interval <= 0.0 {
            return false;
        }

        self.passive_charge_elapsed += dt;
        let mut became_ready = false;
        while self.passive_charge_elapsed >= interval {
            self.passive_charge_elapsed -= interval;
            became_ready |= award_ultimate_charge(&mut self.ultimate, constants.ultimate.passive_charge);
        }
        became_ready
    }

    /// Seconds without damage before health starts regenerating
    pub fn health_regen_delay(&self, constants: &GameConstants) -> f64 {
        if self.role() == Role::Support {
            constants.regen.support_health_delay
        } else {
            constants.regen.health_delay
        }
    }

    /// Raw health regeneration for this tick, if eligible
    ///
    /// The value is unmodified; the resolver applies the healing modifier.
    pub fn health_regen_amount(&self, dt: f64, constants: &GameConstants) -> Option<f64> {
        if !self.definition.health_auto_regen || self.is_full() {
            return None;
        }
        if self.time_since_damage_taken < self.health_regen_delay(constants) {
            return None;
        }

        let rate = constants.regen.auto_regen_constant
            + constants.regen.auto_regen_percentage * self.maxima().total();
        Some(rate * dt)
    }

    /// Regenerate shields directly, healing self damage bookkeeping first
    ///
    /// Returns true if regeneration ran this tick; the caller then resolves a
    /// zero-value auto-regen update so the healing state is refreshed.
    pub fn regenerate_shields(&mut self, dt: f64, constants: &GameConstants) -> bool {
        let max_shields = self.maxima().shields;
        if !self.definition.shield_auto_regen || max_shields <= 0.0 {
            return false;
        }
        if self.hit_points.shields == max_shields
            || self.time_since_damage_taken < constants.regen.shield_delay
        {
            return false;
        }

        let value = constants.regen.shield_regen_constant * self.modifiers.healing.compute() * dt;

        if self.hit_points.self_damage > 0.0 {
            self.hit_points.self_damage = (self.hit_points.self_damage - value).max(0.0);
        }

        if !self.is_full() {
            self.is_healing = true;
            self.time_since_healing_received = 0.0;
        }

        if value > 0.0 {
            self.hit_points.shields = (self.hit_points.shields + value).min(max_shields);
        }

        if self.is_full() {
            self.is_healing = false;
        }

        true
    }

    /// Clear `is_healing` once no healing arrived for the timeout
    pub fn expire_healing_flag(&mut self, constants: &GameConstants) {
        if self.is_healing
            && self.time_since_healing_received > constants.timing.healing_received_timeout
        {
            self.is_healing = false;
        }
    }
}
