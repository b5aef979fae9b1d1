//! WeaponState - Fire-rate gate, magazine and reload countdown

use crate::config::WeaponDefinition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponState {
    pub weapon: String,
    pub magazine: u32,
    pub capacity: u32,
    pub reloading: bool,
    pub reload_remaining: f64,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f64,
}

impl WeaponState {
    pub fn new(definition: &WeaponDefinition) -> Self {
        WeaponState {
            weapon: definition.id.clone(),
            magazine: definition.magazine,
            capacity: definition.magazine,
            reloading: false,
            reload_remaining: 0.0,
            fire_cooldown: 0.0,
        }
    }

    /// Fire one shot. Interrupts a reload if ammo remains.
    ///
    /// Returns false if the fire-rate gate is closed or the magazine is empty.
    /// Emptying the magazine starts a reload.
    pub fn fire(&mut self, definition: &WeaponDefinition) -> bool {
        if self.fire_cooldown > 0.0 || self.magazine == 0 {
            return false;
        }

        self.stop_reload();
        self.magazine -= 1;
        if definition.fire_rate > 0.0 {
            self.fire_cooldown = 1.0 / definition.fire_rate;
        }

        if self.magazine == 0 {
            self.reload(definition);
        }
        true
    }

    /// Begin a reload. Returns false if one is running, not allowed or not needed.
    pub fn reload(&mut self, definition: &WeaponDefinition) -> bool {
        if !definition.can_reload || self.reloading || self.magazine == self.capacity {
            return false;
        }
        self.reloading = true;
        self.reload_remaining = definition.reload_time;
        true
    }

    pub fn stop_reload(&mut self) {
        self.reloading = false;
        self.reload_remaining = 0.0;
    }

    /// Add ammo up to capacity, cancelling any reload. Returns the amount added.
    pub fn refund(&mut self, amount: u32) -> u32 {
        self.stop_reload();
        let added = amount.min(self.capacity - self.magazine);
        self.magazine += added;
        added
    }

    /// Count down timers. Returns true if a reload finished this step.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);

        if !self.reloading {
            return false;
        }
        self.reload_remaining -= dt;
        if self.reload_remaining <= 0.0 {
            self.stop_reload();
            self.magazine = self.capacity;
            return true;
        }
        false
    }
}
