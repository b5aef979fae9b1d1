//! UltimateResource - Charge toward the hero's ultimate ability

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UltimateResource {
    pub cost: f64,
    pub current: f64,
    /// True iff `current == cost`
    pub ready: bool,
    /// True while the ultimate ability is executing
    pub active: bool,
}

impl UltimateResource {
    pub fn new(cost: f64) -> Self {
        UltimateResource {
            cost,
            current: 0.0,
            ready: false,
            active: false,
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.cost
    }

    /// Fraction charged in `[0, 1]`
    pub fn percent(&self) -> f64 {
        if self.cost <= 0.0 {
            return 1.0;
        }
        (self.current / self.cost).clamp(0.0, 1.0)
    }

    /// Spend a ready ultimate. Returns false if it is not ready or already running.
    pub fn spend(&mut self) -> bool {
        if !self.ready || self.active {
            return false;
        }
        self.ready = false;
        self.active = true;
        self.current = 0.0;
        true
    }

    /// The ultimate ability finished executing
    pub fn end(&mut self) {
        self.active = false;
    }
}
