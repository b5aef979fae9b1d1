//! Barrier - A separate depletable pool that soaks hits aimed through it

use crate::types::{BarrierId, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrier {
    pub id: BarrierId,
    /// Entity whose respawn restores the barrier
    pub owner: Option<EntityId>,
    pub max: f64,
    pub current: f64,
    pub active: bool,
}

impl Barrier {
    pub fn new(id: BarrierId, max: f64) -> Self {
        Barrier {
            id,
            owner: None,
            max,
            current: max,
            active: true,
        }
    }

    pub fn with_owner(mut self, owner: EntityId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Subtract a hit. Returns true if this hit destroyed the barrier.
    ///
    /// The barrier stays up at exactly zero and goes down once below it.
    pub fn hit(&mut self, value: f64) -> bool {
        if !self.active || value <= 0.0 {
            return false;
        }
        self.current -= value;
        if self.current < 0.0 {
            self.active = false;
            return true;
        }
        false
    }

    pub fn restore(&mut self) {
        self.current = self.max;
        self.active = true;
    }
}
