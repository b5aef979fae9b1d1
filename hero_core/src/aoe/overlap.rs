//! Overlap inputs and outcomes

use crate::combat::HpChange;
use crate::types::{BarrierId, ColliderId, EntityId, Team};
use serde::{Deserialize, Serialize};

/// One collider of a recipient found inside an area this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    pub recipient: EntityId,
    pub collider: ColliderId,
    /// Distance from the area's centre, fed to the falloff evaluator
    pub distance: f64,
    pub in_line_of_sight: bool,
    /// Barrier standing between the centre and the recipient
    pub blocking_barrier: Option<BarrierId>,
}

impl Overlap {
    pub fn new(recipient: EntityId, collider: ColliderId, distance: f64) -> Self {
        Overlap {
            recipient,
            collider,
            distance,
            in_line_of_sight: true,
            blocking_barrier: None,
        }
    }

    /// Builder: line of sight is obstructed, optionally by a barrier
    pub fn obstructed(mut self, barrier: Option<BarrierId>) -> Self {
        self.in_line_of_sight = false;
        self.blocking_barrier = barrier;
        self
    }
}

/// What the area needs to know about the recipient entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipient {
    pub id: EntityId,
    pub team: Team,
    pub dead: bool,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownArea,
    UnknownRecipient,
    Dead,
    NotGrounded,
    /// Damage aimed at a teammate
    SameTeam,
    /// Healing aimed at an enemy
    OppositeTeam,
    AlreadyAffected,
    NoLineOfSight,
}

/// Decision for one overlap
#[derive(Debug, Clone, PartialEq)]
pub enum AreaOutcome {
    Rejected(RejectReason),
    /// Line of sight was blocked by a barrier, which takes the value instead
    BarrierHit { barrier: BarrierId, value: f64 },
    /// The recipient is affected; `change` is `None` when the value is zero
    Applied {
        recipient: EntityId,
        change: Option<HpChange>,
        knockback: Option<f64>,
    },
}

impl AreaOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, AreaOutcome::Rejected(_))
    }
}
