//! GameEvent - Notifications pushed to the kill feed, HUD and physics layers
//!
//! The world never calls out to collaborators directly. Everything that a
//! renderer, audio mixer or physics engine would react to is queued here and
//! drained by the caller.

use crate::types::{AreaId, BarrierId, EntityId};
use serde::{Deserialize, Serialize};

/// Phase of an ability's countdown state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityPhase {
    Idle,
    Casting,
    Active,
    Cooldown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Died {
        entity: EntityId,
    },
    Respawned {
        entity: EntityId,
    },
    /// Killing hit; `by == victim` for self-inflicted or sourceless deaths
    FinalBlow {
        by: EntityId,
        victim: EntityId,
        ability: Option<String>,
        headshot: bool,
        ultimate: bool,
    },
    UltimateReady {
        entity: EntityId,
    },
    UltimateEnded {
        entity: EntityId,
    },
    PerkAvailable {
        entity: EntityId,
        level: u8,
    },
    PerkSelected {
        entity: EntityId,
        level: u8,
        /// Perk id, if the hero defines perks for this tier
        perk: Option<String>,
    },
    /// Floating number at the target; negative for damage
    HitNumber {
        target: EntityId,
        value: f64,
    },
    Knockback {
        area: AreaId,
        recipient: EntityId,
        speed: f64,
    },
    BarrierHit {
        barrier: BarrierId,
        value: f64,
    },
    BarrierDestroyed {
        barrier: BarrierId,
    },
    AreaSpawned {
        area: AreaId,
        owner: EntityId,
        ability: String,
    },
    /// An area processed a recipient; the owner's "on area hit" hook
    AreaHit {
        area: AreaId,
        owner: EntityId,
        recipient: EntityId,
    },
    AreaExpired {
        area: AreaId,
    },
    AbilityPhaseChanged {
        entity: EntityId,
        ability: String,
        phase: AbilityPhase,
    },
    Reloaded {
        entity: EntityId,
    },
}

impl GameEvent {
    /// Entity the event is primarily about, if any
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            GameEvent::Died { entity }
            | GameEvent::Respawned { entity }
            | GameEvent::UltimateReady { entity }
            | GameEvent::UltimateEnded { entity }
            | GameEvent::PerkAvailable { entity, .. }
            | GameEvent::PerkSelected { entity, .. }
            | GameEvent::AbilityPhaseChanged { entity, .. }
            | GameEvent::Reloaded { entity } => Some(*entity),
            GameEvent::FinalBlow { victim, .. } => Some(*victim),
            GameEvent::HitNumber { target, .. } => Some(*target),
            GameEvent::Knockback { recipient, .. } => Some(*recipient),
            GameEvent::AreaSpawned { owner, .. } | GameEvent::AreaHit { owner, .. } => Some(*owner),
            GameEvent::BarrierHit { .. }
            | GameEvent::BarrierDestroyed { .. }
            | GameEvent::AreaExpired { .. } => None,
        }
    }
}
