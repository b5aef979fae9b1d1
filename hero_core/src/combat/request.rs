//! HpChange - One damage or healing value headed for a hero

use crate::types::{ArmourInteraction, Controller, DeltaKind, EntityId, Role};
use serde::{Deserialize, Serialize};

/// A raw value plus the context it was delivered under
///
/// The sign always lives in `kind`; `value` is a non-negative magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HpChange {
    pub value: f64,
    pub kind: DeltaKind,
    /// Delivering entity; `None` for environmental or sourceless changes
    pub source: Option<EntityId>,
    pub is_ultimate: bool,
    /// Ability credited in the kill feed
    pub ability: Option<String>,
    pub headshot: bool,
    pub auto_regen: bool,
    pub armour: ArmourInteraction,
}

impl HpChange {
    fn new(value: f64, kind: DeltaKind) -> Self {
        HpChange {
            value,
            kind,
            source: None,
            is_ultimate: false,
            ability: None,
            headshot: false,
            auto_regen: false,
            armour: ArmourInteraction::default(),
        }
    }

    pub fn damage(value: f64) -> Self {
        Self::new(value, DeltaKind::Damage)
    }

    pub fn healing(value: f64) -> Self {
        Self::new(value, DeltaKind::Healing)
    }

    /// Builder: set the delivering entity
    pub fn from(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Builder: delivered by an ultimate
    pub fn ultimate(mut self) -> Self {
        self.is_ultimate = true;
        self
    }

    /// Builder: credit an ability
    pub fn with_ability(mut self, ability: impl Into<String>) -> Self {
        self.ability = Some(ability.into());
        self
    }

    /// Builder: mark as a headshot
    pub fn headshot(mut self) -> Self {
        self.headshot = true;
        self
    }

    /// Builder: passive regeneration
    pub fn auto_regen(mut self) -> Self {
        self.auto_regen = true;
        self
    }

    /// Builder: set the armour interaction
    pub fn armour(mut self, mode: ArmourInteraction) -> Self {
        self.armour = mode;
        self
    }

    pub fn is_damage(&self) -> bool {
        self.kind.is_damage()
    }
}

/// What the resolver needs to know about the delivering entity
///
/// Taken before the target is borrowed mutably so the source's own records
/// are never touched by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceSnapshot {
    pub id: EntityId,
    pub role: Role,
    pub controller: Controller,
    pub damage_modifier: f64,
}
