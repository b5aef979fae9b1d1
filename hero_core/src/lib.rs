//! hero_core - Hit-point resolution core for a hero shooter
//!
//! This library provides:
//! - HitPoints: Layered health/armour/shields pools with self-damage bookkeeping
//! - HpChange → HpUpdate: Damage and healing resolution with armour mitigation
//! - Progression: Ultimate charge and perk tiers earned from delivered value
//! - AreaOfEffect: Affect-once bookkeeping for areas reported by the physics layer
//! - World: Entity ownership, ability and weapon state machines, respawns and the kill feed

pub mod ability;
pub mod aoe;
pub mod barrier;
pub mod combat;
pub mod config;
pub mod delta;
pub mod entity;
pub mod events;
pub mod hero;
pub mod killfeed;
pub mod modifier;
pub mod prelude;
pub mod progression;
pub mod resource;
pub mod types;
pub mod weapon;
pub mod world;

// Re-export core types for convenience
pub use ability::{AbilityState, PhaseTransition};
pub use aoe::{AreaOfEffect, AreaOutcome, Overlap, Recipient, RejectReason};
pub use barrier::Barrier;
pub use combat::{calculate_armour_mitigation, FinalBlow, HpChange, HpUpdate, SourceSnapshot};
pub use config::{default_registry, load_registry, parse_registry, ConfigError, GameConstants, Registry};
pub use delta::{evaluate_falloff, HealthDelta, ValueRange};
pub use entity::Entity;
pub use events::{AbilityPhase, GameEvent};
pub use hero::Hero;
pub use killfeed::{KillContext, KillFeed, KillFeedEntry};
pub use modifier::{Modifier, ModifierSource, Modifiers};
pub use progression::{award_perk_progress, award_ultimate_charge, select_perk, PerkSelection};
pub use resource::{HitPointMaxima, HitPoints, PerkChoice, PerkResource, UltimateResource};
pub use types::{
    AreaId, ArmourInteraction, BarrierId, ColliderId, Controller, DeltaKind, EntityId, FalloffRange,
    Layer, Role, Team,
};
pub use weapon::WeaponState;
pub use world::{Pickup, WeaponHit, World};
