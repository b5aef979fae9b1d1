//! Prelude module for convenient imports
//!
//! ```rust
//! use hero_core::prelude::*;
//! ```

// Core types
pub use crate::types::{ArmourInteraction, Controller, DeltaKind, EntityId, Role, Team};
pub use crate::resource::{HitPointMaxima, HitPoints, PerkChoice};

// Resolution
pub use crate::combat::{HpChange, HpUpdate};
pub use crate::delta::{evaluate_falloff, HealthDelta, ValueRange};

// World
pub use crate::aoe::{AreaOutcome, Overlap};
pub use crate::events::GameEvent;
pub use crate::world::{Pickup, WeaponHit, World};

// Config
pub use crate::config::{default_registry, Registry};
