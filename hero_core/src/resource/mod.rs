//! Resource records owned by every hero: hit points, ultimate, perks

mod hit_points;
mod perk;
mod ultimate;

pub use hit_points::{HitPointMaxima, HitPoints};
pub use perk::{PerkChoice, PerkResource, MAX_PERK_LEVEL};
pub use ultimate::UltimateResource;
