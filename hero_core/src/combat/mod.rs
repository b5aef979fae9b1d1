//! Combat resolution - Apply hit point changes to heroes

mod armour;
mod request;
mod resolution;
mod result;

pub use armour::calculate_armour_mitigation;
pub use request::{HpChange, SourceSnapshot};
pub use result::{FinalBlow, HpUpdate};
