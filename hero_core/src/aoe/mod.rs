//! Area effects - Time-bounded volumes applying damage or healing
//!
//! Geometry lives outside the core: the caller reports each overlap between
//! an area and a recipient collider, and the area decides whether and how
//! the recipient is affected.

mod area;
mod overlap;

pub use area::AreaOfEffect;
pub use overlap::{AreaOutcome, Overlap, Recipient, RejectReason};
