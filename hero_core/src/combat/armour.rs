//! Armour - Mitigation applied to damage that reaches the armour layer

use crate::config::ArmourConstants;
use crate::types::ArmourInteraction;

/// Calculate the damage left after armour mitigation
///
/// `remaining` is what is left of the hit after shields; `hit` is the whole
/// modified hit and decides between the two flat-reduction branches:
/// - `hit <= small_hit_threshold`: halved
/// - otherwise: `flat_reduction` is subtracted
///
/// This makes armour reduce small hits more, in percentage terms, than big
/// ones. Beam and DoT damage are scaled by their constants instead.
///
/// # Returns
/// The damage after armour mitigation, never negative
pub fn calculate_armour_mitigation(
    remaining: f64,
    hit: f64,
    mode: ArmourInteraction,
    constants: &ArmourConstants,
) -> f64 {
    if remaining <= 0.0 {
        return 0.0;
    }

    let mitigated = match mode {
        ArmourInteraction::Beam => remaining * (1.0 - constants.beam_on_armour),
        ArmourInteraction::Dot => remaining * (1.0 - constants.dot_on_armour),
        ArmourInteraction::Yes => {
            if hit <= constants.small_hit_threshold {
                remaining / 2.0
            } else {
                remaining - constants.flat_reduction
            }
        }
        ArmourInteraction::No => remaining,
    };

    mitigated.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_hit_halved() {
        let c = ArmourConstants::default();
        let result = calculate_armour_mitigation(10.0, 10.0, ArmourInteraction::Yes, &c);
        assert!((result - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let c = ArmourConstants::default();
        let result = calculate_armour_mitigation(14.0, 14.0, ArmourInteraction::Yes, &c);
        assert!((result - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_large_hit_flat_reduction() {
        let c = ArmourConstants::default();
        let result = calculate_armour_mitigation(20.0, 20.0, ArmourInteraction::Yes, &c);
        assert!((result - 13.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_branch_uses_whole_hit() {
        // 30 hit, 25 of it absorbed by shields: still a large hit
        let c = ArmourConstants::default();
        let result = calculate_armour_mitigation(5.0, 30.0, ArmourInteraction::Yes, &c);
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_beam_and_dot() {
        let c = ArmourConstants::default();
        let beam = calculate_armour_mitigation(100.0, 100.0, ArmourInteraction::Beam, &c);
        assert!((beam - 70.0).abs() < 1e-9);
        let dot = calculate_armour_mitigation(100.0, 100.0, ArmourInteraction::Dot, &c);
        assert!((dot - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_interaction_passes_through() {
        let c = ArmourConstants::default();
        assert_eq!(calculate_armour_mitigation(42.0, 42.0, ArmourInteraction::No, &c), 42.0);
    }
}
