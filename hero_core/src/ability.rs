//! AbilityState - Countdown state machine for one ability
//!
//! Idle → Casting → Active → Cooldown → Idle, each phase lasting the
//! definition's cast time, duration and cooldown. A zero-length phase is
//! entered and left within the same step, so observers still see every
//! transition in order.

use crate::config::AbilityDefinition;
use crate::events::AbilityPhase;
use serde::{Deserialize, Serialize};

/// One phase change reported by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub from: AbilityPhase,
    pub to: AbilityPhase,
}

impl PhaseTransition {
    /// Casting ran to completion; areas spawn here
    pub fn finished_casting(&self) -> bool {
        self.from == AbilityPhase::Casting && self.to == AbilityPhase::Active
    }

    pub fn became_active(&self) -> bool {
        self.to == AbilityPhase::Active
    }

    pub fn left_active(&self) -> bool {
        self.from == AbilityPhase::Active
    }

    /// The use is over, whether it ran its course or was cut short while casting
    pub fn ended_use(&self) -> bool {
        matches!(self.from, AbilityPhase::Casting | AbilityPhase::Active)
            && matches!(self.to, AbilityPhase::Cooldown | AbilityPhase::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityState {
    pub ability: String,
    pub phase: AbilityPhase,
    /// Seconds left in the current phase
    pub remaining: f64,
}

impl AbilityState {
    pub fn new(ability: impl Into<String>) -> Self {
        AbilityState {
            ability: ability.into(),
            phase: AbilityPhase::Idle,
            remaining: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == AbilityPhase::Idle
    }

    pub fn is_active(&self) -> bool {
        self.phase == AbilityPhase::Active
    }

    /// Start casting. Returns `None` unless the ability is idle.
    pub fn start(&mut self, definition: &AbilityDefinition) -> Option<Vec<PhaseTransition>> {
        if !self.is_ready() {
            return None;
        }

        let mut transitions = Vec::new();
        self.enter(AbilityPhase::Casting, definition, &mut transitions);
        self.settle(definition, &mut transitions);
        Some(transitions)
    }

    /// Advance the countdown by `dt`, carrying overflow into later phases
    pub fn advance(&mut self, dt: f64, definition: &AbilityDefinition) -> Vec<PhaseTransition> {
        let mut transitions = Vec::new();
        if self.phase == AbilityPhase::Idle {
            return transitions;
        }

        self.remaining -= dt;
        self.settle(definition, &mut transitions);
        transitions
    }

    /// Cut the current phase short, e.g. on death
    pub fn interrupt(&mut self, definition: &AbilityDefinition) -> Vec<PhaseTransition> {
        let mut transitions = Vec::new();
        match self.phase {
            AbilityPhase::Casting | AbilityPhase::Active => {
                self.enter(AbilityPhase::Cooldown, definition, &mut transitions);
                self.settle(definition, &mut transitions);
            }
            AbilityPhase::Idle | AbilityPhase::Cooldown => {}
        }
        transitions
    }

    fn settle(&mut self, definition: &AbilityDefinition, transitions: &mut Vec<PhaseTransition>) {
        while self.phase != AbilityPhase::Idle && self.remaining <= 0.0 {
            let overflow = self.remaining;
            let next = next_phase(self.phase);
            self.enter(next, definition, transitions);
            if next != AbilityPhase::Idle {
                self.remaining += overflow;
            }
        }
    }

    fn enter(
        &mut self,
        phase: AbilityPhase,
        definition: &AbilityDefinition,
        transitions: &mut Vec<PhaseTransition>,
    ) {
        transitions.push(PhaseTransition {
            from: self.phase,
            to: phase,
        });
        self.phase = phase;
        self.remaining = phase_length(phase, definition);
    }
}

fn next_phase(phase: AbilityPhase) -> AbilityPhase {
    match phase {
        AbilityPhase::Idle => AbilityPhase::Casting,
        AbilityPhase::Casting => AbilityPhase::Active,
        AbilityPhase::Active => AbilityPhase::Cooldown,
        AbilityPhase::Cooldown => AbilityPhase::Idle,
    }
}

fn phase_length(phase: AbilityPhase, definition: &AbilityDefinition) -> f64 {
    match phase {
        AbilityPhase::Idle => 0.0,
        AbilityPhase::Casting => definition.cast_time,
        AbilityPhase::Active => definition.duration,
        AbilityPhase::Cooldown => definition.cooldown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases(transitions: &[PhaseTransition]) -> Vec<AbilityPhase> {
        transitions.iter().map(|t| t.to).collect()
    }

    #[test]
    fn test_full_cycle() {
        let def = AbilityDefinition::new("stim_pack", 15.0, 0.25, 4.0);
        let mut state = AbilityState::new("stim_pack");

        let started = state.start(&def).unwrap();
        assert_eq!(phases(&started), vec![AbilityPhase::Casting]);

        let t = state.advance(0.25, &def);
        assert_eq!(phases(&t), vec![AbilityPhase::Active]);
        assert!(t[0].finished_casting());
        assert!((state.remaining - 4.0).abs() < 1e-9);

        let t = state.advance(4.0, &def);
        assert_eq!(phases(&t), vec![AbilityPhase::Cooldown]);
        assert!(t[0].left_active());

        let t = state.advance(15.0, &def);
        assert_eq!(phases(&t), vec![AbilityPhase::Idle]);
        assert!(state.is_ready());
    }

    #[test]
    fn test_zero_length_phases_pass_through() {
        let def = AbilityDefinition::new("helix_rockets", 6.0, 0.0, 0.0);
        let mut state = AbilityState::new("helix_rockets");

        let started = state.start(&def).unwrap();
        assert_eq!(
            phases(&started),
            vec![AbilityPhase::Casting, AbilityPhase::Active, AbilityPhase::Cooldown]
        );
        assert_eq!(state.phase, AbilityPhase::Cooldown);
        assert!((state.remaining - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_cannot_start_while_busy() {
        let def = AbilityDefinition::new("sprint", 0.0, 0.0, 3.0);
        let mut state = AbilityState::new("sprint");
        assert!(state.start(&def).is_some());
        assert!(state.start(&def).is_none());
    }

    #[test]
    fn test_overflow_carries_into_next_phase() {
        let def = AbilityDefinition::new("stim_pack", 15.0, 0.25, 4.0);
        let mut state = AbilityState::new("stim_pack");
        state.start(&def);

        state.advance(0.5, &def);
        assert!(state.is_active());
        assert!((state.remaining - 3.75).abs() < 1e-9);
    }

    #[test]
    fn test_idle_does_not_advance() {
        let def = AbilityDefinition::new("sprint", 0.0, 0.0, 3.0);
        let mut state = AbilityState::new("sprint");
        assert!(state.advance(1.0, &def).is_empty());
    }

    #[test]
    fn test_interrupt_goes_to_cooldown() {
        let def = AbilityDefinition::new("stim_pack", 15.0, 0.0, 4.0);
        let mut state = AbilityState::new("stim_pack");
        state.start(&def);
        assert!(state.is_active());

        let t = state.interrupt(&def);
        assert!(t[0].left_active());
        assert!(!t[0].finished_casting());
        assert_eq!(state.phase, AbilityPhase::Cooldown);
    }

    #[test]
    fn test_interrupt_while_casting_ends_use() {
        let def = AbilityDefinition::new("tactical_visor", 0.0, 0.5, 6.0).ultimate();
        let mut state = AbilityState::new("tactical_visor");
        state.start(&def);
        assert_eq!(state.phase, AbilityPhase::Casting);

        let t = state.interrupt(&def);
        assert_eq!(phases(&t), vec![AbilityPhase::Cooldown, AbilityPhase::Idle]);
        assert!(t[0].ended_use());
        assert!(!t[0].left_active());
        assert_eq!(t.iter().filter(|t| t.ended_use()).count(), 1);
        assert!(state.is_ready());
    }

    #[test]
    fn test_use_ends_once_per_cycle() {
        let def = AbilityDefinition::new("sprint", 0.0, 0.0, 0.0);
        let mut state = AbilityState::new("sprint");

        let t = state.start(&def).unwrap();
        assert_eq!(t.iter().filter(|t| t.ended_use()).count(), 1);
        assert!(state.is_ready());
    }
}
