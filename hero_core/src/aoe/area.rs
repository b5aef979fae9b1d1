//! AreaOfEffect - Affect-once bookkeeping for one spawned area

use super::overlap::{AreaOutcome, Overlap, Recipient, RejectReason};
use crate::combat::HpChange;
use crate::config::{AbilityDefinition, AreaEffectDefinition};
use crate::delta::evaluate_falloff;
use crate::types::{AreaId, ArmourInteraction, ColliderId, EntityId, Team};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct AreaOfEffect {
    pub id: AreaId,
    pub owner: EntityId,
    pub owner_team: Team,
    pub ability: String,
    pub definition: AreaEffectDefinition,
    /// Armour mode of the spawning ability, used unless the area overrides it
    pub ability_armour: ArmourInteraction,
    pub grounded: bool,
    pub is_ultimate: bool,
    /// Seconds until the area is removed
    pub remaining: f64,
    affected_entities: HashSet<EntityId>,
    affected_colliders: HashSet<ColliderId>,
    affect_once: bool,
    owner_notified: bool,
}

impl AreaOfEffect {
    /// Spawn the area of `ability`; `None` if the ability defines no area
    pub fn spawn(
        id: AreaId,
        owner: EntityId,
        owner_team: Team,
        ability: &AbilityDefinition,
        is_ultimate: bool,
        dt: f64,
    ) -> Option<Self> {
        let definition = ability.area.clone()?;
        Some(AreaOfEffect {
            id,
            owner,
            owner_team,
            ability: ability.id.clone(),
            ability_armour: ability.armour_interaction,
            grounded: definition.grounded,
            is_ultimate,
            remaining: dt.max(definition.duration),
            affect_once: definition.affects_once(),
            affected_entities: HashSet::new(),
            affected_colliders: HashSet::new(),
            owner_notified: false,
            definition,
        })
    }

    pub fn affects_once(&self) -> bool {
        self.affect_once
    }

    pub fn has_affected(&self, entity: EntityId) -> bool {
        self.affected_entities.contains(&entity)
    }

    /// True the first time it is called for this area
    pub fn take_first_owner_hit(&mut self) -> bool {
        !std::mem::replace(&mut self.owner_notified, true)
    }

    /// Count down the lifetime. Returns true once the area has expired.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    /// Decide what one overlap does to its recipient
    ///
    /// An entity is processed through the first collider it was seen with
    /// only. One-shot areas never process an entity twice; areas with a
    /// duration reprocess that first collider on every tick.
    pub fn process_overlap(&mut self, recipient: &Recipient, overlap: &Overlap, dt: f64) -> AreaOutcome {
        let delta = &self.definition.delta;

        if recipient.dead {
            return AreaOutcome::Rejected(RejectReason::Dead);
        }
        if self.grounded && !recipient.grounded {
            return AreaOutcome::Rejected(RejectReason::NotGrounded);
        }

        let affects_owner = self.definition.affect_self && recipient.id == self.owner;
        if !affects_owner && delta.is_damage && recipient.team == self.owner_team {
            return AreaOutcome::Rejected(RejectReason::SameTeam);
        }
        if !delta.is_damage && recipient.team != self.owner_team {
            return AreaOutcome::Rejected(RejectReason::OppositeTeam);
        }

        if self.affected_entities.contains(&recipient.id) {
            if self.affect_once || !self.affected_colliders.contains(&overlap.collider) {
                return AreaOutcome::Rejected(RejectReason::AlreadyAffected);
            }
        } else {
            self.affected_entities.insert(recipient.id);
            self.affected_colliders.insert(overlap.collider);
        }

        let per_second = delta.value_range.is_zero();
        let mut value = if per_second {
            delta.value_per_second * dt
        } else {
            evaluate_falloff(overlap.distance, delta, self.definition.radius)
        };

        if self.definition.los_required && !overlap.in_line_of_sight {
            return match overlap.blocking_barrier {
                Some(barrier) if self.definition.blocked_by_barrier => {
                    AreaOutcome::BarrierHit { barrier, value }
                }
                _ => AreaOutcome::Rejected(RejectReason::NoLineOfSight),
            };
        }

        let knockback = (self.definition.knockback_speed != 0.0).then_some(self.definition.knockback_speed);
        if affects_owner && delta.is_damage {
            value /= 2.0;
        }

        let change = (value != 0.0).then(|| {
            let armour = if per_second {
                ArmourInteraction::Dot
            } else {
                self.definition.armour_interaction.unwrap_or(self.ability_armour)
            };
            let change = if delta.is_damage {
                HpChange::damage(value)
            } else {
                HpChange::healing(value)
            };
            let change = change
                .from(self.owner)
                .with_ability(self.ability.clone())
                .armour(armour);
            if self.is_ultimate {
                change.ultimate()
            } else {
                change
            }
        });

        AreaOutcome::Applied {
            recipient: recipient.id,
            change,
            knockback,
        }
    }
}
