//! Hits reported by the hit-detection layer: weapons, abilities and areas

use super::World;
use crate::aoe::{AreaOutcome, Overlap, Recipient, RejectReason};
use crate::combat::{HpChange, HpUpdate};
use crate::delta::{evaluate_falloff, HealthDelta};
use crate::events::GameEvent;
use crate::types::{AreaId, ArmourInteraction, BarrierId, EntityId, FalloffRange};
use serde::{Deserialize, Serialize};

/// Geometry of one landed shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponHit {
    pub distance: f64,
    pub headshot: bool,
    /// The shot struck this barrier instead of the target, if it is still up
    pub barrier: Option<BarrierId>,
}

impl WeaponHit {
    pub fn at(distance: f64) -> Self {
        WeaponHit {
            distance,
            headshot: false,
            barrier: None,
        }
    }

    pub fn headshot(mut self) -> Self {
        self.headshot = true;
        self
    }

    pub fn into_barrier(mut self, barrier: BarrierId) -> Self {
        self.barrier = Some(barrier);
        self
    }
}

/// Hit parameters shared by weapons and ability projectiles
struct HitProfile {
    damage: HealthDelta,
    healing: HealthDelta,
    falloff: FalloffRange,
    headshot_multiplier: f64,
    armour: ArmourInteraction,
    ability: Option<String>,
}

impl World {
    /// Apply a shot from the shooter's weapon
    ///
    /// While the shooter's ultimate is active the shot is credited to it.
    pub fn apply_weapon_hit(&mut self, shooter: EntityId, target: EntityId, hit: WeaponHit) -> Option<HpUpdate> {
        let entity = self.entities.get(&shooter)?;
        let weapon = self.registry.weapon(&entity.weapon.as_ref()?.weapon)?;
        let ability = entity
            .hero
            .ultimate
            .active
            .then(|| entity.hero.definition.ultimate.clone())
            .flatten();

        let profile = HitProfile {
            damage: weapon.damage,
            healing: weapon.healing,
            falloff: weapon.falloff,
            headshot_multiplier: weapon.headshot_multiplier,
            armour: weapon.armour_interaction,
            ability,
        };
        self.resolve_hit(shooter, target, hit, profile)
    }

    /// Apply a direct hit from an ability projectile
    pub fn apply_ability_hit(
        &mut self,
        shooter: EntityId,
        ability: &str,
        target: EntityId,
        hit: WeaponHit,
    ) -> Option<HpUpdate> {
        let definition = self.registry.ability(ability)?;
        let profile = HitProfile {
            damage: definition.damage,
            healing: definition.healing,
            falloff: definition.falloff,
            headshot_multiplier: definition.headshot_multiplier,
            armour: definition.armour_interaction,
            ability: Some(definition.id.clone()),
        };
        self.resolve_hit(shooter, target, hit, profile)
    }

    fn resolve_hit(
        &mut self,
        shooter: EntityId,
        target: EntityId,
        hit: WeaponHit,
        profile: HitProfile,
    ) -> Option<HpUpdate> {
        let source = self.entities.get(&shooter)?;
        let friendly = source.team == self.entities.get(&target)?.team;
        let is_ultimate = source.hero.ultimate.active;

        let delta = if friendly { profile.healing } else { profile.damage };
        let mut value = if profile.falloff.is_zero() {
            delta.value_range.max
        } else {
            evaluate_falloff(hit.distance, &delta, profile.falloff)
        };

        let headshot = hit.headshot && profile.headshot_multiplier > 1.0;
        if headshot {
            value *= profile.headshot_multiplier;
        }

        // A downed barrier no longer blocks; the shot reaches the target
        if hit.barrier.is_some_and(|barrier| self.hit_barrier(barrier, value)) {
            return None;
        }

        let mut change = if friendly {
            HpChange::healing(value)
        } else {
            HpChange::damage(value)
        }
        .from(shooter)
        .armour(profile.armour);
        if headshot {
            change = change.headshot();
        }
        if is_ultimate {
            change = change.ultimate();
        }
        if let Some(ability) = profile.ability {
            change = change.with_ability(ability);
        }

        self.update_hp(target, change)
    }

    /// Report one overlap between an area and a recipient collider
    pub fn apply_area_overlap(&mut self, area: AreaId, mut overlap: Overlap) -> AreaOutcome {
        let barrier_down = overlap
            .blocking_barrier
            .is_some_and(|id| !self.barriers.get(&id).is_some_and(|barrier| barrier.active));
        if barrier_down {
            overlap.in_line_of_sight = true;
            overlap.blocking_barrier = None;
        }

        let Some(recipient) = self.entities.get(&overlap.recipient).map(|entity| Recipient {
            id: entity.id,
            team: entity.team,
            dead: entity.dead,
            grounded: entity.grounded,
        }) else {
            return AreaOutcome::Rejected(RejectReason::UnknownRecipient);
        };

        let dt = self.last_dt;
        let Some(aoe) = self.areas.get_mut(&area) else {
            return AreaOutcome::Rejected(RejectReason::UnknownArea);
        };
        let outcome = aoe.process_overlap(&recipient, &overlap, dt);
        let owner = aoe.owner;

        match &outcome {
            AreaOutcome::Rejected(_) => {}
            AreaOutcome::BarrierHit { barrier, value } => {
                self.hit_barrier(*barrier, *value);
            }
            AreaOutcome::Applied {
                recipient,
                change,
                knockback,
            } => {
                if let Some(speed) = knockback {
                    self.events.push(GameEvent::Knockback {
                        area,
                        recipient: *recipient,
                        speed: *speed,
                    });
                }
                if let Some(change) = change {
                    self.update_hp(*recipient, change.clone());
                }
                self.events.push(GameEvent::AreaHit {
                    area,
                    owner,
                    recipient: *recipient,
                });
                self.on_area_hit(area, owner);
            }
        }
        outcome
    }

    /// Owner hook for an area hit: perk ammo refunds, once per area
    fn on_area_hit(&mut self, area: AreaId, owner: EntityId) {
        let refund = self.area_hit_refund(owner);
        if refund == 0 {
            return;
        }
        let first = self
            .areas
            .get_mut(&area)
            .is_some_and(|aoe| aoe.take_first_owner_hit());
        if !first {
            return;
        }
        if let Some(weapon) = self
            .entities
            .get_mut(&owner)
            .and_then(|entity| entity.weapon.as_mut())
        {
            weapon.refund(refund);
        }
    }
}
