//! Player and bot input: abilities, ultimates, perks, weapons and pickups

use super::World;
use crate::ability::PhaseTransition;
use crate::aoe::AreaOfEffect;
use crate::combat::HpChange;
use crate::config::AbilityDefinition;
use crate::events::GameEvent;
use crate::modifier::ModifierSource;
use crate::progression::{self, award_perk_progress, award_ultimate_charge, PerkSelection};
use crate::resource::PerkChoice;
use crate::types::{AreaId, EntityId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consumable lying in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pickup {
    /// Sourceless healing, consumed only below full HP
    HealthPack { value: f64 },
    /// Fills the ultimate and grants perk progress
    UltimateAccelerator,
}

impl World {
    // === Abilities ===

    /// Start a regular ability. Returns false if it is unknown, busy or an ultimate.
    pub fn use_ability(&mut self, id: EntityId, ability: &str) -> bool {
        let Some(definition) = self.registry.ability(ability).cloned() else {
            return false;
        };
        if definition.is_ultimate {
            return false;
        }
        self.start_ability(id, &definition)
    }

    /// Spend a ready ultimate and start its ability
    pub fn activate_ultimate(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };
        if entity.dead {
            return false;
        }
        let Some(definition) = entity
            .hero
            .definition
            .ultimate
            .as_deref()
            .and_then(|ultimate| self.registry.ability(ultimate))
            .cloned()
        else {
            return false;
        };

        let idle = entity.ability(&definition.id).is_some_and(|state| state.is_ready());
        if !idle || !entity.hero.ultimate.spend() {
            return false;
        }
        debug!(entity = %id, ultimate = %definition.id, "ultimate activated");
        self.start_ability(id, &definition)
    }

    fn start_ability(&mut self, id: EntityId, definition: &AbilityDefinition) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };
        if entity.dead {
            return false;
        }
        let Some(transitions) = entity
            .ability_mut(&definition.id)
            .and_then(|state| state.start(definition))
        else {
            return false;
        };

        self.apply_transitions(id, definition, &transitions);
        true
    }

    /// React to phase changes: effects, areas, ultimate end
    pub(super) fn apply_transitions(
        &mut self,
        id: EntityId,
        definition: &AbilityDefinition,
        transitions: &[PhaseTransition],
    ) {
        let source = ModifierSource::Ability(definition.id.clone());

        for transition in transitions {
            debug!(entity = %id, ability = %definition.id, phase = ?transition.to, "ability phase");
            self.events.push(GameEvent::AbilityPhaseChanged {
                entity: id,
                ability: definition.id.clone(),
                phase: transition.to,
            });

            if transition.finished_casting() && definition.area.is_some() {
                self.spawn_area(id, &definition.id);
            }

            let Some(entity) = self.entities.get_mut(&id) else {
                continue;
            };
            if transition.became_active() {
                entity.hero.apply_effects(source.clone(), &definition.effects);
            }
            if transition.left_active() {
                entity.hero.remove_effects(&source);
            }
            if transition.ended_use() && definition.is_ultimate {
                entity.hero.ultimate.end();
                self.events.push(GameEvent::UltimateEnded { entity: id });
            }
        }
    }

    /// Cut every casting or active ability short
    pub(super) fn interrupt_abilities(&mut self, id: EntityId) {
        let Some(entity) = self.entities.get(&id) else {
            return;
        };
        let busy: Vec<String> = entity
            .abilities
            .iter()
            .filter(|state| !state.is_ready())
            .map(|state| state.ability.clone())
            .collect();

        for ability in busy {
            let Some(definition) = self.registry.ability(&ability).cloned() else {
                continue;
            };
            let transitions = match self
                .entities
                .get_mut(&id)
                .and_then(|entity| entity.ability_mut(&ability))
            {
                Some(state) => state.interrupt(&definition),
                None => continue,
            };
            self.apply_transitions(id, &definition, &transitions);
        }
    }

    /// Spawn the area of `ability` owned by `owner`
    ///
    /// Called when casting completes, and by callers placing an area at a
    /// projectile's impact point.
    pub fn spawn_area(&mut self, owner: EntityId, ability: &str) -> Option<AreaId> {
        let team = self.entities.get(&owner)?.team;
        let definition = self
            .registry
            .ability(ability)
            .filter(|definition| definition.area.is_some())?
            .clone();

        let id = self.next_area_id();
        let area = AreaOfEffect::spawn(id, owner, team, &definition, definition.is_ultimate, self.last_dt)?;

        self.events.push(GameEvent::AreaSpawned {
            area: id,
            owner,
            ability: ability.to_string(),
        });
        self.areas.insert(id, area);
        Some(id)
    }

    // === Perks ===

    /// Choose a perk for the oldest unchosen tier and apply it
    pub fn select_perk(&mut self, id: EntityId, choice: PerkChoice) -> Option<PerkSelection> {
        let entity = self.entities.get_mut(&id)?;
        let selection = progression::select_perk(&mut entity.hero.perk, choice)?;

        let perk = entity.hero.definition.perk(selection.level, choice).cloned();
        if let Some(perk) = &perk {
            entity.hero.apply_perk(perk);
        }

        debug!(entity = %id, level = selection.level, perk = ?perk.as_ref().map(|p| &p.id), "perk selected");
        self.events.push(GameEvent::PerkSelected {
            entity: id,
            level: selection.level,
            perk: perk.map(|p| p.id),
        });
        if let Some(level) = selection.next_tier {
            self.events.push(GameEvent::PerkAvailable { entity: id, level });
        }
        Some(selection)
    }

    /// Ammo refunded to `owner` by its chosen perks for an area hit
    pub(super) fn area_hit_refund(&self, owner: EntityId) -> u32 {
        let Some(entity) = self.entities.get(&owner) else {
            return 0;
        };
        let hero = &entity.hero;
        (2..=hero.perk.current_level)
            .filter_map(|level| {
                let choice = hero.perk.choice_at(level)?;
                hero.definition.perk(level, choice)
            })
            .map(|perk| perk.area_hit_ammo_refund)
            .sum()
    }

    // === Weapons ===

    /// Fire the entity's weapon. Returns false if gated, empty or dead.
    pub fn fire_weapon(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };
        if entity.dead {
            return false;
        }
        let Some(weapon) = entity.weapon.as_mut() else {
            return false;
        };
        match self.registry.weapon(&weapon.weapon) {
            Some(definition) => weapon.fire(definition),
            None => false,
        }
    }

    pub fn reload_weapon(&mut self, id: EntityId) -> bool {
        let Some(weapon) = self
            .entities
            .get_mut(&id)
            .filter(|entity| !entity.dead)
            .and_then(|entity| entity.weapon.as_mut())
        else {
            return false;
        };
        match self.registry.weapon(&weapon.weapon) {
            Some(definition) => weapon.reload(definition),
            None => false,
        }
    }

    // === Pickups ===

    /// Consume a pickup. Returns false if it had no effect and stays in the world.
    pub fn apply_pickup(&mut self, id: EntityId, pickup: Pickup) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return false;
        };
        if entity.dead {
            return false;
        }

        match pickup {
            Pickup::HealthPack { value } => {
                if entity.hero.is_full() {
                    return false;
                }
                self.update_hp(id, HpChange::healing(value));
                true
            }
            Pickup::UltimateAccelerator => {
                let ultimate = &mut entity.hero.ultimate;
                if ultimate.ready || ultimate.active {
                    return false;
                }

                let cost = ultimate.cost;
                if award_ultimate_charge(ultimate, cost) {
                    self.events.push(GameEvent::UltimateReady { entity: id });
                }
                let perk = &mut entity.hero.perk;
                let progress = perk.thresholds[1];
                if let Some(level) = award_perk_progress(perk, progress) {
                    self.events.push(GameEvent::PerkAvailable { entity: id, level });
                }
                true
            }
        }
    }
}
