//! Fixed-step advance of every entity, ability, weapon and area

use super::World;
use crate::combat::HpChange;
use crate::events::GameEvent;
use crate::types::EntityId;
use tracing::debug;

impl World {
    /// Advance the simulation by `dt` seconds
    ///
    /// Per living entity, in order: damage passive decay, health
    /// regeneration, shield regeneration, healing flag timeout, passive
    /// ultimate charge, abilities, weapon. Dead entities only count down
    /// their respawn. Areas age last.
    pub fn tick(&mut self, dt: f64) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        self.last_dt = dt;
        self.clock += dt;

        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        for id in ids {
            if self.tick_respawn(id, dt) {
                continue;
            }
            self.tick_hero(id, dt);
            self.tick_abilities(id, dt);
            self.tick_weapon(id, dt);
        }

        self.tick_areas(dt);
    }

    /// Returns true if the entity was dead at the start of the tick
    fn tick_respawn(&mut self, id: EntityId, dt: f64) -> bool {
        let Some(entity) = self.entities.get_mut(&id) else {
            return true;
        };
        if !entity.dead {
            return false;
        }
        if !entity.advance_respawn(dt) {
            return true;
        }

        entity.respawn();
        if let Some(barrier) = entity.barrier.and_then(|b| self.barriers.get_mut(&b)) {
            barrier.restore();
        }
        debug!(entity = %id, "respawned");
        self.events.push(GameEvent::Respawned { entity: id });
        true
    }

    fn tick_hero(&mut self, id: EntityId, dt: f64) {
        let constants = &self.registry.constants;
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        let hero = &mut entity.hero;

        hero.advance_timers(dt);
        let regen = hero.health_regen_amount(dt, constants);
        if let Some(value) = regen {
            self.update_hp(id, HpChange::healing(value).from(id).auto_regen());
        }

        let constants = &self.registry.constants;
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        if entity.hero.regenerate_shields(dt, constants) {
            self.update_hp(id, HpChange::healing(0.0).from(id).auto_regen());
        }

        let constants = &self.registry.constants;
        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        entity.hero.expire_healing_flag(constants);
        if entity.hero.charge_ultimate_passively(dt, constants) {
            debug!(entity = %id, "ultimate ready");
            self.events.push(GameEvent::UltimateReady { entity: id });
        }
    }

    fn tick_abilities(&mut self, id: EntityId, dt: f64) {
        let busy: Vec<String> = match self.entities.get(&id) {
            Some(entity) => entity
                .abilities
                .iter()
                .filter(|state| !state.is_ready())
                .map(|state| state.ability.clone())
                .collect(),
            None => return,
        };

        for ability in busy {
            let Some(definition) = self.registry.ability(&ability).cloned() else {
                continue;
            };
            let Some(state) = self
                .entities
                .get_mut(&id)
                .and_then(|entity| entity.ability_mut(&ability))
            else {
                continue;
            };

            let transitions = state.advance(dt, &definition);
            let still_active = state.is_active();
            self.apply_transitions(id, &definition, &transitions);

            let rate = definition.healing.value_per_second;
            if still_active && rate > 0.0 {
                let change = HpChange::healing(rate * dt)
                    .from(id)
                    .with_ability(definition.id.clone());
                self.update_hp(id, change);
            }
        }
    }

    fn tick_weapon(&mut self, id: EntityId, dt: f64) {
        let reloaded = self
            .entities
            .get_mut(&id)
            .and_then(|entity| entity.weapon.as_mut())
            .is_some_and(|weapon| weapon.advance(dt));
        if reloaded {
            self.events.push(GameEvent::Reloaded { entity: id });
        }
    }

    fn tick_areas(&mut self, dt: f64) {
        let expired: Vec<_> = self
            .areas
            .iter_mut()
            .filter_map(|(id, area)| area.advance(dt).then_some(*id))
            .collect();

        for id in expired {
            self.areas.remove(&id);
            self.events.push(GameEvent::AreaExpired { area: id });
        }
    }
}
