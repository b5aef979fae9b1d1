//! World - Owns every entity, barrier and area and runs the tick
//!
//! Each entity's records have a single writer: the world. Hits, pickups and
//! ability input go through `World` methods, which resolve against the
//! target and then apply follow-up effects (death, kill feed, progression)
//! to the entities involved one at a time.

mod actions;
mod hits;
mod tick;

pub use actions::Pickup;
pub use hits::WeaponHit;

use crate::aoe::AreaOfEffect;
use crate::barrier::Barrier;
use crate::combat::{HpChange, HpUpdate};
use crate::config::{GameConstants, HeroDefinition, Registry};
use crate::entity::Entity;
use crate::events::GameEvent;
use crate::hero::Hero;
use crate::killfeed::{KillContext, KillFeed, KillFeedEntry};
use crate::progression::{award_perk_progress, award_ultimate_charge};
use crate::types::{AreaId, BarrierId, Controller, EntityId, Team};
use std::collections::BTreeMap;
use tracing::debug;

/// Tick length assumed before the first `tick` call
pub const DEFAULT_TICK: f64 = 1.0 / 60.0;

#[derive(Debug, Clone)]
pub struct World {
    registry: Registry,
    entities: BTreeMap<EntityId, Entity>,
    barriers: BTreeMap<BarrierId, Barrier>,
    areas: BTreeMap<AreaId, AreaOfEffect>,
    kill_feed: KillFeed,
    events: Vec<GameEvent>,
    player_team: Team,
    clock: f64,
    last_dt: f64,
    next_entity: u32,
    next_barrier: u32,
    next_area: u32,
}

impl World {
    pub fn new(registry: Registry) -> Self {
        let kill_feed = KillFeed::new(registry.constants.timing.kill_feed_capacity);
        World {
            registry,
            entities: BTreeMap::new(),
            barriers: BTreeMap::new(),
            areas: BTreeMap::new(),
            kill_feed,
            events: Vec::new(),
            player_team: Team(0),
            clock: 0.0,
            last_dt: DEFAULT_TICK,
            next_entity: 1,
            next_barrier: 1,
            next_area: 1,
        }
    }

    /// Builder: team the kill feed treats as friendly
    pub fn with_player_team(mut self, team: Team) -> Self {
        self.player_team = team;
        self
    }

    // === Accessors ===

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn constants(&self) -> &GameConstants {
        &self.registry.constants
    }

    /// Simulated seconds since creation
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn barrier(&self, id: BarrierId) -> Option<&Barrier> {
        self.barriers.get(&id)
    }

    pub fn area(&self, id: AreaId) -> Option<&AreaOfEffect> {
        self.areas.get(&id)
    }

    pub fn areas(&self) -> impl Iterator<Item = &AreaOfEffect> {
        self.areas.values()
    }

    pub fn kill_feed(&self) -> &KillFeed {
        &self.kill_feed
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Spawning ===

    /// Spawn a hero from the registry. Returns `None` for an unknown hero id.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        hero: &str,
        team: Team,
        controller: Controller,
    ) -> Option<EntityId> {
        let definition = self.registry.hero(hero)?.clone();
        Some(self.spawn_hero(name, definition, team, controller))
    }

    /// Spawn a hero from an explicit definition
    pub fn spawn_hero(
        &mut self,
        name: impl Into<String>,
        definition: HeroDefinition,
        team: Team,
        controller: Controller,
    ) -> EntityId {
        let id = EntityId(self.next_entity);
        self.next_entity += 1;

        let entity = Entity::new(id, name, team, controller, Hero::new(definition), &self.registry);
        debug!(entity = %id, name = %entity.name, hero = %entity.hero.definition.id, "spawned");
        self.entities.insert(id, entity);
        id
    }

    /// Add a barrier; an owner restores it when respawning
    pub fn add_barrier(&mut self, max: f64, owner: Option<EntityId>) -> BarrierId {
        let id = BarrierId(self.next_barrier);
        self.next_barrier += 1;

        let mut barrier = Barrier::new(id, max);
        if let Some(entity) = owner.and_then(|owner| self.entities.get_mut(&owner)) {
            entity.barrier = Some(id);
            barrier = barrier.with_owner(entity.id);
        }
        self.barriers.insert(id, barrier);
        id
    }

    // === Resolution ===

    /// Resolve a change against `target` and apply its consequences
    ///
    /// Returns `None` if the target is unknown or dead.
    pub fn update_hp(&mut self, target: EntityId, change: HpChange) -> Option<HpUpdate> {
        let source = change
            .source
            .and_then(|id| self.entities.get(&id))
            .map(Entity::snapshot);

        let constants = &self.registry.constants;
        let entity = self.entities.get_mut(&target)?;
        if entity.dead {
            return None;
        }

        let update = entity
            .hero
            .update_hp(target, &change, source.as_ref(), constants);
        if update.died {
            entity.kill();
        }

        self.apply_consequences(&update);
        Some(update)
    }

    fn apply_consequences(&mut self, update: &HpUpdate) {
        if let Some(value) = update.hit_number {
            self.events.push(GameEvent::HitNumber {
                target: update.target,
                value,
            });
        }

        if let Some(blow) = &update.final_blow {
            debug!(
                victim = %blow.victim,
                by = %blow.by,
                ability = ?blow.ability,
                headshot = blow.headshot,
                "final blow"
            );
            self.events.push(GameEvent::Died {
                entity: blow.victim,
            });
            self.events.push(GameEvent::FinalBlow {
                by: blow.by,
                victim: blow.victim,
                ability: blow.ability.clone(),
                headshot: blow.headshot,
                ultimate: blow.ultimate,
            });
            self.record_kill(blow.by, blow.victim, blow.ability.as_deref(), blow.headshot, blow.ultimate);
            self.interrupt_abilities(blow.victim);
        }

        if let Some(earner) = update.progression_to {
            self.award_progression(earner, update.hit_value);
        }
    }

    fn record_kill(
        &mut self,
        killer: EntityId,
        victim: EntityId,
        ability: Option<&str>,
        headshot: bool,
        ultimate: bool,
    ) {
        let (Some(killer_entity), Some(victim_entity)) =
            (self.entities.get(&killer), self.entities.get(&victim))
        else {
            return;
        };

        self.kill_feed.push(KillFeedEntry {
            killer,
            killer_name: killer_entity.name.clone(),
            victim,
            victim_name: victim_entity.name.clone(),
            friendly: killer_entity.team == self.player_team,
            headshot,
            context: KillContext::new(ability, ultimate),
            time: self.clock,
        });
    }

    /// Award ultimate charge and perk progress for value delivered
    fn award_progression(&mut self, earner: EntityId, value: f64) {
        let Some(entity) = self.entities.get_mut(&earner) else {
            return;
        };

        if award_ultimate_charge(&mut entity.hero.ultimate, value) {
            debug!(entity = %earner, "ultimate ready");
            self.events.push(GameEvent::UltimateReady { entity: earner });
        }

        if let Some(level) = award_perk_progress(&mut entity.hero.perk, value) {
            debug!(entity = %earner, level, "perk tier reached");
            self.events.push(GameEvent::PerkAvailable {
                entity: earner,
                level,
            });
        }
    }

    // === Barriers ===

    /// Apply a hit to a barrier. Returns false if it is unknown or already down.
    pub fn hit_barrier(&mut self, id: BarrierId, value: f64) -> bool {
        let Some(barrier) = self.barriers.get_mut(&id) else {
            return false;
        };
        if !barrier.active {
            return false;
        }

        let destroyed = barrier.hit(value);
        self.events.push(GameEvent::BarrierHit { barrier: id, value });
        if destroyed {
            debug!(barrier = id.0, "barrier destroyed");
            self.events.push(GameEvent::BarrierDestroyed { barrier: id });
        }
        true
    }

    fn next_area_id(&mut self) -> AreaId {
        let id = AreaId(self.next_area);
        self.next_area += 1;
        id
    }
}
