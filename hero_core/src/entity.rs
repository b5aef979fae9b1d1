//! Entity - A hero in the world with its controller, loadout state and liveness

use crate::ability::AbilityState;
use crate::combat::SourceSnapshot;
use crate::config::Registry;
use crate::hero::Hero;
use crate::types::{BarrierId, Controller, EntityId, Team};
use crate::weapon::WeaponState;

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub team: Team,
    pub controller: Controller,
    pub hero: Hero,
    /// Ability states, ultimate last
    pub abilities: Vec<AbilityState>,
    pub weapon: Option<WeaponState>,
    pub dead: bool,
    pub respawn_time: f64,
    pub respawn_remaining: f64,
    pub grounded: bool,
    /// Barrier restored when this entity respawns
    pub barrier: Option<BarrierId>,
}

impl Entity {
    /// Build an entity whose loadout resolves against `registry`
    ///
    /// Ability and weapon ids missing from the registry are skipped.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        team: Team,
        controller: Controller,
        hero: Hero,
        registry: &Registry,
    ) -> Self {
        let abilities = hero
            .definition
            .ability_ids()
            .filter(|ability| registry.ability(ability).is_some())
            .map(AbilityState::new)
            .collect();
        let weapon = hero
            .definition
            .weapon
            .as_deref()
            .and_then(|weapon| registry.weapon(weapon))
            .map(WeaponState::new);

        Entity {
            id,
            name: name.into(),
            team,
            controller,
            hero,
            abilities,
            weapon,
            dead: false,
            respawn_time: registry.constants.timing.respawn_time,
            respawn_remaining: 0.0,
            grounded: true,
            barrier: None,
        }
    }

    pub fn is_player(&self) -> bool {
        self.controller == Controller::Player
    }

    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            id: self.id,
            role: self.hero.role(),
            controller: self.controller,
            damage_modifier: self.hero.modifiers.damage.compute(),
        }
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityState> {
        self.abilities.iter().find(|state| state.ability == id)
    }

    pub fn ability_mut(&mut self, id: &str) -> Option<&mut AbilityState> {
        self.abilities.iter_mut().find(|state| state.ability == id)
    }

    /// Mark dead and start the respawn countdown
    pub fn kill(&mut self) {
        self.dead = true;
        self.respawn_remaining = self.respawn_time;
    }

    /// Count down while dead. Returns true once the entity may respawn.
    pub fn advance_respawn(&mut self, dt: f64) -> bool {
        if !self.dead {
            return false;
        }
        self.respawn_remaining -= dt;
        self.respawn_remaining <= 0.0
    }

    /// Bring the entity back with full hit points
    pub fn respawn(&mut self) {
        self.dead = false;
        self.respawn_remaining = 0.0;
        self.hero.respawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_registry;

    fn soldier() -> Entity {
        let registry = default_registry();
        let hero = Hero::new(registry.hero("soldier").unwrap().clone());
        Entity::new(EntityId(1), "Soldier", Team(0), Controller::Player, hero, &registry)
    }

    #[test]
    fn test_loadout_from_registry() {
        let entity = soldier();
        assert!(entity.weapon.is_some());
        assert!(entity.ability("sprint").is_some());
        assert!(entity.ability("tactical_visor").is_some());
        assert_eq!(
            entity.abilities.last().map(|a| a.ability.as_str()),
            Some("tactical_visor")
        );
    }

    #[test]
    fn test_respawn_countdown() {
        let mut entity = soldier();
        entity.hero.hit_points.health = 0.0;
        entity.kill();

        assert!(!entity.advance_respawn(4.0));
        assert!(entity.advance_respawn(1.0));
        entity.respawn();
        assert!(!entity.dead);
        assert!(entity.hero.is_full());
    }

    #[test]
    fn test_snapshot_reads_damage_modifier() {
        let entity = soldier();
        let snapshot = entity.snapshot();
        assert_eq!(snapshot.id, EntityId(1));
        assert!(snapshot.controller == Controller::Player);
        assert!((snapshot.damage_modifier - 1.0).abs() < 1e-9);
    }
}
