//! Training range simulation: a scripted player against a tank bot behind a barrier

use hero_core::prelude::*;
use hero_core::{AreaId, BarrierId, ColliderId, ConfigError, KillFeedEntry};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

const PLAYER_COLLIDER: ColliderId = ColliderId(1);
const BOT_COLLIDER: ColliderId = ColliderId(2);

/// Knobs for the scripted player and bot
#[derive(Debug, Clone)]
pub struct RangeConfig {
    /// Simulated seconds
    pub duration: f64,
    /// Fixed tick length
    pub tick: f64,
    /// Chance a fired shot lands
    pub accuracy: f64,
    /// Chance a landed shot is a headshot
    pub headshot_rate: f64,
    /// Chance a landed shot is soaked by the barrier while it is up
    pub barrier_block_rate: f64,
    pub barrier_health: f64,
    /// Damage per second the bot returns while both are alive
    pub bot_damage_per_second: f64,
    /// Seconds between health packs
    pub health_pack_interval: f64,
    pub health_pack_value: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        RangeConfig {
            duration: 60.0,
            tick: 1.0 / 60.0,
            accuracy: 0.6,
            headshot_rate: 0.15,
            barrier_block_rate: 0.35,
            barrier_health: 600.0,
            bot_damage_per_second: 45.0,
            health_pack_interval: 10.0,
            health_pack_value: 75.0,
        }
    }
}

/// What happened on the range
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeReport {
    pub duration: f64,
    pub ticks: u64,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub headshots: u32,
    pub barrier_hits: u32,
    pub barriers_destroyed: u32,
    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub kills: u32,
    pub deaths: u32,
    pub abilities_used: u32,
    pub ultimates_used: u32,
    pub health_packs: u32,
    pub perks: Vec<String>,
    pub kill_feed: Vec<KillFeedEntry>,
    pub final_ultimate_percent: f64,
    pub final_perk_level: u8,
}

impl RangeReport {
    /// Damage dealt per second
    pub fn dps(&self) -> f64 {
        if self.duration > 0.0 {
            self.damage_dealt / self.duration
        } else {
            0.0
        }
    }

    /// Landed shots as a percentage of shots fired
    pub fn accuracy(&self) -> f64 {
        if self.shots_fired > 0 {
            self.shots_hit as f64 / self.shots_fired as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Training range: {:.1}s over {} ticks", self.duration, self.ticks),
            format!(
                "  Shots: {} fired, {} hit ({:.1}%), {} headshots, {} into the barrier",
                self.shots_fired,
                self.shots_hit,
                self.accuracy(),
                self.headshots,
                self.barrier_hits
            ),
            format!(
                "  Damage: {:.0} dealt ({:.1} dps), {:.0} taken",
                self.damage_dealt,
                self.dps(),
                self.damage_taken
            ),
            format!(
                "  Kills: {}  Deaths: {}  Barriers destroyed: {}",
                self.kills, self.deaths, self.barriers_destroyed
            ),
            format!(
                "  Abilities: {}  Ultimates: {}  Health packs: {}",
                self.abilities_used, self.ultimates_used, self.health_packs
            ),
            format!(
                "  Ultimate: {:.0}%  Perk level: {}",
                self.final_ultimate_percent * 100.0,
                self.final_perk_level
            ),
        ];

        if !self.perks.is_empty() {
            lines.push(format!("  Perks: {}", self.perks.join(", ")));
        }
        if !self.kill_feed.is_empty() {
            lines.push("  Kill feed:".to_string());
            lines.extend(self.kill_feed.iter().map(|entry| format!("    {}", entry.summary())));
        }
        lines.join("\n")
    }
}

/// A player hero and a tank bot with a barrier
pub struct TrainingRange {
    world: World,
    config: RangeConfig,
    player: EntityId,
    bot: EntityId,
    barrier: BarrierId,
    next_health_pack: f64,
    report: RangeReport,
}

impl TrainingRange {
    pub fn new(registry: Registry, config: RangeConfig) -> Result<Self, ConfigError> {
        if config.tick.is_nan() || config.tick <= 0.0 || config.duration < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "tick must be positive and duration non-negative (tick {}, duration {})",
                config.tick, config.duration
            )));
        }
        for (name, chance) in [
            ("accuracy", config.accuracy),
            ("headshot_rate", config.headshot_rate),
            ("barrier_block_rate", config.barrier_block_rate),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be within [0, 1], got {}",
                    name, chance
                )));
            }
        }

        let mut world = World::new(registry).with_player_team(Team(0));
        let player = world
            .spawn("Soldier", "soldier", Team(0), Controller::Player)
            .ok_or_else(|| ConfigError::ValidationError("hero 'soldier' is not defined".into()))?;
        let bot = world
            .spawn("Training Tank", "training_tank", Team(1), Controller::Bot)
            .ok_or_else(|| {
                ConfigError::ValidationError("hero 'training_tank' is not defined".into())
            })?;
        let barrier = world.add_barrier(config.barrier_health, Some(bot));

        Ok(TrainingRange {
            world,
            next_health_pack: config.health_pack_interval,
            config,
            player,
            bot,
            barrier,
            report: RangeReport::default(),
        })
    }

    /// Run for the configured duration, rounded to a whole number of ticks
    pub fn run(mut self, rng: &mut impl Rng) -> RangeReport {
        let steps = (self.config.duration / self.config.tick).round() as u64;
        info!(steps, tick = self.config.tick, "training range started");

        for _ in 0..steps {
            self.step(rng);
        }
        self.finish()
    }

    fn step(&mut self, rng: &mut impl Rng) {
        self.player_turn(rng);
        self.bot_turn();

        self.world.tick(self.config.tick);
        self.report.ticks += 1;
        self.process_events();
    }

    fn alive(&self, id: EntityId) -> bool {
        self.world.entity(id).is_some_and(|entity| !entity.dead)
    }

    fn player_turn(&mut self, rng: &mut impl Rng) {
        if !self.alive(self.player) {
            return;
        }

        let Some(hero) = self.world.entity(self.player).map(|entity| &entity.hero) else {
            return;
        };
        let perk_available = hero.perk.available;
        let ultimate_ready = hero.ultimate.ready;
        let hp_percent = hero.hp_percent();
        let full = hero.is_full();

        if perk_available {
            let choice = if rng.gen_bool(0.5) {
                PerkChoice::First
            } else {
                PerkChoice::Second
            };
            self.world.select_perk(self.player, choice);
        }

        if ultimate_ready && self.world.activate_ultimate(self.player) {
            info!(clock = self.world.clock(), "ultimate activated");
            self.report.ultimates_used += 1;
        }

        if hp_percent < 0.6 {
            for ability in ["stim_pack", "biotic_field"] {
                if self.world.use_ability(self.player, ability) {
                    self.report.abilities_used += 1;
                }
            }
        }

        if !full && self.world.clock() >= self.next_health_pack {
            let pack = Pickup::HealthPack {
                value: self.config.health_pack_value,
            };
            if self.world.apply_pickup(self.player, pack) {
                self.report.health_packs += 1;
                self.next_health_pack = self.world.clock() + self.config.health_pack_interval;
            }
        }

        let bot_alive = self.alive(self.bot);
        if bot_alive && rng.gen_bool(0.02) && self.world.use_ability(self.player, "helix_rockets") {
            self.report.abilities_used += 1;
            let direct = WeaponHit::at(rng.gen_range(5.0..25.0));
            if let Some(update) = self
                .world
                .apply_ability_hit(self.player, "helix_rockets", self.bot, direct)
            {
                self.report.damage_dealt += update.hit_value;
            }
        }

        self.resolve_player_areas(rng);

        if bot_alive {
            self.shoot(rng);
        }
    }

    fn shoot(&mut self, rng: &mut impl Rng) {
        if !self.world.fire_weapon(self.player) {
            return;
        }
        self.report.shots_fired += 1;

        if !rng.gen_bool(self.config.accuracy) {
            return;
        }
        self.report.shots_hit += 1;

        let mut hit = WeaponHit::at(rng.gen_range(5.0..45.0));
        if rng.gen_bool(self.config.headshot_rate) {
            hit = hit.headshot();
            self.report.headshots += 1;
        }

        let barrier_up = self
            .world
            .barrier(self.barrier)
            .is_some_and(|barrier| barrier.active);
        if barrier_up && rng.gen_bool(self.config.barrier_block_rate) {
            self.report.barrier_hits += 1;
            hit = hit.into_barrier(self.barrier);
        }

        if let Some(update) = self.world.apply_weapon_hit(self.player, self.bot, hit) {
            self.report.damage_dealt += update.hit_value;
        }
    }

    /// Report overlaps for every area the player owns
    fn resolve_player_areas(&mut self, rng: &mut impl Rng) {
        let areas: Vec<_> = self
            .world
            .areas()
            .filter(|area| area.owner == self.player)
            .map(|area| (area.id, area.definition.delta.is_damage))
            .collect();

        for (area, is_damage) in areas {
            if is_damage {
                let overlap = Overlap::new(self.bot, BOT_COLLIDER, rng.gen_range(0.0..3.0));
                self.apply_overlap(area, overlap);

                // Rockets occasionally splash the shooter
                if rng.gen_bool(0.1) {
                    let overlap = Overlap::new(self.player, PLAYER_COLLIDER, 2.5);
                    self.world.apply_area_overlap(area, overlap);
                }
            } else {
                let overlap = Overlap::new(self.player, PLAYER_COLLIDER, rng.gen_range(0.0..5.0));
                self.world.apply_area_overlap(area, overlap);
            }
        }
    }

    fn apply_overlap(&mut self, area: AreaId, overlap: Overlap) {
        let before = self.world.entity(overlap.recipient).map(|e| e.hero.total_hp());
        let outcome = self.world.apply_area_overlap(area, overlap);
        if let (AreaOutcome::Applied { .. }, Some(before)) = (&outcome, before) {
            if let Some(after) = self.world.entity(overlap.recipient).map(|e| e.hero.total_hp()) {
                self.report.damage_dealt += (before - after).max(0.0);
            }
        }
    }

    fn bot_turn(&mut self) {
        if !self.alive(self.bot) || !self.alive(self.player) {
            return;
        }
        let value = self.config.bot_damage_per_second * self.config.tick;
        if let Some(update) = self
            .world
            .update_hp(self.player, HpChange::damage(value).from(self.bot))
        {
            self.report.damage_taken += update.hit_value;
        }
    }

    fn process_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::Died { entity } if entity == self.bot => {
                    info!(clock = self.world.clock(), "bot eliminated");
                    self.report.kills += 1;
                }
                GameEvent::Died { entity } if entity == self.player => {
                    info!(clock = self.world.clock(), "player eliminated");
                    self.report.deaths += 1;
                }
                GameEvent::BarrierDestroyed { .. } => {
                    self.report.barriers_destroyed += 1;
                }
                GameEvent::PerkSelected {
                    perk: Some(perk), ..
                } => {
                    info!(perk = %perk, "perk selected");
                    self.report.perks.push(perk);
                }
                other => debug!(event = ?other, "event"),
            }
        }
    }

    fn finish(mut self) -> RangeReport {
        self.report.duration = self.world.clock();
        self.report.kill_feed = self.world.kill_feed().entries().cloned().collect();
        if let Some(player) = self.world.entity(self.player) {
            self.report.final_ultimate_percent = player.hero.ultimate.percent();
            self.report.final_perk_level = player.hero.perk.current_level;
        }
        self.report
    }
}
