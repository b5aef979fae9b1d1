//! Hero, weapon and ability definition records

use crate::delta::HealthDelta;
use crate::resource::{HitPointMaxima, PerkChoice};
use crate::types::{ArmourInteraction, FalloffRange, Role};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_headshot_multiplier() -> f64 {
    1.0
}

/// Static description of a hero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroDefinition {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub hit_points: HitPointMaxima,
    pub ultimate_cost: f64,
    /// Progress required for perk level 2 and level 3
    #[serde(default)]
    pub perk_thresholds: [f64; 2],
    /// The two options offered at level 2
    #[serde(default)]
    pub level_2_perks: Vec<PerkDefinition>,
    /// The two options offered at level 3
    #[serde(default)]
    pub level_3_perks: Vec<PerkDefinition>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub ultimate: Option<String>,
    #[serde(default = "default_true")]
    pub health_auto_regen: bool,
    #[serde(default = "default_true")]
    pub shield_auto_regen: bool,
    /// Spawn floating numbers when this hero is hit or healed
    #[serde(default)]
    pub show_hit_numbers: bool,
}

impl HeroDefinition {
    /// Minimal definition with only hit points, used by tests and tools
    pub fn new(id: impl Into<String>, role: Role, hit_points: HitPointMaxima) -> Self {
        let id = id.into();
        HeroDefinition {
            name: id.clone(),
            id,
            role,
            hit_points,
            ultimate_cost: 0.0,
            perk_thresholds: [0.0, 0.0],
            level_2_perks: Vec::new(),
            level_3_perks: Vec::new(),
            weapon: None,
            abilities: Vec::new(),
            ultimate: None,
            health_auto_regen: true,
            shield_auto_regen: true,
            show_hit_numbers: false,
        }
    }

    /// Builder: set the ultimate cost
    pub fn with_ultimate_cost(mut self, cost: f64) -> Self {
        self.ultimate_cost = cost;
        self
    }

    /// Builder: set the perk thresholds
    pub fn with_perk_thresholds(mut self, thresholds: [f64; 2]) -> Self {
        self.perk_thresholds = thresholds;
        self
    }

    /// Builder: disable both kinds of passive regeneration
    pub fn without_auto_regen(mut self) -> Self {
        self.health_auto_regen = false;
        self.shield_auto_regen = false;
        self
    }

    /// Perk offered at `level` (2 or 3) for `choice`
    pub fn perk(&self, level: u8, choice: PerkChoice) -> Option<&PerkDefinition> {
        let tier = match level {
            2 => &self.level_2_perks,
            3 => &self.level_3_perks,
            _ => return None,
        };
        let index = match choice {
            PerkChoice::First => 0,
            PerkChoice::Second => 1,
        };
        tier.get(index)
    }

    /// Every ability id this hero references, ultimate included
    pub fn ability_ids(&self) -> impl Iterator<Item = &str> {
        self.abilities
            .iter()
            .map(String::as_str)
            .chain(self.ultimate.as_deref())
    }
}

/// One perk option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerkDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Permanent modifier factors granted once chosen
    #[serde(default)]
    pub effects: AbilityEffects,
    /// Rounds returned to the magazine the first time each of the hero's
    /// areas hits something
    #[serde(default)]
    pub area_hit_ammo_refund: u32,
}

/// Modifier factors applied to the owner; `0.5` means "+50%"
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AbilityEffects {
    #[serde(default)]
    pub damage: f64,
    #[serde(default)]
    pub healing: f64,
    #[serde(default)]
    pub movement: f64,
}

impl AbilityEffects {
    pub fn is_empty(&self) -> bool {
        self.damage == 0.0 && self.healing == 0.0 && self.movement == 0.0
    }
}

/// Static description of a weapon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub damage: HealthDelta,
    #[serde(default)]
    pub healing: HealthDelta,
    /// Zero means no falloff; `damage.value_range.max` is used everywhere
    #[serde(default)]
    pub falloff: FalloffRange,
    #[serde(default = "default_headshot_multiplier")]
    pub headshot_multiplier: f64,
    /// Shots per second
    pub fire_rate: f64,
    pub magazine: u32,
    #[serde(default)]
    pub reload_time: f64,
    #[serde(default = "default_true")]
    pub can_reload: bool,
    #[serde(default)]
    pub armour_interaction: ArmourInteraction,
}

/// Static description of an ability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_ultimate: bool,
    #[serde(default)]
    pub cooldown: f64,
    #[serde(default)]
    pub cast_time: f64,
    #[serde(default)]
    pub duration: f64,
    /// Healing applied to the owner while active (`value_per_second`) or per hit
    #[serde(default)]
    pub healing: HealthDelta,
    /// Damage dealt per direct hit
    #[serde(default)]
    pub damage: HealthDelta,
    #[serde(default)]
    pub falloff: FalloffRange,
    #[serde(default = "default_headshot_multiplier")]
    pub headshot_multiplier: f64,
    #[serde(default)]
    pub armour_interaction: ArmourInteraction,
    /// Modifiers applied to the owner while the ability is active
    #[serde(default)]
    pub effects: AbilityEffects,
    #[serde(default)]
    pub area: Option<AreaEffectDefinition>,
}

impl AbilityDefinition {
    /// Minimal definition with timings only
    pub fn new(id: impl Into<String>, cooldown: f64, cast_time: f64, duration: f64) -> Self {
        let id = id.into();
        AbilityDefinition {
            name: id.clone(),
            id,
            is_ultimate: false,
            cooldown,
            cast_time,
            duration,
            healing: HealthDelta::default(),
            damage: HealthDelta::default(),
            falloff: FalloffRange::default(),
            headshot_multiplier: 1.0,
            armour_interaction: ArmourInteraction::default(),
            effects: AbilityEffects::default(),
            area: None,
        }
    }

    /// Builder: mark as an ultimate
    pub fn ultimate(mut self) -> Self {
        self.is_ultimate = true;
        self
    }

    /// Builder: attach an area effect
    pub fn with_area(mut self, area: AreaEffectDefinition) -> Self {
        self.area = Some(area);
        self
    }

    /// Builder: modifier effects while active
    pub fn with_effects(mut self, effects: AbilityEffects) -> Self {
        self.effects = effects;
        self
    }

    /// Builder: self-healing per second while active
    pub fn with_healing_per_second(mut self, value: f64) -> Self {
        self.healing = HealthDelta::per_second(value, false);
        self
    }
}

/// Area spawned by an ability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaEffectDefinition {
    pub delta: HealthDelta,
    /// Falloff range; `end` is the radius of the area
    pub radius: FalloffRange,
    /// Lifetime in seconds; zero makes a single pulse that affects each recipient once
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub los_required: bool,
    #[serde(default)]
    pub blocked_by_barrier: bool,
    /// Damage areas also hit their owner (for half damage)
    #[serde(default)]
    pub affect_self: bool,
    #[serde(default)]
    pub knockback_speed: f64,
    /// Only grounded recipients are affected
    #[serde(default)]
    pub grounded: bool,
    /// Overrides the owning ability's armour interaction for per-hit values
    #[serde(default)]
    pub armour_interaction: Option<ArmourInteraction>,
}

impl AreaEffectDefinition {
    pub fn new(delta: HealthDelta, radius: FalloffRange, duration: f64) -> Self {
        AreaEffectDefinition {
            delta,
            radius,
            duration,
            los_required: false,
            blocked_by_barrier: false,
            affect_self: false,
            knockback_speed: 0.0,
            grounded: false,
            armour_interaction: None,
        }
    }

    pub fn affects_once(&self) -> bool {
        self.duration == 0.0
    }
}
