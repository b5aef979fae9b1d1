//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub damage_passive: DamagePassiveConstants,
    #[serde(default)]
    pub armour: ArmourConstants,
    #[serde(default)]
    pub regen: RegenConstants,
    #[serde(default)]
    pub ultimate: UltimateConstants,
    #[serde(default)]
    pub timing: TimingConstants,
}

/// Healing reduction applied to targets hit by Damage heroes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamagePassiveConstants {
    #[serde(default = "default_passive_reduction")]
    pub reduction: f64,
    #[serde(default = "default_passive_reduction_tanks")]
    pub reduction_tanks: f64,
    /// Seconds the debuff lasts after the most recent qualifying hit
    #[serde(default = "default_passive_duration")]
    pub duration: f64,
}

impl Default for DamagePassiveConstants {
    fn default() -> Self {
        DamagePassiveConstants {
            reduction: 0.3,
            reduction_tanks: 0.15,
            duration: 3.0,
        }
    }
}

fn default_passive_reduction() -> f64 {
    0.3
}
fn default_passive_reduction_tanks() -> f64 {
    0.15
}
fn default_passive_duration() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmourConstants {
    /// Fraction of beam damage removed by armour
    #[serde(default = "default_beam_on_armour")]
    pub beam_on_armour: f64,
    /// Fraction of damage-over-time removed by armour
    #[serde(default)]
    pub dot_on_armour: f64,
    /// Hits at or below this value are halved against armour
    #[serde(default = "default_small_hit_threshold")]
    pub small_hit_threshold: f64,
    /// Hits above the threshold lose this flat amount against armour
    #[serde(default = "default_flat_reduction")]
    pub flat_reduction: f64,
}

impl Default for ArmourConstants {
    fn default() -> Self {
        ArmourConstants {
            beam_on_armour: 0.3,
            dot_on_armour: 0.0,
            small_hit_threshold: 14.0,
            flat_reduction: 7.0,
        }
    }
}

fn default_beam_on_armour() -> f64 {
    0.3
}
fn default_small_hit_threshold() -> f64 {
    14.0
}
fn default_flat_reduction() -> f64 {
    7.0
}

/// Passive health and shield regeneration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenConstants {
    /// Flat part of the health regen rate, per second
    #[serde(default = "default_auto_regen_constant")]
    pub auto_regen_constant: f64,
    /// Part of the health regen rate proportional to max total HP
    #[serde(default = "default_auto_regen_percentage")]
    pub auto_regen_percentage: f64,
    #[serde(default = "default_shield_regen_constant")]
    pub shield_regen_constant: f64,
    /// Seconds without damage before health regen starts
    #[serde(default = "default_health_delay")]
    pub health_delay: f64,
    #[serde(default = "default_support_health_delay")]
    pub support_health_delay: f64,
    #[serde(default = "default_shield_delay")]
    pub shield_delay: f64,
}

impl Default for RegenConstants {
    fn default() -> Self {
        RegenConstants {
            auto_regen_constant: 10.0,
            auto_regen_percentage: 0.05,
            shield_regen_constant: 30.0,
            health_delay: 6.0,
            support_health_delay: 3.0,
            shield_delay: 3.0,
        }
    }
}

fn default_auto_regen_constant() -> f64 {
    10.0
}
fn default_auto_regen_percentage() -> f64 {
    0.05
}
fn default_shield_regen_constant() -> f64 {
    30.0
}
fn default_health_delay() -> f64 {
    6.0
}
fn default_support_health_delay() -> f64 {
    3.0
}
fn default_shield_delay() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateConstants {
    /// Charge granted every `passive_interval` seconds while alive
    #[serde(default = "default_passive_charge")]
    pub passive_charge: f64,
    #[serde(default = "default_passive_interval")]
    pub passive_interval: f64,
}

impl Default for UltimateConstants {
    fn default() -> Self {
        UltimateConstants {
            passive_charge: 5.0,
            passive_interval: 1.0,
        }
    }
}

fn default_passive_charge() -> f64 {
    5.0
}
fn default_passive_interval() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConstants {
    /// Seconds without healing before `is_healing` clears
    #[serde(default = "default_healing_received_timeout")]
    pub healing_received_timeout: f64,
    #[serde(default = "default_respawn_time")]
    pub respawn_time: f64,
    #[serde(default = "default_kill_feed_capacity")]
    pub kill_feed_capacity: usize,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            healing_received_timeout: 0.5,
            respawn_time: 5.0,
            kill_feed_capacity: 6,
        }
    }
}

fn default_healing_received_timeout() -> f64 {
    0.5
}
fn default_respawn_time() -> f64 {
    5.0
}
fn default_kill_feed_capacity() -> usize {
    6
}
