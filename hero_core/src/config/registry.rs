//! Registry - Every definition table, keyed by id

use super::{AbilityDefinition, ConfigError, GameConstants, HeroDefinition, WeaponDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HeroesConfig {
    heroes: Vec<HeroDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeaponsConfig {
    weapons: Vec<WeaponDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilitiesConfig {
    abilities: Vec<AbilityDefinition>,
}

/// Immutable definition data shared by the whole world
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub constants: GameConstants,
    pub heroes: HashMap<String, HeroDefinition>,
    pub weapons: HashMap<String, WeaponDefinition>,
    pub abilities: HashMap<String, AbilityDefinition>,
}

impl Registry {
    pub fn hero(&self, id: &str) -> Option<&HeroDefinition> {
        self.heroes.get(id)
    }

    pub fn weapon(&self, id: &str) -> Option<&WeaponDefinition> {
        self.weapons.get(id)
    }

    pub fn ability(&self, id: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(id)
    }

    /// Builder: replace the game constants
    pub fn with_constants(mut self, constants: GameConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Add or replace a hero definition
    pub fn insert_hero(&mut self, hero: HeroDefinition) {
        self.heroes.insert(hero.id.clone(), hero);
    }

    pub fn insert_weapon(&mut self, weapon: WeaponDefinition) {
        self.weapons.insert(weapon.id.clone(), weapon);
    }

    pub fn insert_ability(&mut self, ability: AbilityDefinition) {
        self.abilities.insert(ability.id.clone(), ability);
    }

    /// Check cross references and numeric sanity
    pub fn validate(&self) -> Result<(), ConfigError> {
        for hero in self.heroes.values() {
            validate_hero(hero)?;

            if let Some(weapon) = &hero.weapon {
                if !self.weapons.contains_key(weapon) {
                    return Err(ConfigError::ValidationError(format!(
                        "hero '{}' references unknown weapon '{}'",
                        hero.id, weapon
                    )));
                }
            }

            for ability in hero.ability_ids() {
                if !self.abilities.contains_key(ability) {
                    return Err(ConfigError::ValidationError(format!(
                        "hero '{}' references unknown ability '{}'",
                        hero.id, ability
                    )));
                }
            }

            if let Some(ultimate) = hero.ultimate.as_deref().and_then(|id| self.abilities.get(id)) {
                if !ultimate.is_ultimate {
                    return Err(ConfigError::ValidationError(format!(
                        "hero '{}' uses '{}' as its ultimate but it is not marked is_ultimate",
                        hero.id, ultimate.id
                    )));
                }
            }
        }

        for weapon in self.weapons.values() {
            if weapon.falloff.start > weapon.falloff.end {
                return Err(ConfigError::ValidationError(format!(
                    "weapon '{}' falloff start {} exceeds end {}",
                    weapon.id, weapon.falloff.start, weapon.falloff.end
                )));
            }
            if weapon.fire_rate <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "weapon '{}' fire rate must be positive",
                    weapon.id
                )));
            }
        }

        for ability in self.abilities.values() {
            if ability.falloff.start > ability.falloff.end {
                return Err(ConfigError::ValidationError(format!(
                    "ability '{}' falloff start {} exceeds end {}",
                    ability.id, ability.falloff.start, ability.falloff.end
                )));
            }
            if let Some(area) = &ability.area {
                if area.radius.start > area.radius.end {
                    return Err(ConfigError::ValidationError(format!(
                        "ability '{}' area radius start {} exceeds end {}",
                        ability.id, area.radius.start, area.radius.end
                    )));
                }
            }
            if ability.cooldown < 0.0 || ability.cast_time < 0.0 || ability.duration < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "ability '{}' has a negative timing",
                    ability.id
                )));
            }
        }

        Ok(())
    }
}

fn validate_hero(hero: &HeroDefinition) -> Result<(), ConfigError> {
    let hp = &hero.hit_points;
    if hp.health < 0.0 || hp.armour < 0.0 || hp.shields < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "hero '{}' has a negative hit point maximum",
            hero.id
        )));
    }
    if hp.total() <= 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "hero '{}' has no hit points",
            hero.id
        )));
    }
    if hero.perk_thresholds[0] >= hero.perk_thresholds[1] {
        return Err(ConfigError::ValidationError(format!(
            "hero '{}' perk thresholds must be strictly increasing",
            hero.id
        )));
    }
    for (level, perks) in [(2, &hero.level_2_perks), (3, &hero.level_3_perks)] {
        if !perks.is_empty() && perks.len() != 2 {
            return Err(ConfigError::ValidationError(format!(
                "hero '{}' must offer exactly two level {} perks",
                hero.id, level
            )));
        }
    }
    Ok(())
}

fn index_unique<T>(
    kind: &str,
    items: Vec<T>,
    id: impl Fn(&T) -> &str,
) -> Result<HashMap<String, T>, ConfigError> {
    let mut map = HashMap::new();
    for item in items {
        let key = id(&item).to_string();
        if map.contains_key(&key) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate {} id '{}'",
                kind, key
            )));
        }
        map.insert(key, item);
    }
    Ok(map)
}

/// Build a registry from TOML strings
pub fn parse_registry(
    heroes: &str,
    weapons: &str,
    abilities: &str,
    constants: Option<&str>,
) -> Result<Registry, ConfigError> {
    let heroes: HeroesConfig = super::parse_toml(heroes)?;
    let weapons: WeaponsConfig = super::parse_toml(weapons)?;
    let abilities: AbilitiesConfig = super::parse_toml(abilities)?;
    let constants: GameConstants = match constants {
        Some(content) => super::parse_toml(content)?,
        None => GameConstants::default(),
    };

    let registry = Registry {
        constants,
        heroes: index_unique("hero", heroes.heroes, |h| &h.id)?,
        weapons: index_unique("weapon", weapons.weapons, |w| &w.id)?,
        abilities: index_unique("ability", abilities.abilities, |a| &a.id)?,
    };
    registry.validate()?;
    Ok(registry)
}

/// Load a registry from a directory holding `heroes.toml`, `weapons.toml`,
/// `abilities.toml` and optionally `constants.toml`
pub fn load_registry(dir: &Path) -> Result<Registry, ConfigError> {
    let read = |name: &str| std::fs::read_to_string(dir.join(name));

    let heroes = read("heroes.toml")?;
    let weapons = read("weapons.toml")?;
    let abilities = read("abilities.toml")?;
    let constants_path = dir.join("constants.toml");
    let constants = if constants_path.exists() {
        Some(std::fs::read_to_string(constants_path)?)
    } else {
        None
    };

    parse_registry(&heroes, &weapons, &abilities, constants.as_deref())
}

/// Get the built-in definition set
pub fn default_registry() -> Registry {
    let heroes = include_str!("../../config/heroes.toml");
    let weapons = include_str!("../../config/weapons.toml");
    let abilities = include_str!("../../config/abilities.toml");
    parse_registry(heroes, weapons, abilities, None).unwrap_or_else(|e| {
        tracing::warn!("built-in definitions failed to load: {}", e);
        Registry::default()
    })
}
