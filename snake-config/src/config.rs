use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use snake_types::{ActionSpace, ObservationEncoding, Position};
use std::path::{Path, PathBuf};

const DEFAULT_EPISODE_CONFIG_REL_PATH: &str = "default.toml";

/// All knobs one episode needs, passed explicitly into every constructor.
/// Nothing in the core reads ambient or module-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
    pub spawn_x: i32,
    pub spawn_y: i32,
    /// Sentinel position the food starts from. When absent, the first
    /// placement is sampled like every later one.
    #[serde(default)]
    pub initial_food_x: Option<i32>,
    #[serde(default)]
    pub initial_food_y: Option<i32>,
    #[serde(default)]
    pub action_space: ActionSpace,
    #[serde(default)]
    pub observation_encoding: ObservationEncoding,
    #[serde(default = "default_fitness_floor")]
    pub fitness_floor: f32,
    /// Steps without food before the episode is cut off. Disabled when absent;
    /// the fitness floor usually fires first anyway.
    #[serde(default)]
    pub stagnation_limit: Option<u32>,
    #[serde(default = "default_max_placement_attempts")]
    pub max_placement_attempts: u32,
}

impl EpisodeConfig {
    pub fn spawn(&self) -> Position {
        Position::new(self.spawn_x, self.spawn_y)
    }

    pub fn initial_food(&self) -> Option<Position> {
        match (self.initial_food_x, self.initial_food_y) {
            (Some(x), Some(y)) => Some(Position::new(x, y)),
            _ => None,
        }
    }
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        default_episode_config()
    }
}

pub fn episode_config_from_toml_str(raw: &str) -> Result<EpisodeConfig, toml::de::Error> {
    toml::from_str(raw)
}

pub fn default_episode_config() -> EpisodeConfig {
    episode_config_from_toml_str(include_str!("../default.toml"))
        .expect("default episode config TOML must deserialize")
}

pub fn default_episode_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_EPISODE_CONFIG_REL_PATH)
}

pub fn load_default_episode_config() -> Result<EpisodeConfig> {
    load_episode_config_from_path(&default_episode_config_path())
}

pub fn load_episode_config_from_path(path: &Path) -> Result<EpisodeConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read episode config from {}", path.display()))?;
    episode_config_from_toml_str(&raw)
        .context("episode config TOML failed schema deserialization")
        .with_context(|| format!("failed to parse episode config from {}", path.display()))
}

pub fn validate_episode_config(config: &EpisodeConfig) -> Result<(), String> {
    if config.cell_size <= 0 {
        return Err("cell_size must be greater than zero".to_owned());
    }
    if config.width <= 0 || config.height <= 0 {
        return Err("arena dimensions must be greater than zero".to_owned());
    }
    if config.width % config.cell_size != 0 || config.height % config.cell_size != 0 {
        return Err("arena dimensions must be exact multiples of cell_size".to_owned());
    }
    if config.spawn_x % config.cell_size != 0 || config.spawn_y % config.cell_size != 0 {
        return Err("spawn position must be aligned to cell_size".to_owned());
    }
    if !(0..config.width).contains(&config.spawn_x) || !(0..config.height).contains(&config.spawn_y)
    {
        return Err("spawn position must lie inside the arena".to_owned());
    }
    if config.initial_food_x.is_some() != config.initial_food_y.is_some() {
        return Err("initial food position requires both coordinates".to_owned());
    }
    if let Some(food) = config.initial_food() {
        if food.x % config.cell_size != 0 || food.y % config.cell_size != 0 {
            return Err("initial food position must be aligned to cell_size".to_owned());
        }
        if !(0..config.width).contains(&food.x) || !(0..config.height).contains(&food.y) {
            return Err("initial food position must lie inside the arena".to_owned());
        }
        if food == config.spawn() {
            return Err("initial food position must differ from the spawn cell".to_owned());
        }
    }
    if !config.fitness_floor.is_finite() {
        return Err("fitness_floor must be finite".to_owned());
    }
    if config.stagnation_limit == Some(0) {
        return Err("stagnation_limit must be greater than zero when set".to_owned());
    }
    if config.max_placement_attempts == 0 {
        return Err("max_placement_attempts must be greater than zero".to_owned());
    }
    Ok(())
}

fn default_fitness_floor() -> f32 {
    -10.0
}

fn default_max_placement_attempts() -> u32 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses_and_validates() {
        let cfg = default_episode_config();
        assert_eq!(cfg.width, 600);
        assert_eq!(cfg.cell_size, 20);
        assert_eq!(cfg.initial_food(), Some(Position::new(500, 300)));
        assert_eq!(cfg.action_space, ActionSpace::Cardinal);
        validate_episode_config(&cfg).expect("default config should validate");
    }

    #[test]
    fn config_roundtrips_through_json() {
        let cfg = default_episode_config();
        let json = serde_json::to_string(&cfg).expect("serialize config");
        let parsed: EpisodeConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn omitted_optional_fields_fall_back_to_defaults() {
        let cfg = episode_config_from_toml_str(
            "width = 200\nheight = 100\ncell_size = 20\nspawn_x = 100\nspawn_y = 40\n",
        )
        .expect("minimal config should parse");
        assert_eq!(cfg.initial_food(), None);
        assert_eq!(cfg.action_space, ActionSpace::Cardinal);
        assert_eq!(cfg.observation_encoding, ObservationEncoding::Grid);
        assert!((cfg.fitness_floor - -10.0).abs() < f32::EPSILON);
        assert_eq!(cfg.stagnation_limit, None);
        assert_eq!(cfg.max_placement_attempts, 1000);
    }

    #[test]
    fn validation_rejects_unaligned_dimensions() {
        let mut cfg = default_episode_config();
        cfg.width = 610;
        let err = validate_episode_config(&cfg).expect_err("width not a multiple of cell_size");
        assert!(err.contains("multiples of cell_size"));
    }

    #[test]
    fn validation_rejects_misaligned_spawn() {
        let mut cfg = default_episode_config();
        cfg.spawn_x = 310;
        assert!(validate_episode_config(&cfg).is_err());
    }

    #[test]
    fn validation_rejects_out_of_bounds_food() {
        let mut cfg = default_episode_config();
        cfg.initial_food_x = Some(600);
        let err = validate_episode_config(&cfg).expect_err("food on the boundary is outside");
        assert!(err.contains("inside the arena"));
    }

    #[test]
    fn validation_rejects_food_on_spawn() {
        let mut cfg = default_episode_config();
        cfg.initial_food_x = Some(cfg.spawn_x);
        cfg.initial_food_y = Some(cfg.spawn_y);
        assert!(validate_episode_config(&cfg).is_err());
    }

    #[test]
    fn validation_rejects_zero_stagnation_limit() {
        let mut cfg = default_episode_config();
        cfg.stagnation_limit = Some(0);
        assert!(validate_episode_config(&cfg).is_err());
    }
}
