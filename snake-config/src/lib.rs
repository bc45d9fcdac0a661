mod config;

pub use config::{
    default_episode_config, default_episode_config_path, episode_config_from_toml_str,
    load_default_episode_config, load_episode_config_from_path, validate_episode_config,
    EpisodeConfig,
};
