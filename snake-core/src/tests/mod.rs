pub(super) use super::*;
pub(super) use snake_config::{default_episode_config, EpisodeConfig};
pub(super) use snake_types::{
    ActionSpace, AgentState, EpisodeStatus, FoodState, Heading, ObservationEncoding, Position,
    StepReport, TerminationReason,
};

mod movement_and_collision;
mod support;
