use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_config::{validate_episode_config, EpisodeConfig};
use snake_types::{
    AgentState, EpisodeSnapshot, EpisodeStatus, FoodState, Observation, StepReport,
};
use thiserror::Error;

mod agent;
mod arena;
mod food;
mod sensors;
mod step;

#[cfg(test)]
mod tests;

pub use arena::Arena;

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("invalid episode config: {0}")]
    InvalidConfig(String),
    #[error("action index {index} out of range for action space of {limit}")]
    InvalidAction { index: usize, limit: usize },
    #[error("food placement found no free cell after {attempts} sampling attempts")]
    PlacementExhausted { attempts: u32 },
}

/// One simulated lifetime of a single agent, from spawn to termination.
///
/// The episode is fully synchronous and owns every piece of mutable state it
/// touches, including its RNG. Independent episodes share nothing, so callers
/// may evaluate any number of them concurrently as long as each gets its own
/// explicit seed.
#[derive(Debug, Clone)]
pub struct Episode {
    config: EpisodeConfig,
    arena: Arena,
    seed: u64,
    rng: ChaCha8Rng,
    step: u64,
    status: EpisodeStatus,
    agent: AgentState,
    food: FoodState,
}

impl Episode {
    pub fn new(config: EpisodeConfig, seed: u64) -> Result<Self, EpisodeError> {
        validate_episode_config(&config).map_err(EpisodeError::InvalidConfig)?;

        let arena = Arena::from_config(&config);
        let agent = agent::spawn_agent(config.spawn());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let food = FoodState {
            position: match config.initial_food() {
                Some(position) => position,
                None => food::place_food(&agent, &arena, &mut rng, config.max_placement_attempts)?,
            },
        };

        Ok(Self {
            config,
            arena,
            seed,
            rng,
            step: 0,
            status: EpisodeStatus::Running,
            agent,
            food,
        })
    }

    /// Restart from the spawn state. `None` reuses the current seed, making
    /// repeated runs of the same policy reproducible.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<(), EpisodeError> {
        self.seed = seed.unwrap_or(self.seed);
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.step = 0;
        self.status = EpisodeStatus::Running;
        self.agent = agent::spawn_agent(self.config.spawn());
        self.food.position = match self.config.initial_food() {
            Some(position) => position,
            None => food::place_food(
                &self.agent,
                &self.arena,
                &mut self.rng,
                self.config.max_placement_attempts,
            )?,
        };
        Ok(())
    }

    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn fitness(&self) -> f32 {
        self.agent.fitness
    }

    /// Food eaten so far; the externally visible score.
    pub fn score(&self) -> u32 {
        self.agent.length
    }

    pub fn observation(&self) -> Observation {
        sensors::encode(
            &self.agent,
            &self.food,
            &self.arena,
            self.config.observation_encoding,
        )
    }

    /// Read-only view for renderers, traces, and determinism checks.
    pub fn snapshot(&self) -> EpisodeSnapshot {
        EpisodeSnapshot {
            step: self.step,
            seed: self.seed,
            status: self.status,
            agent: self.agent.clone(),
            food: self.food,
        }
    }

    fn report(&self) -> StepReport {
        StepReport {
            step: self.step,
            status: self.status,
            observation: self.observation(),
            length: self.agent.length,
            fitness: self.agent.fitness,
        }
    }
}

/// Arg-max over raw decision-engine outputs; the lowest index wins ties.
///
/// The historical pipeline pushed the outputs through a softmax first, but
/// softmax is monotonic and cannot change which index is largest, so the raw
/// outputs are compared directly. Returns 0 for empty input.
pub fn select_action(raw: &[f32]) -> usize {
    let mut best = 0;
    for (index, value) in raw.iter().enumerate().skip(1) {
        if *value > raw[best] {
            best = index;
        }
    }
    best
}
