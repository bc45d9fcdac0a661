use super::*;

pub(super) const RIGHT: usize = 0;
pub(super) const LEFT: usize = 1;
pub(super) const UP: usize = 2;
pub(super) const DOWN: usize = 3;
pub(super) const COAST: usize = 4;

/// The classic 600x600 arena with the sentinel food cell at (500, 300).
pub(super) fn test_config() -> EpisodeConfig {
    default_episode_config()
}

/// Same arena without the sentinel, so the first placement draws the RNG.
pub(super) fn open_config() -> EpisodeConfig {
    let mut cfg = default_episode_config();
    cfg.initial_food_x = None;
    cfg.initial_food_y = None;
    cfg
}

/// A cols x rows arena with 20px cells and a center spawn.
pub(super) fn tiny_config(cols: i32, rows: i32) -> EpisodeConfig {
    let mut cfg = default_episode_config();
    cfg.width = cols * 20;
    cfg.height = rows * 20;
    cfg.spawn_x = (cols / 2) * 20;
    cfg.spawn_y = (rows / 2) * 20;
    cfg.initial_food_x = None;
    cfg.initial_food_y = None;
    cfg
}

pub(super) fn make_agent(
    head: (i32, i32),
    body: &[(i32, i32)],
    heading: Heading,
    length: u32,
) -> AgentState {
    AgentState {
        head: Position::new(head.0, head.1),
        body: body.iter().map(|&(x, y)| Position::new(x, y)).collect(),
        heading,
        length,
        steps_since_last_food: 0,
        direction_changes: 0,
        fitness: 0.0,
    }
}

pub(super) fn make_food(x: i32, y: i32) -> FoodState {
    FoodState {
        position: Position::new(x, y),
    }
}

pub(super) fn episode(config: EpisodeConfig, seed: u64) -> Episode {
    Episode::new(config, seed).expect("episode should initialize")
}

pub(super) fn run_script(episode: &mut Episode, script: &[usize]) -> StepReport {
    let mut last = None;
    for &action in script {
        last = Some(episode.step(action).expect("scripted step should succeed"));
    }
    last.expect("script must contain at least one action")
}

/// A 2x2-cell closed loop starting and ending at the spawn cell. Keeps the
/// agent alive and away from the default food indefinitely.
pub(super) fn square_loop(cycles: usize) -> Vec<usize> {
    [RIGHT, DOWN, LEFT, UP].repeat(cycles)
}
