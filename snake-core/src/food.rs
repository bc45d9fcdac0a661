use crate::arena::Arena;
use crate::EpisodeError;
use rand::Rng;
use snake_types::{AgentState, Position};

/// Rejection-sample a food cell excluded from the agent's head and body.
///
/// Columns and rows are drawn from the *inclusive* ranges `[0, cols]` and
/// `[0, rows]`: a draw equal to the upper bound lands one cell outside the
/// arena and is rejected like any occupied candidate. Callers that need the
/// historical placement stream must keep that out-of-range draw possible.
///
/// After `max_attempts` rejections the sampler falls back to enumerating the
/// free cells and picking one uniformly, so a nearly full arena still places
/// deterministically; only a fully occupied arena fails.
pub(crate) fn place_food(
    agent: &AgentState,
    arena: &Arena,
    rng: &mut impl Rng,
    max_attempts: u32,
) -> Result<Position, EpisodeError> {
    let cols = arena.cols();
    let rows = arena.rows();

    for _ in 0..max_attempts {
        let candidate = Position::new(
            rng.random_range(0..=cols) * arena.cell_size(),
            rng.random_range(0..=rows) * arena.cell_size(),
        );
        if is_free(candidate, agent, arena) {
            return Ok(candidate);
        }
    }

    let free = free_cells(agent, arena);
    if free.is_empty() {
        return Err(EpisodeError::PlacementExhausted {
            attempts: max_attempts,
        });
    }
    Ok(free[rng.random_range(0..free.len())])
}

fn is_free(candidate: Position, agent: &AgentState, arena: &Arena) -> bool {
    arena.in_bounds(candidate)
        && candidate != agent.head
        && !agent.body.iter().any(|segment| *segment == candidate)
}

/// Row-major scan of every cell the agent does not occupy.
fn free_cells(agent: &AgentState, arena: &Arena) -> Vec<Position> {
    let cell = arena.cell_size();
    let mut cells = Vec::new();
    for row in 0..arena.rows() {
        for col in 0..arena.cols() {
            let candidate = Position::new(col * cell, row * cell);
            if is_free(candidate, agent, arena) {
                cells.push(candidate);
            }
        }
    }
    cells
}
