use crate::arena::Arena;
use snake_types::{AgentState, FoodState, Observation, ObservationEncoding, Position};

/// Derive the observation vector from current world state. Pure: identical
/// inputs produce bit-identical vectors.
///
/// `Grid` layout (8 fields): head grid-x, head grid-y, signed food grid Δx,
/// signed food grid Δy, free cells right, left, down, up.
///
/// `DistanceRatio` layout (10 fields): the same eight scaled to the arena
/// extent (positions, food deltas, and free counts divided by the column or
/// row count), followed by the heading unit vector as movement indicators.
/// Consumers bind to either layout positionally.
pub(crate) fn encode(
    agent: &AgentState,
    food: &FoodState,
    arena: &Arena,
    encoding: ObservationEncoding,
) -> Observation {
    let grid = grid_fields(agent, food, arena);
    let values = match encoding {
        ObservationEncoding::Grid => grid.to_vec(),
        ObservationEncoding::DistanceRatio => {
            let cols = arena.cols() as f32;
            let rows = arena.rows() as f32;
            let (vx, vy) = agent.heading.velocity();
            vec![
                grid[0] / cols,
                grid[1] / rows,
                grid[2] / cols,
                grid[3] / rows,
                grid[4] / cols,
                grid[5] / cols,
                grid[6] / rows,
                grid[7] / rows,
                vx as f32,
                vy as f32,
            ]
        }
    };
    debug_assert_eq!(values.len(), encoding.len());
    Observation { encoding, values }
}

fn grid_fields(agent: &AgentState, food: &FoodState, arena: &Arena) -> [f32; 8] {
    let cell = arena.cell_size();
    [
        agent.head.x.div_euclid(cell) as f32,
        agent.head.y.div_euclid(cell) as f32,
        (food.position.x - agent.head.x).div_euclid(cell) as f32,
        (food.position.y - agent.head.y).div_euclid(cell) as f32,
        free_cells_along(agent, arena, 1, 0) as f32,
        free_cells_along(agent, arena, -1, 0) as f32,
        free_cells_along(agent, arena, 0, 1) as f32,
        free_cells_along(agent, arena, 0, -1) as f32,
    ]
}

/// Walk outward from the head one cell at a time, counting free cells until
/// a body segment or the arena boundary stops the scan. The obstructing cell
/// itself is not counted.
fn free_cells_along(agent: &AgentState, arena: &Arena, dx: i32, dy: i32) -> i32 {
    let cell = arena.cell_size();
    let mut count = 0;
    let mut probe = Position::new(agent.head.x + dx * cell, agent.head.y + dy * cell);
    while arena.in_bounds(probe) {
        if agent.body.iter().any(|segment| *segment == probe) {
            break;
        }
        count += 1;
        probe.x += dx * cell;
        probe.y += dy * cell;
    }
    count
}
