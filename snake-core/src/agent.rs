use crate::arena::Arena;
use snake_types::{AgentState, FoodState, Heading, Position, TerminationReason};

pub(crate) fn spawn_agent(spawn: Position) -> AgentState {
    AgentState {
        head: spawn,
        body: Vec::new(),
        heading: Heading::Right,
        length: 0,
        steps_since_last_food: 0,
        direction_changes: 0,
        fitness: 0.0,
    }
}

/// Point the agent at `heading`. Returns whether the request differed from
/// the current heading; only such requests count as a direction change.
pub(crate) fn apply_heading(agent: &mut AgentState, heading: Heading) -> bool {
    let changed = agent.heading != heading;
    if changed {
        agent.direction_changes += 1;
    }
    agent.heading = heading;
    changed
}

/// Shift-register movement. Each segment takes its successor's pre-move
/// position, the pre-move head becomes the new trailing segment once the
/// agent has eaten, the body is trimmed from the front to `length`, and only
/// then does the head move. The shift-then-move ordering is what makes the
/// tail trail the head with a one-step lag; it must not be reordered.
pub(crate) fn advance(agent: &mut AgentState, cell_size: i32) {
    for i in 0..agent.body.len().saturating_sub(1) {
        agent.body[i] = agent.body[i + 1];
    }
    if agent.length >= 1 {
        agent.body.push(agent.head);
        if agent.body.len() > agent.length as usize {
            agent.body.remove(0);
        }
    }

    let (dx, dy) = agent.heading.velocity();
    agent.head.x += dx * cell_size;
    agent.head.y += dy * cell_size;
}

/// True iff the head sits on the food cell. Increments `length`; the caller
/// owns resetting `steps_since_last_food` and relocating the food.
pub(crate) fn eat(agent: &mut AgentState, food: &FoodState) -> bool {
    if agent.head == food.position {
        agent.length += 1;
        true
    } else {
        false
    }
}

/// Collision scan in source order: self-collision first (penalty -10), then
/// the x axis, then the y axis (penalty -1 each). The first satisfied
/// condition applies its penalty and short-circuits the rest.
pub(crate) fn check_collision(agent: &mut AgentState, arena: &Arena) -> Option<TerminationReason> {
    if agent.body.iter().any(|segment| *segment == agent.head) {
        agent.fitness -= 10.0;
        return Some(TerminationReason::SelfCollision);
    }
    if agent.head.x >= arena.width() || agent.head.x < 0 {
        agent.fitness -= 1.0;
        return Some(TerminationReason::OutOfBounds);
    }
    if agent.head.y >= arena.height() || agent.head.y < 0 {
        agent.fitness -= 1.0;
        return Some(TerminationReason::OutOfBounds);
    }
    None
}

/// Dense reward, fully determined by the current state: food count dominates,
/// a small bonus decays over the first hundred foodless steps, and every
/// foodless step costs a tenth of a point.
pub(crate) fn update_fitness(agent: &mut AgentState) {
    let steps = agent.steps_since_last_food as f32;
    let efficiency_bonus = (1.0 - steps / 100.0).max(0.0);
    agent.fitness = agent.length as f32 + efficiency_bonus - 0.1 * steps;
}
