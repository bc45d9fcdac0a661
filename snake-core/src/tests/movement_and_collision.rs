use super::support::*;
use super::*;
use crate::agent::{advance, apply_heading, check_collision, eat, update_fitness};

#[test]
fn zero_length_agent_keeps_empty_body_while_moving() {
    let cfg = test_config();
    let arena = Arena::from_config(&cfg);
    let mut agent = make_agent((300, 300), &[], Heading::Right, 0);

    for step in 1..=5 {
        advance(&mut agent, arena.cell_size());
        assert!(agent.body.is_empty());
        assert_eq!(agent.head, Position::new(300 + step * 20, 300));
    }
}

#[test]
fn body_stabilizes_at_exactly_length_segments() {
    let cfg = test_config();
    let arena = Arena::from_config(&cfg);
    let mut agent = make_agent((300, 300), &[], Heading::Right, 0);

    // One consumption event per advance: the segment count reaches `length`
    // one advance after each consumption and then holds there.
    for k in 1..=4u32 {
        agent.length = k;
        advance(&mut agent, arena.cell_size());
        assert_eq!(agent.body.len() as u32, k);
    }
    for _ in 0..6 {
        advance(&mut agent, arena.cell_size());
        assert_eq!(agent.body.len(), 4);
    }
}

#[test]
fn tail_trails_the_head_through_a_turn_with_one_step_lag() {
    let cfg = test_config();
    let arena = Arena::from_config(&cfg);
    let mut agent = make_agent((300, 300), &[], Heading::Right, 2);

    advance(&mut agent, arena.cell_size());
    advance(&mut agent, arena.cell_size());
    apply_heading(&mut agent, Heading::Down);
    advance(&mut agent, arena.cell_size());

    // The newest trailing segment is always the pre-move head.
    assert_eq!(agent.head, Position::new(340, 320));
    assert_eq!(
        agent.body,
        vec![Position::new(320, 300), Position::new(340, 300)],
    );
}

#[test]
fn self_collision_is_checked_before_boundary_collision() {
    let cfg = test_config();
    let arena = Arena::from_config(&cfg);
    // Head both outside the arena and on a body segment: the self-collision
    // penalty must be the one applied.
    let mut agent = make_agent((600, 300), &[(600, 300), (580, 300)], Heading::Right, 2);
    agent.fitness = 1.0;

    let reason = check_collision(&mut agent, &arena);
    assert_eq!(reason, Some(TerminationReason::SelfCollision));
    assert!((agent.fitness - -9.0).abs() < 1e-6);
}

#[test]
fn boundary_collision_applies_a_single_axis_penalty() {
    let cfg = test_config();
    let arena = Arena::from_config(&cfg);
    // Both axes out of range: the x check short-circuits the y check.
    let mut agent = make_agent((-20, -20), &[], Heading::Left, 0);
    agent.fitness = 0.5;

    let reason = check_collision(&mut agent, &arena);
    assert_eq!(reason, Some(TerminationReason::OutOfBounds));
    assert!((agent.fitness - -0.5).abs() < 1e-6);
}

#[test]
fn in_bounds_head_clear_of_body_is_alive() {
    let cfg = test_config();
    let arena = Arena::from_config(&cfg);
    let mut agent = make_agent((300, 300), &[(280, 300)], Heading::Right, 1);

    assert_eq!(check_collision(&mut agent, &arena), None);
    assert!((agent.fitness - 0.0).abs() < 1e-6);
}

#[test]
fn eat_requires_exact_cell_match() {
    let mut agent = make_agent((300, 300), &[], Heading::Right, 0);

    assert!(!eat(&mut agent, &make_food(320, 300)));
    assert_eq!(agent.length, 0);

    assert!(eat(&mut agent, &make_food(300, 300)));
    assert_eq!(agent.length, 1);
}

#[test]
fn apply_heading_counts_only_actual_changes() {
    let mut agent = make_agent((300, 300), &[], Heading::Right, 0);

    assert!(!apply_heading(&mut agent, Heading::Right));
    assert_eq!(agent.direction_changes, 0);

    assert!(apply_heading(&mut agent, Heading::Up));
    assert!(apply_heading(&mut agent, Heading::Left));
    assert!(!apply_heading(&mut agent, Heading::Left));
    assert_eq!(agent.direction_changes, 2);
}

#[test]
fn fitness_formula_matches_reference_points() {
    let mut agent = make_agent((300, 300), &[], Heading::Right, 0);

    agent.steps_since_last_food = 110;
    update_fitness(&mut agent);
    assert!((agent.fitness - -11.0).abs() < 1e-4);

    agent.length = 1;
    agent.steps_since_last_food = 0;
    update_fitness(&mut agent);
    assert!((agent.fitness - 2.0).abs() < 1e-6);

    agent.length = 0;
    agent.steps_since_last_food = 50;
    update_fitness(&mut agent);
    assert!((agent.fitness - -4.5).abs() < 1e-4);
}
