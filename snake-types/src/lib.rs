use serde::{Deserialize, Serialize};

/// A grid coordinate in pixel units, always aligned to the arena cell size.
/// Two positions are equal iff both coordinates match exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The unit direction the agent moves each step. Screen coordinates: `Up`
/// decreases `y`, `Down` increases it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Heading {
    Right,
    Left,
    Up,
    Down,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Right, Heading::Left, Heading::Up, Heading::Down];

    pub fn velocity(self) -> (i32, i32) {
        match self {
            Heading::Right => (1, 0),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
        }
    }
}

/// External decision input. `Coast` leaves the current heading untouched and
/// is only legal in the five-action space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Right,
    Left,
    Up,
    Down,
    Coast,
}

/// Size of the action space the decision engine binds to. The index mapping
/// is part of the external contract and must stay stable:
/// `0 → Right, 1 → Left, 2 → Up, 3 → Down, 4 → Coast`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActionSpace {
    #[default]
    Cardinal,
    CardinalCoast,
}

impl ActionSpace {
    pub fn len(self) -> usize {
        match self {
            ActionSpace::Cardinal => 4,
            ActionSpace::CardinalCoast => 5,
        }
    }

    pub fn is_empty(self) -> bool {
        false
    }

    pub fn action(self, index: usize) -> Option<Action> {
        if index >= self.len() {
            return None;
        }
        Some(match index {
            0 => Action::Right,
            1 => Action::Left,
            2 => Action::Up,
            3 => Action::Down,
            _ => Action::Coast,
        })
    }
}

/// Which observation layout the encoder emits. Consumers bind positionally,
/// so the variant fixes both arity and field order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationEncoding {
    /// 8 fields: head grid-x, head grid-y, food grid Δx, food grid Δy,
    /// free cells right, left, down, up.
    #[default]
    Grid,
    /// 10 fields: the same eight as ratios of the arena extent, plus the
    /// heading unit vector as movement indicators.
    DistanceRatio,
}

impl ObservationEncoding {
    pub fn len(self) -> usize {
        match self {
            ObservationEncoding::Grid => 8,
            ObservationEncoding::DistanceRatio => 10,
        }
    }

    pub fn is_empty(self) -> bool {
        false
    }
}

/// The fixed-shape numeric summary of world state handed to the decision
/// engine. Recomputed every step, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub encoding: ObservationEncoding,
    pub values: Vec<f32>,
}

impl Observation {
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Why a terminated episode ended. These are expected outcomes, not errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TerminationReason {
    SelfCollision,
    OutOfBounds,
    FitnessFloor,
    StagnationLimit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "reason")]
pub enum EpisodeStatus {
    Running,
    Terminated(TerminationReason),
}

impl EpisodeStatus {
    pub fn is_running(self) -> bool {
        matches!(self, EpisodeStatus::Running)
    }
}

/// The snake. `body` is the shift-register segment sequence, oldest segment
/// first, trimmed to at most `length` entries across steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub head: Position,
    pub body: Vec<Position>,
    pub heading: Heading,
    /// Food eaten so far; also the stable body length.
    pub length: u32,
    /// Steps since the last consumption. Drives the reward shaping.
    pub steps_since_last_food: u32,
    /// Heading changes requested by the decision engine. Diagnostic only.
    pub direction_changes: u32,
    pub fitness: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodState {
    pub position: Position,
}

/// Read-only view of one episode, sufficient for a renderer or a trace
/// consumer without granting mutation access.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeSnapshot {
    pub step: u64,
    pub seed: u64,
    pub status: EpisodeStatus,
    pub agent: AgentState,
    pub food: FoodState,
}

/// Per-step result returned to the caller driving the episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepReport {
    pub step: u64,
    pub status: EpisodeStatus,
    pub observation: Observation,
    pub length: u32,
    pub fitness: f32,
}
