use snake_config::EpisodeConfig;
use snake_types::Position;

/// Immutable arena geometry. Dimensions are exact multiples of `cell_size`,
/// guaranteed by config validation before construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Arena {
    pub fn from_config(config: &EpisodeConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            cell_size: config.cell_size,
        }
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }
}
