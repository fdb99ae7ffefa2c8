use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Width and height of the (square) playing field, in cells.
/// The grid size is fixed; it is not a user-facing option.
pub const GRID_SIZE: usize = 20;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Milliseconds between simulation ticks while Running
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_snake_length: 3,
            food_reward: 10,
            tick_interval_ms: 150,
        }
    }
}

impl GameConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
