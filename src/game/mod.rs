//! Core game logic
//!
//! Everything here is synchronous and free of I/O: the motion engine,
//! collision rules, food placement, and the phase state machine. The
//! terminal layer drives it through [`GameSession`] and observes it
//! through [`Snapshot`].

pub mod action;
pub mod config;
pub mod engine;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{GameConfig, GRID_SIZE};
pub use engine::{Advance, Engine};
pub use session::{GameSession, Snapshot};
pub use state::{Collision, Phase, Position, Snake};
