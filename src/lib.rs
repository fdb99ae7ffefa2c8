//! grid_snake - terminal snake on a fixed 20x20 grid
//!
//! This library provides:
//! - Core game logic: motion, collisions, food placement, and the
//!   NotStarted/Running/Paused/GameOver state machine (game module)
//! - Phase-aware key mapping (input module)
//! - TUI rendering from read-only snapshots (render module)
//! - In-session counters (metrics module)
//! - The async terminal front end tying them together (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
