//! Core game logic module for Snake
//!
//! Deterministic simulation with no I/O of its own. Sound cues go out through
//! the [`Audio`](crate::platform::Audio) capability passed to each update, and
//! drawing is left to the [`render`](crate::render) module.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{Game, INITIAL_SNAKE_LEN, StepInfo};
pub use state::{Cell, GameState, Grid, Position, Snake};
