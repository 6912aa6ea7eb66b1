//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Movement, growth, food placement and the high-score comparison all happen here;
//! persisting the high score is left to the caller.

pub mod clock;
pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use clock::TickClock;
pub use config::{Boundary, CollisionPolicy, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use food::FoodSpawner;
pub use state::{CollisionType, GameState, Position, Snake};
