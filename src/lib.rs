//! Snake Xenzia - classic Snake in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - High score persistence (storage module)
//! - Background music (audio module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive play loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
