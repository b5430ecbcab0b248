//! Pilot-Oxide: Rust-based game input automation core
//!
//! This library mediates between an external decision-maker (an LLM agent) and a
//! live running game: it discovers interactable UI elements, translates game-space
//! positions into device input coordinates, and executes batches of input actions
//! against an abstract game driver.

pub mod error;
pub mod config;

pub mod driver;
pub mod input;
pub mod elements;
pub mod actions;
pub mod bridge;

// Re-exports
pub use error::{Error, Result};

/// Pilot-Oxide library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
