//! Handheld Snake - a portable Snake engine for small consoles
//!
//! This library provides:
//! - The platform capability contract devices implement (platform module)
//! - Deterministic game logic (game module)
//! - The presentation driver that turns state into draw calls (render module)
//! - Recording and terminal backends, plus play and demo modes

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod platform;
pub mod render;
pub mod runner;
