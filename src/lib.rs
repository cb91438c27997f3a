//! Terminal frontend for a grid-based snake simulation.
//!
//! The simulation is a black box to the rest of the crate: the [`world`]
//! module exposes a narrow handle (cells, reward, status, heading changes)
//! and everything else is presentation glue around it: keyboard input
//! staging the next heading, a fixed-rate tick loop, a full-repaint
//! painter and resize-driven view sizing.

pub mod config;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod view;
pub mod world;
