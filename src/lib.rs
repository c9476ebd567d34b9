//! City Simulation Library
//!
//! A procedurally generated city that can run headless or with a Bevy UI.

pub mod console;
pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
