//! Deterministic frame evaluation for a laser-array lighting rig.
//!
//! The host (UI, transport, device output) feeds in a [`ControlsState`]
//! snapshot and a time value; [`EngineState::evaluate_frame`] returns one
//! brightness per element. Fixture channel maps are derived independently
//! via [`fixtures::derive_channels`].

pub mod engine;
pub mod error;
pub mod fixtures;
pub mod models;

pub use engine::{EngineState, RigLayout};
pub use error::EngineError;
pub use models::{ControlUpdate, ControlsState, ElementFrame, FrameStats};
