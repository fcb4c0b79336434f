//! The frame evaluation engine.
//!
//! A frame is a pure function of the control snapshot and a time value,
//! composited from three stacked layers:
//!
//! 1. pattern: which elements the active preset lights at all
//! 2. movement: the scroll wave (or Spot selection) sweeping the rig
//! 3. modulation: strobe or pulse, optionally beat-locked
//!
//! Each layer yields a per-element weight in [0,1]; the composited product is
//! scaled by the master dimmer and rounded to a 0-255 brightness. The only
//! mutable state lives in [`EngineState`]: the build accumulator, wave
//! progress tracking and the Spot selection.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::models::controls::ControlsState;
use crate::models::element::ElementFrame;

pub mod beat;
pub mod layout;
pub mod modulation;
pub mod movement;
pub mod pattern;

#[cfg(test)]
mod tests;

pub use layout::RigLayout;

/// Mutable evaluation state carried between frames.
pub struct EngineState {
    pub layout: RigLayout,
    pub(crate) rng: StdRng,
    /// Paint-and-hold accumulator for the build effect, per flat index.
    pub(crate) built: Vec<f32>,
    /// Last observed wave progress per direction, for wrap detection.
    pub(crate) last_progress: HashMap<String, f64>,
    /// Current Spot selection, per flat index.
    pub(crate) spot_active: Vec<bool>,
    pub(crate) spot_seeded: bool,
    /// Elapsed time since the last Spot re-roll.
    pub(crate) spot_accumulator: f64,
    pub(crate) last_time: Option<f64>,
    /// Direction+build fingerprint of the last frame; a change resets
    /// movement state.
    pub(crate) direction_key: Option<String>,
}

impl EngineState {
    pub fn new(layout: RigLayout) -> Self {
        Self::with_rng(layout, StdRng::from_entropy())
    }

    /// Deterministic state for tests and replays: the Spot selection becomes
    /// reproducible.
    pub fn with_seed(layout: RigLayout, seed: u64) -> Self {
        Self::with_rng(layout, StdRng::seed_from_u64(seed))
    }

    fn with_rng(layout: RigLayout, rng: StdRng) -> Self {
        Self {
            layout,
            rng,
            built: vec![0.0; layout.total()],
            last_progress: HashMap::new(),
            spot_active: vec![false; layout.total()],
            spot_seeded: false,
            spot_accumulator: 0.0,
            last_time: None,
            direction_key: None,
        }
    }

    /// Clear all movement accumulation. Called internally on direction or
    /// build changes; hosts may also call it to force a fresh sweep.
    pub fn reset_movement(&mut self) {
        self.built.iter_mut().for_each(|b| *b = 0.0);
        self.last_progress.clear();
        self.spot_active.iter_mut().for_each(|on| *on = false);
        self.spot_seeded = false;
        self.spot_accumulator = 0.0;
        self.last_time = None;
        self.direction_key = None;
    }

    /// Evaluate one frame. `time` is seconds on the host's monotonic clock;
    /// evaluating the same time twice yields the same frame.
    pub fn evaluate_frame(&mut self, controls: &ControlsState, time: f64) -> Vec<ElementFrame> {
        let layout = self.layout;

        let dimmer = if controls.dimmer > 100 {
            log::warn!("[engine] dimmer {} out of range, clamping", controls.dimmer);
            100
        } else {
            controls.dimmer
        };
        let dimmer_scale = dimmer as f32 / 100.0;

        let pattern = pattern::pattern_mask(controls.visual_preset, &layout);
        let movement = movement::movement_mask(controls, time, &layout, self);
        let modulation = modulation::modulation_factors(controls, time, &layout);

        (0..layout.total())
            .map(|flat| {
                let weight = clamp_unit(pattern[flat])
                    * clamp_unit(movement[flat])
                    * clamp_unit(modulation[flat])
                    * dimmer_scale;
                ElementFrame {
                    id: layout.element_id(flat),
                    orientation: layout.orientation_of(flat),
                    index: layout.group_index(flat),
                    position: layout.element_percent(flat),
                    brightness: (weight * 255.0).round() as u8,
                }
            })
            .collect()
    }

    /// Brightness-only view of a frame, in flat index order.
    pub fn evaluate_brightness(&mut self, controls: &ControlsState, time: f64) -> Vec<u8> {
        self.evaluate_frame(controls, time)
            .into_iter()
            .map(|e| e.brightness)
            .collect()
    }
}

fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
