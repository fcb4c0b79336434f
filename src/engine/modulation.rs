//! Temporal modulation: strobe (on/off gate) and pulse (smooth breathing),
//! optionally beat-locked and optionally alternating between the two
//! orientation groups.

use std::f64::consts::PI;

use crate::engine::beat;
use crate::engine::layout::RigLayout;
use crate::models::controls::{ControlsState, EffectApplication, StrobeOrPulse};
use crate::models::element::Orientation;

/// Strobe gates at up to 30 Hz across the rate slider.
const STROBE_MAX_HZ: f64 = 30.0;
/// Pulse breathes at up to 6 Hz across the rate slider.
const PULSE_MAX_HZ: f64 = 6.0;

/// The scalar modulation factor plus the completed-cycle count, which drives
/// the Alternate group flip.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Modulation {
    factor: f64,
    cycle: i64,
}

/// Hard on/off gate: lit for the first half of each cycle.
fn strobe_at(time: f64, frequency: f64) -> Modulation {
    if frequency <= 0.0 {
        return Modulation {
            factor: 1.0,
            cycle: 0,
        };
    }
    let factor = if (2.0 * PI * time * frequency).sin() > 0.0 {
        1.0
    } else {
        0.0
    };
    let (_, cycle) = beat::phase_and_cycle(time, 1.0 / frequency);
    Modulation { factor, cycle }
}

/// Smooth sine breathing in [0,1]. Beat-locked pulses are offset a quarter
/// cycle so each cycle starts dark on the beat and peaks mid-beat.
fn pulse_at(time: f64, frequency: f64, beat_locked: bool) -> Modulation {
    if frequency <= 0.0 {
        return Modulation {
            factor: 1.0,
            cycle: 0,
        };
    }
    let offset = if beat_locked { -PI / 2.0 } else { 0.0 };
    let factor = ((2.0 * PI * time * frequency + offset).sin() + 1.0) / 2.0;
    let (_, cycle) = beat::phase_and_cycle(time, 1.0 / frequency);
    Modulation { factor, cycle }
}

fn active_modulation(controls: &ControlsState, time: f64) -> Modulation {
    match controls.strobe_or_pulse {
        StrobeOrPulse::Strobe => {
            if beat::is_locked(controls.beat_sync_enabled, controls.bpm, controls.beat_strobe_rate)
            {
                let period = beat::locked_period(controls.bpm, controls.beat_strobe_rate);
                strobe_at(time, 1.0 / period)
            } else {
                let frequency = controls.strobe_pulse_rate as f64 / 100.0 * STROBE_MAX_HZ;
                strobe_at(time, frequency)
            }
        }
        StrobeOrPulse::Pulse => {
            if beat::is_locked(controls.beat_sync_enabled, controls.bpm, controls.beat_pulse_rate) {
                let period = beat::locked_period(controls.bpm, controls.beat_pulse_rate);
                pulse_at(time, 1.0 / period, true)
            } else {
                let frequency = controls.strobe_pulse_rate as f64 / 100.0 * PULSE_MAX_HZ;
                pulse_at(time, frequency, false)
            }
        }
    }
}

/// Per-element modulation factors in [0,1].
///
/// With `All` every element shares one factor. With `Alternate` the factor
/// applies to one orientation group per cycle while the other runs steady,
/// swapping groups each cycle.
pub(crate) fn modulation_factors(
    controls: &ControlsState,
    time: f64,
    layout: &RigLayout,
) -> Vec<f32> {
    let modulation = active_modulation(controls, time);
    let factor = modulation.factor as f32;

    match controls.effect_application {
        EffectApplication::All => vec![factor; layout.total()],
        EffectApplication::Alternate => {
            let modulated = if modulation.cycle % 2 == 0 {
                Orientation::Top
            } else {
                Orientation::Side
            };
            (0..layout.total())
                .map(|flat| {
                    if layout.orientation_of(flat) == modulated {
                        factor
                    } else {
                        1.0
                    }
                })
                .collect()
        }
    }
}
