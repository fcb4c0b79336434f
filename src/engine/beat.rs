//! The beat clock: converts BPM plus a `BeatRate` into the single phase all
//! beat-locked quantities derive from, so strobe, pulse and movement stepping
//! stay mutually in sync even at different rates.

use crate::models::controls::BeatRate;

/// Seconds per beat. Zero when the BPM is unusable.
pub fn beat_interval(bpm: u16) -> f64 {
    if bpm == 0 {
        0.0
    } else {
        60.0 / bpm as f64
    }
}

/// Cycles-per-beat multiplier for a rate. `Off` disables beat lock.
pub fn rate_multiplier(rate: BeatRate) -> f64 {
    match rate {
        BeatRate::Off => 0.0,
        BeatRate::OneThird => 1.0 / 3.0,
        BeatRate::OneHalf => 0.5,
        BeatRate::One => 1.0,
        BeatRate::Three => 3.0,
        BeatRate::Four => 4.0,
    }
}

/// Whether a quantity is beat-locked right now. When true the manual slider
/// for that quantity must not influence output at all.
pub fn is_locked(beat_sync_enabled: bool, bpm: u16, rate: BeatRate) -> bool {
    beat_sync_enabled && bpm > 0 && rate_multiplier(rate) > 0.0
}

/// Effective cycle period of a beat-locked quantity.
pub fn locked_period(bpm: u16, rate: BeatRate) -> f64 {
    let multiplier = rate_multiplier(rate);
    if multiplier <= 0.0 {
        return 0.0;
    }
    beat_interval(bpm) / multiplier
}

/// Sawtooth phase in [0,1) and completed-cycle count at `time` for a cycle of
/// `period` seconds.
pub fn phase_and_cycle(time: f64, period: f64) -> (f64, i64) {
    if period <= 0.0 {
        return (0.0, 0);
    }
    let phase = (time % period) / period;
    let cycle = (time / period).floor() as i64;
    (phase, cycle)
}

/// Floor `time` to the start of its current step. Stepped movement holds,
/// then jumps at each boundary, so the wave visibly steps in time with the
/// music rather than flowing.
pub fn quantize_time(time: f64, period: f64) -> f64 {
    if period <= 0.0 {
        return time;
    }
    (time / period).floor() * period
}
