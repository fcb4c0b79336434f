//! The movement engine: a per-element brightness mask that sweeps a band of
//! light across the rig as a function of time. Everything here is pure given
//! the explicit engine state; the only persistence is the build accumulator
//! and the Spot selection.

use rand::seq::SliceRandom;

use crate::engine::beat;
use crate::engine::layout::RigLayout;
use crate::engine::EngineState;
use crate::models::controls::{ControlsState, ScrollDirection};
use crate::models::element::Orientation;

/// Compute the movement mask for this frame, [0,1] per element.
///
/// Detects direction/build changes via a state key and resets accumulation
/// itself, so hosts that forget to call `reset_movement` on a direction
/// change still get correct semantics.
pub(crate) fn movement_mask(
    controls: &ControlsState,
    time: f64,
    layout: &RigLayout,
    state: &mut EngineState,
) -> Vec<f32> {
    let total = layout.total();
    let direction = controls.scroll_direction;

    if direction == ScrollDirection::None {
        // Movement layer is a no-op; keep state cleared so a later
        // direction change starts fresh.
        state.reset_movement();
        return vec![1.0; total];
    }

    let key = format!("{:?}|build={}", direction, controls.scroll_build_effect);
    if state.direction_key.as_deref() != Some(key.as_str()) {
        state.reset_movement();
        state.direction_key = Some(key);
        log::debug!("[movement] accumulation reset for {:?}", direction);
    }

    let delta = state
        .last_time
        .map(|last| (time - last).max(0.0))
        .unwrap_or(0.0);
    state.last_time = Some(time);

    let mut mask = vec![0.0f32; total];
    match direction {
        ScrollDirection::Spot => return spot_mask(controls, delta, layout, state),
        ScrollDirection::Pinwheel => pinwheel_mask(&mut mask, controls, time, layout, state),
        ScrollDirection::LeftToRight
        | ScrollDirection::RightToLeft
        | ScrollDirection::TopToBottom
        | ScrollDirection::BottomToTop => {
            axis_mask(&mut mask, direction, controls, time, layout, state)
        }
        ScrollDirection::OutFromCenter | ScrollDirection::TowardsCenter => {
            center_mask(&mut mask, direction, controls, time, layout, state)
        }
        ScrollDirection::ToTopLeft
        | ScrollDirection::ToTopRight
        | ScrollDirection::ToBottomLeft
        | ScrollDirection::ToBottomRight => {
            diagonal_mask(&mut mask, direction, controls, time, layout, state)
        }
        ScrollDirection::None => unreachable!("handled above"),
    }

    if controls.scroll_build_effect {
        for (built, value) in state.built.iter_mut().zip(mask.iter_mut()) {
            *built = built.max(*value);
            *value = value.max(*built);
        }
    }

    mask
}

/// Band falloff: full brightness at the wave center, fading to zero at half
/// the band width. The fade control picks the exponent: soft (90) gives a
/// near-linear skirt, hard (20) a steep edge.
fn wave_brightness(dist: f64, band: f64, scroll_fade: u8) -> f64 {
    let half = band / 2.0;
    if half <= 0.0 || dist >= half {
        return 0.0;
    }
    let fade_factor = if scroll_fade == 90 { 1.0 } else { 0.1 };
    let normalized = dist / half;
    let falloff = normalized.powf(fade_factor * 2.0 + 1.0);
    1.0 - falloff
}

/// Wave progress within `period`, honoring beat-quantized speed and the
/// ping-pong loop. Progress is in period units (element distances), not
/// normalized.
fn progress(period: f64, time: f64, controls: &ControlsState) -> f64 {
    let mut t = time;
    if beat::is_locked(controls.beat_sync_enabled, controls.bpm, controls.beat_move_rate) {
        // Stepped movement: hold the wave at the start of the current beat
        // step, jump at the boundary.
        let step = beat::locked_period(controls.bpm, controls.beat_move_rate);
        t = beat::quantize_time(t, step);
    }

    let rate = controls.laser_move_speed as f64 / 3.0;
    if controls.loop_effect {
        let band = controls.scroll_laser_count as f64;
        let bounce = (period - band).max(period * 0.5);
        let full = bounce * 2.0;
        let phase = (t * rate) % full;
        if phase < bounce {
            phase
        } else {
            full - phase
        }
    } else {
        (t * rate) % period
    }
}

/// Track per-key wave progress so a non-looping build restarts each pass:
/// when the wave wraps (progress goes backwards) the accumulated paint is
/// cleared.
fn note_progress(state: &mut EngineState, key: &str, value: f64, controls: &ControlsState) {
    let prev = state.last_progress.get(key).copied().unwrap_or(0.0);
    if value < prev && controls.scroll_build_effect && !controls.loop_effect {
        state.built.iter_mut().for_each(|b| *b = 0.0);
    }
    state.last_progress.insert(key.to_string(), value);
}

/// Offset of the second wave when phase is enabled, in period units.
fn phase_progress(main: f64, period: f64, controls: &ControlsState) -> Option<f64> {
    if controls.scroll_phase == 0 {
        return None;
    }
    let offset = controls.scroll_phase as f64 / 100.0 * period;
    Some((main - offset + period) % period)
}

fn axis_mask(
    mask: &mut [f32],
    direction: ScrollDirection,
    controls: &ControlsState,
    time: f64,
    layout: &RigLayout,
    state: &mut EngineState,
) {
    let (count, reversed, orientation) = match direction {
        ScrollDirection::LeftToRight => (layout.top_count, false, Orientation::Top),
        ScrollDirection::RightToLeft => (layout.top_count, true, Orientation::Top),
        ScrollDirection::TopToBottom => (layout.side_count, false, Orientation::Side),
        ScrollDirection::BottomToTop => (layout.side_count, true, Orientation::Side),
        _ => return,
    };

    let band = controls.scroll_laser_count as f64;
    let period = count as f64 + band;
    let main = progress(period, time, controls);
    note_progress(state, &format!("{:?}", direction), main, controls);

    let wave = |p: f64, i: usize| {
        let pos = if reversed { count as f64 - p } else { p };
        wave_brightness((i as f64 - pos).abs(), band, controls.scroll_fade)
    };
    let second = phase_progress(main, period, controls);

    for i in 0..count {
        let mut value = wave(main, i);
        if let Some(p2) = second {
            value = value.max(wave(p2, i));
        }
        let flat = match orientation {
            Orientation::Top => i,
            Orientation::Side => layout.top_count + i,
        };
        mask[flat] = mask[flat].max(value as f32);
    }
    // The other arm stays dark: an axis scroll owns one orientation group.
}

fn center_mask(
    mask: &mut [f32],
    direction: ScrollDirection,
    controls: &ControlsState,
    time: f64,
    layout: &RigLayout,
    state: &mut EngineState,
) {
    let band = controls.scroll_laser_count as f64;
    let max_dist = ((layout.top_count as f64 - 1.0) / 2.0)
        .max((layout.side_count as f64 - 1.0) / 2.0)
        .ceil();
    let period = max_dist + band;
    let main = progress(period, time, controls);
    note_progress(state, &format!("{:?}", direction), main, controls);
    let second = phase_progress(main, period, controls);

    for flat in 0..layout.total() {
        let count = match layout.orientation_of(flat) {
            Orientation::Top => layout.top_count,
            Orientation::Side => layout.side_count,
        };
        let center = (count as f64 - 1.0) / 2.0;
        let dist_center = (layout.group_index(flat) as f64 - center).abs();

        let wave = |p: f64| {
            let wave_position = if direction == ScrollDirection::OutFromCenter {
                p
            } else {
                period - p
            };
            wave_brightness((dist_center - wave_position).abs(), band, controls.scroll_fade)
        };

        let mut value = wave(main);
        if let Some(p2) = second {
            value = value.max(wave(p2));
        }
        mask[flat] = value as f32;
    }
}

fn diagonal_mask(
    mask: &mut [f32],
    direction: ScrollDirection,
    controls: &ControlsState,
    time: f64,
    layout: &RigLayout,
    state: &mut EngineState,
) {
    let top_max = layout.top_count.saturating_sub(1);
    let side_max = layout.side_count.saturating_sub(1);
    let band = controls.scroll_laser_count as f64;
    // Top and side distances interleave (top even, side odd) so the wave
    // alternates arms as it runs the diagonal.
    let max_dist = ((layout.top_count.max(layout.side_count) - 1) * 2 + 1) as f64;
    let period = max_dist + band;
    let main = progress(period, time, controls);
    note_progress(state, &format!("{:?}", direction), main, controls);
    let second = phase_progress(main, period, controls);

    for flat in 0..layout.total() {
        let is_top = layout.orientation_of(flat) == Orientation::Top;
        let i = layout.group_index(flat);

        let dist = match direction {
            // Named for where the wave heads; the origin is the opposite
            // corner.
            ScrollDirection::ToBottomRight => {
                if is_top {
                    i * 2
                } else {
                    i * 2 + 1
                }
            }
            ScrollDirection::ToTopLeft => {
                if is_top {
                    (top_max - i) * 2
                } else {
                    (side_max - i) * 2 + 1
                }
            }
            ScrollDirection::ToTopRight => {
                if is_top {
                    i * 2 + 1
                } else {
                    (side_max - i) * 2
                }
            }
            ScrollDirection::ToBottomLeft => {
                if is_top {
                    (top_max - i) * 2
                } else {
                    i * 2 + 1
                }
            }
            _ => 0,
        } as f64;

        // Halve the distance to compensate for the interleave scaling.
        let wave = |p: f64| wave_brightness((dist - p).abs() / 2.0, band, controls.scroll_fade);

        let mut value = wave(main);
        if let Some(p2) = second {
            value = value.max(wave(p2));
        }
        mask[flat] = value as f32;
    }
}

fn pinwheel_mask(
    mask: &mut [f32],
    controls: &ControlsState,
    time: f64,
    layout: &RigLayout,
    state: &mut EngineState,
) {
    // Four arms radiating from the centers: top-center rightward,
    // side-center downward, top-center leftward, side-center upward.
    let tc = layout.top_count / 2;
    let sc = layout.side_count / 2;
    let mut path: Vec<usize> = Vec::with_capacity(layout.total());
    path.extend(tc..layout.top_count);
    path.extend(layout.top_count + sc..layout.top_count + layout.side_count);
    path.extend((0..tc).rev());
    path.extend((layout.top_count..layout.top_count + sc).rev());

    let band = controls.scroll_laser_count as f64;
    let period = path.len() as f64 + band;
    let main = progress(period, time, controls);
    note_progress(state, "Pinwheel", main, controls);

    let mut progresses = vec![main];
    if let Some(p2) = phase_progress(main, period, controls) {
        progresses.push(p2);
    }

    for p in progresses {
        for (pos, &flat) in path.iter().enumerate() {
            let value = wave_brightness((pos as f64 - p).abs(), band, controls.scroll_fade);
            mask[flat] = mask[flat].max(value as f32);
        }
    }
}

fn spot_mask(
    controls: &ControlsState,
    delta: f64,
    layout: &RigLayout,
    state: &mut EngineState,
) -> Vec<f32> {
    // Roll frequency grows with the speed slider; halved so the jumps stay
    // readable at high rates.
    let speed = controls.laser_move_speed.max(1) as f64;
    let frequency = (1.0 + 29.0 * (speed - 1.0) / 99.0) * 0.5;
    let interval = 1.0 / frequency;

    state.spot_accumulator += delta;
    let roll_due = state.spot_accumulator >= interval;
    if roll_due {
        while state.spot_accumulator >= interval {
            state.spot_accumulator -= interval;
        }
    }

    if roll_due || !state.spot_seeded {
        let mut indices: Vec<usize> = (0..layout.total()).collect();
        indices.shuffle(&mut state.rng);
        state.spot_active.iter_mut().for_each(|on| *on = false);
        for &idx in indices.iter().take(controls.scroll_laser_count as usize) {
            state.spot_active[idx] = true;
        }
        state.spot_seeded = true;
    }

    state
        .spot_active
        .iter()
        .map(|&on| if on { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::controls::ControlsState;

    fn scroll_controls(direction: ScrollDirection) -> ControlsState {
        ControlsState {
            scroll_direction: direction,
            scroll_laser_count: 4,
            ..ControlsState::default()
        }
    }

    #[test]
    fn wave_is_brightest_at_its_center() {
        let at_center = wave_brightness(0.0, 4.0, 90);
        let near_edge = wave_brightness(1.9, 4.0, 90);
        assert_eq!(at_center, 1.0);
        assert!(near_edge > 0.0 && near_edge < at_center);
        assert_eq!(wave_brightness(2.0, 4.0, 90), 0.0);
    }

    #[test]
    fn soft_fade_holds_brightness_longer_into_the_skirt() {
        // Soft (90) raises the falloff exponent, so mid-band values stay
        // high; hard (20) cliffs early. At dist 1.5 of band 4:
        // soft = 1 - 0.75^3 = 0.578, hard = 1 - 0.75^1.2 ~= 0.292.
        let soft = wave_brightness(1.5, 4.0, 90);
        let hard = wave_brightness(1.5, 4.0, 20);
        assert!(soft > hard, "soft={soft} hard={hard}");
    }

    #[test]
    fn axis_scroll_leaves_the_other_arm_dark() {
        let layout = RigLayout::default();
        let mut state = EngineState::with_seed(layout, 7);
        let controls = scroll_controls(ScrollDirection::LeftToRight);
        let mask = movement_mask(&controls, 0.2, &layout, &mut state);
        assert!(mask[layout.top_count..].iter().all(|&v| v == 0.0));
        assert!(mask[..layout.top_count].iter().any(|&v| v > 0.0));
    }

    #[test]
    fn loop_progress_reflects_instead_of_wrapping() {
        let controls = ControlsState {
            loop_effect: true,
            laser_move_speed: 30, // rate 10 units/s
            scroll_laser_count: 4,
            ..ControlsState::default()
        };
        // period 18, bounce 14, full 28. At t=2.0 phase=20 -> reflected to 8.
        let p = progress(18.0, 2.0, &controls);
        assert!((p - 8.0).abs() < 1e-9, "p={p}");
    }

    #[test]
    fn quantized_movement_steps_instead_of_flowing() {
        let controls = ControlsState {
            scroll_direction: ScrollDirection::LeftToRight,
            beat_sync_enabled: true,
            bpm: 120,
            beat_move_rate: crate::models::controls::BeatRate::One,
            ..ControlsState::default()
        };
        // Within one beat step the quantized progress is constant.
        let a = progress(18.0, 0.51, &controls);
        let b = progress(18.0, 0.99, &controls);
        let c = progress(18.0, 1.01, &controls);
        assert_eq!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn spot_holds_selection_between_rolls() {
        let layout = RigLayout::default();
        let mut state = EngineState::with_seed(layout, 42);
        let controls = scroll_controls(ScrollDirection::Spot);

        let first = movement_mask(&controls, 0.0, &layout, &mut state);
        assert_eq!(first.iter().filter(|&&v| v == 1.0).count(), 4);
        assert!(first.iter().all(|&v| v == 0.0 || v == 1.0));

        // Well inside the roll interval: identical selection.
        let second = movement_mask(&controls, 0.01, &layout, &mut state);
        assert_eq!(first, second);
    }

    #[test]
    fn spot_selection_is_reproducible_under_a_seed() {
        let layout = RigLayout::default();
        let controls = scroll_controls(ScrollDirection::Spot);
        let mut a = EngineState::with_seed(layout, 9);
        let mut b = EngineState::with_seed(layout, 9);
        for &t in &[0.0, 0.3, 0.6, 1.2] {
            assert_eq!(
                movement_mask(&controls, t, &layout, &mut a),
                movement_mask(&controls, t, &layout, &mut b),
                "diverged at t={t}"
            );
        }
    }

    #[test]
    fn pinwheel_covers_every_element_over_a_cycle() {
        let layout = RigLayout::default();
        let mut state = EngineState::with_seed(layout, 0);
        let controls = scroll_controls(ScrollDirection::Pinwheel);
        let mut ever_lit = vec![false; layout.total()];
        // Sample a full period densely.
        for step in 0..400 {
            let t = step as f64 * 0.01;
            let mask = movement_mask(&controls, t, &layout, &mut state);
            for (lit, &v) in ever_lit.iter_mut().zip(&mask) {
                *lit |= v > 0.0;
            }
        }
        assert!(
            ever_lit.iter().all(|&l| l),
            "unlit elements: {:?}",
            ever_lit
                .iter()
                .enumerate()
                .filter(|(_, &l)| !l)
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn phase_adds_a_second_band() {
        let layout = RigLayout::default();
        let controls_single = scroll_controls(ScrollDirection::LeftToRight);
        let controls_double = ControlsState {
            scroll_phase: 35,
            ..controls_single.clone()
        };
        let mut state_a = EngineState::with_seed(layout, 0);
        let mut state_b = EngineState::with_seed(layout, 0);
        let t = 0.4;
        let single = movement_mask(&controls_single, t, &layout, &mut state_a);
        let double = movement_mask(&controls_double, t, &layout, &mut state_b);
        let lit = |m: &[f32]| m.iter().filter(|&&v| v > 0.0).count();
        assert!(
            lit(&double) > lit(&single),
            "double={} single={}",
            lit(&double),
            lit(&single)
        );
        // Brighter-of-the-two, never additive: still bounded by 1.
        assert!(double.iter().all(|&v| v <= 1.0));
    }
}
