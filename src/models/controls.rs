use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::EngineError;

/// Static visual pattern for the laser array. Exactly one is active at a
/// time; patterns are not composable.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
pub enum VisualPreset {
    Grid,
    Bracket,
    #[serde(rename = "L Bracket")]
    LBracket,
    #[serde(rename = "S Cross")]
    SCross,
    Cross,
    #[serde(rename = "L Cross")]
    LCross,
    #[serde(rename = "S Dbl Cross")]
    SDblCross,
    #[serde(rename = "Dbl Cross")]
    DblCross,
    #[serde(rename = "L Dbl Cross")]
    LDblCross,
    Cube,
    #[serde(rename = "4 Cubes")]
    FourCubes,
    #[serde(rename = "9 Cubes")]
    NineCubes,
}

/// Movement mode for the scroll effect.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
pub enum ScrollDirection {
    None,
    #[serde(rename = "L to R")]
    LeftToRight,
    #[serde(rename = "R to L")]
    RightToLeft,
    #[serde(rename = "T to B")]
    TopToBottom,
    #[serde(rename = "B to T")]
    BottomToTop,
    #[serde(rename = "To TL")]
    ToTopLeft,
    #[serde(rename = "To TR")]
    ToTopRight,
    #[serde(rename = "To BL")]
    ToBottomLeft,
    #[serde(rename = "To BR")]
    ToBottomRight,
    #[serde(rename = "Out from Center")]
    OutFromCenter,
    #[serde(rename = "Towards Center")]
    TowardsCenter,
    Pinwheel,
    Spot,
}

impl ScrollDirection {
    /// Directions with a continuously advancing wave. Spot holds a discrete
    /// random selection instead.
    pub fn is_continuous(self) -> bool {
        !matches!(self, ScrollDirection::None | ScrollDirection::Spot)
    }
}

/// Which temporal modulation is active. The inactive one is treated as rate
/// zero regardless of the shared rate slider.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
#[serde(rename_all = "lowercase")]
pub enum StrobeOrPulse {
    Strobe,
    Pulse,
}

/// Whether modulation hits every element or alternates between the top and
/// side groups cycle by cycle.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
pub enum EffectApplication {
    All,
    Alternate,
}

/// Beat-lock rate for a modulated quantity. `Off` means the manual slider
/// drives the quantity; anything else derives the period from the beat
/// interval: `period = beat_interval / multiplier`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
pub enum BeatRate {
    Off,
    #[serde(rename = "1/3")]
    OneThird,
    #[serde(rename = "1/2")]
    OneHalf,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
}

/// The complete snapshot of user-adjustable parameters. This plus a time
/// value is the only input to frame evaluation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
#[serde(rename_all = "camelCase")]
pub struct ControlsState {
    /// Master dimmer, 0-100.
    pub dimmer: u8,
    pub strobe_or_pulse: StrobeOrPulse,
    /// Rate slider shared by strobe and pulse, 0-100.
    pub strobe_pulse_rate: u8,
    pub effect_application: EffectApplication,
    pub visual_preset: VisualPreset,

    pub scroll_direction: ScrollDirection,
    /// Movement speed, 1-100. Also drives the Spot re-roll interval.
    pub laser_move_speed: u8,
    /// Band edge shape: 20 = hard/narrow, 90 = soft/wide.
    pub scroll_fade: u8,
    /// Band width in elements: 1, 2, 4 or 8.
    pub scroll_laser_count: u8,
    /// Second-wave offset as a percent of the period: 0 (off) or 35.
    pub scroll_phase: u8,
    /// Ping-pong the wave instead of wrapping.
    pub loop_effect: bool,
    /// Paint-and-hold: elements stay lit after the band passes.
    pub scroll_build_effect: bool,

    pub beat_sync_enabled: bool,
    /// Beats per minute, 1-300.
    pub bpm: u16,
    pub beat_strobe_rate: BeatRate,
    pub beat_pulse_rate: BeatRate,
    pub beat_move_rate: BeatRate,
}

impl Default for ControlsState {
    fn default() -> Self {
        Self {
            dimmer: 100,
            strobe_or_pulse: StrobeOrPulse::Pulse,
            strobe_pulse_rate: 0,
            effect_application: EffectApplication::All,
            visual_preset: VisualPreset::Grid,
            scroll_direction: ScrollDirection::None,
            laser_move_speed: 60,
            scroll_fade: 90,
            scroll_laser_count: 8,
            scroll_phase: 0,
            loop_effect: false,
            scroll_build_effect: false,
            beat_sync_enabled: false,
            bpm: 140,
            beat_strobe_rate: BeatRate::Off,
            beat_pulse_rate: BeatRate::Off,
            beat_move_rate: BeatRate::Off,
        }
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), EngineError> {
    if value < min || value > max {
        return Err(EngineError::InvalidControlValue {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_one_of(field: &'static str, value: u8, allowed: &'static [u8]) -> Result<(), EngineError> {
    if !allowed.contains(&value) {
        return Err(EngineError::InvalidControlChoice {
            field,
            value,
            allowed,
        });
    }
    Ok(())
}

impl ControlsState {
    /// Range-check every numeric field. Run this at the control-mutation
    /// boundary; `evaluate_frame` assumes pre-validated input.
    pub fn validate(&self) -> Result<(), EngineError> {
        check_range("dimmer", self.dimmer as i64, 0, 100)?;
        check_range("strobePulseRate", self.strobe_pulse_rate as i64, 0, 100)?;
        check_range("laserMoveSpeed", self.laser_move_speed as i64, 1, 100)?;
        check_range("bpm", self.bpm as i64, 1, 300)?;
        check_one_of("scrollFade", self.scroll_fade, &[20, 90])?;
        check_one_of("scrollPhase", self.scroll_phase, &[0, 35])?;
        check_one_of("scrollLaserCount", self.scroll_laser_count, &[1, 2, 4, 8])?;
        Ok(())
    }

    /// Toggle the build effect, applying its coupled side effects in one
    /// place. A build needs a directional, non-ping-pong, soft-fade scroll:
    /// enabling it while direction is None or Spot forces a default linear
    /// scroll, disables Loop, zeroes Phase and forces soft fade.
    pub fn set_build_effect(&mut self, enabled: bool) {
        if enabled {
            if !self.scroll_direction.is_continuous() {
                self.scroll_direction = ScrollDirection::LeftToRight;
            }
            self.loop_effect = false;
            self.scroll_phase = 0;
            self.scroll_fade = 90;
        }
        self.scroll_build_effect = enabled;
    }

    /// Apply one validated control delta. The snapshot is only mutated if
    /// the delta passes its range check, so a frame never sees a
    /// half-applied update.
    pub fn apply_update(&mut self, update: ControlUpdate) -> Result<(), EngineError> {
        match update {
            ControlUpdate::Dimmer(v) => {
                check_range("dimmer", v as i64, 0, 100)?;
                self.dimmer = v;
            }
            ControlUpdate::StrobeOrPulse(v) => self.strobe_or_pulse = v,
            ControlUpdate::StrobePulseRate(v) => {
                check_range("strobePulseRate", v as i64, 0, 100)?;
                self.strobe_pulse_rate = v;
            }
            ControlUpdate::EffectApplication(v) => self.effect_application = v,
            ControlUpdate::VisualPreset(v) => self.visual_preset = v,
            ControlUpdate::ScrollDirection(v) => self.scroll_direction = v,
            ControlUpdate::LaserMoveSpeed(v) => {
                check_range("laserMoveSpeed", v as i64, 1, 100)?;
                self.laser_move_speed = v;
            }
            ControlUpdate::ScrollFade(v) => {
                check_one_of("scrollFade", v, &[20, 90])?;
                self.scroll_fade = v;
            }
            ControlUpdate::ScrollLaserCount(v) => {
                check_one_of("scrollLaserCount", v, &[1, 2, 4, 8])?;
                self.scroll_laser_count = v;
            }
            ControlUpdate::ScrollPhase(v) => {
                check_one_of("scrollPhase", v, &[0, 35])?;
                self.scroll_phase = v;
            }
            ControlUpdate::LoopEffect(v) => self.loop_effect = v,
            ControlUpdate::ScrollBuildEffect(v) => self.set_build_effect(v),
            ControlUpdate::BeatSyncEnabled(v) => self.beat_sync_enabled = v,
            ControlUpdate::Bpm(v) => {
                check_range("bpm", v as i64, 1, 300)?;
                self.bpm = v;
            }
            ControlUpdate::BeatStrobeRate(v) => self.beat_strobe_rate = v,
            ControlUpdate::BeatPulseRate(v) => self.beat_pulse_rate = v,
            ControlUpdate::BeatMoveRate(v) => self.beat_move_rate = v,
        }
        Ok(())
    }
}

/// One changed control field, as delivered by the transport layer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, TS)]
#[ts(export, export_to = "../bindings/controls.ts")]
#[serde(tag = "control", content = "value", rename_all = "camelCase")]
pub enum ControlUpdate {
    Dimmer(u8),
    StrobeOrPulse(StrobeOrPulse),
    StrobePulseRate(u8),
    EffectApplication(EffectApplication),
    VisualPreset(VisualPreset),
    ScrollDirection(ScrollDirection),
    LaserMoveSpeed(u8),
    ScrollFade(u8),
    ScrollLaserCount(u8),
    ScrollPhase(u8),
    LoopEffect(bool),
    ScrollBuildEffect(bool),
    BeatSyncEnabled(bool),
    Bpm(u16),
    BeatStrobeRate(BeatRate),
    BeatPulseRate(BeatRate),
    BeatMoveRate(BeatRate),
}

impl ControlUpdate {
    /// Parse a delta from its wire form. Unknown controls and unknown enum
    /// values fail here, before any state is touched.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        serde_json::from_str(raw).map_err(|e| EngineError::UnknownEnumValue {
            detail: e.to_string(),
        })
    }
}
