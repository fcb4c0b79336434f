use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::engine::layout::grid_percent;

/// Integer grid coordinates for a fixture, 0-14 per axis. Shares the
/// percentage coordinate space with the laser elements via
/// [`grid_percent`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/fixtures.ts")]
#[serde(rename_all = "camelCase")]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

impl GridPosition {
    /// Percent coordinates in the shared space, for hosts placing fixtures
    /// alongside the element arms. Not consumed by frame evaluation itself.
    pub fn percent(&self) -> (f32, f32) {
        (grid_percent(self.x), grid_percent(self.y))
    }
}

/// Per-zone color mix for a Jolt, 0-100 each.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/fixtures.ts")]
#[serde(rename_all = "camelCase")]
pub struct JoltZone {
    pub red: u8,
    pub white: u8,
}

/// The boolean zone switches of a Shocker.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, TS)]
#[ts(export, export_to = "../bindings/fixtures.ts")]
#[serde(rename_all = "camelCase")]
pub struct ShockerZones {
    pub zone1: bool,
    pub zone2: bool,
    pub zone3: bool,
    pub zone4: bool,
}

/// Type-specific fixture properties. Closed set: the DMX deriver matches
/// exhaustively, so adding a variant is a compile error until every consumer
/// handles it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/fixtures.ts")]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FixtureKind {
    #[serde(rename_all = "camelCase")]
    MovingHead {
        /// Pan position, raw 0-255 channel value.
        pan_move: u8,
        /// Tilt position, raw 0-255 channel value.
        tilt_move: u8,
        /// Movement speed, 0-100.
        speed: u8,
    },
    SaberBeam,
    #[serde(rename_all = "camelCase")]
    Jolt { zones: [JoltZone; 3] },
    #[serde(rename_all = "camelCase")]
    Shocker { zones: ShockerZones },
}

/// A non-laser lighting device patched into the rig.
///
/// `brightness` is the fixture's own semantic level, 0-100; the actual
/// channel values are always derived from it together with the master
/// dimmer, never edited directly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, TS)]
#[ts(export, export_to = "../bindings/fixtures.ts")]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: String,
    pub position: GridPosition,
    /// First DMX channel, 1-512.
    pub start_dmx_address: u16,
    /// Fixture-level master, 0-100.
    pub brightness: u8,
    #[serde(flatten)]
    pub kind: FixtureKind,
}
