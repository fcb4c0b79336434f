//! Derives raw DMX channel values from a fixture's semantic properties and
//! the master dimmer. Pure per fixture; re-run whenever either input changes
//! so stored channel maps never go stale.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::fixtures::models::{Fixture, FixtureKind};

/// Ordered channel-name/value pairs. Order is the fixture's channel order
/// starting at `start_dmx_address`.
pub type ChannelMap = Vec<(&'static str, u8)>;

pub const UNIVERSE_SIZE: usize = 512;

/// `brightness` (0-100) scaled by the master dimmer (0-100) onto a byte.
/// Rounds half up, then clamps; the clamp should never fire for in-range
/// inputs, so hitting it is logged.
fn scaled(brightness: u8, master_dimmer: u8) -> u8 {
    let value = (brightness as f64 * master_dimmer as f64 / 10_000.0 * 255.0).round();
    if !(0.0..=255.0).contains(&value) {
        log::warn!(
            "[dmx] scaled channel out of range ({value}) from brightness={brightness} master={master_dimmer}"
        );
    }
    value.clamp(0.0, 255.0) as u8
}

fn speed_channel(speed: u8) -> u8 {
    (speed as f64 / 100.0 * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Compute the channel map for one fixture.
pub fn derive_channels(fixture: &Fixture, master_dimmer: u8) -> ChannelMap {
    match &fixture.kind {
        FixtureKind::MovingHead {
            pan_move,
            tilt_move,
            speed,
        } => vec![
            ("PAN", *pan_move),
            ("TILT", *tilt_move),
            ("SPEED", speed_channel(*speed)),
            ("DIMMER", scaled(fixture.brightness, master_dimmer)),
        ],
        FixtureKind::SaberBeam => vec![
            ("RED", scaled(fixture.brightness, master_dimmer)),
            ("GREEN", 0),
            ("BLUE", 0),
        ],
        FixtureKind::Jolt { zones } => vec![
            ("ZONE1_RED", scaled(zones[0].red, master_dimmer)),
            ("ZONE1_WHITE", scaled(zones[0].white, master_dimmer)),
            ("ZONE2_RED", scaled(zones[1].red, master_dimmer)),
            ("ZONE2_WHITE", scaled(zones[1].white, master_dimmer)),
            ("ZONE3_RED", scaled(zones[2].red, master_dimmer)),
            ("ZONE3_WHITE", scaled(zones[2].white, master_dimmer)),
        ],
        FixtureKind::Shocker { zones } => {
            let gate = |on: bool| if on { 255 } else { 0 };
            vec![
                ("ZONE1", gate(zones.zone1)),
                ("ZONE2", gate(zones.zone2)),
                ("ZONE3", gate(zones.zone3)),
                ("ZONE4", gate(zones.zone4)),
                ("DIMMER", scaled(fixture.brightness, master_dimmer)),
            ]
        }
    }
}

/// Look a fixture up by id and derive its channels. A missing id is surfaced
/// as an error rather than skipped: a silently skipped fixture is a dark
/// light on stage.
pub fn derive_channels_for(
    fixtures: &HashMap<String, Fixture>,
    id: &str,
    master_dimmer: u8,
) -> Result<ChannelMap, EngineError> {
    let fixture = fixtures
        .get(id)
        .ok_or_else(|| EngineError::MissingFixture(id.to_string()))?;
    Ok(derive_channels(fixture, master_dimmer))
}

/// Flatten every fixture's channels into one 512-byte universe frame.
/// Addresses are 1-based; channels falling outside the universe are dropped
/// with a warning.
pub fn render_universe(fixtures: &HashMap<String, Fixture>, master_dimmer: u8) -> [u8; UNIVERSE_SIZE] {
    let mut universe = [0u8; UNIVERSE_SIZE];
    for fixture in fixtures.values() {
        let channels = derive_channels(fixture, master_dimmer);
        for (offset, (name, value)) in channels.into_iter().enumerate() {
            let address = fixture.start_dmx_address as usize + offset;
            if address == 0 || address > UNIVERSE_SIZE {
                log::warn!(
                    "[dmx] fixture {} channel {name} at address {address} outside universe",
                    fixture.id
                );
                continue;
            }
            universe[address - 1] = value;
        }
    }
    universe
}
