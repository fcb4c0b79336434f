pub mod dmx;
pub mod models;

pub use dmx::{derive_channels, derive_channels_for, render_universe, ChannelMap};
pub use models::{Fixture, FixtureKind, GridPosition, JoltZone, ShockerZones};
