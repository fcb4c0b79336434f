pub mod controls;
pub mod element;

pub use controls::{
    BeatRate, ControlUpdate, ControlsState, EffectApplication, ScrollDirection, StrobeOrPulse,
    VisualPreset,
};
pub use element::{ElementFrame, FrameStats, Orientation};
