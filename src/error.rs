use thiserror::Error;

/// Errors surfaced at the engine's input boundaries.
///
/// Frame evaluation itself never fails: controls are validated when they are
/// mutated, not when they are sampled, so a bad value is rejected before it
/// can reach `evaluate_frame`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A numeric control was outside its documented range.
    #[error("{field} must be {min}..={max}, got {value}")]
    InvalidControlValue {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A discrete control was set to a value outside its allowed set.
    #[error("{field} must be one of {allowed:?}, got {value}")]
    InvalidControlChoice {
        field: &'static str,
        value: u8,
        allowed: &'static [u8],
    },

    /// A control delta named a control or enum value this engine does not
    /// know. Fatal at input: silently defaulting would hide integration bugs
    /// between independently-evolving layers.
    #[error("unrecognized control delta: {detail}")]
    UnknownEnumValue { detail: String },

    /// A referenced fixture id is absent from the fixture map. Reported
    /// rather than skipped: a silently skipped fixture is a dark light on
    /// stage.
    #[error("fixture '{0}' not present in the fixture map")]
    MissingFixture(String),
}
