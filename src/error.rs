//! Structured error types for flexlogic.
//!
//! Graph operations never return these: a stale label is reported as
//! [`Label::EMPTY`](crate::label::Label::EMPTY) or `false`. `FlexError` is
//! reserved for the construction and parsing edges of the crate
//! (gate-type registration, the builder DSL, label names, JSON export).

use thiserror::Error;

/// The top-level error type for flexlogic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlexError {
    // ── Labels ────────────────────────────────────────────

    /// A textual label name was not valid base-26.
    #[error("invalid label name {0:?}")]
    InvalidLabelName(String),

    // ── Gate types ────────────────────────────────────────

    /// A gate type was declared with an empty name.
    #[error("gate type name must not be empty")]
    EmptyGateName,

    /// A gate type was declared without any pinout slots.
    #[error("gate type {0:?} has an empty pinout")]
    EmptyPinout(String),

    /// Two gate types with the same name were registered.
    #[error("gate type {0:?} is already registered")]
    DuplicateGateType(String),

    /// A gate type was referenced by name but never registered.
    #[error("unknown gate type {0:?}")]
    UnknownGateType(String),

    // ── Builder ───────────────────────────────────────────

    /// A builder step referred to a gate or pinout slot that does not exist.
    #[error("gate #{gate} has no pinout slot {slot}")]
    UnknownPin { gate: usize, slot: usize },

    // ── Export ────────────────────────────────────────────

    /// JSON export failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, FlexError>`.
pub type FlexResult<T> = Result<T, FlexError>;
