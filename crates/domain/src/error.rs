//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`LumenError`]
//! via `#[from]`. Adapters map vendor/transport failures into
//! [`DeviceError`]; the HTTP layer maps variants onto status codes.

use crate::light::Protocol;

/// Top-level error for all lumen operations.
#[derive(Debug, thiserror::Error)]
pub enum LumenError {
    /// A domain invariant was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The state store failed to read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A vendor device or its adapter failed.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("vendor unique id must not be empty")]
    EmptyUniqueId,

    #[error("schedule must contain at least one action")]
    NoActions,

    #[error("schedule must select at least one weekday")]
    NoDays,

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("group members must be distinct")]
    DuplicateMember,

    #[error("invalid identifier: {0}")]
    BadId(String),

    #[error("invalid time of day: {0}")]
    BadTime(String),
}

/// A lookup by id came up empty.
#[derive(Debug, thiserror::Error)]
#[error("{kind} {id} not found")]
pub struct NotFoundError {
    /// Record kind, e.g. `"Light"`.
    pub kind: &'static str,
    /// The id that failed to resolve.
    pub id: String,
}

/// State-store failure, decoupled from any concrete backend.
#[derive(Debug, thiserror::Error)]
#[error("storage {operation} failed: {message}")]
pub struct StorageError {
    /// The operation that failed, e.g. `"persist"`.
    pub operation: &'static str,
    /// Backend-specific detail.
    pub message: String,
}

/// Vendor device or protocol adapter failure.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// No adapter was registered for the light's protocol.
    #[error("no adapter registered for protocol {0}")]
    NoAdapter(Protocol),

    /// The device did not answer; the light gets marked unreachable.
    #[error("device unreachable: {0}")]
    Unreachable(String),

    /// The vendor API answered with an error.
    #[error("vendor api error: {0}")]
    Api(String),
}
