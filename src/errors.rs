//! Error types for ctxmeta.
//!
//! The error surface is deliberately tiny. Attaching metadata and decorating
//! field lists always succeed; absent metadata degrades to identity rather
//! than to a fault. The one recoverable error in the crate is a
//! caller-supplied value failing to serialize into a field payload, and that
//! is reported at construction time so a log-emission call can never fail.

use thiserror::Error;

/// Errors produced while constructing log fields.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The value handed to [`Field::object`](crate::Field::object) could not
    /// be serialized into a JSON payload.
    #[error("failed to serialize value for field `{name}`: {source}")]
    Serialize {
        /// Name of the field whose value was being serialized.
        name: String,
        /// The underlying serializer failure.
        #[source]
        source: serde_json::Error,
    },
}
