//! Style resolution errors.

use thiserror::Error;

/// A declared value that cannot be turned into a computed value.
///
/// Unknown properties and unrecognized keywords are not errors; they are
/// reported once through the warning system and ignored.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A structured shadow declaration did not match the expected shape.
    #[error("invalid `{property}` value: {source}")]
    InvalidShadow {
        /// The property being resolved.
        property: &'static str,
        /// The underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// A `transform` declaration used an unknown function or bad arguments.
    #[error("invalid transform: {value}")]
    InvalidTransform {
        /// The declared value, serialized.
        value: String,
    },
}
