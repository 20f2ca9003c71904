//! Render errors.

use plume_style::StyleError;
use thiserror::Error;

/// A failure that stops rendering.
///
/// Missing shadow parameters and unsupported style values are not errors;
/// they are skipped (the latter with a warning).
#[derive(Debug, Error)]
pub enum RenderError {
    /// A component carrying state or lifecycle hooks was asked to render.
    /// Components must be pure functions of their props.
    #[error("component `{name}` is stateful; only pure, stateless components can be rendered")]
    StatefulComponent {
        /// The component's display name.
        name: String,
    },

    /// Style resolution failed.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// The font resolver could not provide a font.
    #[error("font resolution failed: {0}")]
    Font(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The input tree could not be decoded.
    #[error("invalid element: {0}")]
    InvalidElement(String),
}
