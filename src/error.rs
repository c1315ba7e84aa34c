//! Error types for quadsphere.

use thiserror::Error;

/// Result type for quadsphere operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or rendering the sphere.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of its accepted range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A point lies on the camera plane (`z + f == 0`) and cannot be projected.
    #[error("degenerate projection: point depth {depth} lies on the camera plane")]
    DegenerateGeometry { depth: f64 },

    /// The light cone radius `sqrt(a² - b²)` has a negative radicand.
    #[error("light cone underflow: a = {a}, b = {b}")]
    DomainUnderflow { a: f64, b: f64 },

    /// The configuration file could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),

    /// The configuration could not be serialized.
    #[error("config serialize error: {0}")]
    ConfigSerialize(#[from] ron::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing an exported frame failed.
    #[cfg(not(target_arch = "wasm32"))]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter { name, reason: reason.into() }
    }
}
