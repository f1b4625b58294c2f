//! Error types for icosphere LOD generation

use std::fmt;

/// Errors that can occur during planet setup or triangulation
#[derive(Debug, Clone)]
pub enum IcosphereError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Camera state is unusable (non-positive FOV or viewport width)
    InvalidCamera(String),
    /// A computation produced a non-finite or degenerate value
    DegenerateGeometry(String),
}

impl fmt::Display for IcosphereError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IcosphereError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            IcosphereError::InvalidCamera(msg) => write!(f, "invalid camera state: {}", msg),
            IcosphereError::DegenerateGeometry(msg) => write!(f, "degenerate geometry: {}", msg),
        }
    }
}

impl std::error::Error for IcosphereError {}

/// Result type alias for icosphere operations
pub type Result<T> = std::result::Result<T, IcosphereError>;
