//! Error types for the magnifier engine
//!
//! Every failure is reported synchronously at the call that caused it.
//! A spatial lookup that finds nothing is not an error; lookups return
//! `Option` and only index-based access reports `NotFound`.

/// Errors that can occur in magnifier operations
#[derive(Debug, Clone, PartialEq)]
pub enum MagnifierError {
    /// The fixed-capacity region table is full
    CapacityExceeded {
        /// The table's capacity
        capacity: usize,
    },

    /// No region exists at the requested slot
    NotFound,

    /// A magnification factor was zero, negative or not finite
    InvalidFactor {
        /// Requested horizontal factor
        x: f64,
        /// Requested vertical factor
        y: f64,
    },

    /// A viewport had a non-positive width or height
    InvalidViewport {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },

    /// `end_work` was called without a matching `begin_work`
    UnbalancedWorkMarker,

    /// Configuration failed validation or could not be parsed
    Config(String),

    /// JSON serialization or deserialization failed
    Serialization(String),
}

impl std::fmt::Display for MagnifierError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "region capacity exceeded (capacity: {})", capacity)
            }
            Self::NotFound => write!(f, "region not found"),
            Self::InvalidFactor { x, y } => {
                write!(f, "invalid magnification factor ({}, {})", x, y)
            }
            Self::InvalidViewport { width, height } => {
                write!(f, "invalid viewport size {}x{}", width, height)
            }
            Self::UnbalancedWorkMarker => write!(f, "end_work called without begin_work"),
            Self::Config(msg) => write!(f, "config error: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for MagnifierError {}

impl From<serde_json::Error> for MagnifierError {
    fn from(e: serde_json::Error) -> Self {
        MagnifierError::Serialization(e.to_string())
    }
}

/// Result type alias for magnifier operations
pub type MagnifierResult<T> = Result<T, MagnifierError>;
