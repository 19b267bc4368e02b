//! Error handling for cutsim
//!
//! Provides error types for the two fallible layers of the pipeline:
//! - Parse errors (G-code text to sampled path)
//! - Simulation errors (configuration/runtime state)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Recoverable parse issues (unsupported words, junk numbers) are logged
//! with `tracing::warn!` instead of surfacing here.

use thiserror::Error;

/// G-code parse error type
///
/// Represents fatal errors while converting G-code text into a sampled
/// toolpath. The caller must not use a partially parsed path.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Arc radius is too small to span the chord between start and end
    #[error("Degenerate arc at line {line}: 2*R ({radius}) is smaller than the chord length {chord}")]
    DegenerateArc {
        /// 1-based source line of the offending command.
        line: usize,
        /// The programmed radius.
        radius: f32,
        /// Distance between arc start and end.
        chord: f32,
    },

    /// Generic parse error
    #[error("Parse error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Simulation error type
///
/// Represents errors in simulation setup and runtime state changes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Configuration rejected before any frame was produced
    #[error("Invalid simulation configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Zoom factors must be strictly positive
    #[error("Invalid zoom factor: {value}")]
    InvalidZoom {
        /// The rejected zoom value.
        value: f32,
    },

    /// Generic simulation error
    #[error("Simulation error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for cutsim
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// G-code parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Simulation error
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Check if this is a simulation error
    pub fn is_sim_error(&self) -> bool {
        matches!(self, Error::Sim(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
