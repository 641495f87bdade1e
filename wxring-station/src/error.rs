//! Station and sensor errors

use thiserror::Error;
use wxring_core::BufferError;

/// Result type for station setup and configuration
pub type StationResult<T> = Result<T, StationError>;

/// Errors raised while configuring or building a station
#[derive(Debug, Error)]
pub enum StationError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Buffer tree could not be built
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Malformed configuration or report JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reported by sensor collaborators
///
/// A failed read only costs the producer its current tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// Bus transaction failed
    #[error("Bus error: {0}")]
    Bus(String),

    /// Read did not complete in time
    #[error("Timeout")]
    Timeout,

    /// Sensor not present or not initialized
    #[error("Sensor unavailable")]
    Unavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_error_converts() {
        let err: StationError = BufferError::ZeroCapacity.into();
        assert!(matches!(err, StationError::Buffer(BufferError::ZeroCapacity)));
        assert_eq!(
            err.to_string(),
            "Buffer error: Buffer capacity must be greater than zero"
        );
    }

    #[test]
    fn sensor_error_messages() {
        assert_eq!(SensorError::Bus("nack".into()).to_string(), "Bus error: nack");
        assert_eq!(SensorError::Timeout.to_string(), "Timeout");
    }
}
