//! Error types and handling for `CoordLink`

use thiserror::Error;

/// Raised by the format converter when the input is structurally invalid.
///
/// The rendered message is meant to be shown to the end user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input did not split into exactly two comma-separated parts
    #[error("Invalid {expected_format} format: expected 'latitude,longitude', got \"{input}\"")]
    PartCount {
        expected_format: &'static str,
        input: String,
    },

    /// A DMS axis did not match `degrees°minutes'seconds"direction`
    #[error("Invalid DMS coordinate part: \"{axis}\"")]
    InvalidDmsAxis { axis: String },

    /// A decimal component is not a finite number
    #[error("Decimal coordinates contain non-numeric characters: \"{input}\"")]
    NonNumeric { input: String },
}

/// Main error type for the `CoordLink` crate
#[derive(Error, Debug)]
pub enum CoordLinkError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Page fetching errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// DD/DMS conversion errors
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl CoordLinkError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CoordLinkError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            CoordLinkError::Network { .. } => {
                "Could not read coordinates from the link. Please enter them manually.".to_string()
            }
            CoordLinkError::Validation { message } => format!("Invalid input: {message}"),
            CoordLinkError::Format(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = CoordLinkError::config("bad timeout");
        assert!(matches!(config_err, CoordLinkError::Config { .. }));

        let network_err = CoordLinkError::network("connection refused");
        assert!(matches!(network_err, CoordLinkError::Network { .. }));

        let validation_err = CoordLinkError::validation("invalid coordinates");
        assert!(matches!(validation_err, CoordLinkError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = CoordLinkError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let network_err = CoordLinkError::network("test");
        assert!(network_err.user_message().contains("enter them manually"));

        let validation_err = CoordLinkError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_format_error_is_shown_verbatim() {
        let err: CoordLinkError = FormatError::InvalidDmsAxis {
            axis: "40°N".to_string(),
        }
        .into();
        assert_eq!(err.user_message(), "Invalid DMS coordinate part: \"40°N\"");
        assert_eq!(err.to_string(), err.user_message());
    }
}
