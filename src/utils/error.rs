use thiserror::Error;

#[derive(Error, Debug)]
pub enum DopcError {
    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Venue lookup failed for '{venue_slug}': {reason}")]
    VenueLookupError { venue_slug: String, reason: String },

    #[error("Delivery not possible: distance of {distance} m exceeds maximum deliverable range")]
    DeliveryImpossibleError { distance: i64 },

    #[error("Unexpected error: {message}")]
    UnexpectedError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    ConfigError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The four outcomes a caller has to tell apart when a quote fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    VenueLookup,
    DeliveryImpossible,
    Unexpected,
}

impl ErrorKind {
    /// Error name shared with the web client.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALUE_ERROR",
            ErrorKind::VenueLookup => "URL_ERROR",
            ErrorKind::DeliveryImpossible => "DISTANCE_ERROR",
            ErrorKind::Unexpected => "SERVER_ERROR",
        }
    }
}

impl DopcError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DopcError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn venue_lookup(venue_slug: impl Into<String>, reason: impl Into<String>) -> Self {
        DopcError::VenueLookupError {
            venue_slug: venue_slug.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DopcError::ValidationError { .. } => ErrorKind::Validation,
            DopcError::VenueLookupError { .. } => ErrorKind::VenueLookup,
            DopcError::DeliveryImpossibleError { .. } => ErrorKind::DeliveryImpossible,
            DopcError::UnexpectedError { .. }
            | DopcError::ConfigError { .. }
            | DopcError::IoError(_)
            | DopcError::HttpClientError(_)
            | DopcError::SerializationError(_) => ErrorKind::Unexpected,
        }
    }

    /// Message safe to show to an end user. Internal failures are not echoed back.
    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::DeliveryImpossible => self.to_string(),
            ErrorKind::VenueLookup => match self {
                DopcError::VenueLookupError { venue_slug, .. } => {
                    format!("Venue '{}' not found", venue_slug)
                }
                _ => "Venue not found".to_string(),
            },
            ErrorKind::Unexpected => match self {
                DopcError::ConfigError { .. } => self.to_string(),
                _ => "An unexpected error occurred".to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DopcError>;
