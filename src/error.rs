//! Unified error types for Pilot-Oxide

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Pilot-Oxide
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Driver transport errors
    #[error("Driver error: {0}")]
    Driver(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Element extraction failed for a component type
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Key name not present in the key table
    #[error("Unknown key: '{key}'. Available keys: {}", .available.join(", "))]
    UnknownKey {
        /// The key name that failed to resolve
        key: String,
        /// Every valid key name, in table order
        available: Vec<String>,
    },

    /// Element not found in the current snapshot
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element found but not enabled
    #[error("Element not enabled: {0}")]
    ElementDisabled(String),

    /// Both property bindings failed
    #[error("Property set failed: {0}")]
    PropertySet(String),

    /// Device bounds are not available
    #[error("Device bounds unavailable")]
    BoundsUnavailable,

    /// Swipe phase failed
    #[error("Swipe execution failed: {0}")]
    SwipeExecution(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new driver error
    pub fn driver<S: Into<String>>(msg: S) -> Self {
        Error::Driver(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new extraction error
    pub fn extraction<S: Into<String>>(msg: S) -> Self {
        Error::Extraction(msg.into())
    }

    /// Create a new unknown key error listing every valid key name
    pub fn unknown_key<S: Into<String>>(key: S, available: Vec<String>) -> Self {
        Error::UnknownKey {
            key: key.into(),
            available,
        }
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(id: S) -> Self {
        Error::ElementNotFound(id.into())
    }

    /// Create a new element disabled error
    pub fn element_disabled<S: Into<String>>(name: S) -> Self {
        Error::ElementDisabled(name.into())
    }

    /// Create a new property set error
    pub fn property_set<S: Into<String>>(msg: S) -> Self {
        Error::PropertySet(msg.into())
    }

    /// Create a new swipe execution error
    pub fn swipe_execution<S: Into<String>>(msg: S) -> Self {
        Error::SwipeExecution(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }
}
