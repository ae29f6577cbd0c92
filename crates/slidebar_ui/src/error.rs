//! Error types for scrollbar attachment and resizing.

use thiserror::Error;

/// Errors that reject dimensions or configuration at the widget boundary.
///
/// None of these are fatal: a rejected `attach` simply creates no scrollbar and
/// a rejected resize leaves the previous geometry in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollbarError {
    /// A dimension is negative or not a finite number
    #[error("Invalid dimension {name}: {value}")]
    InvalidDimension {
        /// Which dimension was rejected
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Content height must be strictly positive
    #[error("Content height must be positive, got {value}")]
    NonPositiveContent {
        /// The rejected content height
        value: f32,
    },

    /// Content fits in the container, so no scrollbar is needed
    #[error("Content ({content}) fits in container ({container})")]
    ContentFits {
        /// Content height
        content: f32,
        /// Container height
        container: f32,
    },

    /// A configuration option is out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}
