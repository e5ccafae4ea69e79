//! Unified error handling
//!
//! Structured error types carrying a context with an id, the originating component and
//! recovery suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};

pub type MusicverseResult<T> = Result<T, MusicverseError>;

/// Additional information attached to an error for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Main error type for the musicverse workspace
#[derive(Error, Debug)]
pub enum MusicverseError {
    /// The configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    /// A configuration value is out of range
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        context: ErrorContext,
    },
}

impl MusicverseError {
    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            MusicverseError::Config { context, .. } => context,
            MusicverseError::Validation { context, .. } => context,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        let context = self.context();
        match self {
            MusicverseError::Config { .. } => {
                error!(
                    error_id = %context.error_id,
                    operation = ?context.operation,
                    metadata = ?context.metadata,
                    error = %self,
                    "Configuration error"
                );
            }
            MusicverseError::Validation { field, .. } => {
                warn!(
                    error_id = %context.error_id,
                    field = ?field,
                    suggestions = ?context.recovery_suggestions,
                    error = %self,
                    "Invalid configuration value"
                );
            }
        }
    }
}

/// Build a [`MusicverseError::Validation`] for `field`, optionally with a recovery hint
#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::MusicverseError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_operation("validate")
                .with_suggestion("Check the field value and format"),
        }
    };
    ($msg:expr, $field:expr, $component:expr, $suggestion:expr) => {
        $crate::MusicverseError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            context: $crate::ErrorContext::new($component)
                .with_operation("validate")
                .with_suggestion($suggestion),
        }
    };
}
