use serde::{Deserialize, Serialize};
use thiserror::Error;

use pharmreturn_models::FormStatus;

#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ComplianceError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: FormStatus, to: FormStatus },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ComplianceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn invalid_transition(from: FormStatus, to: FormStatus) -> Self {
        Self::InvalidTransition { from, to }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Export { .. } => "EXPORT_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Process exit code used by the command line tools (sysexits.h values).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => 65,
            Self::Serialization { .. } => 65,
            Self::NotFound { .. } => 66,
            Self::InvalidTransition { .. } => 65,
            Self::Io { .. } => 74,
            Self::Export { .. } => 73,
            Self::Configuration { .. } => 78,
            Self::Internal { .. } => 70,
        }
    }
}

pub type ComplianceResult<T> = Result<T, ComplianceError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<ComplianceError> for ErrorResponse {
    fn from(error: ComplianceError) -> Self {
        let details = match &error {
            ComplianceError::Validation { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };

        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

// Conversion from common error types
impl From<serde_json::Error> for ComplianceError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

impl From<std::io::Error> for ComplianceError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<config::ConfigError> for ComplianceError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

impl From<csv::Error> for ComplianceError {
    fn from(error: csv::Error) -> Self {
        Self::export(error.to_string())
    }
}

impl From<handlebars::RenderError> for ComplianceError {
    fn from(error: handlebars::RenderError) -> Self {
        Self::export(error.to_string())
    }
}

impl From<handlebars::TemplateError> for ComplianceError {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::internal(error.to_string())
    }
}
