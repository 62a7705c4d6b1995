// ABOUTME: Unified error handling for the coachplan generation core
// ABOUTME: Defines error codes, the AppError type, and the HTTP-facing error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling System
//!
//! Every failure in the generation pipeline is mapped to exactly one
//! [`ErrorCode`] before it leaves the component boundary. The route layer
//! (out of scope for this crate) only needs [`AppError::http_status`] and the
//! serializable [`ErrorResponse`] envelope to surface faults consistently.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller-supplied input is invalid (bad request shape, empty focus list)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A precondition for the operation is unmet (e.g. empty exercise catalog)
    #[serde(rename = "PRECONDITION_FAILED")]
    PreconditionFailed = 3001,
    /// Model output parsed as JSON but does not conform to the plan schema
    #[serde(rename = "PLAN_INVALID")]
    PlanInvalid = 3002,

    // External services (5000-5999)
    /// The external model call failed, timed out, or returned unusable output
    #[serde(rename = "GENERATION_FAILED")]
    GenerationFailed = 5000,
    /// Model output was not valid JSON after fence stripping
    #[serde(rename = "RESPONSE_UNPARSEABLE")]
    ResponseUnparseable = 5001,
    /// The external model provider rate limited or exhausted quota
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited = 5002,

    // Configuration (6000-6999)
    /// Configuration is present but invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    /// Required configuration (API credential) is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,

    // Internal errors (9000-9999)
    /// Unexpected internal fault
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput => 400,

            // 412 Precondition Failed
            Self::PreconditionFailed => 412,

            // 422 Unprocessable Entity
            Self::PlanInvalid => 422,

            // 502 Bad Gateway
            Self::GenerationFailed | Self::ResponseUnparseable => 502,

            // 503 Service Unavailable
            Self::ExternalRateLimited => 503,

            // 500 Internal Server Error
            Self::ConfigError
            | Self::ConfigMissing
            | Self::InternalError
            | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::PreconditionFailed => "A precondition for this operation is not met",
            Self::PlanInvalid => "The generated plan did not conform to the expected schema",
            Self::GenerationFailed => "The AI generation service encountered an error",
            Self::ResponseUnparseable => "The AI generation service returned unparseable output",
            Self::ExternalRateLimited => "The AI generation service rate limit was exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether a caller may reasonably retry the failed operation
    ///
    /// Configuration and validation faults are terminal until an operator or
    /// prompt change intervenes; upstream faults may succeed on retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::GenerationFailed | Self::ResponseUnparseable | Self::ExternalRateLimited
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// Trainer ID if available
    pub trainer_id: Option<Uuid>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            trainer_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add a trainer ID to the error context
    #[must_use]
    pub fn with_trainer_id(mut self, trainer_id: Uuid) -> Self {
        self.context.trainer_id = Some(trainer_id);
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Request ID if one was attached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Structured details (e.g. validation issue list)
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid caller input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Unmet precondition (e.g. no catalog available)
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PreconditionFailed, message)
    }

    /// Generated plan failed schema validation
    ///
    /// `issues` carries one `{path, reason}` object per offending field so
    /// callers can surface every problem at once.
    pub fn plan_invalid(message: impl Into<String>, issues: serde_json::Value) -> Self {
        Self::new(ErrorCode::PlanInvalid, message).with_details(serde_json::json!({
            "issues": issues
        }))
    }

    /// External model call failed or produced unusable output
    pub fn generation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GenerationFailed, message)
    }

    /// Model output was not valid JSON; carries a bounded snippet for diagnosis
    pub fn unparseable(message: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResponseUnparseable, message).with_details(serde_json::json!({
            "snippet": snippet.into()
        }))
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Required configuration missing (distinct from other config faults)
    pub fn config_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Conversion from `anyhow::Error` to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => {
                Self::new(ErrorCode::InternalError, error.to_string()).with_details(
                    serde_json::json!({
                        "source": source.to_string()
                    }),
                )
            }
            None => Self::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}
