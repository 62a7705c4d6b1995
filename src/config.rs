// ABOUTME: Environment-driven configuration for the generation pipeline
// ABOUTME: LlmConfig is the credential-store seam - API key and model selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Configuration
//!
//! Environment-only configuration, read once at startup. The LLM credential is
//! deliberately optional at load time: servers without a key still boot and
//! serve everything except generation, which fails with a distinct
//! `CONFIG_MISSING` error so operators can tell misconfiguration apart from
//! upstream faults.

use serde::Serialize;
use std::env;

use crate::errors::{AppError, AppResult};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the generation model
pub const LLM_MODEL_ENV: &str = "COACHPLAN_LLM_MODEL";

/// Default generation model
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// LLM credential and model configuration
#[derive(Debug, Clone, Serialize)]
pub struct LlmConfig {
    /// API key for the generation provider; `None` when unset or blank
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier to request
    pub model: String,
}

impl LlmConfig {
    /// Load configuration from the environment
    ///
    /// A blank `GEMINI_API_KEY` is treated the same as an unset one.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var(GEMINI_API_KEY_ENV)
            .ok()
            .map(|k| k.trim().to_owned())
            .filter(|k| !k.is_empty());

        let model = env::var(LLM_MODEL_ENV)
            .ok()
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_owned());

        Self { api_key, model }
    }

    /// Whether a credential is available
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Resolve the API key, failing with the distinct missing-credential error
    ///
    /// # Errors
    ///
    /// Returns `ErrorCode::ConfigMissing` when no key is configured.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::config_missing(format!("{GEMINI_API_KEY_ENV} environment variable not set"))
        })
    }
}
