// ABOUTME: Response normalizer - strips code fences and parses model output as JSON
// ABOUTME: Produces raw serde_json::Value for the validator, or a diagnosable error
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Response Normalizer
//!
//! Models are asked for bare JSON but routinely wrap it in markdown fences
//! anyway. This module tolerates a single surrounding fence (with or without
//! a language tag), then parses. Parse failures carry the serde diagnostic
//! plus a bounded snippet of the offending text so prompt issues can be
//! debugged from logs without replaying the request.

use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Maximum characters of unparseable output carried in a parse error
///
/// Fixed cap, not configurable.
pub const SNIPPET_MAX_CHARS: usize = 500;

/// Strip one leading and one trailing markdown code fence, if present
///
/// Handles both ` ```json ` and bare ` ``` ` openings. Nested or repeated
/// fences are left alone; only the outermost pair is a formatting artifact.
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Truncate text to the snippet cap on a character boundary
fn snippet_of(text: &str) -> String {
    if text.chars().count() <= SNIPPET_MAX_CHARS {
        text.to_owned()
    } else {
        text.chars().take(SNIPPET_MAX_CHARS).collect()
    }
}

/// Parse a raw model completion into unvalidated JSON
///
/// # Errors
///
/// - `ErrorCode::GenerationFailed` when the completion is empty or
///   whitespace-only (the model produced nothing usable).
/// - `ErrorCode::ResponseUnparseable` when the fence-stripped text is not
///   valid JSON; the error details carry a snippet capped at
///   [`SNIPPET_MAX_CHARS`] characters.
pub fn parse_completion(raw: &str) -> AppResult<Value> {
    let cleaned = strip_code_fences(raw);

    if cleaned.is_empty() {
        return Err(AppError::generation("model returned empty output"));
    }

    serde_json::from_str(cleaned).map_err(|e| {
        AppError::unparseable(
            format!("invalid JSON from model: {e}"),
            snippet_of(cleaned),
        )
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fences("```\n[1,2]\n```"), "[1,2]");
    }

    #[test]
    fn test_unfenced_text_unchanged() {
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_fenced_object() {
        let value = parse_completion("```json\n{\"a\":1}\n```").unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_empty_completion_is_generation_error() {
        let err = parse_completion("   \n").unwrap_err();
        assert_eq!(err.code, ErrorCode::GenerationFailed);
    }

    #[test]
    fn test_parse_error_snippet_is_full_short_input() {
        let err = parse_completion("not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ResponseUnparseable);
        assert_eq!(err.context.details["snippet"], "not json");
    }

    #[test]
    fn test_parse_error_snippet_is_capped() {
        let long = "x".repeat(2000);
        let err = parse_completion(&long).unwrap_err();
        let snippet = err.context.details["snippet"].as_str().unwrap();
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS);
    }
}
