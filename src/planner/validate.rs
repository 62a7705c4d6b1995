// ABOUTME: Plan validator - coerces messy model JSON into a strict AIWorkoutPlan
// ABOUTME: Best-effort per-set normalization followed by a single invariant check
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Plan Validator
//!
//! The model's output surface is not fully controllable: reps arrive as
//! integers, floats, strings like `"12 reps"` or `"30s"`, or qualitative text
//! like `"AMRAP"`. Normalization coerces each surface form into the strict
//! shape first; only after every field has been coerced does a single
//! invariant check decide whether a set is usable. Coercion and validation
//! are never interleaved.
//!
//! Unknown/extra fields anywhere in the payload are ignored. Violations of
//! the required shape are collected as field-path issues; the plan fails as a
//! whole (no partial plans) with every issue reported at once.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::taxonomy::{BlockType, ExerciseSubset};

/// First run of decimal digits anywhere in a string
///
/// Stored as Option to handle compilation failures gracefully (should never
/// fail for this static pattern).
static DIGIT_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(\d+)").ok());

/// Keywords in notes that justify using the full notes text as a fallback
/// prescription ("to failure", "AMRAP", "max effort", "until form breaks")
const FALLBACK_KEYWORDS: &[&str] = &["failure", "amrap", "max", "until"];

// ============================================================================
// Validated Plan Model
// ============================================================================

/// Per-set instruction after normalization
///
/// Invariant: at least one of `reps`, `seconds`, or `prescription_text` is
/// present; the validator rejects sets that supply none of them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetPrescription {
    /// Repetition count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Duration in seconds for timed work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
    /// Optional load suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Short coaching cue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Qualitative prescription preserved when no numeric target was found
    /// (e.g. `"AMRAP"`, `"to failure"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription_text: Option<String>,
}

/// An exercise within a block, with its ordered set prescriptions
///
/// `exercise_id` is accepted at this layer without cross-checking the
/// catalog; the persisting caller verifies ids against the trainer's own
/// accessible exercises.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockExercise {
    /// Catalog exercise id the model referenced
    pub exercise_id: String,
    /// Ordered set prescriptions
    pub sets: Vec<SetPrescription>,
}

/// A block of exercises performed under one structure rule
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutBlock {
    /// Block structure type
    pub block_type: BlockType,
    /// Rest between sets, in seconds
    pub rest_seconds: u32,
    /// Ordered exercises in this block
    pub exercises: Vec<BlockExercise>,
}

/// A validated AI-generated workout plan
///
/// Constructed once from normalized model output and returned to the caller;
/// persistence into the permanent workout schema is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AIWorkoutPlan {
    /// Workout title
    pub name: String,
    /// Training subsets the plan focuses on
    pub focus_subsets: Vec<ExerciseSubset>,
    /// Muscle group names the plan targets
    pub muscles_targeted: Vec<String>,
    /// Ordered workout blocks
    pub blocks: Vec<WorkoutBlock>,
}

/// One offending field in a failed validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldIssue {
    /// JSON path of the offending field (e.g. `blocks[0].exercises[1].sets[2]`)
    pub path: String,
    /// Why the field was rejected
    pub reason: String,
}

impl FieldIssue {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Coercion Helpers
// ============================================================================

/// Best-effort extraction of a non-negative integer from messy model output
///
/// Accepts a native integer as-is, truncates floats toward zero, and falls
/// back to the first decimal digit run anywhere in a string (`"12 reps"`,
/// `"30s"`). Anything else yields `None`.
#[must_use]
pub fn extract_first_int(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                u32::try_from(i).ok()
            } else {
                n.as_f64()
                    .map(|f| f.trunc())
                    .filter(|f| *f >= 0.0 && *f <= f64::from(u32::MAX))
                    .map(|f| f as u32)
            }
        }
        Value::String(s) => digit_run(s),
        _ => None,
    }
}

/// First digit run in a string, parsed as u32
fn digit_run(text: &str) -> Option<u32> {
    DIGIT_RUN
        .as_ref()?
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Non-empty trimmed string field, or `None`
fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

// ============================================================================
// Set Normalization
// ============================================================================

/// Normalize one raw set object into a [`SetPrescription`]
///
/// Pure coercion: every recognized surface form is reduced to the strict
/// field set, then a single invariant check at the end decides validity.
/// Returns `None` (and records an issue) when no usable prescription remains.
fn normalize_set(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> Option<SetPrescription> {
    if !raw.is_object() {
        issues.push(FieldIssue::new(path, "expected a set object"));
        return None;
    }

    let mut reps = extract_first_int(raw.get("reps"));
    let mut seconds = extract_first_int(raw.get("seconds"));
    let weight = extract_first_int(raw.get("weight"));
    let notes = string_field(raw, "notes");

    // No numeric target yet: the notes may carry one ("hold for 45 seconds")
    if reps.is_none() && seconds.is_none() {
        if let Some(notes_text) = &notes {
            if let Some(inferred) = digit_run(notes_text) {
                let lowered = notes_text.to_lowercase();
                if lowered.contains("sec") || lowered.contains("second") {
                    seconds = Some(inferred);
                } else {
                    reps = Some(inferred);
                }
            }
        }
    }

    let prescription_text = if reps.is_some() || seconds.is_some() {
        None
    } else {
        qualitative_fallback(raw, notes.as_deref())
    };

    if reps.is_none() && seconds.is_none() && prescription_text.is_none() {
        issues.push(FieldIssue::new(
            path,
            "set has no usable prescription: reps, seconds, or qualitative text required",
        ));
        return None;
    }

    Some(SetPrescription {
        reps,
        seconds,
        weight,
        notes,
        prescription_text,
    })
}

/// Resolve a qualitative fallback prescription for a set with no numeric target
///
/// Preference order: an explicit `prescription_text` field (kept verbatim so
/// re-validating a serialized plan is idempotent), then a digit-free raw
/// `reps` string (`"AMRAP"`, `"to failure"`), then the full notes text when
/// it carries a failure/AMRAP/max/until-style keyword.
fn qualitative_fallback(raw: &Value, notes: Option<&str>) -> Option<String> {
    if let Some(explicit) = string_field(raw, "prescription_text") {
        return Some(explicit);
    }

    if let Some(reps_text) = string_field(raw, "reps") {
        // Digit-bearing strings were already consumed by extraction
        if digit_run(&reps_text).is_none() {
            return Some(reps_text);
        }
    }

    let notes_text = notes?;
    let lowered = notes_text.to_lowercase();
    if FALLBACK_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Some(notes_text.to_owned());
    }

    None
}

// ============================================================================
// Structural Validation
// ============================================================================

/// Validate raw parsed model JSON into an [`AIWorkoutPlan`]
///
/// # Errors
///
/// Returns `ErrorCode::PlanInvalid` carrying every `{path, reason}` issue
/// found; no partial plans are returned.
pub fn validate_plan(raw: &Value) -> AppResult<AIWorkoutPlan> {
    let mut issues = Vec::new();

    let Some(root) = raw.as_object() else {
        return Err(plan_error(vec![FieldIssue::new(
            "$",
            "expected a JSON object at the top level",
        )]));
    };

    let name = match root.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name.trim().to_owned(),
        _ => {
            issues.push(FieldIssue::new("name", "required non-empty string"));
            String::new()
        }
    };

    let focus_subsets = validate_subsets(root.get("focus_subsets"), &mut issues);
    let muscles_targeted = validate_muscles(root.get("muscles_targeted"), &mut issues);
    let blocks = validate_blocks(root.get("blocks"), &mut issues);

    if issues.is_empty() {
        Ok(AIWorkoutPlan {
            name,
            focus_subsets,
            muscles_targeted,
            blocks,
        })
    } else {
        Err(plan_error(issues))
    }
}

fn plan_error(issues: Vec<FieldIssue>) -> AppError {
    let count = issues.len();
    AppError::plan_invalid(
        format!("generated plan failed validation with {count} issue(s)"),
        serde_json::json!(issues),
    )
}

fn validate_subsets(raw: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Vec<ExerciseSubset> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        issues.push(FieldIssue::new("focus_subsets", "required array of subset labels"));
        return Vec::new();
    };

    let mut subsets = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_str().map(ExerciseSubset::from_str) {
            Some(Ok(subset)) => subsets.push(subset),
            Some(Err(reason)) => issues.push(FieldIssue::new(format!("focus_subsets[{i}]"), reason)),
            None => issues.push(FieldIssue::new(
                format!("focus_subsets[{i}]"),
                "expected a subset label string",
            )),
        }
    }
    subsets
}

fn validate_muscles(raw: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Vec<String> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        issues.push(FieldIssue::new(
            "muscles_targeted",
            "required array of muscle names",
        ));
        return Vec::new();
    };

    let mut muscles = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        match entry.as_str() {
            Some(name) => muscles.push(name.to_owned()),
            None => issues.push(FieldIssue::new(
                format!("muscles_targeted[{i}]"),
                "expected a muscle name string",
            )),
        }
    }
    muscles
}

fn validate_blocks(raw: Option<&Value>, issues: &mut Vec<FieldIssue>) -> Vec<WorkoutBlock> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        issues.push(FieldIssue::new("blocks", "required array of workout blocks"));
        return Vec::new();
    };

    let mut blocks = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        if let Some(block) = validate_block(entry, &format!("blocks[{i}]"), issues) {
            blocks.push(block);
        }
    }
    blocks
}

fn validate_block(raw: &Value, path: &str, issues: &mut Vec<FieldIssue>) -> Option<WorkoutBlock> {
    if !raw.is_object() {
        issues.push(FieldIssue::new(path, "expected a block object"));
        return None;
    }

    let before = issues.len();

    let block_type = match raw.get("block_type").and_then(Value::as_str) {
        Some(label) => match BlockType::from_str(label) {
            Ok(block_type) => Some(block_type),
            Err(reason) => {
                issues.push(FieldIssue::new(format!("{path}.block_type"), reason));
                None
            }
        },
        None => {
            issues.push(FieldIssue::new(
                format!("{path}.block_type"),
                "required string: straight, superset, or circuit",
            ));
            None
        }
    };

    let rest_seconds = extract_first_int(raw.get("rest_seconds"));
    if rest_seconds.is_none() {
        issues.push(FieldIssue::new(
            format!("{path}.rest_seconds"),
            "required integer rest time in seconds",
        ));
    }

    let exercises = validate_block_exercises(raw.get("exercises"), path, issues);

    if issues.len() > before {
        return None;
    }

    Some(WorkoutBlock {
        block_type: block_type?,
        rest_seconds: rest_seconds?,
        exercises,
    })
}

fn validate_block_exercises(
    raw: Option<&Value>,
    block_path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Vec<BlockExercise> {
    let Some(entries) = raw.and_then(Value::as_array) else {
        issues.push(FieldIssue::new(
            format!("{block_path}.exercises"),
            "required array of block exercises",
        ));
        return Vec::new();
    };

    let mut exercises = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let path = format!("{block_path}.exercises[{i}]");

        let Some(exercise_id) = string_field(entry, "exercise_id") else {
            issues.push(FieldIssue::new(
                format!("{path}.exercise_id"),
                "required exercise id string",
            ));
            continue;
        };

        let Some(raw_sets) = entry.get("sets").and_then(Value::as_array) else {
            issues.push(FieldIssue::new(
                format!("{path}.sets"),
                "required array of set prescriptions",
            ));
            continue;
        };

        let mut sets = Vec::with_capacity(raw_sets.len());
        for (j, raw_set) in raw_sets.iter().enumerate() {
            if let Some(set) = normalize_set(raw_set, &format!("{path}.sets[{j}]"), issues) {
                sets.push(set);
            }
        }

        exercises.push(BlockExercise { exercise_id, sets });
    }
    exercises
}
