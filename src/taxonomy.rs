// ABOUTME: Fixed training taxonomy - subsets, movement patterns, block types
// ABOUTME: Includes the muscle-name to training-subset lookup used by the catalog formatter
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Training Taxonomy
//!
//! Fixed enumerations shared by the catalog formatter, prompt builder, and
//! plan validator. String forms are stable wire values: they appear verbatim
//! in generation prompts and in the JSON the model is asked to return.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Training focus subset
///
/// The fixed enumeration a generation request selects from and a plan's
/// `focus_subsets` field must stay within.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseSubset {
    /// Upper-body work (push, pull, arms, shoulders)
    Upper,
    /// Lower-body work (squat, hinge, lunge)
    Lower,
    /// Trunk and anti-movement work
    Core,
    /// Whole-body compound work
    FullBody,
    /// Cardio / metabolic conditioning
    Conditioning,
}

impl ExerciseSubset {
    /// Stable string form used in prompts and JSON payloads
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Core => "core",
            Self::FullBody => "full_body",
            Self::Conditioning => "conditioning",
        }
    }

    /// All subsets in declaration order, for schema descriptions
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Upper,
            Self::Lower,
            Self::Core,
            Self::FullBody,
            Self::Conditioning,
        ]
    }
}

impl Display for ExerciseSubset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExerciseSubset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            "core" => Ok(Self::Core),
            "full_body" => Ok(Self::FullBody),
            "conditioning" => Ok(Self::Conditioning),
            other => Err(format!("unknown subset '{other}'")),
        }
    }
}

/// Movement pattern classification for catalog exercises
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Horizontal or vertical pressing
    Push,
    /// Horizontal or vertical pulling
    Pull,
    /// Knee-dominant squatting
    Squat,
    /// Hip-dominant hinging
    Hinge,
    /// Split-stance / single-leg work
    Lunge,
    /// Loaded carries
    Carry,
    /// Anti-rotation core work
    CoreAntiRotation,
    /// Trunk flexion
    CoreFlexion,
    /// Trunk extension
    CoreExtension,
    /// Trunk rotation
    CoreRotation,
    /// Cardio and conditioning movements
    CardioConditioning,
    /// Anything that does not fit the above
    Other,
}

impl MovementPattern {
    /// Stable string form used in catalog listings
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Squat => "squat",
            Self::Hinge => "hinge",
            Self::Lunge => "lunge",
            Self::Carry => "carry",
            Self::CoreAntiRotation => "core_anti_rotation",
            Self::CoreFlexion => "core_flexion",
            Self::CoreExtension => "core_extension",
            Self::CoreRotation => "core_rotation",
            Self::CardioConditioning => "cardio_conditioning",
            Self::Other => "other",
        }
    }
}

impl Display for MovementPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Workout block structure type
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// All sets of one exercise before moving on
    Straight,
    /// Two exercises alternated set-for-set
    Superset,
    /// Three or more exercises cycled with minimal rest
    Circuit,
}

impl BlockType {
    /// Stable string form used in plan JSON
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Superset => "superset",
            Self::Circuit => "circuit",
        }
    }
}

impl Display for BlockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "superset" => Ok(Self::Superset),
            "circuit" => Ok(Self::Circuit),
            other => Err(format!("unknown block type '{other}'")),
        }
    }
}

/// Subset label shown in catalog listings when the muscle is unmapped
pub const UNKNOWN_SUBSET_LABEL: &str = "unknown";

/// Map a primary-muscle name to its training subset
///
/// Fixed lookup table; muscle names outside the table resolve to `None` and
/// callers render [`UNKNOWN_SUBSET_LABEL`] rather than failing.
#[must_use]
pub fn subset_for_muscle(muscle_name: &str) -> Option<ExerciseSubset> {
    match muscle_name {
        "shoulders" | "chest" | "triceps" | "biceps" | "back" => Some(ExerciseSubset::Upper),
        "quads" | "hamstrings" | "glutes" => Some(ExerciseSubset::Lower),
        "upper_abs" | "lower_abs" | "obliques" => Some(ExerciseSubset::Core),
        _ => None,
    }
}

/// Render the subset label for a muscle name, falling back to `"unknown"`
#[must_use]
pub fn subset_label_for_muscle(muscle_name: &str) -> &'static str {
    subset_for_muscle(muscle_name).map_or(UNKNOWN_SUBSET_LABEL, |s| s.as_str())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_subset_round_trip() {
        for subset in ExerciseSubset::all() {
            let parsed: ExerciseSubset = subset.as_str().parse().unwrap();
            assert_eq!(parsed, *subset);
        }
    }

    #[test]
    fn test_subset_serde_uses_snake_case() {
        let json = serde_json::to_string(&ExerciseSubset::FullBody).unwrap();
        assert_eq!(json, "\"full_body\"");
    }

    #[test]
    fn test_muscle_lookup() {
        assert_eq!(subset_for_muscle("chest"), Some(ExerciseSubset::Upper));
        assert_eq!(subset_for_muscle("glutes"), Some(ExerciseSubset::Lower));
        assert_eq!(subset_for_muscle("obliques"), Some(ExerciseSubset::Core));
        assert_eq!(subset_for_muscle("forearms"), None);
        assert_eq!(subset_label_for_muscle("forearms"), "unknown");
    }

    #[test]
    fn test_block_type_parse() {
        assert_eq!("superset".parse::<BlockType>().unwrap(), BlockType::Superset);
        assert!("pyramid".parse::<BlockType>().is_err());
    }
}
