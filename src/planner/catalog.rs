// ABOUTME: Catalog formatter - projects exercises into a flat listing for generation prompts
// ABOUTME: Deterministic, name-sorted, one line per exercise with id/subset/pattern/equipment/tags
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Serialize;
use uuid::Uuid;

use crate::models::Exercise;
use crate::taxonomy::{subset_label_for_muscle, MovementPattern};

/// Read-only exercise projection built per generation request
///
/// Carries exactly the fields the prompt needs; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseSummary {
    /// Catalog id the model must echo back in `exercise_id` fields
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Training subset label derived from the primary muscle (`"unknown"` when unmapped)
    pub subset: &'static str,
    /// Primary-muscle taxonomy id
    pub primary_muscle_id: i64,
    /// Movement pattern
    pub movement_pattern: MovementPattern,
    /// Required equipment
    pub equipment: String,
    /// Tag names; omitted from the listing when empty
    pub tags: Vec<String>,
}

impl ExerciseSummary {
    /// Project an exercise record into its prompt summary
    #[must_use]
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id,
            name: exercise.name.clone(),
            subset: subset_label_for_muscle(&exercise.primary_muscle_name),
            primary_muscle_id: exercise.primary_muscle_id,
            movement_pattern: exercise.movement_pattern,
            equipment: exercise.equipment.clone(),
            tags: exercise.tags.clone(),
        }
    }

    /// Render this exercise as one catalog line
    fn to_line(&self) -> String {
        let mut line = format!(
            "- id={} | name={} | subset={} | muscle_id={} | pattern={} | equipment={}",
            self.id,
            self.name,
            self.subset,
            self.primary_muscle_id,
            self.movement_pattern,
            self.equipment
        );
        if !self.tags.is_empty() {
            line.push_str(" | tags=");
            line.push_str(&self.tags.join(","));
        }
        line
    }
}

/// Build summaries for a set of exercise records
#[must_use]
pub fn summarize_exercises(exercises: &[Exercise]) -> Vec<ExerciseSummary> {
    exercises.iter().map(ExerciseSummary::from_exercise).collect()
}

/// Format the catalog as a deterministic, flat listing for prompt inclusion
///
/// One line per exercise, sorted by name (id breaks ties so the ordering is
/// total). The empty-catalog precondition is enforced by the planner, not
/// here; given no exercises this simply returns an empty string.
#[must_use]
pub fn format_catalog(summaries: &[ExerciseSummary]) -> String {
    let mut ordered: Vec<&ExerciseSummary> = summaries.iter().collect();
    ordered.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    ordered
        .iter()
        .map(|s| s.to_line())
        .collect::<Vec<_>>()
        .join("\n")
}
