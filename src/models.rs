// ABOUTME: Core domain records for the trainer workout planning backend
// ABOUTME: Defines Muscle, Exercise, ClientProfile and TrainerContext structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Models
//!
//! Core records shared across the planning pipeline. The persistent store and
//! its query layer live behind collaborator traits (see [`crate::planner`]);
//! these types are the shapes those collaborators hand back.
//!
//! ## Design Principles
//!
//! - **Storage agnostic**: no ORM coupling; collaborators map rows to these
//!   structs however they like
//! - **Serializable**: everything round-trips through JSON for API responses
//! - **Request scoped**: the pipeline only ever borrows these, never mutates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::taxonomy::MovementPattern;

/// A muscle group row from the fixed taxonomy table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Muscle {
    /// Numeric taxonomy id
    pub id: i64,
    /// Canonical snake_case name (e.g. `"hamstrings"`)
    pub name: String,
}

impl Muscle {
    /// Training subset this muscle belongs to, when mapped
    #[must_use]
    pub fn subset(&self) -> Option<crate::taxonomy::ExerciseSubset> {
        crate::taxonomy::subset_for_muscle(&self.name)
    }
}

/// An exercise record from the trainer's accessible catalog
///
/// Exercises are either trainer-owned (`trainer_id` set) or global/shared
/// (`trainer_id` is `None`). The catalog collaborator resolves the primary
/// muscle and tag relations before handing records to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique exercise id
    pub id: Uuid,
    /// Owning trainer, or `None` for global exercises
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<Uuid>,
    /// Display name
    pub name: String,
    /// Foreign key into the muscle taxonomy
    pub primary_muscle_id: i64,
    /// Resolved primary-muscle name (e.g. `"chest"`)
    pub primary_muscle_name: String,
    /// Required equipment (e.g. `"barbell"`, `"bodyweight"`)
    pub equipment: String,
    /// Movement pattern classification
    pub movement_pattern: MovementPattern,
    /// Whether the exercise is performed one side at a time
    pub unilateral: bool,
    /// Inactive exercises are excluded from generation catalogs
    pub is_active: bool,
    /// Resolved tag names
    #[serde(default)]
    pub tags: Vec<String>,
    /// Freeform coaching notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Create a global (unowned) exercise record
    #[must_use]
    pub fn global(
        name: impl Into<String>,
        primary_muscle_id: i64,
        primary_muscle_name: impl Into<String>,
        equipment: impl Into<String>,
        movement_pattern: MovementPattern,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trainer_id: None,
            name: name.into(),
            primary_muscle_id,
            primary_muscle_name: primary_muscle_name.into(),
            equipment: equipment.into(),
            movement_pattern,
            unilateral: false,
            is_active: true,
            tags: Vec::new(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Assign ownership to a trainer
    #[must_use]
    pub fn owned_by(mut self, trainer_id: Uuid) -> Self {
        self.trainer_id = Some(trainer_id);
        self
    }

    /// Attach tag names
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// A client profile as supplied by the client-profile collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Unique client id
    pub id: Uuid,
    /// Client display name
    pub name: String,
    /// Freeform trainer notes about the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Injury flags the generator must respect (e.g. `"shoulder"`)
    #[serde(default)]
    pub injury_flags: Vec<String>,
    /// Structured or freeform client preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
    /// Record creation time
    pub created_at: DateTime<Utc>,
}

impl ClientProfile {
    /// Create a minimal client profile
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            notes: None,
            injury_flags: Vec::new(),
            preferences: None,
            created_at: Utc::now(),
        }
    }

    /// Attach injury flags
    #[must_use]
    pub fn with_injury_flags(mut self, flags: Vec<String>) -> Self {
        self.injury_flags = flags;
        self
    }

    /// Attach trainer notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Identity of the trainer a generation request runs on behalf of
///
/// Resolved by the (out-of-scope) auth layer and passed through unchanged;
/// the pipeline uses it to scope catalog and client lookups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrainerContext {
    /// Authenticated trainer id
    pub trainer_id: Uuid,
}

impl TrainerContext {
    /// Create a trainer context
    #[must_use]
    pub const fn new(trainer_id: Uuid) -> Self {
        Self { trainer_id }
    }
}
