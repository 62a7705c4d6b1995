// ABOUTME: Shared test utilities for coachplan integration tests
// ABOUTME: Provides canned LLM providers, in-memory data sources, and record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `coachplan`
//!
//! Common fixtures for exercising the generation pipeline without a network:
//! a canned LLM provider that replays fixed output (or a fixed failure), and
//! in-memory catalog/client sources.

use std::collections::HashMap;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use uuid::Uuid;

use coachplan::errors::{AppError, AppResult};
use coachplan::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider};
use coachplan::models::{ClientProfile, Exercise};
use coachplan::planner::{CatalogSource, ClientProfileSource, PlanGenerateRequest, WorkoutPlanner};
use coachplan::taxonomy::MovementPattern;

static INIT_LOGGING: Once = Once::new();

/// Initialize tracing once for the whole test binary
///
/// Output goes through the test writer so it only shows for failing tests.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("coachplan=debug")
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Canned LLM Provider
// ============================================================================

/// What the canned provider does when asked to complete
pub enum CannedBehavior {
    /// Return this text as the completion content
    Reply(String),
    /// Fail with an upstream generation error
    Fail(String),
}

/// LLM provider that replays a fixed behavior, recording nothing
pub struct CannedLlmProvider {
    behavior: CannedBehavior,
}

impl CannedLlmProvider {
    pub fn replying(content: impl Into<String>) -> Self {
        Self {
            behavior: CannedBehavior::Reply(content.into()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: CannedBehavior::Fail(message.into()),
        }
    }
}

#[async_trait]
impl LlmProvider for CannedLlmProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn display_name(&self) -> &'static str {
        "Canned Test Provider"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::JSON_MODE | LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        "canned-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        match &self.behavior {
            CannedBehavior::Reply(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "canned-model".to_string(),
                usage: None,
                finish_reason: Some("stop".to_string()),
            }),
            CannedBehavior::Fail(message) => Err(AppError::generation(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

// ============================================================================
// In-Memory Data Sources
// ============================================================================

/// Catalog source backed by a fixed exercise list
pub struct InMemoryCatalog {
    exercises: Vec<Exercise>,
}

impl InMemoryCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn accessible_exercises(&self, _trainer_id: Uuid) -> AppResult<Vec<Exercise>> {
        Ok(self.exercises.clone())
    }
}

/// Client source backed by a map of client id to profile
pub struct InMemoryClients {
    clients: HashMap<Uuid, ClientProfile>,
}

impl InMemoryClients {
    pub fn new(clients: Vec<ClientProfile>) -> Self {
        Self {
            clients: clients.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl ClientProfileSource for InMemoryClients {
    async fn client_profile(
        &self,
        _trainer_id: Uuid,
        client_id: Uuid,
    ) -> AppResult<Option<ClientProfile>> {
        Ok(self.clients.get(&client_id).cloned())
    }
}

// ============================================================================
// Fixture Builders
// ============================================================================

/// A small mixed catalog: bench press (chest), squat (quads), plank (abs)
pub fn sample_exercises() -> Vec<Exercise> {
    vec![
        Exercise::global(
            "Barbell Bench Press",
            1,
            "chest",
            "barbell",
            MovementPattern::Push,
        ),
        Exercise::global("Back Squat", 2, "quads", "barbell", MovementPattern::Squat),
        Exercise::global(
            "Plank",
            3,
            "upper_abs",
            "bodyweight",
            MovementPattern::CoreAntiRotation,
        ),
    ]
}

/// Client with a shoulder injury flag on file
pub fn injured_client() -> ClientProfile {
    ClientProfile::new("Alex Morgan")
        .with_injury_flags(vec!["shoulder".to_string()])
        .with_notes("prefers shorter sessions")
}

/// Build a planner over the given fixtures
pub fn planner_with(
    exercises: Vec<Exercise>,
    clients: Vec<ClientProfile>,
    provider: CannedLlmProvider,
) -> WorkoutPlanner {
    WorkoutPlanner::new(
        Arc::new(InMemoryCatalog::new(exercises)),
        Arc::new(InMemoryClients::new(clients)),
        Arc::new(provider),
    )
}

/// A minimal well-formed plan JSON referencing the given exercise id
pub fn valid_plan_json(exercise_id: &str) -> String {
    format!(
        r#"{{
            "name": "Upper Strength",
            "focus_subsets": ["upper"],
            "muscles_targeted": ["chest", "triceps"],
            "blocks": [
                {{
                    "block_type": "straight",
                    "rest_seconds": 120,
                    "exercises": [
                        {{"exercise_id": "{exercise_id}", "sets": [{{"reps": 8}}, {{"reps": 8}}, {{"reps": 6}}]}}
                    ]
                }}
            ]
        }}"#
    )
}

/// Default request used by pipeline tests
pub fn upper_body_request() -> PlanGenerateRequest {
    use coachplan::taxonomy::ExerciseSubset;
    PlanGenerateRequest::new(vec![ExerciseSubset::Upper])
}
