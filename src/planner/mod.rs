// ABOUTME: Workout plan generation pipeline - catalog to prompt to model to validated plan
// ABOUTME: Orchestrates one stateless generation attempt per request, no retries
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Workout Plan Generation Pipeline
//!
//! The planner runs one generation attempt end to end:
//!
//! 1. Catalog formatter: the trainer's accessible exercises become a compact
//!    deterministic text listing ([`catalog`])
//! 2. Prompt builder: rules, client context, output schema, and catalog are
//!    assembled into a single prompt ([`prompt`])
//! 3. Generation client: one call to the configured [`LlmProvider`]
//! 4. Response normalizer: fence stripping and JSON parsing ([`response`])
//! 5. Plan validator: coercion into a strict [`AIWorkoutPlan`] ([`validate`])
//!
//! Every stage is pure except the provider call, so each request is fully
//! independent: concurrent requests share only the immutable planner and the
//! provider's HTTP client. A failed attempt returns a typed error; the caller
//! decides whether to retry.

pub mod catalog;
pub mod prompt;
pub mod response;
pub mod validate;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{ClientProfile, Exercise, TrainerContext};
use crate::taxonomy::ExerciseSubset;

pub use validate::{AIWorkoutPlan, BlockExercise, SetPrescription, WorkoutBlock};

/// Temperature used for plan generation; low but not zero so repeated
/// requests vary the selection without drifting off-schema
const GENERATION_TEMPERATURE: f32 = 0.4;

/// Output token ceiling for a single plan
const GENERATION_MAX_TOKENS: u32 = 4096;

// ============================================================================
// Request Type
// ============================================================================

/// A trainer's request to generate a workout plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanGenerateRequest {
    /// Client the plan is for, when one is on file
    pub client_id: Option<Uuid>,
    /// Training focus subsets; must be non-empty
    pub focus_subsets: Vec<ExerciseSubset>,
    /// Target session length in minutes
    pub session_length_minutes: Option<u32>,
    /// Equipment the session has access to
    pub equipment_available: Option<Vec<String>>,
    /// Freeform trainer guidance passed through to the prompt
    pub notes: Option<String>,
}

impl PlanGenerateRequest {
    /// Create a request for the given focus subsets
    #[must_use]
    pub const fn new(focus_subsets: Vec<ExerciseSubset>) -> Self {
        Self {
            client_id: None,
            focus_subsets,
            session_length_minutes: None,
            equipment_available: None,
            notes: None,
        }
    }

    /// Target the plan at a specific client
    #[must_use]
    pub const fn for_client(mut self, client_id: Uuid) -> Self {
        self.client_id = Some(client_id);
        self
    }
}

// ============================================================================
// Data Source Seams
// ============================================================================

/// Source of the exercises a trainer may program from
///
/// Implementations resolve the union of global exercises and the trainer's
/// own, already filtered to active records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Exercises accessible to the given trainer
    async fn accessible_exercises(&self, trainer_id: Uuid) -> AppResult<Vec<Exercise>>;
}

/// Source of client profile records
#[async_trait]
pub trait ClientProfileSource: Send + Sync {
    /// Look up a client owned by the given trainer, `None` if absent
    async fn client_profile(
        &self,
        trainer_id: Uuid,
        client_id: Uuid,
    ) -> AppResult<Option<ClientProfile>>;
}

// ============================================================================
// Planner
// ============================================================================

/// AI workout plan generator
///
/// Stateless across requests: holds only its collaborators, all shared
/// immutably, so a single instance serves concurrent requests.
pub struct WorkoutPlanner {
    catalog: Arc<dyn CatalogSource>,
    clients: Arc<dyn ClientProfileSource>,
    provider: Arc<dyn LlmProvider>,
}

impl WorkoutPlanner {
    /// Create a planner over the given data sources and generation provider
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        clients: Arc<dyn ClientProfileSource>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            catalog,
            clients,
            provider,
        }
    }

    /// Generate a validated workout plan for one request
    ///
    /// Performs exactly one model call; on any failure the typed error is
    /// returned and nothing is persisted (the caller owns persistence).
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when the request names no focus subsets
    /// - `PreconditionFailed` when the trainer has no accessible exercises
    /// - `GenerationFailed` / `ExternalRateLimited` for provider faults
    /// - `ResponseUnparseable` when model output is not JSON
    /// - `PlanInvalid` when the parsed plan violates the schema
    #[instrument(skip(self, request), fields(trainer_id = %trainer.trainer_id))]
    pub async fn generate(
        &self,
        request: &PlanGenerateRequest,
        trainer: &TrainerContext,
    ) -> AppResult<AIWorkoutPlan> {
        if request.focus_subsets.is_empty() {
            return Err(AppError::invalid_input(
                "at least one focus subset is required",
            ));
        }

        let exercises = self
            .catalog
            .accessible_exercises(trainer.trainer_id)
            .await?;
        if exercises.is_empty() {
            return Err(
                AppError::precondition("no exercise catalog available for this trainer")
                    .with_trainer_id(trainer.trainer_id),
            );
        }

        let client = match request.client_id {
            Some(client_id) => {
                self.clients
                    .client_profile(trainer.trainer_id, client_id)
                    .await?
            }
            None => None,
        };

        let summaries = catalog::summarize_exercises(&exercises);
        let catalog_text = catalog::format_catalog(&summaries);
        let prompt_text = prompt::build_prompt(request, client.as_ref(), &catalog_text);

        debug!(
            catalog_size = summaries.len(),
            prompt_chars = prompt_text.len(),
            "submitting plan generation prompt"
        );

        if !self.provider.capabilities().supports_json_mode() {
            warn!(
                provider = self.provider.name(),
                "provider lacks JSON output mode, relying on prompt discipline"
            );
        }

        let chat_request = ChatRequest::new(vec![ChatMessage::user(prompt_text)])
            .with_temperature(GENERATION_TEMPERATURE)
            .with_max_tokens(GENERATION_MAX_TOKENS)
            .with_json_output();

        let completion = self.provider.complete(&chat_request).await?;
        let raw_plan = response::parse_completion(&completion.content)?;
        let plan = validate::validate_plan(&raw_plan)
            .map_err(|e| e.with_trainer_id(trainer.trainer_id))?;

        info!(
            plan_name = %plan.name,
            blocks = plan.blocks.len(),
            model = %completion.model,
            "generated workout plan"
        );

        Ok(plan)
    }
}

impl std::fmt::Debug for WorkoutPlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutPlanner")
            .field("provider", &self.provider.name())
            .finish_non_exhaustive()
    }
}
