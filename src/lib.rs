// ABOUTME: Core library for coachplan - AI workout plan generation for personal trainers
// ABOUTME: Exposes the generation pipeline, LLM provider seam, and shared domain types
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Coachplan
//!
//! Generation core for a personal-trainer backend: turns a trainer's exercise
//! catalog, a client profile, and a focus request into a validated AI workout
//! plan.
//!
//! ## Architecture
//!
//! - [`planner`]: the five-stage generation pipeline (catalog formatter,
//!   prompt builder, generation client, response normalizer, plan validator)
//! - [`llm`]: provider abstraction with the production Gemini implementation
//! - [`models`]: exercise, client, and trainer domain records
//! - [`taxonomy`]: fixed subset / movement-pattern / block-type enumerations
//! - [`errors`]: unified error codes and the HTTP-facing error envelope
//! - [`config`] and [`logging`]: environment-driven setup
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use coachplan::llm::GeminiProvider;
//! use coachplan::models::TrainerContext;
//! use coachplan::planner::{PlanGenerateRequest, WorkoutPlanner};
//! use coachplan::taxonomy::ExerciseSubset;
//!
//! # async fn example(
//! #     catalog: Arc<dyn coachplan::planner::CatalogSource>,
//! #     clients: Arc<dyn coachplan::planner::ClientProfileSource>,
//! # ) -> coachplan::errors::AppResult<()> {
//! let provider = Arc::new(GeminiProvider::from_env()?);
//! let planner = WorkoutPlanner::new(catalog, clients, provider);
//!
//! let request = PlanGenerateRequest::new(vec![ExerciseSubset::Upper]);
//! let trainer = TrainerContext::new(uuid::Uuid::new_v4());
//! let plan = planner.generate(&request, &trainer).await?;
//! println!("{}", plan.name);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod planner;
pub mod taxonomy;
