// ABOUTME: End-to-end tests for the plan generation pipeline with a canned provider
// ABOUTME: Covers the happy path plus every typed failure the pipeline can surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used)]

mod common;

use uuid::Uuid;

use coachplan::errors::ErrorCode;
use coachplan::models::TrainerContext;
use coachplan::planner::PlanGenerateRequest;
use coachplan::taxonomy::{BlockType, ExerciseSubset};

use common::{
    init_test_logging, injured_client, planner_with, sample_exercises, upper_body_request,
    valid_plan_json, CannedLlmProvider,
};

fn trainer() -> TrainerContext {
    TrainerContext::new(Uuid::new_v4())
}

#[tokio::test]
async fn test_generate_returns_validated_plan() {
    init_test_logging();
    let exercises = sample_exercises();
    let bench_id = exercises[0].id.to_string();
    let planner = planner_with(
        exercises,
        vec![],
        CannedLlmProvider::replying(valid_plan_json(&bench_id)),
    );

    let plan = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap();

    assert_eq!(plan.name, "Upper Strength");
    assert_eq!(plan.focus_subsets, vec![ExerciseSubset::Upper]);
    assert_eq!(plan.blocks[0].block_type, BlockType::Straight);
    assert_eq!(plan.blocks[0].exercises[0].exercise_id, bench_id);
    assert_eq!(plan.blocks[0].exercises[0].sets.len(), 3);
}

#[tokio::test]
async fn test_generate_strips_markdown_fences() {
    init_test_logging();
    let exercises = sample_exercises();
    let bench_id = exercises[0].id.to_string();
    let fenced = format!("```json\n{}\n```", valid_plan_json(&bench_id));
    let planner = planner_with(exercises, vec![], CannedLlmProvider::replying(fenced));

    let plan = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap();

    assert_eq!(plan.name, "Upper Strength");
}

#[tokio::test]
async fn test_generate_with_client_profile() {
    init_test_logging();
    let exercises = sample_exercises();
    let bench_id = exercises[0].id.to_string();
    let client = injured_client();
    let request = PlanGenerateRequest::new(vec![ExerciseSubset::Upper]).for_client(client.id);

    let planner = planner_with(
        exercises,
        vec![client],
        CannedLlmProvider::replying(valid_plan_json(&bench_id)),
    );

    let plan = planner.generate(&request, &trainer()).await.unwrap();
    assert_eq!(plan.blocks.len(), 1);
}

#[tokio::test]
async fn test_empty_focus_rejected_before_any_call() {
    init_test_logging();
    let planner = planner_with(
        sample_exercises(),
        vec![],
        CannedLlmProvider::failing("should never be called"),
    );
    let request = PlanGenerateRequest::new(vec![]);

    let err = planner.generate(&request, &trainer()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_empty_catalog_is_a_precondition_failure() {
    init_test_logging();
    let planner = planner_with(
        vec![],
        vec![],
        CannedLlmProvider::failing("should never be called"),
    );

    let err = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::PreconditionFailed);
    assert_eq!(err.http_status(), 412);
}

#[tokio::test]
async fn test_provider_failure_surfaces_as_generation_failed() {
    init_test_logging();
    let planner = planner_with(
        sample_exercises(),
        vec![],
        CannedLlmProvider::failing("upstream unavailable"),
    );

    let err = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::GenerationFailed);
    assert!(err.code.is_retryable());
}

#[tokio::test]
async fn test_non_json_output_is_unparseable_with_snippet() {
    init_test_logging();
    let planner = planner_with(
        sample_exercises(),
        vec![],
        CannedLlmProvider::replying("Here is a great workout plan for you!"),
    );

    let err = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResponseUnparseable);
    let snippet = err.context.details["snippet"].as_str().unwrap();
    assert!(snippet.contains("great workout plan"));
}

#[tokio::test]
async fn test_schema_violating_output_is_plan_invalid() {
    init_test_logging();
    let planner = planner_with(
        sample_exercises(),
        vec![],
        CannedLlmProvider::replying(r#"{"name": "No Blocks Here"}"#),
    );

    let err = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::PlanInvalid);
    assert_eq!(err.http_status(), 422);
    assert!(err.context.details["issues"].is_array());
}

#[tokio::test]
async fn test_empty_output_is_generation_failure() {
    init_test_logging();
    let planner = planner_with(
        sample_exercises(),
        vec![],
        CannedLlmProvider::replying("```json\n```"),
    );

    let err = planner
        .generate(&upper_body_request(), &trainer())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::GenerationFailed);
}
