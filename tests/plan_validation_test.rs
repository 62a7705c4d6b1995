// ABOUTME: Integration tests for workout plan validation and set coercion
// ABOUTME: Covers the messy-output matrix: floats, strings, notes inference, fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used)]

use serde_json::{json, Value};

use coachplan::errors::ErrorCode;
use coachplan::planner::validate::validate_plan;
use coachplan::planner::{AIWorkoutPlan, SetPrescription};
use coachplan::taxonomy::{BlockType, ExerciseSubset};

/// Wrap a list of raw set objects in an otherwise valid plan
fn plan_with_sets(sets: Value) -> Value {
    json!({
        "name": "Coercion Fixture",
        "focus_subsets": ["upper"],
        "muscles_targeted": ["chest"],
        "blocks": [
            {
                "block_type": "straight",
                "rest_seconds": 90,
                "exercises": [
                    {"exercise_id": "ex-1", "sets": sets}
                ]
            }
        ]
    })
}

fn first_sets(plan: &AIWorkoutPlan) -> &[SetPrescription] {
    &plan.blocks[0].exercises[0].sets
}

#[test]
fn test_set_surface_forms_coerce_to_strict_shape() {
    let raw = plan_with_sets(json!([
        {"reps": 10},
        {"reps": 12.7},
        {"reps": "12 reps"},
        {"seconds": "30s"},
        {"reps": "8-10", "weight": "20kg"}
    ]));

    let plan = validate_plan(&raw).unwrap();
    let sets = first_sets(&plan);

    assert_eq!(sets[0].reps, Some(10));
    assert_eq!(sets[1].reps, Some(12));
    assert_eq!(sets[2].reps, Some(12));
    assert_eq!(sets[3].seconds, Some(30));
    // Range strings keep the first number; weight digits extract too
    assert_eq!(sets[4].reps, Some(8));
    assert_eq!(sets[4].weight, Some(20));
}

#[test]
fn test_timed_work_inferred_from_notes() {
    let raw = plan_with_sets(json!([
        {"notes": "hold for 45 seconds"},
        {"notes": "30 sec per side"},
        {"notes": "aim for 15 total"}
    ]));

    let plan = validate_plan(&raw).unwrap();
    let sets = first_sets(&plan);

    assert_eq!(sets[0].seconds, Some(45));
    assert_eq!(sets[1].seconds, Some(30));
    // No timing keyword, digits read as reps
    assert_eq!(sets[2].reps, Some(15));
    assert_eq!(sets[2].seconds, None);
}

#[test]
fn test_qualitative_prescriptions_preserved() {
    let raw = plan_with_sets(json!([
        {"reps": "AMRAP"},
        {"reps": "to failure", "weight": 40},
        {"notes": "last set until form breaks"}
    ]));

    let plan = validate_plan(&raw).unwrap();
    let sets = first_sets(&plan);

    assert_eq!(sets[0].prescription_text.as_deref(), Some("AMRAP"));
    assert_eq!(sets[0].reps, None);
    assert_eq!(sets[1].prescription_text.as_deref(), Some("to failure"));
    assert_eq!(sets[1].weight, Some(40));
    assert_eq!(
        sets[2].prescription_text.as_deref(),
        Some("last set until form breaks")
    );
}

#[test]
fn test_set_with_no_prescription_fails_whole_plan() {
    let raw = plan_with_sets(json!([{"reps": 10}, {"notes": "nice and easy"}]));

    let err = validate_plan(&raw).unwrap_err();
    assert_eq!(err.code, ErrorCode::PlanInvalid);

    let issues = err.context.details["issues"].as_array().unwrap();
    assert_eq!(
        issues[0]["path"].as_str().unwrap(),
        "blocks[0].exercises[0].sets[1]"
    );
}

#[test]
fn test_all_issues_collected_across_plan() {
    let raw = json!({
        "name": "",
        "focus_subsets": ["upper", "arms"],
        "muscles_targeted": ["chest", 42],
        "blocks": [
            {
                "block_type": "circuit",
                "rest_seconds": 45,
                "exercises": [{"exercise_id": "ex-1", "sets": [{"reps": 12}]}]
            },
            {
                "block_type": "wave",
                "exercises": [{"sets": [{"reps": 10}]}]
            }
        ]
    });

    let err = validate_plan(&raw).unwrap_err();
    let issues = err.context.details["issues"].as_array().unwrap();
    let paths: Vec<&str> = issues.iter().filter_map(|i| i["path"].as_str()).collect();

    assert!(paths.contains(&"name"));
    assert!(paths.contains(&"focus_subsets[1]"));
    assert!(paths.contains(&"muscles_targeted[1]"));
    assert!(paths.contains(&"blocks[1].block_type"));
    assert!(paths.contains(&"blocks[1].rest_seconds"));
    assert!(paths.contains(&"blocks[1].exercises[0].exercise_id"));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let raw = json!({
        "name": "Extra Fields",
        "focus_subsets": ["lower"],
        "muscles_targeted": ["quads"],
        "difficulty": "intermediate",
        "blocks": [
            {
                "block_type": "superset",
                "rest_seconds": 60,
                "label": "A",
                "exercises": [
                    {
                        "exercise_id": "ex-1",
                        "superset_partner": "ex-2",
                        "sets": [{"reps": 12, "tempo": "2-0-2"}]
                    }
                ]
            }
        ]
    });

    let plan = validate_plan(&raw).unwrap();
    assert_eq!(plan.blocks[0].block_type, BlockType::Superset);
    assert_eq!(plan.focus_subsets, vec![ExerciseSubset::Lower]);
}

#[test]
fn test_block_rest_seconds_coerced_from_string() {
    let raw = json!({
        "name": "String Rest",
        "focus_subsets": ["conditioning"],
        "muscles_targeted": ["quads"],
        "blocks": [
            {
                "block_type": "circuit",
                "rest_seconds": "45 seconds",
                "exercises": [{"exercise_id": "ex-1", "sets": [{"seconds": 40}]}]
            }
        ]
    });

    let plan = validate_plan(&raw).unwrap();
    assert_eq!(plan.blocks[0].rest_seconds, 45);
}

#[test]
fn test_validated_plan_round_trips() {
    let raw = plan_with_sets(json!([
        {"reps": "10 reps", "weight": "25 lbs", "notes": "controlled tempo"},
        {"reps": "AMRAP"},
        {"notes": "hold 60 seconds"}
    ]));

    let plan = validate_plan(&raw).unwrap();
    let reserialized = serde_json::to_value(&plan).unwrap();
    let revalidated = validate_plan(&reserialized).unwrap();

    assert_eq!(plan, revalidated);
}
