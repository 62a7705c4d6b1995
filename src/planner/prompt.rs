// ABOUTME: Prompt builder - composes rules, client context, schema, and catalog into one prompt
// ABOUTME: Pure and deterministic; same inputs always produce byte-identical prompt text
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Prompt Builder
//!
//! Assembles the generation prompt in a fixed section order: role/rules
//! preamble, client context, request facts, the literal output schema, the
//! exercise catalog, and final generation instructions. The schema description
//! is loaded at compile time from `prompts/plan_schema.md`.

use std::fmt::Write as _;

use crate::models::ClientProfile;
use crate::planner::PlanGenerateRequest;

/// Literal JSON schema description included verbatim in every prompt
pub const PLAN_SCHEMA_DESCRIPTION: &str = include_str!("prompts/plan_schema.md");

/// Get the plan output schema description
#[must_use]
pub const fn plan_schema_description() -> &'static str {
    PLAN_SCHEMA_DESCRIPTION
}

/// Role and hard rules the model must follow
const PREAMBLE: &str = "\
You are an experienced strength and conditioning coach generating a workout \
plan for a personal trainer's client.

Hard rules:
- Use ONLY exercises from the catalog below, referenced by their exact id.
- Respond with JSON only. No prose, no markdown, no code fences.
- Respect every injury flag: never program exercises that load a flagged area.";

/// Closing generation guidance (exercise count, set count, rest times)
const INSTRUCTIONS: &str = "\
Generation instructions:
- Select 4 to 8 exercises appropriate to the requested focus.
- Prescribe 2 to 5 sets per exercise.
- Rest guidance: 90-180 seconds for straight heavy work, 60-90 seconds for \
supersets, 30-60 seconds for circuits and conditioning.";

/// Build the full generation prompt
///
/// Pure function of its inputs: no I/O, no randomness. Catalog ordering is
/// the formatter's responsibility and is itself deterministic.
#[must_use]
pub fn build_prompt(
    request: &PlanGenerateRequest,
    client: Option<&ClientProfile>,
    catalog_text: &str,
) -> String {
    let mut prompt = String::with_capacity(2048 + catalog_text.len());

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    push_client_context(&mut prompt, client);
    push_request_facts(&mut prompt, request);

    prompt.push_str("Output schema:\n");
    prompt.push_str(PLAN_SCHEMA_DESCRIPTION);
    prompt.push('\n');

    prompt.push_str("Exercise catalog:\n");
    prompt.push_str(catalog_text);
    prompt.push_str("\n\n");

    prompt.push_str(INSTRUCTIONS);
    prompt.push('\n');

    prompt
}

/// Append the client context section, or an explicit "not specified" line
fn push_client_context(prompt: &mut String, client: Option<&ClientProfile>) {
    match client {
        Some(client) => {
            let _ = writeln!(prompt, "Client: {}", client.name);
            if let Some(notes) = &client.notes {
                let _ = writeln!(prompt, "Client notes: {notes}");
            }
            if !client.injury_flags.is_empty() {
                let _ = writeln!(prompt, "Injury flags: {}", client.injury_flags.join(", "));
            }
            if let Some(preferences) = &client.preferences {
                let _ = writeln!(prompt, "Client preferences: {preferences}");
            }
        }
        None => prompt.push_str("Client: not specified\n"),
    }
    prompt.push('\n');
}

/// Append the request facts section (focus, length, equipment, notes)
fn push_request_facts(prompt: &mut String, request: &PlanGenerateRequest) {
    let focus: Vec<&str> = request.focus_subsets.iter().map(|s| s.as_str()).collect();
    let _ = writeln!(prompt, "Requested focus: {}", focus.join(", "));

    if let Some(minutes) = request.session_length_minutes {
        let _ = writeln!(prompt, "Session length: {minutes} minutes");
    }
    if let Some(equipment) = &request.equipment_available {
        let _ = writeln!(prompt, "Available equipment: {}", equipment.join(", "));
    }
    if let Some(notes) = &request.notes {
        let _ = writeln!(prompt, "Trainer notes: {notes}");
    }
    prompt.push('\n');
}
