// src/codegen/mod.rs
//! Renders classified instructions into imperative directive blocks
//!
//! Each kind maps to a fixed template: an upper-case contextual header
//! followed by imperative body text with explicit compliance markers.
//! Unknown instructions render as a visible passthrough instead of being
//! dropped.

use crate::classifier::InstructionKind;
use crate::Instruction;

/// Render one instruction into its directive block.
pub fn render_directive(instruction: &Instruction) -> String {
    let components = &instruction.components;
    let object = if components.object.is_empty() {
        "data"
    } else {
        components.object.as_str()
    };

    match instruction.kind {
        InstructionKind::Lookup => format!(
            "AT THE START OF EVERY CONVERSATION:\n\
             Search memory for \"{object}:*\" and load all results. \
             YOU MUST do this before anything else."
        ),
        InstructionKind::Match => format!(
            "WHEN THE USER SENDS A MESSAGE:\n\
             First, match their query against the loaded {object} keywords. \
             DO NOT SKIP THIS STEP."
        ),
        InstructionKind::Discover => "IF NO MATCH IS FOUND:\n\
             You MUST DISCOVER the answer using available tools. \
             Determine which tool fits and invoke it."
            .to_string(),
        InstructionKind::Store => "AFTER SUCCESSFUL DISCOVERY:\n\
             Store what worked. Save the route with its tool, parameters, query, \
             and keywords from the user's question. THIS STEP IS MANDATORY."
            .to_string(),
        InstructionKind::Apply => "BEFORE RESPONDING:\n\
             Check for any output preferences (e.g., units) and apply them to the answer. \
             DO NOT SKIP."
            .to_string(),
        InstructionKind::Gate => {
            let condition = if components.condition.is_empty() {
                "some condition"
            } else {
                components.condition.as_str()
            };
            format!(
                "IF {}:\nProceed with next step. OTHERWISE, skip.",
                condition.to_uppercase()
            )
        }
        InstructionKind::Unknown => {
            format!("# UNKNOWN INSTRUCTION: {}", instruction.original)
        }
    }
}
