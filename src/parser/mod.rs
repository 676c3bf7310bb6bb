// src/parser/mod.rs
//! Splits raw instruction text into fragments and extracts semantic
//! components from each one
//!
//! Fragment order defines instruction id assignment for every downstream
//! stage.

use crate::classifier;
use crate::patterns;
use crate::{Components, Instruction};

use once_cell::sync::Lazy;
use regex::Regex;

static DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[;,.]\s*").expect("delimiter pattern must be a valid regex"));

/// Split raw text on sentence-level delimiters (semicolon, comma, period,
/// each followed by optional whitespace), trimming each piece and dropping
/// empty ones. The returned order defines instruction ids.
pub fn split_fragments(text: &str) -> Vec<&str> {
    DELIMITERS
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Extract the four semantic components from one fragment.
///
/// Unmatched categories yield empty labels, except `trigger` which defaults
/// to `every_message`.
pub fn extract_components(fragment: &str) -> Components {
    let mut components = Components {
        trigger: patterns::TRIGGER_PATTERNS.find_first(fragment).to_string(),
        action: patterns::ACTION_PATTERNS.find_first(fragment).to_string(),
        condition: patterns::CONDITION_PATTERNS.find_first(fragment).to_string(),
        object: patterns::OBJECT_PATTERNS.find_first(fragment).to_string(),
    };

    if components.trigger.is_empty() {
        components.trigger = "every_message".to_string();
    }

    components
}

/// Parse raw text into classified instructions, ids assigned in split order.
pub fn parse(text: &str) -> Vec<Instruction> {
    split_fragments(text)
        .into_iter()
        .enumerate()
        .map(|(id, fragment)| {
            let components = extract_components(fragment);
            let kind = classifier::classify(&components);

            Instruction {
                id,
                original: fragment.to_string(),
                components,
                kind,
            }
        })
        .collect()
}
