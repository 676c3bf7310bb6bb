// src/patterns/mod.rs
//! Ordered pattern tables for semantic component extraction
//!
//! Each table is a fixed, ordered list of (regex, label) pairs. Order is
//! part of the contract: the first matching entry wins, so earlier entries
//! take precedence over later ones that might also match. The tables are
//! compiled once and never mutated.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// An ordered list of (pattern, label) pairs for one component category.
pub struct PatternSet {
    entries: Vec<(Regex, &'static str)>,
}

impl PatternSet {
    fn new(table: &[(&str, &'static str)]) -> Self {
        let entries = table
            .iter()
            .map(|&(pattern, label)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("fixed pattern table entry must be a valid regex");
                (regex, label)
            })
            .collect();

        Self { entries }
    }

    /// Label of the first entry (in declared order) that matches anywhere
    /// in the text, or the empty string if none match.
    pub fn find_first(&self, text: &str) -> &'static str {
        self.entries
            .iter()
            .find(|(regex, _)| regex.is_match(text))
            .map(|&(_, label)| label)
            .unwrap_or("")
    }
}

/// When a directive's body is meant to apply.
pub static TRIGGER_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&[
        (r"\b(at start|conversation start|initially|first)\b", "conversation_start"),
        (r"\b(before responding|before output|before returning)\b", "pre_response"),
        (r"\b(after|once|when complete)\b", "post_action"),
        (r"\b(always|every time|for each message)\b", "every_message"),
        (r"\b(on user message|when user|if user asks)\b", "on_user_message"),
        (r"\b(on success|if succeeds|after successful)\b", "on_success"),
        (r"\b(on failure|if fails)\b", "on_failure"),
        (r"\b(if no match|when not found|if missing)\b", "on_miss"),
        (r"\b(if found|when matched|if exists)\b", "on_match"),
    ])
});

/// What the instruction asks the agent to do.
pub static ACTION_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&[
        (r"\b(load|fetch|retrieve|get|read)\b", "retrieve"),
        (r"\b(search|query|find|look up|check)\b", "search"),
        (r"\b(store|save|persist|write|remember)\b", "store"),
        (r"\b(create|make|add|new)\b", "create"),
        (r"\b(match|compare|check against|map to)\b", "match"),
        (r"\b(discover|figure out|get out?|determine)\b", "discover"),
        (r"\b(use tools|call|invoke|execute)\b", "tool_call"),
        (r"\b(convert|transform|format|apply)\b", "transform"),
    ])
});

/// Guard condition attached to the instruction, if any.
pub static CONDITION_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&[
        (r"\bif exists\b|\bwhen present\b", "existence_positive"),
        (r"\bif not\b|\bif no\b|\bif missing\b|\bwhen absent\b", "existence_negative"),
        (r"\bif matches?\b|equals?", "equality"),
        (r"\bcontains?|includes?|has\b", "containment"),
    ])
});

/// What the instruction operates on.
pub static OBJECT_PATTERNS: Lazy<PatternSet> = Lazy::new(|| {
    PatternSet::new(&[
        (r"\bdomain|topic|namespace\b", "domain"),
        (r"\broute|path|paths\b", "route"),
        (r"\bmemory|stored|saved\b", "memory"),
        (r"\bpreference|settings?\b", "preference"),
        (r"\bkeyword|trigger word\b", "keyword"),
        (r"\bresult|answer|response|output\b", "result"),
    ])
});
