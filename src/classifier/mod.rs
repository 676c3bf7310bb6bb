// src/classifier/mod.rs
//! Classification of component bundles into instruction kinds
//!
//! The classifier is an ordered cascade of (predicate, kind) rules; the
//! first satisfied rule wins. Precedence is part of the contract, so the
//! rules live in an explicit list rather than nested branches.

use crate::Components;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of instruction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstructionKind {
    Lookup,
    Match,
    Discover,
    Store,
    Apply,
    Gate,
    Unknown,
}

impl InstructionKind {
    /// Kinds that must be ordered before this one (the type-dependency
    /// table).
    pub fn prerequisites(self) -> &'static [InstructionKind] {
        match self {
            InstructionKind::Match => &[InstructionKind::Lookup],
            InstructionKind::Discover => &[InstructionKind::Match],
            InstructionKind::Store => &[InstructionKind::Discover],
            InstructionKind::Apply => &[InstructionKind::Match, InstructionKind::Discover],
            InstructionKind::Lookup | InstructionKind::Gate | InstructionKind::Unknown => &[],
        }
    }

    /// Tie-break rank used by the topological sorter: lookups before
    /// matching before gating before discovery before storing before
    /// applying.
    pub fn priority(self) -> u8 {
        match self {
            InstructionKind::Lookup => 1,
            InstructionKind::Match => 2,
            InstructionKind::Gate => 3,
            InstructionKind::Discover => 4,
            InstructionKind::Store => 5,
            InstructionKind::Apply => 6,
            InstructionKind::Unknown => 7,
        }
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructionKind::Lookup => "LOOKUP",
            InstructionKind::Match => "MATCH",
            InstructionKind::Discover => "DISCOVER",
            InstructionKind::Store => "STORE",
            InstructionKind::Apply => "APPLY",
            InstructionKind::Gate => "GATE",
            InstructionKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

type Predicate = fn(&Components) -> bool;

/// Classification rules in precedence order. Evaluated top to bottom; the
/// first satisfied predicate determines the kind.
static RULES: &[(Predicate, InstructionKind)] = &[
    (is_memory_lookup, InstructionKind::Lookup),
    (is_keyword_match, InstructionKind::Match),
    (is_discovery, InstructionKind::Discover),
    (is_persistence, InstructionKind::Store),
    (is_transformation, InstructionKind::Apply),
    (is_gated, InstructionKind::Gate),
];

fn is_memory_lookup(c: &Components) -> bool {
    matches!(c.action.as_str(), "retrieve" | "search" | "load" | "get") && c.object == "memory"
}

fn is_keyword_match(c: &Components) -> bool {
    c.action == "match"
        || (matches!(c.action.as_str(), "compare" | "map")
            && matches!(c.object.as_str(), "domain" | "route"))
}

fn is_discovery(c: &Components) -> bool {
    matches!(c.action.as_str(), "discover" | "tool_call")
}

fn is_persistence(c: &Components) -> bool {
    matches!(c.action.as_str(), "store" | "create")
}

fn is_transformation(c: &Components) -> bool {
    c.action == "transform"
}

fn is_gated(c: &Components) -> bool {
    !c.condition.is_empty()
}

/// Map a component bundle to exactly one instruction kind.
///
/// When no rule fires, the trigger decides; a trigger outside the fallback
/// map yields `Unknown`, which renders as a visible passthrough rather than
/// an error.
pub fn classify(components: &Components) -> InstructionKind {
    for (applies, kind) in RULES {
        if applies(components) {
            return *kind;
        }
    }

    match components.trigger.as_str() {
        "conversation_start" => InstructionKind::Lookup,
        "on_miss" => InstructionKind::Discover,
        "on_success" => InstructionKind::Store,
        "pre_response" => InstructionKind::Apply,
        _ => InstructionKind::Unknown,
    }
}
