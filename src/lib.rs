// src/lib.rs
//! # Behavioral Instruction Compiler
//!
//! Compiles free-form natural-language behavioral instructions into an
//! ordered sequence of imperative directive blocks for a downstream
//! language-driven agent to obey.
//!
//! The pipeline: raw text is split into instruction fragments, semantic
//! components are extracted from each fragment via ordered pattern tables,
//! each fragment is classified into one instruction kind, a dependency
//! graph derives the canonical execution order, a deterministic topological
//! sort linearizes it, and fixed templates render the final directive text.
//!
//! ## Example
//!
//! ```rust
//! use behavioral_compiler::BehavioralCompiler;
//!
//! let compiler = BehavioralCompiler::new();
//! let directives = compiler
//!     .compile("At conversation start retrieve memory. When the user asks match it against keywords.")
//!     .unwrap();
//!
//! assert!(directives.starts_with("AT THE START OF EVERY CONVERSATION:"));
//! assert!(directives.contains("WHEN THE USER SENDS A MESSAGE:"));
//! ```

pub mod classifier;
pub mod codegen;
pub mod graph;
pub mod parser;
pub mod patterns;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use classifier::InstructionKind;
pub use graph::DependencyGraph;

/// Errors that can occur during compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Circular dependency detected among instructions {remaining:?}")]
    CircularDependency { remaining: Vec<usize> },
}

/// Semantic components extracted from one instruction fragment.
///
/// Each field is a label from the corresponding pattern table or empty when
/// nothing matched; `trigger` defaults to `every_message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    pub trigger: String,
    pub action: String,
    pub condition: String,
    pub object: String,
}

/// One parsed instruction fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Unique id, assigned in strictly increasing split order.
    pub id: usize,
    /// The verbatim text fragment.
    pub original: String,
    pub components: Components,
    /// Assigned once at parse time, immutable afterward.
    pub kind: InstructionKind,
}

/// Full result of one compile invocation, for callers who want to inspect
/// classification and ordering alongside the rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileReport {
    /// Parsed instructions in split (id) order.
    pub instructions: Vec<Instruction>,
    /// Emitted instruction ids in final directive order.
    pub order: Vec<usize>,
    /// The rendered directive text.
    pub output: String,
}

/// Compiler self-description metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CompilerInfo {
    pub name: &'static str,
    pub purpose: &'static str,
    pub input: &'static str,
    pub output: &'static str,
    pub version: &'static str,
}

impl fmt::Display for CompilerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Purpose: {}", self.purpose)?;
        writeln!(f, "Input: {}", self.input)?;
        writeln!(f, "Output: {}", self.output)?;
        write!(f, "Version: {}", self.version)
    }
}

/// Compiler facade: text in, directive text out.
///
/// All tables are immutable process-wide configuration; per-call state
/// (instruction ids, the dependency graph) is local to each compile
/// invocation, so separate invocations share nothing mutable and may run
/// concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct BehavioralCompiler;

impl BehavioralCompiler {
    pub fn new() -> Self {
        Self
    }

    /// Compile raw instruction text into directive blocks joined with a
    /// blank line.
    ///
    /// Fails only on a dependency contradiction; everything else degrades
    /// gracefully (unmatched components stay empty, unclassifiable
    /// fragments render as visible passthroughs).
    pub fn compile(&self, text: &str) -> Result<String, CompileError> {
        Ok(self.compile_report(text)?.output)
    }

    /// Compile and return the inspectable form: parsed instructions, the
    /// emitted order, and the rendered output.
    pub fn compile_report(&self, text: &str) -> Result<CompileReport, CompileError> {
        let instructions = parser::parse(text);

        let graph = DependencyGraph::build(&instructions);
        let order = graph.topological_sort()?;

        let output = order
            .iter()
            .map(|&id| codegen::render_directive(&instructions[id]))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(CompileReport {
            instructions,
            order,
            output,
        })
    }

    /// Self-description of the compiler.
    pub fn info(&self) -> CompilerInfo {
        CompilerInfo {
            name: "BehavioralInstructionCompiler",
            purpose: "Transform behavioral instructions into imperative directives that the model will follow.",
            input: "Natural language behavioral instructions (plain text).",
            output: "Plain-text ordered imperative steps using mandatory language. The format is a series of commands the model must execute, not merely data it knows.",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Compile raw instruction text with a default compiler.
pub fn compile(text: &str) -> Result<String, CompileError> {
    BehavioralCompiler::new().compile(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_joins_blocks_with_blank_line() {
        let output = compile("retrieve memory. match it against keywords").unwrap();
        let blocks: Vec<&str> = output.split("\n\n").collect();

        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("AT THE START OF EVERY CONVERSATION:"));
        assert!(blocks[1].starts_with("WHEN THE USER SENDS A MESSAGE:"));
    }

    #[test]
    fn test_compile_empty_input() {
        assert_eq!(compile("").unwrap(), "");
        assert_eq!(compile(" ;;; ").unwrap(), "");
    }

    #[test]
    fn test_report_order_matches_output() {
        let report = BehavioralCompiler::new()
            .compile_report("save the route; match it against keywords")
            .unwrap();

        assert_eq!(report.instructions.len(), 2);
        assert_eq!(report.order.len(), 2);

        let rendered: Vec<String> = report
            .order
            .iter()
            .map(|&id| codegen::render_directive(&report.instructions[id]))
            .collect();
        assert_eq!(report.output, rendered.join("\n\n"));
    }

    #[test]
    fn test_report_serde_round_trip() {
        let report = BehavioralCompiler::new()
            .compile_report("retrieve memory. determine the answer with available tools")
            .unwrap();

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"LOOKUP\""));

        let decoded: CompileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, report);
    }

    #[test]
    fn test_info_display_format() {
        let info = BehavioralCompiler::new().info();
        let text = info.to_string();

        assert!(text.starts_with("Name: BehavioralInstructionCompiler\n"));
        assert!(text.contains("Purpose: "));
        assert!(text.contains("Input: "));
        assert!(text.contains("Output: "));
        assert!(text.ends_with(&format!("Version: {}", env!("CARGO_PKG_VERSION"))));
    }
}
