// src/graph/mod.rs
//! Dependency graph over instruction ids and the deterministic topological
//! sort that linearizes it
//!
//! An edge `u -> v` means v depends on u: u must appear earlier in the
//! final order. Edges come from two sources: the type-dependency table
//! (every instruction of a required kind must precede the requiring one)
//! and sequential edges that preserve authored order wherever the type
//! table is silent. A sequential edge is only added when it does not
//! contradict the structural edges, so the graph stays acyclic as built;
//! a cycle can still be forced through `add_edge` and is a hard error.

use crate::classifier::InstructionKind;
use crate::{CompileError, Instruction};

use ahash::{HashMap, HashSet};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Directed dependency graph over instruction ids `0..len`.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    kinds: Vec<InstructionKind>,
    edges: HashMap<usize, HashSet<usize>>,
}

impl DependencyGraph {
    /// Empty graph over the given instruction kinds; node ids are the
    /// indices into `kinds`.
    pub fn new(kinds: Vec<InstructionKind>) -> Self {
        Self {
            kinds,
            edges: HashMap::default(),
        }
    }

    /// Build the graph for a parsed instruction sequence.
    pub fn build(instructions: &[Instruction]) -> Self {
        let mut graph = Self::new(instructions.iter().map(|i| i.kind).collect());

        // Type-level prerequisite edges: every instruction of a required
        // kind must precede the requiring instruction.
        for instruction in instructions {
            for &required in instruction.kind.prerequisites() {
                for provider in instructions.iter() {
                    if provider.kind == required && provider.id != instruction.id {
                        graph.add_edge(provider.id, instruction.id);
                    }
                }
            }
        }

        // Sequential edges keep the authored order, but only where they
        // are consistent with the structural edges already in place.
        for id in 1..instructions.len() {
            if !graph.has_path(id, id - 1) {
                graph.add_edge(id - 1, id);
            }
        }

        graph
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Record that `after` depends on `before`. Duplicate edges collapse.
    pub fn add_edge(&mut self, before: usize, after: usize) {
        assert!(
            before < self.kinds.len() && after < self.kinds.len(),
            "edge endpoints must be valid instruction ids"
        );
        self.edges.entry(before).or_default().insert(after);
    }

    pub fn has_edge(&self, before: usize, after: usize) -> bool {
        self.edges
            .get(&before)
            .is_some_and(|dependents| dependents.contains(&after))
    }

    /// All edges as `(before, after)` pairs, unordered.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .flat_map(|(&before, dependents)| dependents.iter().map(move |&after| (before, after)))
    }

    fn has_path(&self, from: usize, to: usize) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::default();

        while let Some(node) = stack.pop() {
            if node == to {
                return true;
            }
            if !seen.insert(node) {
                continue;
            }
            if let Some(dependents) = self.edges.get(&node) {
                stack.extend(dependents.iter().copied());
            }
        }

        false
    }

    /// Kahn-style elimination producing one total order consistent with
    /// every edge. Among simultaneously ready nodes, the one minimizing
    /// `(priority(kind), id)` is emitted first, so the result is
    /// deterministic and follows the canonical phase ordering.
    pub fn topological_sort(&self) -> Result<Vec<usize>, CompileError> {
        let node_count = self.kinds.len();

        let mut unresolved = vec![0usize; node_count];
        for dependents in self.edges.values() {
            for &after in dependents {
                unresolved[after] += 1;
            }
        }

        let mut ready = BinaryHeap::new();
        for id in 0..node_count {
            if unresolved[id] == 0 {
                ready.push(Reverse((self.kinds[id].priority(), id)));
            }
        }

        let mut order = Vec::with_capacity(node_count);
        while let Some(Reverse((_, id))) = ready.pop() {
            order.push(id);

            if let Some(dependents) = self.edges.get(&id) {
                for &after in dependents {
                    unresolved[after] -= 1;
                    if unresolved[after] == 0 {
                        ready.push(Reverse((self.kinds[after].priority(), after)));
                    }
                }
            }
        }

        if order.len() != node_count {
            let emitted: HashSet<usize> = order.iter().copied().collect();
            let mut remaining: Vec<usize> =
                (0..node_count).filter(|id| !emitted.contains(id)).collect();
            remaining.sort_unstable();
            return Err(CompileError::CircularDependency { remaining });
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::InstructionKind::{Gate, Store, Unknown};
    use crate::parser;

    #[test]
    fn test_structural_edges_from_prerequisites() {
        // Lookup(0), Match(1): Match requires Lookup
        let instructions = parser::parse("retrieve memory. match it against keywords");
        let graph = DependencyGraph::build(&instructions);

        assert!(graph.has_edge(0, 1));
        assert_eq!(graph.topological_sort().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_sequential_edge_without_structural_dependency() {
        let graph = DependencyGraph::build(&parser::parse("alpha step. beta step"));
        assert!(graph.has_edge(0, 1));
    }

    #[test]
    fn test_contradicting_sequential_edge_is_skipped() {
        // Match(0) requires Lookup(1): the structural edge 1 -> 0 wins and
        // the sequential edge 0 -> 1 would close a cycle.
        let instructions = parser::parse("match it against keywords. retrieve memory");
        let graph = DependencyGraph::build(&instructions);

        assert!(graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 1));
        assert_eq!(graph.topological_sort().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut graph = DependencyGraph::new(vec![Unknown, Unknown]);
        graph.add_edge(0, 1);
        graph.add_edge(0, 1);

        assert_eq!(graph.edges().count(), 1);
        assert_eq!(graph.topological_sort().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_every_edge_respected_in_order() {
        let instructions = parser::parse(
            "save the route; determine the answer with available tools; match it against domain keywords",
        );
        let graph = DependencyGraph::build(&instructions);
        let order = graph.topological_sort().unwrap();

        let position = |id: usize| order.iter().position(|&n| n == id).unwrap();
        for (before, after) in graph.edges() {
            assert!(
                position(before) < position(after),
                "edge {} -> {} violated by order {:?}",
                before,
                after,
                order
            );
        }
    }

    #[test]
    fn test_priority_tie_break() {
        // Store(0) and Gate(1) are both ready with no edges; Gate has the
        // lower priority rank and goes first despite the higher id.
        let graph = DependencyGraph::new(vec![Store, Gate]);
        assert_eq!(graph.topological_sort().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_id_tie_break_within_same_priority() {
        let graph = DependencyGraph::new(vec![Gate, Gate, Gate]);
        assert_eq!(graph.topological_sort().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = DependencyGraph::new(vec![Unknown, Unknown, Unknown]);
        graph.add_edge(0, 1);
        graph.add_edge(1, 0);

        match graph.topological_sort() {
            Err(CompileError::CircularDependency { remaining }) => {
                assert_eq!(remaining, vec![0, 1]);
            }
            other => panic!("expected CircularDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::new(Vec::new());
        assert!(graph.is_empty());
        assert_eq!(graph.topological_sort().unwrap(), Vec::<usize>::new());
    }
}
