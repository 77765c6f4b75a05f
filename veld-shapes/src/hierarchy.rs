//! Class hierarchy derived from `rdfs:subClassOf` declarations
//!
//! The vocabulary graph stores the relationship child-side (Dog subClassOf
//! Animal); this module inverts it into a parent -> children map so subclass
//! traversal becomes a lookup plus BFS.

use std::collections::{HashMap, HashSet, VecDeque};

use veld_core::Graph;

use crate::shape;

/// Static empty slice for classes without subclasses
static EMPTY: &[String] = &[];

/// Parent -> direct children index over class-shape declarations.
///
/// Built once per vocabulary snapshot; traversals handle cycles gracefully
/// (no infinite loops).
#[derive(Debug, Default)]
pub struct ClassHierarchy {
    children: HashMap<String, Vec<String>>,
}

impl ClassHierarchy {
    /// Build the hierarchy by inverting every `rdfs:subClassOf` edge in the
    /// vocabulary graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        for node in graph.iter() {
            for parent in shape::super_classes(node) {
                children
                    .entry(parent.to_string())
                    .or_default()
                    .push(node.id.clone());
            }
        }
        Self { children }
    }

    /// Direct subclasses of `class` (immediate children only).
    pub fn direct_subclasses_of(&self, class: &str) -> &[String] {
        self.children
            .get(class)
            .map(|v| v.as_slice())
            .unwrap_or(EMPTY)
    }

    /// All descendants of `class` (subclasses, transitively), via BFS.
    ///
    /// Does NOT include `class` itself, even when reachable through a cycle.
    pub fn descendants_of(&self, class: &str) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        let mut result: Vec<String> = Vec::new();

        visited.insert(class);

        if let Some(children) = self.children.get(class) {
            for child in children {
                if visited.insert(child) {
                    queue.push_back(child);
                    result.push(child.clone());
                }
            }
        }

        while let Some(current) = queue.pop_front() {
            if let Some(children) = self.children.get(current) {
                for child in children {
                    if visited.insert(child) {
                        queue.push_back(child);
                        result.push(child.clone());
                    }
                }
            }
        }

        result
    }

    /// Whether no subclass relationships were declared at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
