//! Segment trie used by [`Router`](super::Router).
//!
//! Each node represents one position in a path and has:
//! - static children keyed by the literal segment (exact string equality)
//! - at most one dynamic child shared by every `:param` declared at that
//!   position, reached through an ordered list of `(name, constraint)` edges
//! - the routes whose whole pattern ends at this node ("bindings")
//!
//! Routes that share a prefix but spell the parameter differently
//! (`users/:id` and `users/:name/posts`) fold onto the same dynamic child.
//! Every declaration appends its own edge, and dispatch tries the edges in
//! insertion order, so the first declared constraint that accepts a segment
//! decides the parameter name.
//!
//! Lookup never backtracks: a static match is taken whenever one exists, and
//! the walk does not revisit a level once it has descended.

use http::Method;
use std::collections::HashMap;
use std::sync::Arc;

use super::constraint::Constraint;
use super::core::{get_param, set_param, ParamVec};
use super::segments::param_name;
use crate::declaration::Extra;

/// One way of entering a node's dynamic child.
#[derive(Debug, Clone)]
pub(crate) struct DynamicEdge {
    pub name: Arc<str>,
    pub constraint: Constraint,
}

/// A fully declared route stored at the node its pattern ends on.
#[derive(Debug)]
pub(crate) struct Binding<H> {
    /// Position of the declaration in the build input
    pub index: usize,
    /// Path pattern as declared
    pub pattern: Arc<str>,
    pub method: Method,
    pub handler: Arc<H>,
    pub constraints: Vec<(Arc<str>, Constraint)>,
    pub extra: Arc<Extra>,
}

impl<H> Binding<H> {
    /// Every constrained parameter must be bound and accepted by its pattern.
    fn accepts(&self, params: &ParamVec) -> bool {
        self.constraints.iter().all(|(name, constraint)| {
            get_param(params, name).is_some_and(|value| constraint.is_match(value))
        })
    }
}

#[derive(Debug)]
pub(crate) struct TrieNode<H> {
    static_children: HashMap<String, TrieNode<H>>,
    dynamic_child: Option<Box<TrieNode<H>>>,
    dynamic_edges: Vec<DynamicEdge>,
    bindings: Vec<Binding<H>>,
}

impl<H> TrieNode<H> {
    pub fn new() -> Self {
        Self {
            static_children: HashMap::new(),
            dynamic_child: None,
            dynamic_edges: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Insert a route whose pattern splits into `segments`.
    ///
    /// Edge constraints for dynamic segments come from the binding's own
    /// constraints; parameters without one accept any value.
    pub fn insert(&mut self, segments: &[&str], binding: Binding<H>) {
        let mut node = self;
        for segment in segments {
            node = node.child_for_insert(segment, &binding.constraints);
        }
        node.bindings.push(binding);
    }

    fn child_for_insert(
        &mut self,
        segment: &str,
        constraints: &[(Arc<str>, Constraint)],
    ) -> &mut TrieNode<H> {
        if !self.static_children.contains_key(segment) {
            if let Some(name) = param_name(segment) {
                let constraint = constraints
                    .iter()
                    .find(|(declared, _)| declared.as_ref() == name)
                    .map(|(_, c)| c.clone())
                    .unwrap_or_else(Constraint::any);
                // The first edge creates the child, later ones reuse it.
                self.dynamic_edges.push(DynamicEdge {
                    name: Arc::from(name),
                    constraint,
                });
                return self
                    .dynamic_child
                    .get_or_insert_with(|| Box::new(TrieNode::new()));
            }
        }
        self.static_children
            .entry(segment.to_string())
            .or_insert_with(TrieNode::new)
    }

    /// Walk `segments` from this node, binding parameters along the way.
    ///
    /// Returns the node reached after the last segment, or `None` at the
    /// first level where neither a static child nor any dynamic edge applies.
    pub fn walk(&self, segments: &[&str], params: &mut ParamVec) -> Option<&TrieNode<H>> {
        let mut node = self;
        for segment in segments {
            if let Some(child) = node.static_children.get(*segment) {
                node = child;
                continue;
            }
            let child = node.dynamic_child.as_deref()?;
            let edge = node
                .dynamic_edges
                .iter()
                .find(|edge| edge.constraint.is_match(segment))?;
            set_param(params, &edge.name, segment);
            node = child;
        }
        Some(node)
    }

    /// First binding (in declaration order) for `method` whose constraints
    /// all accept the bound parameters.
    pub fn select(&self, method: &Method, params: &ParamVec) -> Option<&Binding<H>> {
        self.bindings
            .iter()
            .find(|binding| binding.method == *method && binding.accepts(params))
    }

    /// Append an indented rendering of this subtree to `out`.
    pub fn render(&self, label: &str, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(label);
        for binding in &self.bindings {
            out.push_str(&format!(
                " [{} #{} {}]",
                binding.method, binding.index, binding.pattern
            ));
        }
        out.push('\n');

        let mut keys: Vec<&String> = self.static_children.keys().collect();
        keys.sort();
        for key in keys {
            if let Some(child) = self.static_children.get(key) {
                let label = if key.is_empty() { "\"\"" } else { key.as_str() };
                child.render(label, depth + 1, out);
            }
        }

        if let Some(child) = &self.dynamic_child {
            let edges: Vec<String> = self
                .dynamic_edges
                .iter()
                .map(|edge| format!(":{}({})", edge.name, edge.constraint.as_str()))
                .collect();
            child.render(&edges.join(" | "), depth + 1, out);
        }
    }

    #[cfg(test)]
    pub fn static_child(&self, segment: &str) -> Option<&TrieNode<H>> {
        self.static_children.get(segment)
    }

    #[cfg(test)]
    pub fn dynamic(&self) -> Option<(&TrieNode<H>, &[DynamicEdge])> {
        self.dynamic_child
            .as_deref()
            .map(|child| (child, self.dynamic_edges.as_slice()))
    }

    #[cfg(test)]
    pub fn bindings(&self) -> &[Binding<H>] {
        &self.bindings
    }
}
