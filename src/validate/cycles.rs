//! Circular reference detection among input objects and interfaces.
//!
//! Only strict edges take part: a non-null, non-list field whose type is in
//! the same category, or an interface's `implements` entry. A loop with any
//! nullable or list edge has a way out and is allowed.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::trace;

use super::SchemaChecker;
use crate::hir::codes;
use crate::schema::{TypeBody, TypeDefinition};

type Graph<'a> = IndexMap<&'a str, Vec<&'a str>>;

impl<'a> SchemaChecker<'a> {
    pub(super) fn check_cycles(&mut self) {
        let graph = self.strict_graph();
        let mut reported: FxHashSet<Vec<&str>> = FxHashSet::default();
        for cycle in elementary_cycles(&graph) {
            let mut members = cycle.clone();
            members.sort_unstable();
            if !reported.insert(members) {
                continue;
            }
            let mut chain = cycle.clone();
            chain.push(cycle[0]);
            let location = self.lookup(cycle[0]).and_then(|t| t.location.clone());
            self.diagnostics.error(
                codes::CIRCULAR_REFERENCE,
                format!(
                    "Circular non-null reference: {}; make at least one field nullable",
                    chain.join(" -> ")
                ),
                location,
            );
        }
    }

    fn strict_graph(&self) -> Graph<'a> {
        let schema = self.schema;
        let mut graph = Graph::new();
        for definition in &schema.types {
            let edges = match &definition.body {
                TypeBody::Input { fields } => fields
                    .iter()
                    .filter(|f| !f.ty.nullable && !f.ty.is_list())
                    .map(|f| f.ty.named_type().as_str())
                    .filter(|name| self.lookup(name).is_some_and(is_input))
                    .collect(),
                TypeBody::Interface { interfaces, .. } => {
                    let mut edges: Vec<&str> = interfaces.iter().map(|i| i.as_str()).collect();
                    edges.extend(
                        self.fields_of(definition)
                            .into_iter()
                            .filter(|f| !f.ty.nullable && !f.ty.is_list())
                            .map(|f| f.ty.named_type().as_str())
                            .filter(|name| self.lookup(name).is_some_and(TypeDefinition::is_interface)),
                    );
                    edges
                }
                _ => continue,
            };
            trace!("[VALIDATE] strict edges {} -> {:?}", definition.name, edges);
            graph.insert(definition.name.as_str(), edges);
        }
        graph
    }
}

fn is_input(definition: &TypeDefinition) -> bool {
    matches!(definition.body, TypeBody::Input { .. })
}

/// Every elementary cycle, each starting at its alphabetically first member.
///
/// A search from each node only passes through nodes ordered after it, so a
/// cycle is found once, from its smallest member.
fn elementary_cycles<'a>(graph: &Graph<'a>) -> Vec<Vec<&'a str>> {
    let mut starts: Vec<&str> = graph.keys().copied().collect();
    starts.sort_unstable();
    let mut found = Vec::new();
    for start in starts {
        let mut path = vec![start];
        let mut on_path = FxHashSet::default();
        on_path.insert(start);
        extend(start, graph, &mut path, &mut on_path, &mut found);
    }
    found
}

fn extend<'a>(
    start: &'a str,
    graph: &Graph<'a>,
    path: &mut Vec<&'a str>,
    on_path: &mut FxHashSet<&'a str>,
    found: &mut Vec<Vec<&'a str>>,
) {
    let Some(&node) = path.last() else {
        return;
    };
    for &next in graph.get(node).map(Vec::as_slice).unwrap_or_default() {
        if next == start {
            found.push(path.clone());
        } else if next > start && on_path.insert(next) {
            path.push(next);
            extend(start, graph, path, on_path, found);
            path.pop();
            on_path.remove(next);
        }
    }
}
