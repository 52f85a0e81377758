//! Reachability pruning.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use super::{ResolverMap, SchemaDocument};
use crate::hir::ROOT_TYPE_NAMES;
use crate::schema::TypeBody;

/// Remove types unreachable from the roots and directive arguments.
/// Custom scalars always stay.
pub(super) fn prune_unreachable(document: &mut SchemaDocument, resolvers: &mut ResolverMap) {
    let reachable = reachable_types(document);

    let before = document.types.len();
    document.types.retain(|t| {
        reachable.contains(&t.name) || matches!(t.body, TypeBody::Scalar { .. })
    });
    let kept: FxHashSet<SmolStr> = document.types.iter().map(|t| t.name.clone()).collect();
    document.extensions.retain(|e| kept.contains(&e.target));
    let orphaned: Vec<SmolStr> = resolvers
        .targets()
        .filter(|t| !kept.contains(*t))
        .cloned()
        .collect();
    for target in &orphaned {
        resolvers.remove_target(target);
    }
    debug!(
        "[INTEGRATE] pruned {} unreachable types",
        before - document.types.len()
    );
}

fn reachable_types(document: &SchemaDocument) -> FxHashSet<SmolStr> {
    let mut queue: VecDeque<SmolStr> = ROOT_TYPE_NAMES
        .iter()
        .filter(|root| document.get(root).is_some())
        .map(|root| SmolStr::new(root))
        .collect();
    for directive in &document.directives {
        queue.extend(directive.arguments.iter().map(|a| a.ty.named_type().clone()));
    }

    let mut reachable = FxHashSet::default();
    while let Some(name) = queue.pop_front() {
        if !reachable.insert(name.clone()) {
            continue;
        }
        let Some(definition) = document.get(&name) else {
            continue;
        };
        for field in document.fields_of(&name) {
            queue.push_back(field.ty.named_type().clone());
            queue.extend(field.arguments.iter().map(|a| a.ty.named_type().clone()));
        }
        queue.extend(definition.interfaces().iter().cloned());
        match &definition.body {
            TypeBody::Union { members } => queue.extend(members.iter().cloned()),
            TypeBody::Input { fields } => {
                queue.extend(fields.iter().map(|f| f.ty.named_type().clone()))
            }
            TypeBody::Interface { .. } => queue.extend(
                document
                    .types
                    .iter()
                    .filter(|t| t.interfaces().contains(&name))
                    .map(|t| t.name.clone()),
            ),
            _ => {}
        }
    }
    reachable
}
