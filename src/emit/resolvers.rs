//! Resolver map document.

use serde_json::{Map, Value, json};

use crate::hir::ImplementationRef;
use crate::integrate::ResolverMap;

/// `{ "Type": { "field": { "module", "export", "property"? } } }`, keys in
/// name order.
pub fn resolver_map_json(resolvers: &ResolverMap) -> Value {
    let mut targets = Map::new();
    for (target, fields) in resolvers.iter() {
        let entries: Map<String, Value> = fields
            .iter()
            .map(|(field, implementation)| (field.to_string(), implementation_json(implementation)))
            .collect();
        targets.insert(target.to_string(), Value::Object(entries));
    }
    Value::Object(targets)
}

fn implementation_json(implementation: &ImplementationRef) -> Value {
    let mut node = json!({
        "module": implementation.module,
        "export": implementation.export.as_str(),
    });
    if let (Some(property), Value::Object(map)) = (&implementation.property, &mut node) {
        map.insert("property".to_string(), Value::String(property.to_string()));
    }
    node
}
