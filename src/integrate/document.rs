//! The integrated schema document and resolver table.

use std::collections::BTreeMap;

use smol_str::SmolStr;

use crate::hir::ImplementationRef;
use crate::schema::{SchemaDirective, SchemaField, TypeDefinition};

/// Fields added to a base type by operations.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeExtension {
    pub target: SmolStr,
    /// Sorted by name.
    pub fields: Vec<SchemaField>,
}

/// Base types plus the extensions merged onto them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SchemaDocument {
    /// Sorted by name; includes synthesized roots.
    pub types: Vec<TypeDefinition>,
    /// Sorted by target.
    pub extensions: Vec<TypeExtension>,
    pub directives: Vec<SchemaDirective>,
    pub has_query: bool,
    pub has_mutation: bool,
}

impl SchemaDocument {
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn extension(&self, target: &str) -> Option<&TypeExtension> {
        self.extensions.iter().find(|e| e.target == target)
    }

    /// Base fields followed by extension fields.
    pub fn fields_of(&self, name: &str) -> Vec<&SchemaField> {
        let base = self.get(name).map(TypeDefinition::fields).unwrap_or_default();
        let extra = self.extension(name).map(|e| e.fields.as_slice()).unwrap_or_default();
        base.iter().chain(extra).collect()
    }
}

/// `target type → field → implementation`, ordered by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolverMap {
    entries: BTreeMap<SmolStr, BTreeMap<SmolStr, ImplementationRef>>,
}

impl ResolverMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: SmolStr, field: SmolStr, implementation: ImplementationRef) {
        self.entries
            .entry(target)
            .or_default()
            .insert(field, implementation);
    }

    pub fn get(&self, target: &str, field: &str) -> Option<&ImplementationRef> {
        self.entries.get(target)?.get(field)
    }

    /// Drop every binding on `target`.
    pub fn remove_target(&mut self, target: &str) {
        self.entries.remove(target);
    }

    pub fn targets(&self) -> impl Iterator<Item = &SmolStr> {
        self.entries.keys()
    }

    /// Targets in name order with their fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &BTreeMap<SmolStr, ImplementationRef>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
