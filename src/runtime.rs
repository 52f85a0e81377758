//! Runtime vocabulary: names and phantom tags exported by the runtime module.
//!
//! Declarations mark scalars, metadata and operations by referring to symbols
//! from the runtime module. Metadata is carried by intersecting a type with an
//! object holding a hidden (`" $"`-prefixed) property; these keys are listed
//! here so the extractor and the in-memory checker agree on them.

/// Field metadata: `{ directives?, defaultValue? }`.
pub const FIELD_META: &str = " $fieldMeta";
/// Object metadata: `{ implements?, directives? }`.
pub const OBJECT_META: &str = " $objectMeta";
/// Interface metadata: `{ implements?, directives? }`.
pub const INTERFACE_META: &str = " $interfaceMeta";
/// Custom scalar tag: `{ name, only? }`.
pub const SCALAR_META: &str = " $scalar";
/// Directive name literal.
pub const DIRECTIVE_NAME: &str = " $directiveName";
/// Directive argument shape.
pub const DIRECTIVE_ARGS: &str = " $directiveArgs";
/// Directive location literal(s).
pub const DIRECTIVE_LOCATIONS: &str = " $directiveLocations";

/// Keys inside metadata objects.
pub const META_DIRECTIVES: &str = "directives";
pub const META_DEFAULT_VALUE: &str = "defaultValue";
pub const META_IMPLEMENTS: &str = "implements";
pub const SCALAR_NAME: &str = "name";
pub const SCALAR_ONLY: &str = "only";

/// Brand names mapped to built-in GraphQL scalars.
pub const BRAND_SCALARS: [(&str, &str); 4] = [
    ("IDString", "ID"),
    ("IDNumber", "ID"),
    ("Int", "Int"),
    ("Float", "Float"),
];

/// Wrappers whose meaning is carried structurally (resolved through their alias).
pub const WRAPPERS: [&str; 5] = [
    "GqlField",
    "GqlObject",
    "GqlInterface",
    "GqlScalar",
    "GqlDirective",
];

/// Marker for an empty argument list.
pub const NO_ARGS: &str = "NoArgs";

/// Value-level markers produced by the operation-defining functions.
pub const QUERY_MARKER: &str = "QueryResolver";
pub const MUTATION_MARKER: &str = "MutationResolver";
pub const FIELD_MARKER: &str = "FieldResolver";

/// Suffix of legacy resolver shape names (`QueryResolver`, `UserResolver`).
pub const LEGACY_RESOLVER_SUFFIX: &str = "Resolver";

/// The operation category an operation marker stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationMarker {
    Query,
    Mutation,
    Field,
}

/// What a symbol from the runtime module means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeSymbol {
    /// Brand mapped to a built-in scalar name.
    Brand(&'static str),
    /// Transparent wrapper; resolve through its alias.
    Wrapper,
    NoArgs,
    Operation(OperationMarker),
    /// Not part of the known vocabulary.
    Unknown,
}

/// Classify a symbol name exported by the runtime module.
pub fn classify(name: &str) -> RuntimeSymbol {
    if let Some((_, scalar)) = BRAND_SCALARS.iter().find(|(brand, _)| *brand == name) {
        return RuntimeSymbol::Brand(scalar);
    }
    if WRAPPERS.contains(&name) {
        return RuntimeSymbol::Wrapper;
    }
    match name {
        NO_ARGS => RuntimeSymbol::NoArgs,
        QUERY_MARKER => RuntimeSymbol::Operation(OperationMarker::Query),
        MUTATION_MARKER => RuntimeSymbol::Operation(OperationMarker::Mutation),
        FIELD_MARKER => RuntimeSymbol::Operation(OperationMarker::Field),
        _ => RuntimeSymbol::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("IDString"), RuntimeSymbol::Brand("ID"));
        assert_eq!(classify("Int"), RuntimeSymbol::Brand("Int"));
        assert_eq!(classify("GqlField"), RuntimeSymbol::Wrapper);
        assert_eq!(classify("NoArgs"), RuntimeSymbol::NoArgs);
        assert_eq!(
            classify("FieldResolver"),
            RuntimeSymbol::Operation(OperationMarker::Field)
        );
        assert_eq!(classify("Decimal"), RuntimeSymbol::Unknown);
    }
}
