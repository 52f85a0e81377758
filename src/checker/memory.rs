//! In-memory type checker.
//!
//! Holds declarations whose shapes are given up front instead of parsed from
//! source. It implements alias substitution, re-export chains and the
//! `Pick`/`Omit`/`Partial`/`Required` transformations so that extraction can be
//! driven end to end without a real type-resolution service.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::TypeChecker;
use super::types::{
    Declaration, DeclarationForm, DocComment, EnumMemberDecl, LiteralValue, NamedType, Property,
    SymbolId, SymbolOrigin, TypeNode,
};
use crate::base::SourceLocation;
use crate::config::DEFAULT_RUNTIME_MODULE;
use crate::runtime;

/// Module path used for standard library symbols.
pub const LIB_MODULE: &str = "lib";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intrinsic {
    Pick,
    Omit,
    Partial,
    Required,
    Promise,
}

#[derive(Clone, Debug)]
enum Entry {
    Alias {
        params: Vec<String>,
        body: TypeNode,
    },
    Interface {
        properties: Vec<Property>,
    },
    Enum {
        members: Vec<EnumMemberDecl>,
    },
    Value {
        ty: TypeNode,
    },
    Intrinsic(Intrinsic),
    /// A symbol with no structure visible to the checker.
    Opaque,
    Reexport(SymbolId),
    /// Property or enum member symbol, only used for documentation.
    Member,
}

#[derive(Clone, Debug)]
struct SymbolData {
    name: String,
    module: String,
    entry: Entry,
    doc: Option<DocComment>,
    location: SourceLocation,
    exported: bool,
}

/// Symbols pre-registered for the standard library and the runtime module.
#[derive(Clone, Copy, Debug)]
struct Builtins {
    pick: SymbolId,
    omit: SymbolId,
    partial: SymbolId,
    required: SymbolId,
    promise: SymbolId,
    date: SymbolId,
    id_string: SymbolId,
    id_number: SymbolId,
    int: SymbolId,
    float: SymbolId,
    gql_field: SymbolId,
    gql_object: SymbolId,
    gql_interface: SymbolId,
    gql_scalar: SymbolId,
    gql_directive: SymbolId,
    no_args: SymbolId,
    query_resolver: SymbolId,
    mutation_resolver: SymbolId,
    field_resolver: SymbolId,
}

/// An in-memory [`TypeChecker`].
///
/// # Example
///
/// ```
/// use typegraph::checker::{MemoryChecker, Property, TypeChecker, TypeNode};
///
/// let mut checker = MemoryChecker::new();
/// let user = checker.add_alias(
///     "src/schema/user.ts",
///     "User",
///     TypeNode::object(vec![
///         Property::new("id", checker.id_string()),
///         Property::new("name", TypeNode::String),
///     ]),
/// );
/// let picked = checker.pick(checker.reference(user), &["name"]);
/// let props = checker.properties_of(&picked).unwrap();
/// assert_eq!(props.len(), 1);
/// assert_eq!(props[0].name, "name");
/// ```
#[derive(Clone, Debug)]
pub struct MemoryChecker {
    symbols: Vec<SymbolData>,
    lines: FxHashMap<String, u32>,
    runtime_module: String,
    builtins: Builtins,
}

impl Default for MemoryChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryChecker {
    /// Create a checker with the standard library and the default runtime module.
    pub fn new() -> Self {
        Self::with_runtime_module(DEFAULT_RUNTIME_MODULE)
    }

    /// Create a checker whose runtime symbols live in `module`.
    pub fn with_runtime_module(module: &str) -> Self {
        let placeholder = SymbolId::new(0);
        let mut checker = Self {
            symbols: Vec::new(),
            lines: FxHashMap::default(),
            runtime_module: module.to_string(),
            builtins: Builtins {
                pick: placeholder,
                omit: placeholder,
                partial: placeholder,
                required: placeholder,
                promise: placeholder,
                date: placeholder,
                id_string: placeholder,
                id_number: placeholder,
                int: placeholder,
                float: placeholder,
                gql_field: placeholder,
                gql_object: placeholder,
                gql_interface: placeholder,
                gql_scalar: placeholder,
                gql_directive: placeholder,
                no_args: placeholder,
                query_resolver: placeholder,
                mutation_resolver: placeholder,
                field_resolver: placeholder,
            },
        };
        checker.builtins = checker.register_builtins(module);
        checker
    }

    fn register_builtins(&mut self, rt: &str) -> Builtins {
        let pick = self.push(LIB_MODULE, "Pick", Entry::Intrinsic(Intrinsic::Pick), false);
        let omit = self.push(LIB_MODULE, "Omit", Entry::Intrinsic(Intrinsic::Omit), false);
        let partial = self.push(
            LIB_MODULE,
            "Partial",
            Entry::Intrinsic(Intrinsic::Partial),
            false,
        );
        let required = self.push(
            LIB_MODULE,
            "Required",
            Entry::Intrinsic(Intrinsic::Required),
            false,
        );
        let promise = self.push(
            LIB_MODULE,
            "Promise",
            Entry::Intrinsic(Intrinsic::Promise),
            false,
        );
        let date = self.push(LIB_MODULE, "Date", Entry::Opaque, false);

        let id_string = self.push(rt, "IDString", Entry::Opaque, true);
        let id_number = self.push(rt, "IDNumber", Entry::Opaque, true);
        let int = self.push(rt, "Int", Entry::Opaque, true);
        let float = self.push(rt, "Float", Entry::Opaque, true);

        let tagged = |key: &str, optional: bool| {
            let prop = Property::new(key, TypeNode::param("M"));
            let prop = if optional { prop.optional() } else { prop };
            TypeNode::Intersection(vec![TypeNode::param("T"), TypeNode::object(vec![prop])])
        };
        let gql_field = self.push(
            rt,
            "GqlField",
            Entry::Alias {
                params: vec!["T".into(), "M".into()],
                body: tagged(runtime::FIELD_META, true),
            },
            true,
        );
        let gql_object = self.push(
            rt,
            "GqlObject",
            Entry::Alias {
                params: vec!["T".into(), "M".into()],
                body: tagged(runtime::OBJECT_META, true),
            },
            true,
        );
        let gql_interface = self.push(
            rt,
            "GqlInterface",
            Entry::Alias {
                params: vec!["T".into(), "M".into()],
                body: tagged(runtime::INTERFACE_META, true),
            },
            true,
        );
        let gql_scalar = self.push(
            rt,
            "GqlScalar",
            Entry::Alias {
                params: vec!["N".into(), "B".into(), "O".into()],
                body: TypeNode::Intersection(vec![
                    TypeNode::param("B"),
                    TypeNode::object(vec![Property::new(
                        runtime::SCALAR_META,
                        TypeNode::object(vec![
                            Property::new(runtime::SCALAR_NAME, TypeNode::param("N")),
                            Property::new(runtime::SCALAR_ONLY, TypeNode::param("O")).optional(),
                        ]),
                    )]),
                ]),
            },
            true,
        );
        let gql_directive = self.push(
            rt,
            "GqlDirective",
            Entry::Alias {
                params: vec!["N".into(), "A".into(), "L".into()],
                body: TypeNode::object(vec![
                    Property::new(runtime::DIRECTIVE_NAME, TypeNode::param("N")),
                    Property::new(runtime::DIRECTIVE_ARGS, TypeNode::param("A")),
                    Property::new(runtime::DIRECTIVE_LOCATIONS, TypeNode::param("L")),
                ]),
            },
            true,
        );
        let no_args = self.push(
            rt,
            runtime::NO_ARGS,
            Entry::Alias {
                params: Vec::new(),
                body: TypeNode::object(Vec::new()),
            },
            true,
        );
        let query_resolver = self.push(rt, runtime::QUERY_MARKER, Entry::Opaque, true);
        let mutation_resolver = self.push(rt, runtime::MUTATION_MARKER, Entry::Opaque, true);
        let field_resolver = self.push(rt, runtime::FIELD_MARKER, Entry::Opaque, true);

        Builtins {
            pick,
            omit,
            partial,
            required,
            promise,
            date,
            id_string,
            id_number,
            int,
            float,
            gql_field,
            gql_object,
            gql_interface,
            gql_scalar,
            gql_directive,
            no_args,
            query_resolver,
            mutation_resolver,
            field_resolver,
        }
    }

    fn push(&mut self, module: &str, name: &str, entry: Entry, exported: bool) -> SymbolId {
        let line = self.lines.entry(module.to_string()).or_insert(0);
        *line += 1;
        let id = SymbolId::new(self.symbols.len() as u32);
        self.symbols.push(SymbolData {
            name: name.to_string(),
            module: module.to_string(),
            entry,
            doc: None,
            location: SourceLocation::new(module, *line, 1),
            exported,
        });
        id
    }

    fn data(&self, symbol: SymbolId) -> Option<&SymbolData> {
        self.symbols.get(symbol.raw() as usize)
    }

    /// Follow re-exports to the symbol holding the actual entry.
    fn target(&self, symbol: SymbolId) -> Option<(SymbolId, &SymbolData)> {
        let mut current = symbol;
        for _ in 0..32 {
            let data = self.data(current)?;
            match data.entry {
                Entry::Reexport(next) => current = next,
                _ => return Some((current, data)),
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Declaration builders
    // ------------------------------------------------------------------

    /// Declare an exported, non-generic type alias.
    pub fn add_alias(&mut self, module: &str, name: &str, ty: TypeNode) -> SymbolId {
        self.add_generic_alias(module, name, &[], ty)
    }

    /// Replace the body of an alias declared earlier.
    ///
    /// Mutually recursive declarations are built by declaring one side with
    /// a placeholder body and filling it in once the other side exists.
    pub fn set_alias_body(&mut self, symbol: SymbolId, ty: TypeNode) {
        if let Some(SymbolData {
            entry: Entry::Alias { body, .. },
            ..
        }) = self.symbols.get_mut(symbol.raw() as usize)
        {
            *body = ty;
        }
    }

    /// Declare an exported generic type alias.
    pub fn add_generic_alias(
        &mut self,
        module: &str,
        name: &str,
        params: &[&str],
        body: TypeNode,
    ) -> SymbolId {
        let params = params.iter().map(|p| p.to_string()).collect();
        self.push(module, name, Entry::Alias { params, body }, true)
    }

    /// Declare an exported interface.
    pub fn add_interface(
        &mut self,
        module: &str,
        name: &str,
        properties: Vec<Property>,
    ) -> SymbolId {
        self.push(module, name, Entry::Interface { properties }, true)
    }

    /// Declare an exported enum.
    pub fn add_enum(&mut self, module: &str, name: &str, members: Vec<EnumMemberDecl>) -> SymbolId {
        self.push(module, name, Entry::Enum { members }, true)
    }

    /// Declare an exported value.
    pub fn add_value(&mut self, module: &str, name: &str, ty: TypeNode) -> SymbolId {
        self.push(module, name, Entry::Value { ty }, true)
    }

    /// Declare a symbol without visible structure (e.g. a class from a package).
    pub fn add_opaque(&mut self, module: &str, name: &str) -> SymbolId {
        self.push(module, name, Entry::Opaque, false)
    }

    /// Declare a symbol carrying documentation for a property or enum member.
    pub fn add_member_symbol(&mut self, module: &str, name: &str, doc: DocComment) -> SymbolId {
        let id = self.push(module, name, Entry::Member, false);
        self.set_doc(id, doc);
        id
    }

    /// Re-export `target` from `module` under `name`.
    pub fn reexport(&mut self, module: &str, name: &str, target: SymbolId) -> SymbolId {
        self.push(module, name, Entry::Reexport(target), false)
    }

    /// Attach documentation to a symbol.
    pub fn set_doc(&mut self, symbol: SymbolId, doc: DocComment) {
        if let Some(data) = self.symbols.get_mut(symbol.raw() as usize) {
            data.doc = Some(doc);
        }
    }

    /// Mark a symbol as not exported.
    pub fn hide(&mut self, symbol: SymbolId) {
        if let Some(data) = self.symbols.get_mut(symbol.raw() as usize) {
            data.exported = false;
        }
    }

    /// Location assigned to a symbol.
    pub fn location(&self, symbol: SymbolId) -> Option<SourceLocation> {
        self.data(symbol).map(|d| d.location.clone())
    }

    // ------------------------------------------------------------------
    // Type builders
    // ------------------------------------------------------------------

    /// A reference to a symbol without type arguments.
    pub fn reference(&self, symbol: SymbolId) -> TypeNode {
        self.apply(symbol, Vec::new())
    }

    /// A reference to a generic symbol with type arguments.
    pub fn apply(&self, symbol: SymbolId, arguments: Vec<TypeNode>) -> TypeNode {
        let name = self
            .data(symbol)
            .map(|d| d.name.clone())
            .unwrap_or_default();
        TypeNode::Named(NamedType {
            symbol,
            name,
            arguments,
        })
    }

    fn key_union(keys: &[&str]) -> TypeNode {
        match keys {
            [single] => TypeNode::string_literal(*single),
            _ => TypeNode::Union(keys.iter().map(|k| TypeNode::string_literal(*k)).collect()),
        }
    }

    pub fn pick(&self, base: TypeNode, keys: &[&str]) -> TypeNode {
        self.apply(self.builtins.pick, vec![base, Self::key_union(keys)])
    }

    pub fn omit(&self, base: TypeNode, keys: &[&str]) -> TypeNode {
        self.apply(self.builtins.omit, vec![base, Self::key_union(keys)])
    }

    pub fn partial(&self, base: TypeNode) -> TypeNode {
        self.apply(self.builtins.partial, vec![base])
    }

    pub fn required(&self, base: TypeNode) -> TypeNode {
        self.apply(self.builtins.required, vec![base])
    }

    pub fn promise(&self, ty: TypeNode) -> TypeNode {
        self.apply(self.builtins.promise, vec![ty])
    }

    pub fn date(&self) -> TypeNode {
        self.reference(self.builtins.date)
    }

    pub fn id_string(&self) -> TypeNode {
        self.reference(self.builtins.id_string)
    }

    pub fn id_number(&self) -> TypeNode {
        self.reference(self.builtins.id_number)
    }

    pub fn int(&self) -> TypeNode {
        self.reference(self.builtins.int)
    }

    pub fn float(&self) -> TypeNode {
        self.reference(self.builtins.float)
    }

    pub fn no_args(&self) -> TypeNode {
        self.reference(self.builtins.no_args)
    }

    /// `GqlField<ty, meta>`
    pub fn field(&self, ty: TypeNode, meta: TypeNode) -> TypeNode {
        self.apply(self.builtins.gql_field, vec![ty, meta])
    }

    /// `GqlObject<shape, meta>`
    pub fn object_type(&self, shape: TypeNode, meta: TypeNode) -> TypeNode {
        self.apply(self.builtins.gql_object, vec![shape, meta])
    }

    /// `GqlInterface<shape, meta>`
    pub fn interface_type(&self, shape: TypeNode, meta: TypeNode) -> TypeNode {
        self.apply(self.builtins.gql_interface, vec![shape, meta])
    }

    /// `GqlScalar<"Name", base, "input" | "output">`
    pub fn scalar(&self, name: &str, base: TypeNode, only: Option<&str>) -> TypeNode {
        let mut args = vec![TypeNode::string_literal(name), base];
        if let Some(only) = only {
            args.push(TypeNode::string_literal(only));
        }
        self.apply(self.builtins.gql_scalar, args)
    }

    /// `GqlDirective<"name", args, locations>`
    pub fn directive(&self, name: &str, args: TypeNode, locations: &[&str]) -> TypeNode {
        self.apply(
            self.builtins.gql_directive,
            vec![TypeNode::string_literal(name), args, Self::key_union(locations)],
        )
    }

    pub fn query_resolver(&self, args: TypeNode, result: TypeNode) -> TypeNode {
        self.apply(self.builtins.query_resolver, vec![args, result])
    }

    pub fn mutation_resolver(&self, args: TypeNode, result: TypeNode) -> TypeNode {
        self.apply(self.builtins.mutation_resolver, vec![args, result])
    }

    pub fn field_resolver(&self, parent: TypeNode, args: TypeNode, result: TypeNode) -> TypeNode {
        self.apply(self.builtins.field_resolver, vec![parent, args, result])
    }

    /// Metadata object for [`field`](Self::field): `{ directives?, defaultValue? }`.
    pub fn field_meta(directives: Vec<TypeNode>, default_value: Option<TypeNode>) -> TypeNode {
        let mut props = Vec::new();
        if !directives.is_empty() {
            props.push(Property::new(
                runtime::META_DIRECTIVES,
                TypeNode::Tuple(directives),
            ));
        }
        if let Some(default_value) = default_value {
            props.push(Property::new(runtime::META_DEFAULT_VALUE, default_value));
        }
        TypeNode::object(props)
    }

    /// Metadata object for object/interface wrappers: `{ implements?, directives? }`.
    pub fn type_meta(implements: Vec<TypeNode>, directives: Vec<TypeNode>) -> TypeNode {
        let mut props = Vec::new();
        if !implements.is_empty() {
            props.push(Property::new(
                runtime::META_IMPLEMENTS,
                TypeNode::Tuple(implements),
            ));
        }
        if !directives.is_empty() {
            props.push(Property::new(
                runtime::META_DIRECTIVES,
                TypeNode::Tuple(directives),
            ));
        }
        TypeNode::object(props)
    }

    // ------------------------------------------------------------------
    // Evaluation
    // ------------------------------------------------------------------

    fn substitute(node: &TypeNode, params: &[String], args: &[TypeNode]) -> TypeNode {
        let recurse = |n: &TypeNode| Self::substitute(n, params, args);
        match node {
            TypeNode::TypeParameter { name, constraint } => {
                match params.iter().position(|p| p == name) {
                    Some(index) => args.get(index).cloned().unwrap_or(TypeNode::Unknown),
                    None => TypeNode::TypeParameter {
                        name: name.clone(),
                        constraint: constraint.as_ref().map(|c| Box::new(recurse(c))),
                    },
                }
            }
            TypeNode::Array(element) => TypeNode::Array(Box::new(recurse(element))),
            TypeNode::Tuple(items) => TypeNode::Tuple(items.iter().map(recurse).collect()),
            TypeNode::Union(members) => TypeNode::Union(members.iter().map(recurse).collect()),
            TypeNode::Intersection(parts) => {
                TypeNode::Intersection(parts.iter().map(recurse).collect())
            }
            TypeNode::Object(props) => TypeNode::Object(
                props
                    .iter()
                    .map(|p| Property {
                        ty: recurse(&p.ty),
                        ..p.clone()
                    })
                    .collect(),
            ),
            TypeNode::Function(signature) => {
                let mut signature = signature.clone();
                for param in &mut signature.parameters {
                    param.ty = recurse(&param.ty);
                }
                signature.return_type = Box::new(recurse(&signature.return_type));
                TypeNode::Function(signature)
            }
            TypeNode::Named(named) => TypeNode::Named(NamedType {
                symbol: named.symbol,
                name: named.name.clone(),
                arguments: named.arguments.iter().map(recurse).collect(),
            }),
            other => other.clone(),
        }
    }

    fn literal_keys(&self, node: &TypeNode) -> Vec<String> {
        match node {
            TypeNode::Literal(LiteralValue::String(s)) => vec![s.clone()],
            TypeNode::Union(members) => members.iter().flat_map(|m| self.literal_keys(m)).collect(),
            TypeNode::Named(named) => self
                .resolve_alias(named)
                .map(|resolved| self.literal_keys(&resolved))
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn named_properties(&self, named: &NamedType) -> Option<Vec<Property>> {
        let (_, data) = self.target(named.symbol)?;
        let arg = |i: usize| named.arguments.get(i).cloned().unwrap_or(TypeNode::Unknown);
        match &data.entry {
            Entry::Interface { properties } => Some(properties.clone()),
            Entry::Alias { .. } => {
                let resolved = self.resolve_alias(named)?;
                self.properties_of(&resolved)
            }
            Entry::Intrinsic(Intrinsic::Pick) => {
                let keys = self.literal_keys(&arg(1));
                let props = self.properties_of(&arg(0))?;
                Some(props.into_iter().filter(|p| keys.contains(&p.name)).collect())
            }
            Entry::Intrinsic(Intrinsic::Omit) => {
                let keys = self.literal_keys(&arg(1));
                let props = self.properties_of(&arg(0))?;
                Some(props.into_iter().filter(|p| !keys.contains(&p.name)).collect())
            }
            Entry::Intrinsic(Intrinsic::Partial) => {
                let props = self.properties_of(&arg(0))?;
                Some(
                    props
                        .into_iter()
                        .map(|p| Property {
                            optional: !p.is_hidden() || p.optional,
                            ..p
                        })
                        .collect(),
                )
            }
            Entry::Intrinsic(Intrinsic::Required) => {
                let props = self.properties_of(&arg(0))?;
                Some(
                    props
                        .into_iter()
                        .map(|p| Property {
                            optional: p.is_hidden() && p.optional,
                            ..p
                        })
                        .collect(),
                )
            }
            _ => None,
        }
    }
}

impl TypeChecker for MemoryChecker {
    fn declarations(&self, root: &str) -> Vec<Declaration> {
        self.symbols
            .iter()
            .enumerate()
            .filter(|(_, data)| data.exported && data.location.is_under(root))
            .filter_map(|(index, data)| {
                let form = match &data.entry {
                    Entry::Alias { params, body } => DeclarationForm::TypeAlias {
                        type_parameters: params.clone(),
                        ty: body.clone(),
                    },
                    Entry::Interface { .. } => DeclarationForm::Interface,
                    Entry::Enum { members } => DeclarationForm::Enum {
                        members: members.clone(),
                    },
                    Entry::Value { ty } => DeclarationForm::Value { ty: ty.clone() },
                    _ => return None,
                };
                Some(Declaration {
                    symbol: SymbolId::new(index as u32),
                    name: data.name.clone(),
                    form,
                    location: data.location.clone(),
                })
            })
            .collect()
    }

    fn resolve_alias(&self, named: &NamedType) -> Option<TypeNode> {
        let (_, data) = self.target(named.symbol)?;
        match &data.entry {
            Entry::Alias { params, body } => {
                Some(Self::substitute(body, params, &named.arguments))
            }
            _ => None,
        }
    }

    fn properties_of(&self, ty: &TypeNode) -> Option<Vec<Property>> {
        match ty {
            TypeNode::Object(props) => Some(props.clone()),
            TypeNode::Intersection(parts) => {
                let mut merged: IndexMap<String, Property> = IndexMap::new();
                for part in parts {
                    for prop in self.properties_of(part)? {
                        merged.insert(prop.name.clone(), prop);
                    }
                }
                Some(merged.into_values().collect())
            }
            TypeNode::Named(named) => self.named_properties(named),
            TypeNode::TypeParameter {
                constraint: Some(constraint),
                ..
            } => self.properties_of(constraint),
            _ => None,
        }
    }

    fn origin(&self, symbol: SymbolId) -> Option<SymbolOrigin> {
        let (_, data) = self.target(symbol)?;
        Some(SymbolOrigin {
            module: data.module.clone(),
            name: data.name.clone(),
        })
    }

    fn documentation(&self, symbol: SymbolId) -> Option<DocComment> {
        let data = self.data(symbol)?;
        if let Some(doc) = &data.doc {
            return Some(doc.clone());
        }
        match data.entry {
            Entry::Reexport(target) => self.documentation(target),
            _ => None,
        }
    }

    fn literal_value(&self, ty: &TypeNode) -> Option<LiteralValue> {
        match ty {
            TypeNode::Literal(value) => Some(value.clone()),
            TypeNode::Null => Some(LiteralValue::Null),
            TypeNode::Tuple(items) => items
                .iter()
                .map(|item| self.literal_value(item))
                .collect::<Option<Vec<_>>>()
                .map(LiteralValue::List),
            TypeNode::Object(props) => props
                .iter()
                .filter(|p| !p.is_hidden())
                .map(|p| self.literal_value(&p.ty).map(|v| (p.name.clone(), v)))
                .collect::<Option<Vec<_>>>()
                .map(LiteralValue::Object),
            TypeNode::Named(named) => {
                let resolved = self.resolve_alias(named)?;
                self.literal_value(&resolved)
            }
            _ => None,
        }
    }

    fn awaited_type(&self, ty: &TypeNode) -> Option<TypeNode> {
        let named = ty.as_named()?;
        let (id, _) = self.target(named.symbol)?;
        if id == self.builtins.promise {
            Some(
                named
                    .arguments
                    .first()
                    .cloned()
                    .unwrap_or(TypeNode::Unknown),
            )
        } else {
            None
        }
    }
}

impl MemoryChecker {
    /// The runtime module path this checker registers brands under.
    pub fn runtime_module(&self) -> &str {
        &self.runtime_module
    }
}
