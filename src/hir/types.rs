//! Semantic model produced by extraction.
//!
//! Every declared type and every operation is described with the same
//! [`SemanticType`] graph. Hidden metadata wrappers and checker-specific
//! node shapes never appear here.

use std::fmt;

use smol_str::SmolStr;

use crate::base::SourceLocation;
use crate::checker::LiteralValue;
use crate::config::ScalarDirection;

// ============================================================================
// SEMANTIC TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Number,
    String,
}

/// What a semantic type refers to.
#[derive(Clone, Debug, PartialEq)]
pub enum SemanticKind {
    Primitive(PrimitiveKind),
    /// A branded or custom scalar.
    Scalar {
        name: SmolStr,
        /// Position constraint carried by the backing type.
        only: Option<ScalarDirection>,
    },
    /// A declared type.
    Reference { name: SmolStr },
    Array { element: Box<SemanticType> },
    Union { members: Vec<SemanticType> },
    Literal(LiteralValue),
    /// An anonymous shape; the converter gives it a name.
    InlineObject { fields: Vec<FieldDefinition> },
}

/// A semantic type reference with its own nullability.
#[derive(Clone, Debug, PartialEq)]
pub struct SemanticType {
    pub kind: SemanticKind,
    pub nullable: bool,
}

impl SemanticType {
    pub fn new(kind: SemanticKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(SemanticKind::Primitive(kind))
    }

    pub fn reference(name: impl Into<SmolStr>) -> Self {
        Self::new(SemanticKind::Reference { name: name.into() })
    }

    pub fn scalar(name: impl Into<SmolStr>, only: Option<ScalarDirection>) -> Self {
        Self::new(SemanticKind::Scalar {
            name: name.into(),
            only,
        })
    }

    pub fn array(element: SemanticType) -> Self {
        Self::new(SemanticKind::Array {
            element: Box::new(element),
        })
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = self.nullable || nullable;
        self
    }
}

// ============================================================================
// FIELDS AND METADATA
// ============================================================================

/// A `@deprecated` marker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deprecation {
    pub reason: Option<String>,
}

/// An applied directive, e.g. `@cacheControl(maxAge: 60)`.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveApplication {
    pub name: SmolStr,
    pub arguments: Vec<(SmolStr, LiteralValue)>,
}

impl DirectiveApplication {
    pub fn argument(&self, name: &str) -> Option<&LiteralValue> {
        self.arguments
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| value)
    }
}

/// Type system directive locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DirectiveLocation {
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub const ALL: [DirectiveLocation; 11] = [
        DirectiveLocation::Schema,
        DirectiveLocation::Scalar,
        DirectiveLocation::Object,
        DirectiveLocation::FieldDefinition,
        DirectiveLocation::ArgumentDefinition,
        DirectiveLocation::Interface,
        DirectiveLocation::Union,
        DirectiveLocation::Enum,
        DirectiveLocation::EnumValue,
        DirectiveLocation::InputObject,
        DirectiveLocation::InputFieldDefinition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|loc| loc.as_str() == text)
    }
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field, argument or input field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: SmolStr,
    pub ty: SemanticType,
    /// Declared with `?`.
    pub optional: bool,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveApplication>,
    /// Only kept for input positions.
    pub default_value: Option<LiteralValue>,
    pub location: Option<SourceLocation>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<SmolStr>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            description: None,
            deprecation: None,
            directives: Vec::new(),
            default_value: None,
            location: None,
        }
    }

    /// Nullable through either `?` or a nullish union member.
    pub fn is_nullable(&self) -> bool {
        self.optional || self.ty.nullable
    }
}

/// A directive declared with the runtime directive wrapper.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub name: SmolStr,
    pub description: Option<String>,
    pub arguments: Vec<FieldDefinition>,
    pub locations: Vec<DirectiveLocation>,
    pub location: SourceLocation,
}

// ============================================================================
// DECLARED TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Object,
    Interface,
    Union,
    Enum,
}

impl DeclarationKind {
    pub fn display(&self) -> &'static str {
        match self {
            DeclarationKind::Object => "object",
            DeclarationKind::Interface => "interface",
            DeclarationKind::Union => "union",
            DeclarationKind::Enum => "enum",
        }
    }
}

/// Name, kind and documentation of a declared type.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeMetadata {
    pub name: SmolStr,
    pub kind: DeclarationKind,
    pub location: SourceLocation,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveApplication>,
    /// Interfaces named in object or interface metadata.
    pub implements: Vec<SmolStr>,
}

/// One member of an enumeration.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    /// Source name; for literal unions this is the literal itself.
    pub name: String,
    pub value: LiteralValue,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub location: Option<SourceLocation>,
}

/// The kind-specific part of a declared type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypePayload {
    Fields(Vec<FieldDefinition>),
    EnumMembers(Vec<EnumMember>),
    UnionMembers(Vec<SmolStr>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeclaredType {
    pub metadata: TypeMetadata,
    pub payload: TypePayload,
}

impl DeclaredType {
    pub fn name(&self) -> &SmolStr {
        &self.metadata.name
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        match &self.payload {
            TypePayload::Fields(fields) => fields,
            _ => &[],
        }
    }
}

/// A custom scalar, from configuration or a scalar declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarDefinition {
    pub name: SmolStr,
    /// Set when every backing type restricts the scalar to the same side.
    pub only: Option<ScalarDirection>,
    pub description: Option<String>,
    pub location: Option<SourceLocation>,
}

/// Output of the type extractor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedTypes {
    pub types: Vec<DeclaredType>,
    pub scalars: Vec<ScalarDefinition>,
    pub directives: Vec<DirectiveDefinition>,
}

impl ExtractedTypes {
    pub fn get(&self, name: &str) -> Option<&DeclaredType> {
        self.types.iter().find(|t| t.metadata.name == name)
    }
}

// ============================================================================
// OPERATIONS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Query,
    Mutation,
    Field,
}

impl OperationKind {
    /// Root type name for query and mutation operations.
    pub fn root_name(&self) -> Option<&'static str> {
        match self {
            OperationKind::Query => Some("Query"),
            OperationKind::Mutation => Some("Mutation"),
            OperationKind::Field => None,
        }
    }
}

/// How an operation was authored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthoringStyle {
    /// `XResolver` shape paired with an `xResolver` value.
    Legacy,
    /// Exported value built by an operation-defining function.
    Modern,
}

/// Where the implementation of an operation lives.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImplementationRef {
    pub module: String,
    pub export: SmolStr,
    /// Property of the exported value (legacy resolver objects).
    pub property: Option<SmolStr>,
}

impl fmt::Display for ImplementationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.property {
            Some(property) => write!(f, "{}.{}", self.export, property),
            None => write!(f, "{}", self.export),
        }
    }
}

/// A schema field contributed by an operation.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationBinding {
    pub kind: OperationKind,
    pub field_name: SmolStr,
    pub arguments: Vec<FieldDefinition>,
    pub return_type: SemanticType,
    /// `Query`, `Mutation` or the extended type.
    pub target: SmolStr,
    /// Parent type of a field resolver.
    pub parent: Option<SmolStr>,
    pub style: AuthoringStyle,
    pub implementation: ImplementationRef,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveApplication>,
    pub location: SourceLocation,
}
