//! Schema model: concrete type definitions ready for validation and printing.

use std::fmt;

use smol_str::SmolStr;

use crate::base::SourceLocation;
use crate::checker::LiteralValue;
use crate::config::ScalarDirection;
use crate::hir::{
    AuthoringStyle, Deprecation, DirectiveApplication, DirectiveLocation, ImplementationRef,
    OperationKind,
};

// ============================================================================
// FIELD TYPES
// ============================================================================

/// Named type or list wrapper.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    Named(SmolStr),
    List(Box<FieldType>),
}

/// A field type descriptor such as `[String!]!`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldType {
    pub shape: TypeShape,
    pub nullable: bool,
}

impl FieldType {
    pub fn named(name: impl Into<SmolStr>, nullable: bool) -> Self {
        Self {
            shape: TypeShape::Named(name.into()),
            nullable,
        }
    }

    pub fn list(item: FieldType, nullable: bool) -> Self {
        Self {
            shape: TypeShape::List(Box::new(item)),
            nullable,
        }
    }

    /// The innermost named type.
    pub fn named_type(&self) -> &SmolStr {
        match &self.shape {
            TypeShape::Named(name) => name,
            TypeShape::List(item) => item.named_type(),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.shape, TypeShape::List(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.shape {
            TypeShape::Named(name) => write!(f, "{}", name)?,
            TypeShape::List(item) => write!(f, "[{}]", item)?,
        }
        if !self.nullable {
            write!(f, "!")?;
        }
        Ok(())
    }
}

// ============================================================================
// FIELDS
// ============================================================================

/// An argument, input field or directive argument.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValue {
    pub name: SmolStr,
    pub ty: FieldType,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveApplication>,
    pub default_value: Option<LiteralValue>,
    pub location: Option<SourceLocation>,
}

/// An output field of an object or interface.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaField {
    pub name: SmolStr,
    pub ty: FieldType,
    pub arguments: Vec<InputValue>,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub directives: Vec<DirectiveApplication>,
    pub location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub name: SmolStr,
    /// Value in the source declaration.
    pub value: LiteralValue,
    pub description: Option<String>,
    pub deprecation: Option<Deprecation>,
    pub location: Option<SourceLocation>,
}

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum TypeBody {
    Object {
        fields: Vec<SchemaField>,
        interfaces: Vec<SmolStr>,
    },
    Interface {
        fields: Vec<SchemaField>,
        interfaces: Vec<SmolStr>,
    },
    Input {
        fields: Vec<InputValue>,
    },
    Union {
        members: Vec<SmolStr>,
    },
    Enum {
        values: Vec<EnumValueDefinition>,
    },
    Scalar {
        only: Option<ScalarDirection>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefinition {
    pub name: SmolStr,
    pub description: Option<String>,
    pub directives: Vec<DirectiveApplication>,
    /// `None` for configured scalars and synthesized roots.
    pub location: Option<SourceLocation>,
    pub body: TypeBody,
}

impl TypeDefinition {
    /// Keyword used in diagnostics (`object`, `input object`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self.body {
            TypeBody::Object { .. } => "object",
            TypeBody::Interface { .. } => "interface",
            TypeBody::Input { .. } => "input object",
            TypeBody::Union { .. } => "union",
            TypeBody::Enum { .. } => "enum",
            TypeBody::Scalar { .. } => "scalar",
        }
    }

    /// Output fields of an object or interface.
    pub fn fields(&self) -> &[SchemaField] {
        match &self.body {
            TypeBody::Object { fields, .. } | TypeBody::Interface { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn interfaces(&self) -> &[SmolStr] {
        match &self.body {
            TypeBody::Object { interfaces, .. } | TypeBody::Interface { interfaces, .. } => {
                interfaces
            }
            _ => &[],
        }
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.body, TypeBody::Interface { .. })
    }

    /// Objects and interfaces can carry operation fields.
    pub fn is_extensible(&self) -> bool {
        matches!(self.body, TypeBody::Object { .. } | TypeBody::Interface { .. })
    }

    /// Usable as an argument or input field type.
    pub fn is_input_type(&self) -> bool {
        matches!(
            self.body,
            TypeBody::Input { .. } | TypeBody::Enum { .. } | TypeBody::Scalar { .. }
        )
    }

    /// Usable as an output field type.
    pub fn is_output_type(&self) -> bool {
        !matches!(self.body, TypeBody::Input { .. })
    }

    /// Directive location for a type-level application.
    pub fn directive_location(&self) -> DirectiveLocation {
        match self.body {
            TypeBody::Object { .. } => DirectiveLocation::Object,
            TypeBody::Interface { .. } => DirectiveLocation::Interface,
            TypeBody::Input { .. } => DirectiveLocation::InputObject,
            TypeBody::Union { .. } => DirectiveLocation::Union,
            TypeBody::Enum { .. } => DirectiveLocation::Enum,
            TypeBody::Scalar { .. } => DirectiveLocation::Scalar,
        }
    }
}

/// A directive definition with converted argument types.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDirective {
    pub name: SmolStr,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub locations: Vec<DirectiveLocation>,
    pub location: SourceLocation,
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// A field contributed by an operation, not yet merged into its target.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationField {
    pub kind: OperationKind,
    pub target: SmolStr,
    pub parent: Option<SmolStr>,
    pub style: AuthoringStyle,
    pub field: SchemaField,
    pub implementation: ImplementationRef,
}

/// Output of the schema converter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvertedSchema {
    /// Declared, synthesized and scalar types sorted by name.
    pub types: Vec<TypeDefinition>,
    pub directives: Vec<SchemaDirective>,
    /// Sorted by target, then field name.
    pub operations: Vec<OperationField>,
}

impl ConvertedSchema {
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }
}
