//! The type vocabulary exchanged with a [`TypeChecker`](super::TypeChecker).
//!
//! These types describe what the type-resolution service reports about
//! declarations. Named references stay named; structure behind a name is
//! only revealed through the checker's queries.

use std::fmt::{self, Write};

use crate::base::SourceLocation;

/// Opaque identifier of a symbol known to the type checker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(u32);

impl SymbolId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A fixed value a type evaluates to.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<LiteralValue>),
    Object(Vec<(String, LiteralValue)>),
    /// Enum value by its schema name. Only produced when defaults are
    /// coerced against an enum type.
    Enum(String),
}

impl LiteralValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short description used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LiteralValue::Null => "null",
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
            LiteralValue::List(_) => "list",
            LiteralValue::Object(_) => "object",
            LiteralValue::Enum(_) => "enum value",
        }
    }
}

impl fmt::Display for LiteralValue {
    /// Formats the value as a GraphQL value literal.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Null => write!(f, "null"),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            LiteralValue::String(s) => write_string(f, s),
            LiteralValue::Enum(name) => write!(f, "{}", name),
            LiteralValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            LiteralValue::Object(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Quoted string in the schema language's escape syntax.
fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// A reference to a named symbol, possibly applied to type arguments.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedType {
    pub symbol: SymbolId,
    pub name: String,
    pub arguments: Vec<TypeNode>,
}

/// A property of an object-like type.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub ty: TypeNode,
    pub optional: bool,
    /// Symbol carrying the property's documentation.
    pub symbol: Option<SymbolId>,
    pub location: Option<SourceLocation>,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            symbol: None,
            location: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Properties whose key starts with `" $"` are phantom metadata tags.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with(" $")
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeNode,
    pub optional: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }
}

/// A call signature.
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub return_type: Box<TypeNode>,
}

/// A type as reported by the checker.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    Boolean,
    Number,
    String,
    Null,
    Undefined,
    /// `any`, `unknown`, `never` and anything without a representation.
    Unknown,
    Literal(LiteralValue),
    Array(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    Object(Vec<Property>),
    Function(Signature),
    Named(NamedType),
    TypeParameter {
        name: String,
        constraint: Option<Box<TypeNode>>,
    },
}

impl TypeNode {
    pub fn string_literal(value: impl Into<String>) -> Self {
        TypeNode::Literal(LiteralValue::String(value.into()))
    }

    pub fn number_literal(value: f64) -> Self {
        TypeNode::Literal(LiteralValue::Number(value))
    }

    pub fn boolean_literal(value: bool) -> Self {
        TypeNode::Literal(LiteralValue::Boolean(value))
    }

    pub fn array(element: TypeNode) -> Self {
        TypeNode::Array(Box::new(element))
    }

    pub fn object(properties: Vec<Property>) -> Self {
        TypeNode::Object(properties)
    }

    /// `ty | null`
    pub fn nullable(ty: TypeNode) -> Self {
        TypeNode::Union(vec![ty, TypeNode::Null])
    }

    pub fn param(name: impl Into<String>) -> Self {
        TypeNode::TypeParameter {
            name: name.into(),
            constraint: None,
        }
    }

    pub fn constrained_param(name: impl Into<String>, constraint: TypeNode) -> Self {
        TypeNode::TypeParameter {
            name: name.into(),
            constraint: Some(Box::new(constraint)),
        }
    }

    pub fn function(parameters: Vec<Parameter>, return_type: TypeNode) -> Self {
        TypeNode::Function(Signature {
            parameters,
            return_type: Box::new(return_type),
        })
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, TypeNode::Null | TypeNode::Undefined)
    }

    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            TypeNode::Named(named) => Some(named),
            _ => None,
        }
    }

    /// Short description used in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            TypeNode::Boolean => "boolean".to_string(),
            TypeNode::Number => "number".to_string(),
            TypeNode::String => "string".to_string(),
            TypeNode::Null => "null".to_string(),
            TypeNode::Undefined => "undefined".to_string(),
            TypeNode::Unknown => "unknown".to_string(),
            TypeNode::Literal(value) => value.to_string(),
            TypeNode::Array(element) => format!("{}[]", element.describe()),
            TypeNode::Tuple(_) => "tuple".to_string(),
            TypeNode::Union(members) => members
                .iter()
                .map(|m| m.describe())
                .collect::<Vec<_>>()
                .join(" | "),
            TypeNode::Intersection(_) => "intersection".to_string(),
            TypeNode::Object(_) => "object literal".to_string(),
            TypeNode::Function(_) => "function".to_string(),
            TypeNode::Named(named) => named.name.clone(),
            TypeNode::TypeParameter { name, .. } => name.clone(),
        }
    }
}

/// One member of an enum declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMemberDecl {
    pub name: String,
    pub value: LiteralValue,
    pub symbol: Option<SymbolId>,
    pub location: Option<SourceLocation>,
}

impl EnumMemberDecl {
    pub fn new(name: impl Into<String>, value: LiteralValue) -> Self {
        Self {
            name: name.into(),
            value,
            symbol: None,
            location: None,
        }
    }

    pub fn with_symbol(mut self, symbol: SymbolId) -> Self {
        self.symbol = Some(symbol);
        self
    }
}

/// The syntactic form of an exported declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclarationForm {
    /// `type X<P...> = ...`
    TypeAlias {
        type_parameters: Vec<String>,
        ty: TypeNode,
    },
    /// `interface X { ... }`; its properties come from `properties_of`.
    Interface,
    /// `enum X { ... }`
    Enum { members: Vec<EnumMemberDecl> },
    /// `const x: T = ...`
    Value { ty: TypeNode },
}

/// An exported declaration found under a source root.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub symbol: SymbolId,
    pub name: String,
    pub form: DeclarationForm,
    pub location: SourceLocation,
}

impl Declaration {
    /// The declaration as a type reference.
    pub fn as_type(&self) -> TypeNode {
        TypeNode::Named(NamedType {
            symbol: self.symbol,
            name: self.name.clone(),
            arguments: Vec::new(),
        })
    }

    pub fn is_value(&self) -> bool {
        matches!(self.form, DeclarationForm::Value { .. })
    }
}

/// Where a symbol was originally declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolOrigin {
    pub module: String,
    pub name: String,
}

/// A block tag such as `@deprecated reason` or `@description text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocTag {
    pub name: String,
    pub text: Option<String>,
}

/// A structured documentation comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocComment {
    pub text: Option<String>,
    pub tags: Vec<DocTag>,
}

impl DocComment {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, name: impl Into<String>, text: Option<&str>) -> Self {
        self.tags.push(DocTag {
            name: name.into(),
            text: text.map(str::to_string),
        });
        self
    }

    pub fn tag(&self, name: &str) -> Option<&DocTag> {
        self.tags.iter().find(|t| t.name == name)
    }
}
