//! Type checker interface: the type-resolution service the pipeline consumes.
//!
//! Source parsing and type evaluation live outside this crate. Extraction only
//! talks to them through [`TypeChecker`], which answers four kinds of questions:
//!
//! ```text
//! properties_of / resolve_alias  ← expanded shape of a type (after pick/omit/…)
//! origin / is_declared_in        ← where a symbol was originally declared
//! documentation                  ← doc comment text and tags
//! literal_value                  ← literal a type evaluates to (default values)
//! ```
//!
//! [`MemoryChecker`] is an in-memory implementation with pre-declared shapes.

mod memory;
mod types;

pub use memory::MemoryChecker;
pub use types::{
    Declaration, DeclarationForm, DocComment, DocTag, EnumMemberDecl, LiteralValue, NamedType,
    Parameter, Property, Signature, SymbolId, SymbolOrigin, TypeNode,
};

/// The type-resolution service.
pub trait TypeChecker {
    /// Exported declarations whose module lies under `root`, in a stable order.
    fn declarations(&self, root: &str) -> Vec<Declaration>;

    /// Expand one alias step, substituting type arguments.
    ///
    /// Returns `None` when the symbol is not a type alias.
    fn resolve_alias(&self, named: &NamedType) -> Option<TypeNode>;

    /// The final flat property list of an object-like type.
    ///
    /// Follows intersections, interfaces, generic aliases and field selection
    /// transformations. Returns `None` for types without properties.
    fn properties_of(&self, ty: &TypeNode) -> Option<Vec<Property>>;

    /// Where a symbol was originally declared, following re-exports.
    fn origin(&self, symbol: SymbolId) -> Option<SymbolOrigin>;

    /// Documentation attached to a symbol.
    fn documentation(&self, symbol: SymbolId) -> Option<DocComment>;

    /// Evaluate a type down to a literal value, if it has one.
    fn literal_value(&self, ty: &TypeNode) -> Option<LiteralValue>;

    /// Unwrap an async result type (`Promise<T>` → `T`).
    fn awaited_type(&self, _ty: &TypeNode) -> Option<TypeNode> {
        None
    }

    /// Check whether a symbol is originally declared in `module`.
    fn is_declared_in(&self, symbol: SymbolId, module: &str) -> bool {
        self.origin(symbol).is_some_and(|o| o.module == module)
    }
}
