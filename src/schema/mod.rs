//! Schema model and conversion from the semantic model.
//!
//! ```text
//! ExtractedTypes + [OperationBinding]
//!     │
//!     ▼
//! convert_schema              ← primitives, lists, enums, inline shape naming
//!     │
//!     ▼
//! ConvertedSchema             ← TypeDefinition / SchemaDirective / OperationField
//! ```

mod convert;
mod defaults;
mod naming;
mod types;

#[cfg(test)]
mod tests;

pub use convert::convert_schema;
pub use naming::InlineScope;
pub use types::{
    ConvertedSchema, EnumValueDefinition, FieldType, InputValue, OperationField, SchemaDirective,
    SchemaField, TypeBody, TypeDefinition, TypeShape,
};
