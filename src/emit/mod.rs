//! Emission: the three artifacts of a run, built in memory.
//!
//! - [`print_sdl`] - schema text
//! - [`document_ast`] - `DocumentNode`-shaped JSON
//! - [`resolver_map_json`] - field → implementation table
//!
//! Writing them anywhere is left to the caller.

mod ast;
mod resolvers;
mod sdl;


pub use ast::document_ast;
pub use resolvers::resolver_map_json;
pub use sdl::print_sdl;

/// Pretty JSON text with a trailing newline.
pub fn render_json(value: &serde_json::Value) -> String {
    format!("{:#}\n", value)
}
