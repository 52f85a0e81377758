//! Schema definition language printer.
//!
//! Output order is fixed: directive definitions, then types, then `extend
//! type` blocks, each sorted by name. Two runs over the same document
//! produce the same text.

use std::fmt::Write;

use crate::checker::LiteralValue;
use crate::hir::{Deprecation, DirectiveApplication};
use crate::integrate::{SchemaDocument, TypeExtension};
use crate::schema::{
    EnumValueDefinition, InputValue, SchemaDirective, SchemaField, TypeBody, TypeDefinition,
};

/// Render a schema document as SDL text.
pub fn print_sdl(document: &SchemaDocument) -> String {
    let mut ctx = PrintContext::new();
    for directive in &document.directives {
        ctx.print_directive_definition(directive);
    }
    for definition in &document.types {
        ctx.print_type(definition);
    }
    for extension in &document.extensions {
        ctx.print_extension(extension);
    }
    ctx.finish()
}

struct PrintContext {
    output: String,
    indent_level: usize,
}

impl PrintContext {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn finish(mut self) -> String {
        // One trailing newline, no blank line at the end.
        while self.output.ends_with("\n\n") {
            self.output.pop();
        }
        self.output
    }

    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn write_line(&mut self, text: &str) {
        let indent = self.indent();
        let _ = writeln!(self.output, "{}{}", indent, text);
    }

    fn write_blank_line(&mut self) {
        let _ = writeln!(self.output);
    }

    fn print_description(&mut self, description: Option<&str>) {
        let Some(description) = description else {
            return;
        };
        let escaped = description.replace("\"\"\"", "\\\"\"\"");
        if !escaped.contains('\n') && !escaped.ends_with('"') {
            self.write_line(&format!("\"\"\"{}\"\"\"", escaped));
            return;
        }
        self.write_line("\"\"\"");
        for line in escaped.lines() {
            if line.is_empty() {
                self.write_blank_line();
            } else {
                self.write_line(line);
            }
        }
        self.write_line("\"\"\"");
    }

    // ------------------------------------------------------------------
    // Definitions
    // ------------------------------------------------------------------

    fn print_directive_definition(&mut self, directive: &SchemaDirective) {
        self.print_description(directive.description.as_deref());
        let locations: Vec<&str> = directive.locations.iter().map(|l| l.as_str()).collect();
        let head = format!(
            "directive @{}{} on {}",
            directive.name,
            self.arguments(&directive.arguments),
            locations.join(" | ")
        );
        self.write_line(&head);
        self.write_blank_line();
    }

    fn print_type(&mut self, definition: &TypeDefinition) {
        self.print_description(definition.description.as_deref());
        let directives = applied(&definition.directives, None);
        match &definition.body {
            TypeBody::Object { fields, interfaces } | TypeBody::Interface { fields, interfaces } => {
                let keyword = if definition.is_interface() {
                    "interface"
                } else {
                    "type"
                };
                let mut head = format!("{} {}", keyword, definition.name);
                if !interfaces.is_empty() {
                    let names: Vec<&str> = interfaces.iter().map(|i| i.as_str()).collect();
                    let _ = write!(head, " implements {}", names.join(" & "));
                }
                head.push_str(&directives);
                self.print_fields(head, fields);
            }
            TypeBody::Input { fields } => {
                let head = format!("input {}{}", definition.name, directives);
                if fields.is_empty() {
                    self.write_line(&head);
                } else {
                    self.write_line(&format!("{} {{", head));
                    self.indent_level += 1;
                    for field in fields {
                        self.print_input_value(field);
                    }
                    self.indent_level -= 1;
                    self.write_line("}");
                }
            }
            TypeBody::Union { members } => {
                let names: Vec<&str> = members.iter().map(|m| m.as_str()).collect();
                self.write_line(&format!(
                    "union {}{} = {}",
                    definition.name,
                    directives,
                    names.join(" | ")
                ));
            }
            TypeBody::Enum { values } => {
                self.write_line(&format!("enum {}{} {{", definition.name, directives));
                self.indent_level += 1;
                for value in values {
                    self.print_enum_value(value);
                }
                self.indent_level -= 1;
                self.write_line("}");
            }
            TypeBody::Scalar { .. } => {
                self.write_line(&format!("scalar {}{}", definition.name, directives));
            }
        }
        self.write_blank_line();
    }

    fn print_extension(&mut self, extension: &TypeExtension) {
        self.print_fields(format!("extend type {}", extension.target), &extension.fields);
        self.write_blank_line();
    }

    /// `head { fields }`, or just `head` when there are none.
    fn print_fields(&mut self, head: String, fields: &[SchemaField]) {
        if fields.is_empty() {
            self.write_line(&head);
            return;
        }
        self.write_line(&format!("{} {{", head));
        self.indent_level += 1;
        for field in fields {
            self.print_description(field.description.as_deref());
            let line = format!(
                "{}{}: {}{}",
                field.name,
                self.arguments(&field.arguments),
                field.ty,
                applied(&field.directives, field.deprecation.as_ref())
            );
            self.write_line(&line);
        }
        self.indent_level -= 1;
        self.write_line("}");
    }

    fn print_input_value(&mut self, value: &InputValue) {
        self.print_description(value.description.as_deref());
        let line = input_value(value);
        self.write_line(&line);
    }

    fn print_enum_value(&mut self, value: &EnumValueDefinition) {
        self.print_description(value.description.as_deref());
        let line = format!("{}{}", value.name, applied(&[], value.deprecation.as_ref()));
        self.write_line(&line);
    }

    /// `(a: Int, b: String = "x")`; empty when there are no arguments.
    fn arguments(&self, arguments: &[InputValue]) -> String {
        if arguments.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = arguments.iter().map(input_value).collect();
        format!("({})", rendered.join(", "))
    }
}

fn input_value(value: &InputValue) -> String {
    let mut text = format!("{}: {}", value.name, value.ty);
    if let Some(default) = &value.default_value {
        let _ = write!(text, " = {}", default);
    }
    text.push_str(&applied(&value.directives, value.deprecation.as_ref()));
    text
}

/// Applied directives, each preceded by a space.
fn applied(directives: &[DirectiveApplication], deprecation: Option<&Deprecation>) -> String {
    let mut text = String::new();
    if let Some(deprecation) = deprecation {
        match &deprecation.reason {
            Some(reason) => {
                let _ = write!(
                    text,
                    " @deprecated(reason: {})",
                    LiteralValue::String(reason.clone())
                );
            }
            None => text.push_str(" @deprecated"),
        }
    }
    for directive in directives {
        let _ = write!(text, " @{}", directive.name);
        if !directive.arguments.is_empty() {
            let arguments: Vec<String> = directive
                .arguments
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value))
                .collect();
            let _ = write!(text, "({})", arguments.join(", "));
        }
    }
    text
}
