//! Declaration text emitter.
//!
//! Writes one `.d.ts` module per finished model. Every file wraps its content
//! in `declare module "<module>"` so declarations from different files of the
//! same module merge:
//!
//! ```typescript
//! declare module "sample" {
//!     import { Control } from "sap/ui/core";
//!
//!     export interface ICircleSettings extends IShapeSettings {
//!         radius?: number;
//!     }
//!
//!     export class Circle extends Shape {
//!         constructor(sId?: string, mSettings?: ICircleSettings);
//!         getRadius(): number;
//!     }
//! }
//! ```

use std::collections::BTreeMap;

use dtsgen_core::{
    ClassDeclaration, EnumModel, EventDeclaration, MethodDeclaration, NamespaceDeclaration,
    SettingsInterface, TypeImport,
};
use indexmap::IndexMap;
use tracing::trace;

use crate::source_writer::SourceWriter;

const INDENT: &str = "    ";

pub struct DeclarationEmitter {
    writer: SourceWriter,
    indent_level: u32,
}

impl Default for DeclarationEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationEmitter {
    pub fn new() -> Self {
        DeclarationEmitter {
            writer: SourceWriter::with_capacity(4096),
            indent_level: 0,
        }
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// All enums of one library, grouped into one block per module.
    pub fn emit_enums(&mut self, enums: &[EnumModel]) -> String {
        self.reset_writer();

        let mut by_module: IndexMap<&str, Vec<&EnumModel>> = IndexMap::new();
        for model in enums {
            by_module
                .entry(module_or_name(&model.module, &model.qualified_name))
                .or_default()
                .push(model);
        }

        let mut first_module = true;
        for (module, models) in by_module {
            if !first_module {
                self.write_line();
            }
            first_module = false;

            self.begin_module(module);
            let mut first = true;
            for model in models {
                if !first {
                    self.write_line();
                }
                first = false;
                self.emit_doc(model.description.lines());
                self.write_indent();
                self.write("export enum ");
                self.write(&model.name);
                self.write(" {");
                self.write_line();
                self.increase_indent();
                for member in &model.members {
                    self.emit_doc(member.description.lines());
                    self.write_indent();
                    self.write(&member.render());
                    self.write(",");
                    self.write_line();
                }
                self.decrease_indent();
                self.write_indent();
                self.write("}");
                self.write_line();
            }
            self.end_module();
        }

        self.take_output()
    }

    pub fn emit_interface(&mut self, declaration: &ClassDeclaration) -> String {
        self.emit_class_like(declaration, "interface")
    }

    pub fn emit_class(&mut self, declaration: &ClassDeclaration) -> String {
        self.emit_class_like(declaration, "class")
    }

    pub fn emit_namespace(&mut self, declaration: &NamespaceDeclaration) -> String {
        trace!(namespace = %declaration.qualified_name, "emitting namespace");
        self.reset_writer();
        let module = module_or_name(&declaration.module, &declaration.qualified_name);

        self.begin_module(module);
        self.emit_required_imports(&declaration.imports, module);

        self.emit_doc(declaration.description.lines());
        self.write_indent();
        self.write("export namespace ");
        self.write(&declaration.name);
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for property in &declaration.properties {
            self.emit_doc(property.description.lines());
            self.write_indent();
            self.write("export const ");
            self.write(&property.name);
            self.write(": ");
            self.write(&property.ty);
            self.write(";");
            self.write_line();
        }
        for function in &declaration.functions {
            self.emit_doc(function.doc.iter().map(String::as_str));
            self.write_indent();
            self.write("export function ");
            self.write(&function.signature);
            self.write(";");
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();

        self.end_module();
        self.take_output()
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn emit_class_like(&mut self, declaration: &ClassDeclaration, keyword: &str) -> String {
        trace!(declaration = %declaration.qualified_name, keyword, "emitting declaration");
        self.reset_writer();
        let module = module_or_name(&declaration.module, &declaration.qualified_name);

        self.begin_module(module);
        self.emit_required_imports(&declaration.imports, module);

        for event in &declaration.events {
            self.emit_event_payload(event, &declaration.name);
            self.write_line();
        }
        if let Some(settings) = &declaration.settings {
            self.emit_settings_interface(settings);
            self.write_line();
        }

        self.emit_doc(declaration.description.lines());
        self.write_indent();
        self.write("export ");
        self.write(keyword);
        self.write(" ");
        self.write(&declaration.name);
        if let Some(base) = &declaration.base_class {
            self.write(" extends ");
            self.write(base);
        }
        self.write(" {");
        self.write_line();

        self.increase_indent();
        for member in declaration.constructors.iter().chain(&declaration.methods) {
            self.emit_member(member);
        }
        self.decrease_indent();

        self.write_indent();
        self.write("}");
        self.write_line();

        self.end_module();
        self.take_output()
    }

    fn emit_member(&mut self, member: &MethodDeclaration) {
        self.emit_doc(member.doc.iter().map(String::as_str));
        self.write_indent();
        self.write(&member.signature);
        self.write(";");
        self.write_line();
    }

    /// `ResizeEventArgs`: typed accessors for an event's payload.
    fn emit_event_payload(&mut self, event: &EventDeclaration, source_type: &str) {
        self.emit_doc(event.description.lines());
        self.write_indent();
        self.write("export interface ");
        self.write(&event.payload_type);
        self.write(" {");
        self.write_line();
        self.increase_indent();

        self.write_indent();
        self.write("getSource(): ");
        self.write(source_type);
        self.write(";");
        self.write_line();

        self.write_indent();
        if event.parameters.is_empty() {
            self.write("getParameters(): {};");
            self.write_line();
        } else {
            self.write("getParameters(): {");
            self.write_line();
            self.increase_indent();
            for parameter in &event.parameters {
                self.write_indent();
                self.write(&parameter.name);
                self.write(": ");
                self.write(&parameter.ty);
                self.write(";");
                self.write_line();
            }
            self.decrease_indent();
            self.write_indent();
            self.write("};");
            self.write_line();
        }

        for parameter in &event.parameters {
            self.emit_doc(parameter.description.lines());
            self.write_indent();
            self.write("getParameter(sName: \"");
            self.write(&parameter.name);
            self.write("\"): ");
            self.write(&parameter.ty);
            self.write(";");
            self.write_line();
        }

        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    fn emit_settings_interface(&mut self, settings: &SettingsInterface) {
        self.write_indent();
        self.write("export interface ");
        self.write(&settings.name);
        if let Some(base) = &settings.extends {
            self.write(" extends ");
            self.write(base);
        }
        self.write(" {");
        self.write_line();
        self.increase_indent();
        for property in &settings.properties {
            let mut doc: Vec<String> = property.description.lines().map(str::to_string).collect();
            if let Some(default_value) = &property.default_value {
                doc.push(format!("@default {default_value}"));
            }
            self.emit_doc(doc.iter().map(String::as_str));
            self.write_indent();
            self.write(&property.name);
            self.write("?: ");
            self.write(&property.ty);
            self.write(";");
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    // =========================================================================
    // Module framing and imports
    // =========================================================================

    fn begin_module(&mut self, module: &str) {
        self.write_indent();
        self.write("declare module \"");
        self.write(module);
        self.write("\" {");
        self.write_line();
        self.increase_indent();
    }

    fn end_module(&mut self) {
        self.decrease_indent();
        self.write_indent();
        self.write("}");
        self.write_line();
    }

    /// Imports grouped per module, both sorted. Types from the declaring
    /// module are visible without an import.
    fn emit_required_imports(&mut self, imports: &[TypeImport], current_module: &str) {
        let mut by_module: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for import in imports {
            if import.module.is_empty() || import.module == current_module {
                continue;
            }
            by_module
                .entry(import.module.as_str())
                .or_default()
                .push(import.name.as_str());
        }
        if by_module.is_empty() {
            return;
        }

        for (module, mut names) in by_module {
            names.sort_unstable();
            names.dedup();
            self.write_indent();
            self.write("import { ");
            self.write(&names.join(", "));
            self.write(" } from \"");
            self.write(module);
            self.write("\";");
            self.write_line();
        }
        self.write_line();
    }

    fn emit_doc<'d>(&mut self, lines: impl IntoIterator<Item = &'d str>) {
        let mut lines = lines.into_iter().peekable();
        if lines.peek().is_none() {
            return;
        }
        self.write_indent();
        self.write("/**");
        self.write_line();
        for line in lines {
            self.write_indent();
            self.write(" * ");
            self.write(&line.replace("*/", "*\\/"));
            self.write_line();
        }
        self.write_indent();
        self.write(" */");
        self.write_line();
    }

    // =========================================================================
    // Output helpers
    // =========================================================================

    fn reset_writer(&mut self) {
        self.writer = SourceWriter::with_capacity(4096);
        self.indent_level = 0;
    }

    fn take_output(&mut self) -> String {
        std::mem::take(&mut self.writer).into_output()
    }

    fn write(&mut self, s: &str) {
        self.writer.write(s);
    }

    fn write_line(&mut self) {
        self.writer.write_line();
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.writer.write(INDENT);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// Top-level names have no enclosing module; they declare one named after
/// themselves.
fn module_or_name<'a>(module: &'a str, qualified_name: &'a str) -> &'a str {
    if module.is_empty() {
        qualified_name
    } else {
        module
    }
}
