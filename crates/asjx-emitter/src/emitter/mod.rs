//! JavaScript emission for resolved compilation units.
//!
//! `JsEmitter` walks a unit's definitions in order and writes one of two
//! shapes selected by [`ModuleFormat`]:
//!
//! - **Goog**: definitions assigned straight into their namespace, each
//!   preceded by its Closure JSDoc block (see `goog.rs`).
//! - **AMD**: one `define(...)` wrapper per unit whose body registers every
//!   definition with the class runtime (see `module_wrapper.rs`).
//!
//! Documentation and supertype resolution go through [`DocEmitter`], which
//! also collects the unit's diagnostics.

mod goog;
mod helpers;
mod module_wrapper;

use crate::definitions::{ClassDefinition, CompilationUnit, Definition, InterfaceDefinition};
use crate::doc_emitter::DocEmitter;
use crate::options::{EmitOptions, ModuleFormat};
use crate::resolver::ProjectResolver;
use asjx_common::{Diagnostic, SourceWriter};
use tracing::debug;

/// Text and diagnostics produced for one compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitOutput {
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct JsEmitter<'a> {
    options: EmitOptions,
    writer: SourceWriter,
    docs: DocEmitter<'a>,
}

impl<'a> JsEmitter<'a> {
    pub fn new(options: EmitOptions, resolver: &'a dyn ProjectResolver) -> Self {
        JsEmitter {
            options,
            writer: SourceWriter::new(),
            docs: DocEmitter::new(resolver),
        }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    /// Emit every definition of `unit`. The emitter is reusable afterwards.
    pub fn emit_unit(&mut self, unit: &CompilationUnit) -> EmitOutput {
        debug!(
            file = %unit.file_name,
            definitions = unit.definitions.len(),
            format = ?self.options.module_format,
            "emit unit"
        );
        self.docs.set_file_name(&unit.file_name);

        match self.options.module_format {
            ModuleFormat::Goog => {
                for (index, definition) in unit.definitions.iter().enumerate() {
                    if index > 0 {
                        self.write_line();
                        self.write_line();
                    }
                    self.emit_definition(definition);
                }
            }
            ModuleFormat::Amd => self.emit_amd_module(unit),
        }

        EmitOutput {
            code: self.writer.take_output(),
            diagnostics: self.docs.take_diagnostics(),
        }
    }

    /// Emit one definition in namespace-object form.
    pub fn emit_definition(&mut self, definition: &Definition) {
        match definition {
            Definition::Interface(interface) => self.emit_interface(interface),
            Definition::Class(class) => self.emit_class(class),
        }
    }

    pub fn emit_interface(&mut self, interface: &InterfaceDefinition) {
        debug!(interface = %interface.qualified_name, "emit interface");
        self.emit_goog_interface(interface);
    }

    pub fn emit_class(&mut self, class: &ClassDefinition) {
        debug!(class = %class.qualified_name, "emit class");
        self.emit_goog_class(class);
    }

    /// Text written so far by `emit_definition`, `emit_interface` or
    /// `emit_class`, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        self.writer.take_output()
    }
}
