//! Closure JSDoc blocks for emitted definitions.
//!
//! Every `emit_*_doc` method renders into the emitter's own buffer and hands
//! back the finished fragment. A block is only written once its first tag
//! arrives, so a member with nothing to say produces an empty fragment
//! instead of a bare `/** */`.
//!
//! Tags inside a block always come in this order: interface or constructor,
//! extends, implements or this, visibility, const, type, param, return,
//! override.

use crate::definitions::{
    ClassDefinition, FunctionDefinition, InterfaceDefinition, SyntaxNode, VariableDefinition,
    Visibility, split_qualified_name,
};
use crate::resolver::ProjectResolver;
use crate::type_names::convert_type_name;
use asjx_common::{Diagnostic, DiagnosticBag, SourceWriter, Span, Token, diagnostic_codes};
use rustc_hash::FxHashSet;

/// Whether `body` mentions `this` anywhere.
///
/// Depth-first and short-circuiting: the first `this` leaf found ends the
/// walk.
pub fn contains_this_reference(body: &SyntaxNode) -> bool {
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        if node.is_this_keyword() {
            return true;
        }
        stack.extend(node.children.iter().rev());
    }
    false
}

pub struct DocEmitter<'a> {
    resolver: &'a dyn ProjectResolver,
    writer: SourceWriter,
    /// `begin` was called and no tag has been written yet.
    armed: bool,
    /// `/**` has been written for the current block.
    open: bool,
    diagnostics: DiagnosticBag,
    /// (code, class, name) already reported for this unit.
    reported: FxHashSet<(u32, String, String)>,
}

impl<'a> DocEmitter<'a> {
    pub fn new(resolver: &'a dyn ProjectResolver) -> Self {
        DocEmitter {
            resolver,
            writer: SourceWriter::new(),
            armed: false,
            open: false,
            diagnostics: DiagnosticBag::new(),
            reported: FxHashSet::default(),
        }
    }

    /// File name attached to diagnostics recorded from now on.
    pub fn set_file_name(&mut self, file_name: impl Into<String>) {
        self.diagnostics.set_default_file(file_name);
        self.reported.clear();
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }

    // =========================================================================
    // Block primitives
    // =========================================================================

    /// Start a block. `/**` is written with the first tag.
    pub fn begin(&mut self) {
        self.armed = true;
    }

    /// Write ` * @name[ {type}][ param]`.
    pub fn emit_tag(&mut self, name: Token, type_expr: Option<&str>, param: Option<&str>) {
        if self.armed && !self.open {
            self.writer.write(Token::JsDocOpen.text());
            self.writer.write_line();
            self.open = true;
        }
        self.writer.write_space();
        self.writer.write(Token::Star.text());
        self.writer.write_space();
        self.writer.write(Token::AtSign.text());
        self.writer.write(name.text());
        if let Some(type_expr) = type_expr {
            self.writer.write_space();
            self.writer.write(Token::BlockOpen.text());
            self.writer.write(type_expr);
            self.writer.write(Token::BlockClose.text());
        }
        if let Some(param) = param {
            self.writer.write_space();
            self.writer.write(param);
        }
        self.writer.write_line();
    }

    /// Close the block if a tag opened it.
    pub fn end(&mut self) {
        if self.open {
            self.writer.write_space();
            self.writer.write(Token::JsDocClose.text());
            self.writer.write_line();
        }
        self.armed = false;
        self.open = false;
    }

    fn finish(&mut self) -> String {
        self.writer.take_output()
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    pub fn emit_interface_doc(&mut self, interface: &InterfaceDefinition) -> String {
        self.begin();
        self.emit_tag(Token::Interface, None, None);
        for extended in &interface.extended_interfaces {
            self.emit_tag(Token::Extends, Some(extended), None);
        }
        self.end();
        self.finish()
    }

    /// Field doc. Public non-constant fields use the short form; visibility
    /// and constness need a block.
    pub fn emit_field_doc(&mut self, field: &VariableDefinition, class_package: &str) -> String {
        let type_name = convert_type_name(&field.type_name, class_package);
        let visibility = match field.visibility {
            Visibility::Private => Some(Token::Private),
            Visibility::Protected => Some(Token::Protected),
            Visibility::Public | Visibility::Internal => None,
        };
        if visibility.is_none() && !field.is_const {
            self.write_type_short(&type_name);
            return self.finish();
        }
        self.begin();
        if let Some(visibility) = visibility {
            self.emit_tag(visibility, None, None);
        }
        if field.is_const {
            self.emit_tag(Token::Const, None, None);
        }
        self.emit_tag(Token::Type, Some(&type_name), None);
        self.end();
        self.finish()
    }

    pub fn emit_method_doc(&mut self, function: &FunctionDefinition, class: &ClassDefinition) -> String {
        let class_package = class.package_name();
        self.begin();

        if function.is_constructor() {
            self.emit_tag(Token::Constructor, None, None);
            if let Some(base) = self.base_class_name(class) {
                self.emit_tag(Token::Extends, Some(&base), None);
            }
            for interface in &class.implemented_interfaces {
                let name = self.interface_name(class, interface);
                self.emit_tag(Token::Implements, Some(&name), None);
            }
        } else if function.body.as_ref().is_some_and(contains_this_reference) {
            self.emit_tag(Token::This, Some(&class.qualified_name), None);
        }

        for param in &function.parameters {
            let type_name = if param.is_rest {
                Token::Ellipsis.text().to_string()
            } else {
                let package = self
                    .resolver
                    .resolve_type_package(&param.type_name, class_package)
                    .unwrap_or_default();
                let mut converted = convert_type_name(&param.type_name, &package);
                if param.is_optional() {
                    converted.push_str(Token::Equal.text());
                }
                converted
            };
            self.emit_tag(Token::Param, Some(&type_name), Some(&param.name));
        }

        if !function.is_constructor() {
            let return_type = function.return_type.as_str();
            if !return_type.is_empty() && return_type != Token::Void.text() {
                let converted = convert_type_name(return_type, class_package);
                self.emit_tag(Token::Return, Some(&converted), None);
            }
            if function.is_override() {
                self.emit_tag(Token::Override, None, None);
            }
        }

        self.end();
        self.finish()
    }

    /// Local or package variable. Constants get a block on a fresh line.
    pub fn emit_var_doc(&mut self, variable: &VariableDefinition, package: &str) -> String {
        let type_name = convert_type_name(&variable.type_name, package);
        if !variable.is_const {
            self.write_type_short(&type_name);
            return self.finish();
        }
        self.writer.write_line();
        self.begin();
        self.emit_tag(Token::Const, None, None);
        self.emit_tag(Token::Type, Some(&type_name), None);
        self.end();
        self.finish()
    }

    /// `/** @type {T} */ ` for an ActionScript type seen from `package`.
    pub fn emit_type_short(&mut self, type_name: &str, package: &str) -> String {
        let converted = convert_type_name(type_name, package);
        self.write_type_short(&converted);
        self.finish()
    }

    fn write_type_short(&mut self, converted: &str) {
        self.writer.write(Token::JsDocOpen.text());
        self.writer.write_space();
        self.writer.write(Token::AtSign.text());
        self.writer.write(Token::Type.text());
        self.writer.write_space();
        self.writer.write(Token::BlockOpen.text());
        self.writer.write(converted);
        self.writer.write(Token::BlockClose.text());
        self.writer.write_space();
        self.writer.write(Token::JsDocClose.text());
        self.writer.write_space();
    }

    // =========================================================================
    // Supertype resolution
    // =========================================================================

    /// Qualified superclass name, or `None` when the class extends the root.
    /// An unknown base keeps the name as written.
    pub fn base_class_name(&mut self, class: &ClassDefinition) -> Option<String> {
        match self.resolver.resolve_base_class(class) {
            Some(base) if base.is_root() => None,
            Some(base) => Some(base.qualified_name().to_string()),
            None => {
                let written = class.base_class.clone()?;
                self.report(
                    diagnostic_codes::UNRESOLVED_BASE_CLASS,
                    class,
                    &written,
                    format!("Base class [{written}] of [{}] not found", class.qualified_name),
                );
                Some(written)
            }
        }
    }

    /// Qualified name of an implemented interface, or the name as written.
    pub fn interface_name(&mut self, class: &ClassDefinition, interface: &str) -> String {
        if let Some(resolved) = self.resolver.resolve_interface(class, interface) {
            return resolved.qualified_name().to_string();
        }
        self.report(
            diagnostic_codes::UNRESOLVED_INTERFACE,
            class,
            interface,
            format!("Interface [{interface}] of [{}] not found", class.qualified_name),
        );
        interface.to_string()
    }

    /// `name` qualified with the package that declares it, or unchanged when
    /// the project does not know it.
    pub fn qualified_type_name(&self, name: &str, from_package: &str) -> String {
        match self.resolver.resolve_type_package(name, from_package) {
            Some(package) if !package.is_empty() => {
                format!("{package}.{}", split_qualified_name(name).1)
            }
            _ => name.to_string(),
        }
    }

    fn report(&mut self, code: u32, class: &ClassDefinition, name: &str, message: String) {
        let key = (code, class.qualified_name.clone(), name.to_string());
        if self.reported.insert(key) {
            self.diagnostics.warning(Span::dummy(), message, code);
        }
    }
}

#[cfg(test)]
#[path = "tests/doc_emitter_tests.rs"]
mod tests;
