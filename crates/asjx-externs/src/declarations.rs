//! ActionScript declaration synthesis.
//!
//! Turns the reference graph into one ActionScript compilation unit per
//! class, interface, typedef, function and constant. Excluded classes and
//! members are left out. Closure types are evaluated through the model's
//! registry and mapped onto ActionScript type names; an expression that does
//! not evaluate becomes `*` and is reported.

use crate::jsdoc::{JsDocInfo, JsDocParam};
use crate::model::ReferenceModel;
use crate::reference::{
    ClassReference, ConstantReference, DeclarationSite, FunctionReference, MemberReference,
};
use crate::types::{JsType, TypeExpression};
use anyhow::{Context, Result};
use asjx_common::{DiagnosticBag, SourceWriter, Token, diagnostic_codes};
use std::path::{Path, PathBuf};
use tracing::debug;

const INDENT: &str = "    ";

/// Map an evaluated Closure type onto an ActionScript type name.
pub fn as_type_name(ty: &JsType) -> String {
    match ty {
        JsType::Number => "Number".to_string(),
        JsType::String => "String".to_string(),
        JsType::Boolean => "Boolean".to_string(),
        JsType::Void | JsType::Undefined => Token::Void.text().to_string(),
        JsType::All | JsType::Unknown | JsType::Null => Token::AnyType.text().to_string(),
        JsType::Named(name) => name.clone(),
        JsType::Generic { base, .. } => base.clone(),
        JsType::Function { .. } => "Function".to_string(),
        JsType::Record(_) => "Object".to_string(),
        JsType::Nullable(inner)
        | JsType::NonNull(inner)
        | JsType::Optional(inner)
        | JsType::Rest(inner) => as_type_name(inner),
        JsType::Union(members) => {
            // `T|null` and `T|undefined` are just `T`
            let mut concrete = members
                .iter()
                .filter(|member| !matches!(member, JsType::Null | JsType::Undefined));
            match (concrete.next(), concrete.next()) {
                (Some(only), None) => as_type_name(only),
                _ => Token::AnyType.text().to_string(),
            }
        }
    }
}

/// Default value written for an optional parameter of the given AS type.
fn default_value(as_type: &str) -> &'static str {
    match as_type {
        "Number" => "NaN",
        "Boolean" => "false",
        "*" => "undefined",
        _ => "null",
    }
}

/// One synthesized compilation unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub qualified_name: String,
    pub text: String,
}

impl Declaration {
    /// `a/b/C.as` for `a.b.C`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.qualified_name.split('.').collect();
        path.set_extension("as");
        path
    }
}

/// Write every declaration below `root`, creating package directories.
pub fn write_declarations(declarations: &[Declaration], root: &Path) -> Result<()> {
    for declaration in declarations {
        let path = root.join(declaration.relative_path());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, &declaration.text)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    debug!(count = declarations.len(), root = %root.display(), "wrote declarations");
    Ok(())
}

pub struct DeclarationWriter<'m> {
    model: &'m ReferenceModel,
    writer: SourceWriter,
    diagnostics: DiagnosticBag,
}

impl<'m> DeclarationWriter<'m> {
    pub fn new(model: &'m ReferenceModel) -> Self {
        DeclarationWriter {
            model,
            writer: SourceWriter::with_indent(INDENT),
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticBag {
        std::mem::take(&mut self.diagnostics)
    }

    /// Every unit in model order: classes, typedefs, functions, constants.
    ///
    /// A typedef sharing its name with a class would land on the class's
    /// file, so it is skipped and reported instead.
    pub fn write_all(&mut self) -> Vec<Declaration> {
        let model = self.model;
        let mut declarations = Vec::new();
        for class in model.classes().chain(model.typedefs()) {
            if class.is_typedef() && model.has_class(class.qualified_name()) {
                let site = class.site();
                self.diagnostics.warning_in(
                    site.source_file.as_str(),
                    site.span,
                    format!(
                        "Typedef [{}] skipped: a class of the same name is declared",
                        class.qualified_name()
                    ),
                    diagnostic_codes::TYPEDEF_SHADOWED_BY_CLASS,
                );
                continue;
            }
            if let Some(text) = self.write_class(class) {
                declarations.push(Declaration {
                    qualified_name: class.qualified_name().to_string(),
                    text,
                });
            }
        }
        for function in model.functions() {
            declarations.push(Declaration {
                qualified_name: function.qualified_name().to_string(),
                text: self.write_function(function),
            });
        }
        for constant in model.constants() {
            declarations.push(Declaration {
                qualified_name: constant.qualified_name().to_string(),
                text: self.write_constant(constant),
            });
        }
        declarations
    }

    /// Class, interface or typedef unit; `None` when the class is excluded.
    pub fn write_class(&mut self, class: &ClassReference) -> Option<String> {
        if let Some(excluded) = self.model.is_excluded_class(class) {
            debug!(class = class.qualified_name(), excluded = %excluded, "skip excluded class");
            return None;
        }
        self.open_package(class.package_name());
        self.write_class_header(class);
        self.writer.increase_indent();

        if class.is_typedef() {
            self.write_typedef_fields(class);
        } else {
            if !class.is_interface() {
                self.write_constructor(class);
            }
            for field in class.fields().iter() {
                self.write_field(class, field);
            }
            for method in class.methods().iter() {
                self.write_method(class, method);
            }
        }

        self.writer.decrease_indent();
        self.line(Token::BlockClose.text());
        self.close_package();
        Some(self.writer.take_output())
    }

    pub fn write_function(&mut self, function: &FunctionReference) -> String {
        self.open_package(function.package_name());
        let signature = self.signature(function.jsdoc(), function.site(), function.qualified_name());
        self.line(&format!(
            "public function {}{signature} {{}}",
            function.base_name()
        ));
        self.close_package();
        self.writer.take_output()
    }

    pub fn write_constant(&mut self, constant: &ConstantReference) -> String {
        self.open_package(constant.package_name());
        let type_name = match constant.evaluated_type() {
            Some(ty) => value_type_name(ty),
            None => {
                let type_expr = constant.jsdoc().and_then(|doc| doc.type_expr.as_deref());
                self.resolve_value_type(type_expr, constant.site(), constant.qualified_name())
            }
        };
        self.line(&format!(
            "public const {}:{type_name};",
            constant.base_name()
        ));
        self.close_package();
        self.writer.take_output()
    }

    // =========================================================================
    // Class parts
    // =========================================================================

    fn write_class_header(&mut self, class: &ClassReference) {
        let mut header = String::from("public ");
        if class.is_interface() {
            header.push_str(Token::Interface.text());
            header.push(' ');
            header.push_str(class.base_name());
            let extended = class.extended_interfaces();
            if !extended.is_empty() {
                header.push_str(" extends ");
                header.push_str(&extended.join(", "));
            }
        } else {
            if class.is_final() {
                header.push_str(Token::Final.text());
                header.push(' ');
            }
            header.push_str(Token::Class.text());
            header.push(' ');
            header.push_str(class.base_name());
            if let Some(base) = class.super_class_name() {
                header.push_str(" extends ");
                header.push_str(base);
            }
            let implemented = class.implemented_interfaces();
            if !implemented.is_empty() {
                header.push_str(" implements ");
                header.push_str(&implemented.join(", "));
            }
        }
        header.push_str(" {");
        self.line(&header);
    }

    fn write_constructor(&mut self, class: &ClassReference) {
        let params = self.parameter_list(class.constructor_params(), class.site(), class.qualified_name());
        self.line(&format!("public function {}({params}) {{}}", class.base_name()));
    }

    fn write_field(&mut self, class: &ClassReference, field: &MemberReference) {
        if self.is_excluded(class, field) {
            return;
        }
        let type_expr = field.jsdoc().and_then(|doc| doc.type_expr.as_deref());
        let type_name = self.resolve_value_type(type_expr, field.site(), &field.qualified_name());
        if class.is_interface() {
            self.line(&format!("function get {}():{type_name};", field.name()));
        } else {
            let modifier = if field.is_static() { "public static var" } else { "public var" };
            self.line(&format!("{modifier} {}:{type_name};", field.name()));
        }
    }

    fn write_method(&mut self, class: &ClassReference, method: &MemberReference) {
        if self.is_excluded(class, method) {
            return;
        }
        let signature = self.signature(method.jsdoc(), method.site(), &method.qualified_name());
        if class.is_interface() {
            self.line(&format!("function {}{signature};", method.name()));
        } else {
            let modifier = if method.is_static() {
                "public static function"
            } else {
                "public function"
            };
            self.line(&format!("{modifier} {}{signature} {{}}", method.name()));
        }
    }

    /// Typedef records become classes with one variable per record field.
    fn write_typedef_fields(&mut self, class: &ClassReference) {
        let Some(type_text) = class.jsdoc().and_then(|doc| doc.typedef_type.as_deref()) else {
            return;
        };
        let evaluated = self.model.evaluate(&TypeExpression::new(type_text));
        match evaluated {
            Ok(ty) => {
                if let JsType::Record(fields) = ty.non_nullable() {
                    for (name, field_type) in fields {
                        self.line(&format!("public var {name}:{};", value_type_name(field_type)));
                    }
                }
            }
            Err(err) => self.unresolved(type_text, class.site(), class.qualified_name(), &err.to_string()),
        }
    }

    fn is_excluded(&self, class: &ClassReference, member: &MemberReference) -> bool {
        match self.model.is_excluded_member(class, member) {
            Some(excluded) => {
                debug!(member = %excluded, "skip excluded member");
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Signatures and types
    // =========================================================================

    /// `(a:T, b:T = null, ...rest):R`
    fn signature(&mut self, jsdoc: Option<&JsDocInfo>, site: &DeclarationSite, context: &str) -> String {
        let params = jsdoc.map(|doc| doc.params.as_slice()).unwrap_or_default();
        let params = self.parameter_list(params, site, context);
        let return_type = match jsdoc.and_then(|doc| doc.return_type.as_deref()) {
            None => Token::Void.text().to_string(),
            Some(text) => match self.evaluate(text, site, context) {
                Some(ty) => as_type_name(&ty),
                None => Token::AnyType.text().to_string(),
            },
        };
        format!("({params}):{return_type}")
    }

    fn parameter_list(&mut self, params: &[JsDocParam], site: &DeclarationSite, context: &str) -> String {
        let mut rendered = Vec::with_capacity(params.len());
        for param in params {
            let evaluated = param
                .type_expr
                .as_deref()
                .and_then(|text| self.evaluate(text, site, context));
            let text = match evaluated {
                Some(ty) if ty.is_rest() => format!("{}{}", Token::Ellipsis.text(), param.name),
                Some(ty) if ty.is_optional() => {
                    let type_name = value_type_name(&ty);
                    let default = default_value(&type_name);
                    format!("{}:{type_name} = {default}", param.name)
                }
                Some(ty) => format!("{}:{}", param.name, value_type_name(&ty)),
                None => format!("{}:{}", param.name, Token::AnyType.text()),
            };
            rendered.push(text);
        }
        rendered.join(", ")
    }

    fn resolve_value_type(
        &mut self,
        type_expr: Option<&str>,
        site: &DeclarationSite,
        context: &str,
    ) -> String {
        type_expr
            .and_then(|text| self.evaluate(text, site, context))
            .map_or_else(|| Token::AnyType.text().to_string(), |ty| value_type_name(&ty))
    }

    fn evaluate(&mut self, text: &str, site: &DeclarationSite, context: &str) -> Option<JsType> {
        match self.model.evaluate(&TypeExpression::new(text)) {
            Ok(ty) => Some(ty),
            Err(err) => {
                self.unresolved(text, site, context, &err.to_string());
                None
            }
        }
    }

    fn unresolved(&mut self, text: &str, site: &DeclarationSite, context: &str, reason: &str) {
        self.diagnostics.warning_in(
            site.source_file.as_str(),
            site.span,
            format!("Unresolved type [{text}] in {context}: {reason}"),
            diagnostic_codes::UNRESOLVED_TYPE_EXPRESSION,
        );
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn open_package(&mut self, package_name: &str) {
        if package_name.is_empty() {
            self.line("package {");
        } else {
            self.line(&format!("package {package_name} {{"));
        }
        self.writer.increase_indent();
    }

    fn close_package(&mut self) {
        self.writer.decrease_indent();
        self.line(Token::BlockClose.text());
    }

    fn line(&mut self, text: &str) {
        self.writer.write(text);
        self.writer.write_line();
    }
}

/// Type name for a variable or parameter; `void` is not a value type.
fn value_type_name(ty: &JsType) -> String {
    let name = as_type_name(ty);
    if name == Token::Void.text() {
        Token::AnyType.text().to_string()
    } else {
        name
    }
}

#[cfg(test)]
#[path = "tests/declarations_tests.rs"]
mod tests;
