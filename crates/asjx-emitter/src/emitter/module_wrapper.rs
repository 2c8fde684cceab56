//! AMD output: one `define(...)` per unit, each definition registered with
//! the class runtime.
//!
//! ```text
//! define(["exports", "runtime/AS3", "com/acme/Base"], function($exports, AS3, Base) {
//!     "use strict";
//!     AS3.class_($exports, {
//!         package_: "com.acme",
//!         class_: "Foo",
//!         extends_: Base,
//!         members: {
//!             run: function(a) {}
//!         }
//!     });
//! });
//! ```

use super::JsEmitter;
use crate::definitions::{
    ClassDefinition, CompilationUnit, Definition, FunctionDefinition, FunctionKind,
    InterfaceDefinition,
};
use asjx_common::Token;
use rustc_hash::FxHashSet;
use tracing::debug;

const INTERFACE_CALL: &str = "interface_";
const CLASS_CALL: &str = "class_";

/// A supertype module the unit depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
struct AmdDependency {
    qualified_name: String,
    /// Module id: the qualified name with `.` replaced by `/`.
    path: String,
    /// Factory parameter bound to the module.
    param: String,
}

impl JsEmitter<'_> {
    pub(super) fn emit_amd_module(&mut self, unit: &CompilationUnit) {
        let dependencies = self.collect_amd_dependencies(unit);
        let runtime_module = self.options.runtime_module.clone();
        let runtime_name = self.options.runtime_name.clone();

        self.write_token(Token::Define);
        self.write_token(Token::ParenOpen);
        self.write_token(Token::SquareOpen);
        self.write_quoted(Token::Exports.text());
        self.write_token(Token::Comma);
        self.write_space();
        self.write_quoted(&runtime_module);
        for dependency in &dependencies {
            self.write_token(Token::Comma);
            self.write_space();
            self.write_quoted(&dependency.path);
        }
        self.write_token(Token::SquareClose);
        self.write_token(Token::Comma);
        self.write_space();
        self.write_token(Token::Function);
        self.write_token(Token::ParenOpen);
        self.write("$");
        self.write_token(Token::Exports);
        self.write_token(Token::Comma);
        self.write_space();
        self.write(&runtime_name);
        for dependency in &dependencies {
            self.write_token(Token::Comma);
            self.write_space();
            self.write(&dependency.param);
        }
        self.write_token(Token::ParenClose);
        self.write_space();
        self.write_token(Token::BlockOpen);
        self.write_line();
        self.increase_indent();

        self.write_token(Token::UseStrict);
        self.write_space();
        self.write_line();

        for definition in &unit.definitions {
            match definition {
                Definition::Interface(interface) => {
                    self.emit_amd_interface(interface, &dependencies);
                }
                Definition::Class(class) => self.emit_amd_class(class, &dependencies),
            }
            self.write_line();
        }

        self.decrease_indent();
        self.write_token(Token::BlockClose);
        self.write_token(Token::ParenClose);
        self.write_semicolon();
    }

    /// Supertypes of every definition, first occurrence first.
    fn collect_amd_dependencies(&mut self, unit: &CompilationUnit) -> Vec<AmdDependency> {
        let mut qualified_names = Vec::new();
        for definition in &unit.definitions {
            match definition {
                Definition::Interface(interface) => {
                    for extended in &interface.extended_interfaces {
                        qualified_names.push(
                            self.docs
                                .qualified_type_name(extended, interface.package_name()),
                        );
                    }
                }
                Definition::Class(class) => {
                    if let Some(base) = self.docs.base_class_name(class) {
                        qualified_names.push(base);
                    }
                    for interface in &class.implemented_interfaces {
                        qualified_names.push(self.docs.interface_name(class, interface));
                    }
                }
            }
        }

        let mut taken: FxHashSet<String> = FxHashSet::default();
        taken.insert(format!("${}", Token::Exports.text()));
        taken.insert(self.options.runtime_name.clone());

        let mut dependencies: Vec<AmdDependency> = Vec::new();
        for qualified_name in qualified_names {
            if dependencies
                .iter()
                .any(|dep| dep.qualified_name == qualified_name)
            {
                continue;
            }
            let simple = qualified_name
                .rsplit_once('.')
                .map_or(qualified_name.as_str(), |(_, name)| name);
            let param = if taken.contains(simple) {
                qualified_name.replace('.', "_")
            } else {
                simple.to_string()
            };
            taken.insert(param.clone());
            debug!(dependency = %qualified_name, param = %param, "amd dependency");
            dependencies.push(AmdDependency {
                path: qualified_name.replace('.', "/"),
                qualified_name,
                param,
            });
        }
        dependencies
    }

    fn emit_amd_interface(&mut self, interface: &InterfaceDefinition, dependencies: &[AmdDependency]) {
        let extended: Vec<String> = interface
            .extended_interfaces
            .iter()
            .map(|name| {
                let qualified = self.docs.qualified_type_name(name, interface.package_name());
                dependency_param(dependencies, &qualified)
            })
            .collect();

        self.begin_runtime_call(INTERFACE_CALL);
        let mut first = true;
        self.write_entry_key(&mut first, "package_");
        self.write_quoted(interface.package_name());
        self.write_entry_key(&mut first, INTERFACE_CALL);
        self.write_quoted(interface.base_name());
        if !extended.is_empty() {
            self.write_entry_key(&mut first, "extends_");
            self.write_name_list(&extended);
        }
        self.end_runtime_call();
    }

    fn emit_amd_class(&mut self, class: &ClassDefinition, dependencies: &[AmdDependency]) {
        let base = self
            .docs
            .base_class_name(class)
            .map(|base| dependency_param(dependencies, &base));
        let interfaces: Vec<String> = class
            .implemented_interfaces
            .iter()
            .map(|name| {
                let qualified = self.docs.interface_name(class, name);
                dependency_param(dependencies, &qualified)
            })
            .collect();

        self.begin_runtime_call(CLASS_CALL);
        let mut first = true;
        self.write_entry_key(&mut first, "package_");
        self.write_quoted(class.package_name());
        self.write_entry_key(&mut first, CLASS_CALL);
        self.write_quoted(class.base_name());
        if let Some(base) = base {
            self.write_entry_key(&mut first, "extends_");
            self.write(&base);
        }
        if !interfaces.is_empty() {
            self.write_entry_key(&mut first, "implements_");
            self.write_name_list(&interfaces);
        }

        let members = member_entries(class, false);
        if !members.is_empty() {
            self.write_entry_key(&mut first, "members");
            self.write_object(&members);
        }
        let static_members = member_entries(class, true);
        if !static_members.is_empty() {
            self.write_entry_key(&mut first, "staticMembers");
            self.write_object(&static_members);
        }
        self.end_runtime_call();
    }

    /// `AS3.kind($exports, {` and open the entry block.
    fn begin_runtime_call(&mut self, kind: &str) {
        let runtime_name = self.options.runtime_name.clone();
        self.write(&runtime_name);
        self.write_token(Token::MemberAccess);
        self.write(kind);
        self.write_token(Token::ParenOpen);
        self.write("$");
        self.write_token(Token::Exports);
        self.write_token(Token::Comma);
        self.write_space();
        self.write_token(Token::BlockOpen);
        self.write_line();
        self.increase_indent();
    }

    fn end_runtime_call(&mut self) {
        self.write_line();
        self.decrease_indent();
        self.write_token(Token::BlockClose);
        self.write_token(Token::ParenClose);
        self.write_semicolon();
    }

    /// `key: `, preceded by `,` and a newline unless it is the first entry.
    fn write_entry_key(&mut self, first: &mut bool, key: &str) {
        if !*first {
            self.write_token(Token::Comma);
            self.write_line();
        }
        *first = false;
        self.write(key);
        self.write_token(Token::Colon);
        self.write_space();
    }

    /// `[A, B]`
    fn write_name_list(&mut self, names: &[String]) {
        self.write_token(Token::SquareOpen);
        for (index, name) in names.iter().enumerate() {
            if index > 0 {
                self.write_token(Token::Comma);
                self.write_space();
            }
            self.write(name);
        }
        self.write_token(Token::SquareClose);
    }

    /// Nested `{ key: value, ... }` with one entry per line.
    fn write_object(&mut self, entries: &[(String, String)]) {
        self.write_token(Token::BlockOpen);
        self.write_line();
        self.increase_indent();
        let mut first = true;
        for (key, value) in entries {
            self.write_entry_key(&mut first, key);
            self.write(value);
        }
        self.write_line();
        self.decrease_indent();
        self.write_token(Token::BlockClose);
    }
}

/// Factory parameter for a supertype, or its qualified name when it is not
/// a module dependency.
fn dependency_param(dependencies: &[AmdDependency], qualified_name: &str) -> String {
    dependencies
        .iter()
        .find(|dep| dep.qualified_name == qualified_name)
        .map_or_else(|| qualified_name.to_string(), |dep| dep.param.clone())
}

/// `function(a, b) {}`
fn function_value(function: &FunctionDefinition) -> String {
    let params: Vec<&str> = function
        .parameters
        .iter()
        .map(|param| param.name.as_str())
        .collect();
    format!(
        "{}({}) {}{}",
        Token::Function.text(),
        params.join(", "),
        Token::BlockOpen.text(),
        Token::BlockClose.text()
    )
}

/// Runtime member table for the instance or static side of `class`.
///
/// Accessor pairs become one `{get: ..., set: ...}` entry at the position
/// of the first accessor.
fn member_entries(class: &ClassDefinition, statics: bool) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    if !statics {
        if let Some(constructor) = &class.constructor {
            entries.push((Token::Constructor.text().to_string(), function_value(constructor)));
        }
    }

    for field in class.fields.iter().filter(|f| f.is_static() == statics) {
        let value = field.initializer.clone().unwrap_or_else(|| "null".to_string());
        entries.push((field.name.clone(), value));
    }

    let mut seen_accessors = FxHashSet::default();
    for method in class
        .methods
        .iter()
        .filter(|m| !m.is_constructor() && m.is_static() == statics)
    {
        if !method.is_accessor() {
            entries.push((method.name.clone(), function_value(method)));
            continue;
        }
        if !seen_accessors.insert(method.name.as_str()) {
            continue;
        }
        let parts: Vec<String> = class
            .methods
            .iter()
            .filter(|m| m.is_accessor() && m.is_static() == statics && m.name == method.name)
            .map(|accessor| {
                let key = match accessor.kind {
                    FunctionKind::Setter => "set",
                    _ => "get",
                };
                format!("{key}: {}", function_value(accessor))
            })
            .collect();
        entries.push((
            method.name.clone(),
            format!(
                "{}{}{}",
                Token::BlockOpen.text(),
                parts.join(", "),
                Token::BlockClose.text()
            ),
        ));
    }

    entries
}
