//! Externs walk that feeds the reference model.
//!
//! One forward pass over the top-level statements of an externs file. Each
//! statement is classified from its shape and its JSDoc:
//!
//! | statement                                   | registers          |
//! |---------------------------------------------|--------------------|
//! | `/** @constructor */ function Foo() {}`     | class              |
//! | `/** @interface */ Foo = function() {}`     | interface          |
//! | `/** @typedef {T} */ var Foo;`              | typedef            |
//! | `/** @const */ var ns = {};`                | namespace          |
//! | `Foo.prototype.m = function() {};`          | method             |
//! | `/** @type {T} */ Foo.prototype.f;`         | field              |
//! | `Foo.m = function() {};` (Foo a class)      | static method      |
//! | `/** @type {T} */ Foo.f;` (Foo a class)     | static field       |
//! | `function f() {}`, `ns.f = function() {};`  | function           |
//! | `/** @const {T} */ ns.C;`                   | constant           |

use crate::ast::{JsAst, JsNodeKind, NodeRef};
use crate::jsdoc::JsDocInfo;
use crate::model::ReferenceModel;
use crate::reference::split_qualified_name;
use crate::types::TypeExpression;
use tracing::{debug, trace};

const PROTOTYPE_SEGMENT: &str = ".prototype.";

pub struct ExternsCollector<'m> {
    model: &'m mut ReferenceModel,
}

impl<'m> ExternsCollector<'m> {
    /// Walk `ast` once, registering everything it declares in `model`.
    pub fn collect(ast: &JsAst, model: &'m mut ReferenceModel) {
        debug!(file = ast.source_file_name(), nodes = ast.len(), "collect externs");
        let mut collector = ExternsCollector { model };
        for statement in ast.statements() {
            collector.visit_statement(statement);
        }
    }

    fn visit_statement(&mut self, statement: NodeRef<'_>) {
        match statement.kind() {
            JsNodeKind::Function => self.visit_function_declaration(statement),
            JsNodeKind::Var => self.visit_var(statement),
            JsNodeKind::ExprResult => self.visit_expression_statement(statement),
            kind => trace!(?kind, "skip externs statement"),
        }
    }

    /// `function Foo() {}`
    fn visit_function_declaration(&mut self, function: NodeRef<'_>) {
        let Some(name) = function.first_child().filter(|n| n.kind() == JsNodeKind::Name) else {
            trace!("skip anonymous function");
            return;
        };
        let qualified_name = name.text();
        let registered = function
            .jsdoc()
            .is_some_and(|doc| self.register_type(function, qualified_name, doc));
        if !registered {
            self.model.add_function(function, qualified_name);
        }
    }

    /// `var Foo = ...;` or `var Foo;`
    fn visit_var(&mut self, var: NodeRef<'_>) {
        let Some(name) = var.first_child() else {
            return;
        };
        let init = name.first_child().map(|n| n.kind());
        self.classify(name, name.text(), init, var.jsdoc());
    }

    /// `a.b.c = value;` or `a.b.c;`
    fn visit_expression_statement(&mut self, statement: NodeRef<'_>) {
        let Some(expression) = statement.first_child() else {
            return;
        };
        match expression.kind() {
            JsNodeKind::Assign => {
                let Some(target) = expression.child(0) else {
                    return;
                };
                let value = expression.child(1).map(|n| n.kind());
                self.classify(target, target.text(), value, target.best_jsdoc());
            }
            JsNodeKind::GetProp | JsNodeKind::Name => {
                self.classify(expression, expression.text(), None, expression.jsdoc());
            }
            kind => trace!(?kind, "skip expression statement"),
        }
    }

    /// Register the entity named `qualified_name` declared at `node`.
    fn classify(
        &mut self,
        node: NodeRef<'_>,
        qualified_name: &str,
        value: Option<JsNodeKind>,
        jsdoc: Option<&JsDocInfo>,
    ) {
        if qualified_name.is_empty() {
            return;
        }
        if let Some(doc) = jsdoc {
            if self.register_type(node, qualified_name, doc) {
                return;
            }
        }
        if value == Some(JsNodeKind::ObjectLit) {
            self.model.add_namespace(node, qualified_name);
            return;
        }
        let is_function = value == Some(JsNodeKind::Function)
            || jsdoc.is_some_and(|doc| value.is_none() && doc.is_function_like());

        if let Some((class_name, member_name)) = qualified_name.split_once(PROTOTYPE_SEGMENT) {
            if member_name.contains('.') {
                trace!(name = qualified_name, "skip nested prototype property");
            } else if is_function {
                self.model.add_method(node, class_name, member_name);
            } else {
                self.model.add_field(node, class_name, member_name);
            }
            return;
        }

        let (owner, simple_name) = split_qualified_name(qualified_name);
        if !owner.is_empty() && self.model.has_class(owner) {
            if is_function {
                self.model.add_static_method(node, owner, simple_name);
            } else {
                self.model.add_static_field(node, owner, simple_name);
            }
            return;
        }

        if is_function {
            self.model.add_function(node, qualified_name);
            return;
        }

        match jsdoc {
            Some(doc) if doc.is_const || doc.type_expr.is_some() => {
                self.register_constant(node, qualified_name, doc);
            }
            _ => trace!(name = qualified_name, "skip undocumented declaration"),
        }
    }

    /// Classes, interfaces and typedefs. Returns whether `doc` declared one.
    fn register_type(&mut self, node: NodeRef<'_>, qualified_name: &str, doc: &JsDocInfo) -> bool {
        if doc.is_constructor {
            if doc.is_final {
                self.model.add_final_class(node, qualified_name);
            } else {
                self.model.add_class(node, qualified_name);
            }
        } else if doc.is_interface_like() {
            self.model.add_interface(node, qualified_name);
        } else if doc.is_typedef() {
            self.model.add_typedef(node, qualified_name);
        } else {
            return false;
        }
        true
    }

    fn register_constant(&mut self, node: NodeRef<'_>, qualified_name: &str, doc: &JsDocInfo) {
        let Some(type_text) = doc.type_expr.as_deref() else {
            self.model.add_constant(node, qualified_name);
            return;
        };
        match self.model.evaluate(&TypeExpression::new(type_text)) {
            Ok(ty) => self.model.add_constant_type(node, qualified_name, ty),
            Err(err) => {
                debug!(name = qualified_name, error = %err, "constant type not evaluated");
                self.model.add_constant(node, qualified_name);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/collector_tests.rs"]
mod tests;
