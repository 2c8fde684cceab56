//! Namespace-object output: every definition is assigned into its package
//! namespace and documented with Closure JSDoc.

use super::JsEmitter;
use crate::definitions::{ClassDefinition, FunctionDefinition, InterfaceDefinition};
use asjx_common::Token;
use rustc_hash::FxHashSet;

const GOOG_INHERITS: &str = "goog.inherits";

impl JsEmitter<'_> {
    /// ```text
    /// /**
    ///  * @interface
    ///  */
    /// public interface IA {
    /// }
    /// IA.prototype.foo;
    /// IA.prototype.bar = function(value);
    /// ```
    pub(super) fn emit_goog_interface(&mut self, interface: &InterfaceDefinition) {
        let doc = self.docs.emit_interface_doc(interface);
        self.write_fragment(&doc);

        self.write_token(Token::Public);
        self.write_space();
        self.write_token(Token::Interface);
        self.write_space();
        self.write(interface.base_name());
        self.write_space();
        self.write_token(Token::BlockOpen);
        self.write_line();
        self.write_token(Token::BlockClose);

        // A getter/setter pair is one property.
        let mut seen_accessors = FxHashSet::default();
        for member in &interface.members {
            if member.is_accessor() && !seen_accessors.insert(member.name.as_str()) {
                continue;
            }
            self.write_line();
            self.write_member_target(&interface.qualified_name, &member.name, false);
            if !member.is_accessor() {
                self.write_space();
                self.write_token(Token::Equal);
                self.write_space();
                self.write_function_head(member);
            }
            self.write_semicolon();
        }
    }

    pub(super) fn emit_goog_class(&mut self, class: &ClassDefinition) {
        let qualified_name = class.qualified_name.as_str();
        let package = class.package_name();

        let implicit_constructor;
        let constructor = match &class.constructor {
            Some(constructor) => constructor,
            None => {
                implicit_constructor = FunctionDefinition::constructor(class.base_name());
                &implicit_constructor
            }
        };

        let doc = self.docs.emit_method_doc(constructor, class);
        self.write_fragment(&doc);
        self.write(qualified_name);
        self.write_space();
        self.write_token(Token::Equal);
        self.write_space();
        self.write_function_head(constructor);
        self.write_empty_body();

        if let Some(base) = self.docs.base_class_name(class) {
            self.write_line();
            self.write(GOOG_INHERITS);
            self.write_token(Token::ParenOpen);
            self.write(qualified_name);
            self.write_token(Token::Comma);
            self.write_space();
            self.write(&base);
            self.write_token(Token::ParenClose);
            self.write_semicolon();
        }

        for field in &class.fields {
            self.write_line();
            self.write_line();
            let doc = self.docs.emit_field_doc(field, package);
            self.write_fragment(&doc);
            self.write_member_target(qualified_name, &field.name, field.is_static());
            if let Some(initializer) = &field.initializer {
                self.write_space();
                self.write_token(Token::Equal);
                self.write_space();
                self.write(initializer);
            }
            self.write_semicolon();
        }

        let mut seen_accessors = FxHashSet::default();
        for method in &class.methods {
            if method.is_constructor() {
                continue;
            }
            if method.is_accessor() {
                if !seen_accessors.insert((method.name.as_str(), method.is_static())) {
                    continue;
                }
                self.write_line();
                self.write_line();
                let doc = self.docs.emit_type_short(method.accessor_type(), package);
                self.write(&doc);
                self.write_member_target(qualified_name, &method.name, method.is_static());
                self.write_semicolon();
                continue;
            }

            self.write_line();
            self.write_line();
            let doc = self.docs.emit_method_doc(method, class);
            self.write_fragment(&doc);
            self.write_member_target(qualified_name, &method.name, method.is_static());
            self.write_space();
            self.write_token(Token::Equal);
            self.write_space();
            self.write_function_head(method);
            self.write_empty_body();
        }
    }

    /// ` {` newline `};`
    fn write_empty_body(&mut self) {
        self.write_space();
        self.write_token(Token::BlockOpen);
        self.write_line();
        self.write_token(Token::BlockClose);
        self.write_semicolon();
    }
}
