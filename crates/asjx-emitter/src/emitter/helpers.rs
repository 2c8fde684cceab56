use super::JsEmitter;
use crate::definitions::{FunctionDefinition, ParameterDefinition};
use asjx_common::Token;

impl JsEmitter<'_> {
    // =========================================================================
    // Output Helpers (delegate to SourceWriter)
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    pub(super) fn write_token(&mut self, token: Token) {
        self.writer.write(token.text());
    }

    pub(super) fn write_line(&mut self) {
        self.writer.write_line();
    }

    pub(super) fn write_space(&mut self) {
        self.writer.write_space();
    }

    /// Write a multi-line fragment such as a doc block.
    pub(super) fn write_fragment(&mut self, fragment: &str) {
        self.writer.write_fragment(fragment);
    }

    pub(super) fn write_semicolon(&mut self) {
        self.write_token(Token::Semicolon);
    }

    /// `"text"`
    pub(super) fn write_quoted(&mut self, text: &str) {
        self.write_token(Token::DoubleQuote);
        self.write(text);
        self.write_token(Token::DoubleQuote);
    }

    pub(super) fn increase_indent(&mut self) {
        self.writer.increase_indent();
    }

    pub(super) fn decrease_indent(&mut self) {
        self.writer.decrease_indent();
    }

    // =========================================================================
    // Function Helpers
    // =========================================================================

    /// `(a, b)`
    pub(super) fn write_parameter_list(&mut self, parameters: &[ParameterDefinition]) {
        self.write_token(Token::ParenOpen);
        for (index, param) in parameters.iter().enumerate() {
            if index > 0 {
                self.write_token(Token::Comma);
                self.write_space();
            }
            self.write(&param.name);
        }
        self.write_token(Token::ParenClose);
    }

    /// `function(a, b)`
    pub(super) fn write_function_head(&mut self, function: &FunctionDefinition) {
        self.write_token(Token::Function);
        self.write_parameter_list(&function.parameters);
    }

    /// `Target.prototype.name` for instance members, `Target.name` for
    /// statics.
    pub(super) fn write_member_target(&mut self, target: &str, name: &str, is_static: bool) {
        self.write(target);
        self.write_token(Token::MemberAccess);
        if !is_static {
            self.write_token(Token::Prototype);
            self.write_token(Token::MemberAccess);
        }
        self.write(name);
    }
}
