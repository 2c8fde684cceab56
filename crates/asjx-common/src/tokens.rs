//! Keyword, operator and punctuation vocabulary used by the emitters.
//!
//! Emission code writes `Token::Extends.text()` instead of scattering string
//! literals. The set covers JSDoc tag names, the ActionScript keywords the
//! declaration writer needs, and the JavaScript punctuation of both module
//! variants.

/// A single lexical token the emitters can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // JSDoc framing
    JsDocOpen,
    JsDocClose,
    Star,
    AtSign,

    // JSDoc tags
    Interface,
    Constructor,
    Extends,
    Implements,
    This,
    Private,
    Protected,
    Public,
    Const,
    Type,
    Param,
    Return,
    Override,

    // ActionScript declaration keywords
    Package,
    Class,
    Function,
    Var,
    Static,
    Final,
    Void,

    // Type markers
    AnyType,
    Ellipsis,

    // JavaScript punctuation
    Space,
    Equal,
    MemberAccess,
    Comma,
    Colon,
    Semicolon,
    ParenOpen,
    ParenClose,
    BlockOpen,
    BlockClose,
    SquareOpen,
    SquareClose,
    DoubleQuote,

    // JavaScript names
    Prototype,
    UseStrict,
    Define,
    Exports,
}

impl Token {
    /// The exact text written for this token.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Token::JsDocOpen => "/**",
            Token::JsDocClose => "*/",
            Token::Star => "*",
            Token::AtSign => "@",

            Token::Interface => "interface",
            Token::Constructor => "constructor",
            Token::Extends => "extends",
            Token::Implements => "implements",
            Token::This => "this",
            Token::Private => "private",
            Token::Protected => "protected",
            Token::Public => "public",
            Token::Const => "const",
            Token::Type => "type",
            Token::Param => "param",
            Token::Return => "return",
            Token::Override => "override",

            Token::Package => "package",
            Token::Class => "class",
            Token::Function => "function",
            Token::Var => "var",
            Token::Static => "static",
            Token::Final => "final",
            Token::Void => "void",

            Token::AnyType => "*",
            Token::Ellipsis => "...",

            Token::Space => " ",
            Token::Equal => "=",
            Token::MemberAccess => ".",
            Token::Comma => ",",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::ParenOpen => "(",
            Token::ParenClose => ")",
            Token::BlockOpen => "{",
            Token::BlockClose => "}",
            Token::SquareOpen => "[",
            Token::SquareClose => "]",
            Token::DoubleQuote => "\"",

            Token::Prototype => "prototype",
            Token::UseStrict => "\"use strict\";",
            Token::Define => "define",
            Token::Exports => "exports",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
#[path = "tests/tokens_tests.rs"]
mod tests;
