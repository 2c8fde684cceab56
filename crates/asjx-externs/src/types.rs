//! Closure type expressions and their evaluation.
//!
//! Externs describe types as raw Closure type text (`?Array.<string>`,
//! `function(number=):boolean`, `{x: number}`). The reference model treats
//! evaluation as an oracle behind [`TypeRegistry`]; [`NativeTypeRegistry`]
//! is the implementation used by the externs pipeline: it parses the
//! expression and resolves every name against the built-in natives plus the
//! names registered from the externs themselves.

use rustc_hash::FxHashSet;
use std::fmt;

/// Raw, unevaluated Closure type text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeExpression {
    text: String,
}

impl TypeExpression {
    pub fn new(text: impl Into<String>) -> Self {
        TypeExpression { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for TypeExpression {
    fn from(text: &str) -> Self {
        TypeExpression::new(text)
    }
}

impl From<String> for TypeExpression {
    fn from(text: String) -> Self {
        TypeExpression { text }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// An evaluated Closure type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsType {
    /// `*`
    All,
    /// `?`
    Unknown,
    Void,
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    /// A resolved named type (`Object`, `Element`, `goog.events.Event`).
    Named(String),
    /// `Array.<string>`, `Object.<string, number>`
    Generic { base: String, args: Vec<JsType> },
    Union(Vec<JsType>),
    /// `?T`
    Nullable(Box<JsType>),
    /// `!T`
    NonNull(Box<JsType>),
    /// `T=` (optional parameter)
    Optional(Box<JsType>),
    /// `...T` (rest parameter)
    Rest(Box<JsType>),
    Function {
        params: Vec<JsType>,
        result: Option<Box<JsType>>,
    },
    /// `{name: T, ...}`
    Record(Vec<(String, JsType)>),
}

impl JsType {
    /// Strip nullability markers: `?T`, `!T` and `T` all name `T`.
    pub fn non_nullable(&self) -> &JsType {
        match self {
            JsType::Nullable(inner) | JsType::NonNull(inner) => inner.non_nullable(),
            other => other,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, JsType::Optional(_))
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, JsType::Rest(_))
    }

    /// `void` and `undefined` both mean "no value" in return position.
    pub fn is_void(&self) -> bool {
        matches!(self, JsType::Void | JsType::Undefined)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, types: &[JsType], separator: &str) -> fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl fmt::Display for JsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsType::All => f.write_str("*"),
            JsType::Unknown => f.write_str("?"),
            JsType::Void => f.write_str("void"),
            JsType::Undefined => f.write_str("undefined"),
            JsType::Null => f.write_str("null"),
            JsType::Boolean => f.write_str("boolean"),
            JsType::Number => f.write_str("number"),
            JsType::String => f.write_str("string"),
            JsType::Named(name) => f.write_str(name),
            JsType::Generic { base, args } => {
                write!(f, "{base}.<")?;
                write_list(f, args, ", ")?;
                f.write_str(">")
            }
            JsType::Union(members) => {
                f.write_str("(")?;
                write_list(f, members, "|")?;
                f.write_str(")")
            }
            JsType::Nullable(inner) => write!(f, "?{inner}"),
            JsType::NonNull(inner) => write!(f, "!{inner}"),
            JsType::Optional(inner) => write!(f, "{inner}="),
            JsType::Rest(inner) => write!(f, "...{inner}"),
            JsType::Function { params, result } => {
                f.write_str("function(")?;
                write_list(f, params, ", ")?;
                f.write_str(")")?;
                if let Some(result) = result {
                    write!(f, ": {result}")?;
                }
                Ok(())
            }
            JsType::Record(fields) => {
                f.write_str("{")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Why a type expression could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvaluateError {
    /// The model has no registry installed.
    NoRegistry,
    /// A name in the expression is neither native nor declared.
    UnknownType(String),
    Syntax {
        expression: String,
        position: usize,
        message: String,
    },
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluateError::NoRegistry => f.write_str("no type registry installed"),
            EvaluateError::UnknownType(name) => write!(f, "unknown type '{name}'"),
            EvaluateError::Syntax {
                expression,
                position,
                message,
            } => write!(f, "{message} at {position} in '{expression}'"),
        }
    }
}

impl std::error::Error for EvaluateError {}

/// Type-expression evaluation oracle consumed by the reference model.
pub trait TypeRegistry {
    fn evaluate(&self, expression: &TypeExpression) -> Result<JsType, EvaluateError>;
}

/// Names every Closure externs set may use without declaring them.
const NATIVE_TYPES: &[&str] = &[
    "Arguments",
    "Array",
    "Boolean",
    "Date",
    "Error",
    "EvalError",
    "Function",
    "IArrayLike",
    "IObject",
    "IThenable",
    "Iterable",
    "Iterator",
    "JSON",
    "Map",
    "Math",
    "Number",
    "Object",
    "Promise",
    "RangeError",
    "ReferenceError",
    "RegExp",
    "Set",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "WeakMap",
    "WeakSet",
];

/// Registry of native names plus names declared by the externs.
#[derive(Clone, Debug)]
pub struct NativeTypeRegistry {
    names: FxHashSet<String>,
}

impl Default for NativeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeTypeRegistry {
    pub fn new() -> Self {
        NativeTypeRegistry {
            names: NATIVE_TYPES.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    /// Natives plus `names`.
    pub fn with_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        registry.names.extend(names.into_iter().map(Into::into));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl TypeRegistry for NativeTypeRegistry {
    fn evaluate(&self, expression: &TypeExpression) -> Result<JsType, EvaluateError> {
        let mut parser = TypeParser::new(expression.text(), self);
        let ty = parser.parse_top()?;
        if parser.peek().is_some() {
            return Err(parser.error("unexpected trailing characters"));
        }
        Ok(ty)
    }
}

// =============================================================================
// Type expression parser
// =============================================================================

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

/// Recursive descent over the Closure type grammar.
///
/// ```text
/// top      := '...' union? | union '='?
/// union    := prefixed ('|' prefixed)*
/// prefixed := '?' primary? | '!' primary | primary
/// primary  := '*' | '(' union ')' | record | function | name generic?
/// ```
struct TypeParser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Open `primary` productions on the current path.
    depth: usize,
    registry: &'a NativeTypeRegistry,
}

/// Deepest nesting accepted before an expression is rejected.
const MAX_DEPTH: usize = 256;

impl<'a> TypeParser<'a> {
    fn new(src: &'a str, registry: &'a NativeTypeRegistry) -> Self {
        TypeParser {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            depth: 0,
            registry,
        }
    }

    fn error(&self, message: &str) -> EvaluateError {
        EvaluateError::Syntax {
            expression: self.src.to_string(),
            position: self.pos,
            message: message.to_string(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        self.skip_whitespace();
        if self.src[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), EvaluateError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", expected as char)))
        }
    }

    /// Consume `this:` / `new:` function context markers.
    fn eat_context(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let rest = &self.src[self.pos..];
        let Some(after) = rest.strip_prefix(keyword) else {
            return false;
        };
        let after = after.trim_start();
        if after.starts_with(':') {
            self.pos += rest.len() - after.len() + 1;
            true
        } else {
            false
        }
    }

    /// True where an optional type may be omitted (`?` alone, `...` alone).
    fn at_type_end(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(b'|' | b')' | b',' | b'>' | b'=' | b'}')
        )
    }

    fn parse_top(&mut self) -> Result<JsType, EvaluateError> {
        if self.eat_str("...") {
            let inner = if self.at_type_end() {
                JsType::Unknown
            } else {
                self.parse_union()?
            };
            return Ok(JsType::Rest(Box::new(inner)));
        }
        let ty = self.parse_union()?;
        if self.eat(b'=') {
            Ok(JsType::Optional(Box::new(ty)))
        } else {
            Ok(ty)
        }
    }

    fn parse_union(&mut self) -> Result<JsType, EvaluateError> {
        let first = self.parse_prefixed()?;
        if self.peek() != Some(b'|') {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.eat(b'|') {
            members.push(self.parse_prefixed()?);
        }
        Ok(JsType::Union(members))
    }

    fn parse_prefixed(&mut self) -> Result<JsType, EvaluateError> {
        if self.eat(b'?') {
            if self.at_type_end() {
                return Ok(JsType::Unknown);
            }
            return Ok(JsType::Nullable(Box::new(self.parse_primary()?)));
        }
        if self.eat(b'!') {
            return Ok(JsType::NonNull(Box::new(self.parse_primary()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<JsType, EvaluateError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("type expression nested too deeply"));
        }
        self.depth += 1;
        let result = self.parse_primary_inner();
        self.depth -= 1;
        result
    }

    fn parse_primary_inner(&mut self) -> Result<JsType, EvaluateError> {
        match self.peek() {
            Some(b'*') => {
                self.pos += 1;
                Ok(JsType::All)
            }
            Some(b'(') => {
                self.pos += 1;
                let inner = self.parse_union()?;
                self.expect(b')')?;
                Ok(inner)
            }
            Some(b'{') => self.parse_record(),
            Some(b) if is_ident_start(b) => {
                let name = self.parse_name()?;
                if name == "function" {
                    self.parse_function()
                } else {
                    self.parse_named(name)
                }
            }
            Some(_) => Err(self.error("unexpected character")),
            None => Err(self.error("unexpected end of type expression")),
        }
    }

    fn parse_ident(&mut self) -> Result<&'a str, EvaluateError> {
        self.skip_whitespace();
        let start = self.pos;
        if !self.bytes.get(self.pos).copied().is_some_and(is_ident_start) {
            return Err(self.error("expected identifier"));
        }
        while self.bytes.get(self.pos).copied().is_some_and(is_ident_part) {
            self.pos += 1;
        }
        let src = self.src;
        Ok(&src[start..self.pos])
    }

    /// Dotted name. Stops before `.<` so generics parse separately.
    fn parse_name(&mut self) -> Result<String, EvaluateError> {
        self.skip_whitespace();
        let start = self.pos;
        self.parse_ident()?;
        while self.bytes.get(self.pos) == Some(&b'.')
            && self
                .bytes
                .get(self.pos + 1)
                .copied()
                .is_some_and(is_ident_start)
        {
            self.pos += 1;
            self.parse_ident()?;
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn resolve(&self, name: String) -> Result<JsType, EvaluateError> {
        Ok(match name.as_str() {
            "number" => JsType::Number,
            "string" => JsType::String,
            "boolean" => JsType::Boolean,
            "void" => JsType::Void,
            "undefined" => JsType::Undefined,
            "null" => JsType::Null,
            _ if self.registry.contains(&name) => JsType::Named(name),
            _ => return Err(EvaluateError::UnknownType(name)),
        })
    }

    fn parse_named(&mut self, name: String) -> Result<JsType, EvaluateError> {
        if !(self.eat_str(".<") || self.eat(b'<')) {
            return self.resolve(name);
        }
        let mut args = Vec::new();
        loop {
            args.push(self.parse_top()?);
            if self.eat(b',') {
                continue;
            }
            self.expect(b'>')?;
            break;
        }
        match self.resolve(name)? {
            JsType::Named(base) => Ok(JsType::Generic { base, args }),
            _ => Err(self.error("type arguments on a primitive type")),
        }
    }

    fn parse_function(&mut self) -> Result<JsType, EvaluateError> {
        self.expect(b'(')?;
        let mut params = Vec::new();
        if !self.eat(b')') {
            loop {
                if self.eat_context("this") || self.eat_context("new") {
                    self.parse_union()?;
                } else {
                    params.push(self.parse_top()?);
                }
                if self.eat(b',') {
                    continue;
                }
                self.expect(b')')?;
                break;
            }
        }
        let result = if self.eat(b':') {
            Some(Box::new(self.parse_prefixed()?))
        } else {
            None
        };
        Ok(JsType::Function { params, result })
    }

    fn parse_record(&mut self) -> Result<JsType, EvaluateError> {
        self.expect(b'{')?;
        let mut fields = Vec::new();
        if !self.eat(b'}') {
            loop {
                let key = self.parse_ident()?.to_string();
                let ty = if self.eat(b':') {
                    self.parse_top()?
                } else {
                    JsType::Unknown
                };
                fields.push((key, ty));
                if self.eat(b',') {
                    continue;
                }
                self.expect(b'}')?;
                break;
            }
        }
        Ok(JsType::Record(fields))
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
