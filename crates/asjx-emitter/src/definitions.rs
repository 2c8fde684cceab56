//! Resolved program model consumed by the emitter.
//!
//! The front end hands over fully resolved definitions: names are qualified,
//! types are spelled as ActionScript type names and method bodies are kept as
//! plain syntax trees. The emitter never mutates any of it.

use bitflags::bitflags;

/// `a.b.C` -> (`a.b`, `C`).
pub(crate) fn split_qualified_name(qualified_name: &str) -> (&str, &str) {
    qualified_name
        .rsplit_once('.')
        .unwrap_or(("", qualified_name))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
    Internal,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const STATIC = 1 << 0;
        const OVERRIDE = 1 << 1;
        const FINAL = 1 << 2;
        const NATIVE = 1 << 3;
    }
}

// =============================================================================
// Method bodies
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Block,
    ExpressionStatement,
    Return,
    Call,
    MemberAccess,
    Assignment,
    Identifier,
    Literal,
    ThisKeyword,
    SuperKeyword,
    Other,
}

/// A node of a method body. Leaves have no children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub text: String,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn leaf(kind: SyntaxKind, text: impl Into<String>) -> Self {
        SyntaxNode {
            kind,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn node(kind: SyntaxKind, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode {
            kind,
            text: String::new(),
            children,
        }
    }

    pub fn this_keyword() -> Self {
        SyntaxNode::leaf(SyntaxKind::ThisKeyword, "this")
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        SyntaxNode::leaf(SyntaxKind::Identifier, name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_this_keyword(&self) -> bool {
        self.kind == SyntaxKind::ThisKeyword
    }
}

// =============================================================================
// Members
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterDefinition {
    pub name: String,
    /// Declared type; empty when untyped.
    pub type_name: String,
    pub default_value: Option<String>,
    pub is_rest: bool,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        ParameterDefinition {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        ParameterDefinition {
            name: name.into(),
            type_name: "Array".to_string(),
            is_rest: true,
            ..Default::default()
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn is_optional(&self) -> bool {
        self.default_value.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    #[default]
    Method,
    Getter,
    Setter,
    Constructor,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionDefinition {
    pub name: String,
    pub kind: FunctionKind,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub parameters: Vec<ParameterDefinition>,
    /// Declared return type; empty when omitted.
    pub return_type: String,
    pub body: Option<SyntaxNode>,
}

impl FunctionDefinition {
    pub fn method(name: impl Into<String>) -> Self {
        FunctionDefinition {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        FunctionDefinition {
            name: name.into(),
            kind: FunctionKind::Constructor,
            ..Default::default()
        }
    }

    pub fn getter(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        FunctionDefinition {
            name: name.into(),
            kind: FunctionKind::Getter,
            return_type: return_type.into(),
            ..Default::default()
        }
    }

    pub fn setter(name: impl Into<String>, value_type: impl Into<String>) -> Self {
        FunctionDefinition {
            name: name.into(),
            kind: FunctionKind::Setter,
            parameters: vec![ParameterDefinition::new("value", value_type)],
            return_type: "void".to_string(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDefinition) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_body(mut self, body: SyntaxNode) -> Self {
        self.body = Some(body);
        self
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == FunctionKind::Constructor
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.kind, FunctionKind::Getter | FunctionKind::Setter)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }

    pub fn is_override(&self) -> bool {
        self.modifiers.contains(Modifiers::OVERRIDE)
    }

    /// Type of the property an accessor exposes.
    pub fn accessor_type(&self) -> &str {
        match self.kind {
            FunctionKind::Setter => self
                .parameters
                .first()
                .map_or("", |param| param.type_name.as_str()),
            _ => &self.return_type,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub type_name: String,
    pub visibility: Visibility,
    pub modifiers: Modifiers,
    pub is_const: bool,
    /// Initializer expression, already rendered as JavaScript.
    pub initializer: Option<String>,
}

impl VariableDefinition {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        VariableDefinition {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn constant(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        VariableDefinition {
            is_const: true,
            ..VariableDefinition::new(name, type_name)
        }
    }

    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(Modifiers::STATIC)
    }
}

// =============================================================================
// Types
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterfaceDefinition {
    pub qualified_name: String,
    /// Extended interfaces as written, in declaration order.
    pub extended_interfaces: Vec<String>,
    pub members: Vec<FunctionDefinition>,
}

impl InterfaceDefinition {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        InterfaceDefinition {
            qualified_name: qualified_name.into(),
            ..Default::default()
        }
    }

    pub fn extending(mut self, interface: impl Into<String>) -> Self {
        self.extended_interfaces.push(interface.into());
        self
    }

    pub fn with_member(mut self, member: FunctionDefinition) -> Self {
        self.members.push(member);
        self
    }

    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).0
    }

    pub fn base_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).1
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDefinition {
    pub qualified_name: String,
    /// Base class as written; `None` extends the root `Object`.
    pub base_class: Option<String>,
    /// Implemented interfaces as written, in declaration order.
    pub implemented_interfaces: Vec<String>,
    pub constructor: Option<FunctionDefinition>,
    pub fields: Vec<VariableDefinition>,
    /// Methods and accessors in declaration order.
    pub methods: Vec<FunctionDefinition>,
}

impl ClassDefinition {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        ClassDefinition {
            qualified_name: qualified_name.into(),
            ..Default::default()
        }
    }

    pub fn extending(mut self, base: impl Into<String>) -> Self {
        self.base_class = Some(base.into());
        self
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.implemented_interfaces.push(interface.into());
        self
    }

    pub fn with_constructor(mut self, constructor: FunctionDefinition) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn with_field(mut self, field: VariableDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: FunctionDefinition) -> Self {
        self.methods.push(method);
        self
    }

    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).0
    }

    pub fn base_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Definition {
    Interface(InterfaceDefinition),
    Class(ClassDefinition),
}

impl Definition {
    pub fn qualified_name(&self) -> &str {
        match self {
            Definition::Interface(interface) => &interface.qualified_name,
            Definition::Class(class) => &class.qualified_name,
        }
    }
}

impl From<InterfaceDefinition> for Definition {
    fn from(interface: InterfaceDefinition) -> Self {
        Definition::Interface(interface)
    }
}

impl From<ClassDefinition> for Definition {
    fn from(class: ClassDefinition) -> Self {
        Definition::Class(class)
    }
}

/// One source file's worth of definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub file_name: String,
    pub definitions: Vec<Definition>,
}

impl CompilationUnit {
    pub fn new(file_name: impl Into<String>) -> Self {
        CompilationUnit {
            file_name: file_name.into(),
            definitions: Vec::new(),
        }
    }

    pub fn with_definition(mut self, definition: impl Into<Definition>) -> Self {
        self.definitions.push(definition.into());
        self
    }
}
