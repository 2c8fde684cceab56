//! JavaScript emitter for resolved ActionScript definitions.
//!
//! - `definitions` - the read-only program model handed over by the front end
//! - `resolver` - project-wide lookup of base classes, interfaces and packages
//! - `type_names` - ActionScript to Closure type name conversion
//! - `doc_emitter` - JSDoc blocks
//! - `emitter` - `JsEmitter` with namespace-object and AMD output

pub mod definitions;
pub use definitions::{
    ClassDefinition, CompilationUnit, Definition, FunctionDefinition, FunctionKind,
    InterfaceDefinition, Modifiers, ParameterDefinition, SyntaxKind, SyntaxNode,
    VariableDefinition, Visibility,
};

pub mod resolver;
pub use resolver::{ProjectIndex, ProjectResolver, ROOT_CLASS, TypeRef};

pub mod type_names;
pub use type_names::{convert_type_name, is_builtin_type};

pub mod doc_emitter;
pub use doc_emitter::{DocEmitter, contains_this_reference};

pub mod options;
pub use options::{EmitOptions, ModuleFormat};

pub mod emitter;
pub use emitter::{EmitOutput, JsEmitter};
