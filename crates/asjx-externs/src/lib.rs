//! Closure externs reference model.
//!
//! This crate covers the reverse direction of the compiler: a walk over
//! Closure-annotated externs JavaScript builds a [`ReferenceModel`] of the
//! classes, interfaces, typedefs, functions, constants and namespaces it
//! declares, and [`DeclarationWriter`] turns that model into ActionScript
//! declarations.
//!
//! The JavaScript parser and type checker are external collaborators. They
//! are represented here by the minimal interfaces the model consumes:
//! - [`JsAst`] / [`NodeRef`] - syntax node handles with parent links and JSDoc
//! - [`TypeRegistry`] - the type-expression evaluation oracle
//! - [`ExclusionPolicy`] - which classes and members are dropped from output

// Syntax node handles produced by the externs parser
pub mod ast;
pub use ast::{JsAst, JsNode, JsNodeKind, NodeId, NodeRef};

// JSDoc metadata attached to externs nodes
pub mod jsdoc;
pub use jsdoc::{JsDocInfo, JsDocParam};

// Closure type expressions and the evaluation oracle
pub mod types;
pub use types::{EvaluateError, JsType, NativeTypeRegistry, TypeExpression, TypeRegistry};

// Exclusion policy and its JSON configuration
pub mod exclusion;
pub use exclusion::{ExcludedMember, ExclusionPolicy, NoExclusions};
pub mod config;
pub use config::{ExcludeEntry, ExternsConfig};

// Reference entities and the graph that owns them
pub mod reference;
pub use reference::{
    ClassFlags, ClassReference, ConstantReference, DeclarationSite, FunctionReference,
    FxIndexMap, FxIndexSet, MemberKind, MemberReference, MemberTable,
};
pub mod model;
pub use model::ReferenceModel;

// Externs walk that feeds the model
pub mod collector;
pub use collector::ExternsCollector;

// ActionScript declaration synthesis
pub mod declarations;
pub use declarations::{Declaration, DeclarationWriter, as_type_name, write_declarations};
