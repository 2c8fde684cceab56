//! The reference graph built from one externs pass.
//!
//! `ReferenceModel` owns every entity discovered by the collector walk and is
//! read-only once the walk finishes. Registries are keyed by qualified name
//! and keep discovery order, so anything generated from the model comes out
//! in the same order on every run.
//!
//! Registration never fails hard: a duplicate keeps the first entity and
//! records a warning, a member whose class is unknown is dropped with an
//! error. Both end up in the model's [`DiagnosticBag`].

use crate::ast::NodeRef;
use crate::exclusion::{ExcludedMember, ExclusionPolicy, NoExclusions};
use crate::jsdoc::JsDocInfo;
use crate::reference::{
    ClassFlags, ClassReference, ConstantReference, FunctionReference, FxIndexMap, FxIndexSet,
    MemberKind, MemberReference,
};
use crate::types::{EvaluateError, JsType, TypeExpression, TypeRegistry};
use asjx_common::{DiagnosticBag, diagnostic_codes};
use std::sync::Arc;
use tracing::debug;

pub struct ReferenceModel {
    policy: Box<dyn ExclusionPolicy>,
    registry: Option<Arc<dyn TypeRegistry + Send + Sync>>,
    namespaces: FxIndexSet<String>,
    classes: FxIndexMap<String, ClassReference>,
    typedefs: FxIndexMap<String, ClassReference>,
    functions: FxIndexMap<String, FunctionReference>,
    constants: FxIndexMap<String, ConstantReference>,
    diagnostics: DiagnosticBag,
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReferenceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceModel")
            .field("namespaces", &self.namespaces)
            .field("classes", &self.classes.len())
            .field("typedefs", &self.typedefs.len())
            .field("functions", &self.functions.len())
            .field("constants", &self.constants.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}

impl ReferenceModel {
    /// An empty model that excludes nothing and has no type registry.
    pub fn new() -> Self {
        ReferenceModel {
            policy: Box::new(NoExclusions),
            registry: None,
            namespaces: FxIndexSet::default(),
            classes: FxIndexMap::default(),
            typedefs: FxIndexMap::default(),
            functions: FxIndexMap::default(),
            constants: FxIndexMap::default(),
            diagnostics: DiagnosticBag::new(),
        }
    }

    pub fn with_policy(policy: impl ExclusionPolicy + 'static) -> Self {
        let mut model = Self::new();
        model.policy = Box::new(policy);
        model
    }

    pub fn set_policy(&mut self, policy: impl ExclusionPolicy + 'static) {
        self.policy = Box::new(policy);
    }

    pub fn set_type_registry(&mut self, registry: Arc<dyn TypeRegistry + Send + Sync>) {
        self.registry = Some(registry);
    }

    // =========================================================================
    // Builder operations
    // =========================================================================

    pub fn add_namespace(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        if !self.namespaces.insert(qualified_name.to_string()) {
            self.duplicate(
                node,
                format!("Duplicate namespace [{qualified_name}]"),
                diagnostic_codes::DUPLICATE_NAMESPACE,
            );
            return;
        }
        debug!(namespace = qualified_name, "add namespace");
    }

    pub fn add_class(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        self.add_class_entity(
            node,
            qualified_name,
            ClassFlags::empty(),
            "Duplicate class",
            diagnostic_codes::DUPLICATE_CLASS,
        );
    }

    pub fn add_interface(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        self.add_class_entity(
            node,
            qualified_name,
            ClassFlags::INTERFACE,
            "Duplicate @interface",
            diagnostic_codes::DUPLICATE_INTERFACE,
        );
    }

    pub fn add_final_class(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        self.add_class_entity(
            node,
            qualified_name,
            ClassFlags::FINAL,
            "Duplicate final class",
            diagnostic_codes::DUPLICATE_FINAL_CLASS,
        );
    }

    /// Typedefs live in their own registry; a name may be both a class and
    /// a typedef.
    pub fn add_typedef(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        if self.typedefs.contains_key(qualified_name) {
            self.duplicate(
                node,
                format!("Duplicate @typedef [{qualified_name}]"),
                diagnostic_codes::DUPLICATE_TYPEDEF,
            );
            return;
        }
        debug!(typedef = qualified_name, "add typedef");
        let class = ClassReference::new(
            node,
            qualified_name,
            ClassFlags::TYPEDEF,
            node.best_jsdoc().cloned(),
        );
        self.typedefs.insert(qualified_name.to_string(), class);
    }

    pub fn add_function(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        if self.functions.contains_key(qualified_name) {
            self.duplicate(
                node,
                format!("Duplicate global function [{qualified_name}]"),
                diagnostic_codes::DUPLICATE_FUNCTION,
            );
            return;
        }
        debug!(function = qualified_name, "add function");
        let function = FunctionReference::new(node, qualified_name, node.best_jsdoc().cloned());
        self.functions.insert(qualified_name.to_string(), function);
    }

    pub fn add_constant(&mut self, node: NodeRef<'_>, qualified_name: &str) {
        self.add_constant_entity(node, qualified_name, None);
    }

    pub fn add_constant_type(&mut self, node: NodeRef<'_>, qualified_name: &str, ty: JsType) {
        self.add_constant_entity(node, qualified_name, Some(ty));
    }

    /// Instance fields carry the node's own documentation.
    pub fn add_field(&mut self, node: NodeRef<'_>, class_name: &str, member_name: &str) {
        let jsdoc = node.jsdoc().cloned();
        self.add_member(node, class_name, member_name, MemberKind::Field, false, jsdoc);
    }

    pub fn add_static_field(&mut self, node: NodeRef<'_>, class_name: &str, member_name: &str) {
        let jsdoc = node.best_jsdoc().cloned();
        self.add_member(node, class_name, member_name, MemberKind::Field, true, jsdoc);
    }

    pub fn add_method(&mut self, node: NodeRef<'_>, class_name: &str, member_name: &str) {
        let jsdoc = node.best_jsdoc().cloned();
        self.add_member(node, class_name, member_name, MemberKind::Method, false, jsdoc);
    }

    pub fn add_static_method(&mut self, node: NodeRef<'_>, class_name: &str, member_name: &str) {
        let jsdoc = node.best_jsdoc().cloned();
        self.add_member(node, class_name, member_name, MemberKind::Method, true, jsdoc);
    }

    fn add_class_entity(
        &mut self,
        node: NodeRef<'_>,
        qualified_name: &str,
        flags: ClassFlags,
        duplicate_label: &str,
        duplicate_code: u32,
    ) {
        if self.classes.contains_key(qualified_name) {
            self.duplicate(
                node,
                format!("{duplicate_label} [{qualified_name}]"),
                duplicate_code,
            );
            return;
        }
        debug!(class = qualified_name, flags = ?flags, "add class");
        let class = ClassReference::new(node, qualified_name, flags, node.best_jsdoc().cloned());
        self.classes.insert(qualified_name.to_string(), class);
    }

    fn add_constant_entity(&mut self, node: NodeRef<'_>, qualified_name: &str, ty: Option<JsType>) {
        if self.constants.contains_key(qualified_name) {
            self.duplicate(
                node,
                format!("Duplicate constant [{qualified_name}]"),
                diagnostic_codes::DUPLICATE_CONSTANT,
            );
            return;
        }
        debug!(constant = qualified_name, typed = ty.is_some(), "add constant");
        let constant = ConstantReference::new(node, qualified_name, node.best_jsdoc().cloned(), ty);
        self.constants.insert(qualified_name.to_string(), constant);
    }

    fn add_member(
        &mut self,
        node: NodeRef<'_>,
        class_name: &str,
        member_name: &str,
        kind: MemberKind,
        is_static: bool,
        jsdoc: Option<JsDocInfo>,
    ) {
        let Some(class) = self.classes.get_mut(class_name) else {
            self.diagnostics.error_in(
                node.source_file_name(),
                node.span(),
                format!("Class [{class_name}] not found in {}", node.source_file_name()),
                diagnostic_codes::MISSING_OWNER_CLASS,
            );
            return;
        };
        let member = MemberReference::new(node, class_name, member_name, kind, is_static, jsdoc);
        match class.insert_member(member) {
            Ok(()) => {
                debug!(
                    class = class_name,
                    member = member_name,
                    kind = ?kind,
                    is_static,
                    "add member"
                );
            }
            Err(rejected) => {
                self.duplicate(
                    node,
                    format!("Duplicate member [{}]", rejected.qualified_name()),
                    diagnostic_codes::DUPLICATE_MEMBER,
                );
            }
        }
    }

    fn duplicate(&mut self, node: NodeRef<'_>, message: String, code: u32) {
        self.diagnostics
            .warning_in(node.source_file_name(), node.span(), message, code);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Evaluate a Closure type expression through the installed registry.
    pub fn evaluate(&self, expression: &TypeExpression) -> Result<JsType, EvaluateError> {
        self.registry
            .as_ref()
            .ok_or(EvaluateError::NoRegistry)?
            .evaluate(expression)
    }

    pub fn is_excluded_class(&self, class: &ClassReference) -> Option<ExcludedMember> {
        self.policy.is_excluded_class(class)
    }

    pub fn is_excluded_member(
        &self,
        class: &ClassReference,
        member: &MemberReference,
    ) -> Option<ExcludedMember> {
        self.policy.is_excluded_member(class, member)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassReference> {
        self.classes.values()
    }

    pub fn typedefs(&self) -> impl Iterator<Item = &ClassReference> {
        self.typedefs.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionReference> {
        self.functions.values()
    }

    pub fn constants(&self) -> impl Iterator<Item = &ConstantReference> {
        self.constants.values()
    }

    pub fn class_reference(&self, qualified_name: &str) -> Option<&ClassReference> {
        self.classes.get(qualified_name)
    }

    /// Only entities registered as interfaces.
    pub fn interface_reference(&self, qualified_name: &str) -> Option<&ClassReference> {
        self.class_reference(qualified_name)
            .filter(|class| class.is_interface())
    }

    pub fn object_reference(&self) -> Option<&ClassReference> {
        self.class_reference("Object")
    }

    pub fn typedef_reference(&self, qualified_name: &str) -> Option<&ClassReference> {
        self.typedefs.get(qualified_name)
    }

    pub fn function_reference(&self, qualified_name: &str) -> Option<&FunctionReference> {
        self.functions.get(qualified_name)
    }

    pub fn constant_reference(&self, qualified_name: &str) -> Option<&ConstantReference> {
        self.constants.get(qualified_name)
    }

    pub fn has_namespace(&self, qualified_name: &str) -> bool {
        self.namespaces.contains(qualified_name)
    }

    pub fn has_class(&self, qualified_name: &str) -> bool {
        self.classes.contains_key(qualified_name)
    }

    pub fn has_typedef(&self, qualified_name: &str) -> bool {
        self.typedefs.contains_key(qualified_name)
    }

    pub fn has_constant(&self, qualified_name: &str) -> bool {
        self.constants.contains_key(qualified_name)
    }

    /// Every class and typedef name, for seeding a type registry.
    pub fn declared_type_names(&self) -> Vec<String> {
        self.classes
            .keys()
            .chain(self.typedefs.keys())
            .cloned()
            .collect()
    }

    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticBag {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
