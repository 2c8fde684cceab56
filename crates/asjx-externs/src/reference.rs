//! Entities of the reference graph.
//!
//! A [`ClassReference`] stands for a class, an interface, a final class or a
//! typedef; the kind is a set of [`ClassFlags`], so the registries the
//! entity lives in decide how it is treated. Members are kept in two
//! [`MemberTable`]s (fields and methods), each split by static-ness so an
//! instance and a static member can share a name.

use crate::ast::{NodeId, NodeRef};
use crate::jsdoc::{JsDocInfo, JsDocParam};
use crate::types::JsType;
use asjx_common::Span;
use bitflags::bitflags;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

/// Insertion-ordered map with the Fx hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
/// Insertion-ordered set with the Fx hasher.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ClassFlags: u8 {
        const INTERFACE = 1 << 0;
        const FINAL = 1 << 1;
        const TYPEDEF = 1 << 2;
    }
}

/// `a.b.C` -> (`a.b`, `C`); a top-level name has an empty package.
pub(crate) fn split_qualified_name(qualified_name: &str) -> (&str, &str) {
    qualified_name
        .rsplit_once('.')
        .unwrap_or(("", qualified_name))
}

/// Where an entity was declared: enough to report a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclarationSite {
    pub node: NodeId,
    pub source_file: String,
    pub span: Span,
}

impl DeclarationSite {
    pub fn of(node: NodeRef<'_>) -> Self {
        DeclarationSite {
            node: node.id(),
            source_file: node.source_file_name().to_string(),
            span: node.span(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

#[derive(Clone, Debug)]
pub struct MemberReference {
    name: String,
    owner: String,
    kind: MemberKind,
    is_static: bool,
    jsdoc: Option<JsDocInfo>,
    site: DeclarationSite,
}

impl MemberReference {
    pub fn new(
        node: NodeRef<'_>,
        owner: impl Into<String>,
        name: impl Into<String>,
        kind: MemberKind,
        is_static: bool,
        jsdoc: Option<JsDocInfo>,
    ) -> Self {
        MemberReference {
            name: name.into(),
            owner: owner.into(),
            kind,
            is_static,
            jsdoc,
            site: DeclarationSite::of(node),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified name of the owning class.
    pub fn owner_name(&self) -> &str {
        &self.owner
    }

    /// `Owner.name`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    pub fn jsdoc(&self) -> Option<&JsDocInfo> {
        self.jsdoc.as_ref()
    }

    pub fn site(&self) -> &DeclarationSite {
        &self.site
    }
}

/// Members of one kind, split into instance and static namespaces.
#[derive(Clone, Debug, Default)]
pub struct MemberTable {
    instance: FxIndexMap<String, MemberReference>,
    statics: FxIndexMap<String, MemberReference>,
}

impl MemberTable {
    /// Insert unless the name is taken in the member's namespace; a rejected
    /// member is handed back.
    pub fn insert(&mut self, member: MemberReference) -> Result<(), MemberReference> {
        let table = if member.is_static {
            &mut self.statics
        } else {
            &mut self.instance
        };
        if table.contains_key(&member.name) {
            return Err(member);
        }
        table.insert(member.name.clone(), member);
        Ok(())
    }

    pub fn get(&self, name: &str, is_static: bool) -> Option<&MemberReference> {
        if is_static {
            self.statics.get(name)
        } else {
            self.instance.get(name)
        }
    }

    pub fn contains(&self, name: &str, is_static: bool) -> bool {
        self.get(name, is_static).is_some()
    }

    pub fn instance(&self) -> impl Iterator<Item = &MemberReference> {
        self.instance.values()
    }

    pub fn statics(&self) -> impl Iterator<Item = &MemberReference> {
        self.statics.values()
    }

    /// Instance members, then statics, each in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &MemberReference> {
        self.instance().chain(self.statics())
    }

    pub fn len(&self) -> usize {
        self.instance.len() + self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instance.is_empty() && self.statics.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct ClassReference {
    qualified_name: String,
    flags: ClassFlags,
    jsdoc: Option<JsDocInfo>,
    site: DeclarationSite,
    fields: MemberTable,
    methods: MemberTable,
}

impl ClassReference {
    pub fn new(
        node: NodeRef<'_>,
        qualified_name: impl Into<String>,
        flags: ClassFlags,
        jsdoc: Option<JsDocInfo>,
    ) -> Self {
        ClassReference {
            qualified_name: qualified_name.into(),
            flags,
            jsdoc,
            site: DeclarationSite::of(node),
            fields: MemberTable::default(),
            methods: MemberTable::default(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Simple name (after the last `.`).
    pub fn base_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).1
    }

    /// Package part of the name, empty for top-level classes.
    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).0
    }

    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }

    pub fn is_typedef(&self) -> bool {
        self.flags.contains(ClassFlags::TYPEDEF)
    }

    pub fn jsdoc(&self) -> Option<&JsDocInfo> {
        self.jsdoc.as_ref()
    }

    pub fn site(&self) -> &DeclarationSite {
        &self.site
    }

    pub fn source_file_name(&self) -> &str {
        &self.site.source_file
    }

    /// `@extends` of a class. Interfaces use [`Self::extended_interfaces`].
    pub fn super_class_name(&self) -> Option<&str> {
        self.jsdoc.as_ref()?.base_type.as_deref()
    }

    pub fn implemented_interfaces(&self) -> &[String] {
        self.jsdoc
            .as_ref()
            .map(|doc| doc.implemented_interfaces.as_slice())
            .unwrap_or_default()
    }

    pub fn extended_interfaces(&self) -> &[String] {
        self.jsdoc
            .as_ref()
            .map(|doc| doc.extended_interfaces.as_slice())
            .unwrap_or_default()
    }

    /// Constructor `@param`s.
    pub fn constructor_params(&self) -> &[JsDocParam] {
        self.jsdoc
            .as_ref()
            .map(|doc| doc.params.as_slice())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &MemberTable {
        &self.fields
    }

    pub fn methods(&self) -> &MemberTable {
        &self.methods
    }

    pub fn field(&self, name: &str, is_static: bool) -> Option<&MemberReference> {
        self.fields.get(name, is_static)
    }

    pub fn method(&self, name: &str, is_static: bool) -> Option<&MemberReference> {
        self.methods.get(name, is_static)
    }

    /// Route a member to the table of its kind.
    pub(crate) fn insert_member(&mut self, member: MemberReference) -> Result<(), MemberReference> {
        match member.kind {
            MemberKind::Field => self.fields.insert(member),
            MemberKind::Method => self.methods.insert(member),
        }
    }
}

/// A free function.
#[derive(Clone, Debug)]
pub struct FunctionReference {
    qualified_name: String,
    jsdoc: Option<JsDocInfo>,
    site: DeclarationSite,
}

impl FunctionReference {
    pub fn new(node: NodeRef<'_>, qualified_name: impl Into<String>, jsdoc: Option<JsDocInfo>) -> Self {
        FunctionReference {
            qualified_name: qualified_name.into(),
            jsdoc,
            site: DeclarationSite::of(node),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn base_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).1
    }

    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).0
    }

    pub fn jsdoc(&self) -> Option<&JsDocInfo> {
        self.jsdoc.as_ref()
    }

    pub fn site(&self) -> &DeclarationSite {
        &self.site
    }
}

/// A top-level constant, optionally with its evaluated type.
#[derive(Clone, Debug)]
pub struct ConstantReference {
    qualified_name: String,
    jsdoc: Option<JsDocInfo>,
    site: DeclarationSite,
    evaluated_type: Option<JsType>,
}

impl ConstantReference {
    pub fn new(
        node: NodeRef<'_>,
        qualified_name: impl Into<String>,
        jsdoc: Option<JsDocInfo>,
        evaluated_type: Option<JsType>,
    ) -> Self {
        ConstantReference {
            qualified_name: qualified_name.into(),
            jsdoc,
            site: DeclarationSite::of(node),
            evaluated_type,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn base_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).1
    }

    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).0
    }

    pub fn jsdoc(&self) -> Option<&JsDocInfo> {
        self.jsdoc.as_ref()
    }

    pub fn site(&self) -> &DeclarationSite {
        &self.site
    }

    pub fn evaluated_type(&self) -> Option<&JsType> {
        self.evaluated_type.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/reference_tests.rs"]
mod tests;
