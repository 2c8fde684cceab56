//! Project-level name resolution used while emitting documentation.

use crate::definitions::{ClassDefinition, split_qualified_name};
use rustc_hash::FxHashMap;

/// Name of the root of every class hierarchy.
pub const ROOT_CLASS: &str = "Object";

/// A resolved type: its fully qualified name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeRef {
    qualified_name: String,
}

impl TypeRef {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        TypeRef {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn package_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).0
    }

    pub fn base_name(&self) -> &str {
        split_qualified_name(&self.qualified_name).1
    }

    pub fn is_root(&self) -> bool {
        self.qualified_name == ROOT_CLASS
    }
}

/// What the documentation emitter needs to know about the rest of the
/// project.
pub trait ProjectResolver {
    /// Superclass of `class`. A class without an explicit base resolves to
    /// the root `Object`; `None` means the written base is unknown.
    fn resolve_base_class(&self, class: &ClassDefinition) -> Option<TypeRef>;

    /// An implemented interface, as written in `class`.
    fn resolve_interface(&self, class: &ClassDefinition, name: &str) -> Option<TypeRef>;

    /// Package that declares `type_name` when seen from `from_package`.
    fn resolve_type_package(&self, type_name: &str, from_package: &str) -> Option<String>;
}

/// Table of every type in the project, keyed by qualified name.
#[derive(Clone, Debug, Default)]
pub struct ProjectIndex {
    types: FxHashMap<String, TypeRef>,
    /// Simple name -> qualified names declaring it.
    by_simple_name: FxHashMap<String, Vec<String>>,
}

impl ProjectIndex {
    pub fn new() -> Self {
        ProjectIndex::default()
    }

    pub fn with_types<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = ProjectIndex::new();
        for name in names {
            index.register(name);
        }
        index
    }

    pub fn register(&mut self, qualified_name: impl Into<String>) {
        let qualified_name = qualified_name.into();
        if self.types.contains_key(&qualified_name) {
            return;
        }
        let simple = split_qualified_name(&qualified_name).1.to_string();
        self.by_simple_name
            .entry(simple)
            .or_default()
            .push(qualified_name.clone());
        self.types
            .insert(qualified_name.clone(), TypeRef::new(qualified_name));
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve `name` as written inside `from_package`.
    ///
    /// An exact qualified match wins, then a type of the same package, then
    /// an unambiguous simple-name match anywhere in the project.
    pub fn lookup(&self, name: &str, from_package: &str) -> Option<&TypeRef> {
        if let Some(found) = self.types.get(name) {
            return Some(found);
        }
        if !from_package.is_empty() {
            if let Some(found) = self.types.get(&format!("{from_package}.{name}")) {
                return Some(found);
            }
        }
        match self.by_simple_name.get(name).map(Vec::as_slice) {
            Some([only]) => self.types.get(only),
            _ => None,
        }
    }
}

impl ProjectResolver for ProjectIndex {
    fn resolve_base_class(&self, class: &ClassDefinition) -> Option<TypeRef> {
        match &class.base_class {
            None => Some(TypeRef::new(ROOT_CLASS)),
            Some(base) if base == ROOT_CLASS => Some(TypeRef::new(ROOT_CLASS)),
            Some(base) => self.lookup(base, class.package_name()).cloned(),
        }
    }

    fn resolve_interface(&self, class: &ClassDefinition, name: &str) -> Option<TypeRef> {
        self.lookup(name, class.package_name()).cloned()
    }

    fn resolve_type_package(&self, type_name: &str, from_package: &str) -> Option<String> {
        self.lookup(type_name, from_package)
            .map(|found| found.package_name().to_string())
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
