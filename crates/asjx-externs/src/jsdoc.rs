//! JSDoc records attached to externs nodes.
//!
//! The externs parser produces one [`JsDocInfo`] per documented node. Type
//! positions hold raw Closure type text; evaluation happens later through
//! [`TypeRegistry`](crate::TypeRegistry).

/// One `@param {Type} name` entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsDocParam {
    pub name: String,
    pub type_expr: Option<String>,
}

/// Parsed JSDoc comment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsDocInfo {
    /// `@constructor`
    pub is_constructor: bool,
    /// `@interface`
    pub is_interface: bool,
    /// `@record` (a structural interface)
    pub is_record: bool,
    /// `@const`
    pub is_const: bool,
    /// `@final`
    pub is_final: bool,
    /// `@typedef {T}`
    pub typedef_type: Option<String>,
    /// `@type {T}`
    pub type_expr: Option<String>,
    /// `@extends {T}` on a constructor
    pub base_type: Option<String>,
    /// `@implements {T}`, in source order
    pub implemented_interfaces: Vec<String>,
    /// `@extends {T}` on an interface, in source order
    pub extended_interfaces: Vec<String>,
    pub params: Vec<JsDocParam>,
    /// `@return {T}`
    pub return_type: Option<String>,
    pub description: Option<String>,
}

impl JsDocInfo {
    pub fn constructor() -> Self {
        JsDocInfo {
            is_constructor: true,
            ..Default::default()
        }
    }

    pub fn interface() -> Self {
        JsDocInfo {
            is_interface: true,
            ..Default::default()
        }
    }

    pub fn record() -> Self {
        JsDocInfo {
            is_record: true,
            ..Default::default()
        }
    }

    pub fn typedef(type_expr: impl Into<String>) -> Self {
        JsDocInfo {
            typedef_type: Some(type_expr.into()),
            ..Default::default()
        }
    }

    pub fn constant() -> Self {
        JsDocInfo {
            is_const: true,
            ..Default::default()
        }
    }

    pub fn of_type(type_expr: impl Into<String>) -> Self {
        JsDocInfo {
            type_expr: Some(type_expr.into()),
            ..Default::default()
        }
    }

    pub fn is_typedef(&self) -> bool {
        self.typedef_type.is_some()
    }

    /// `@interface` or `@record`.
    pub fn is_interface_like(&self) -> bool {
        self.is_interface || self.is_record
    }

    /// Whether the comment declares a callable shape (params or return).
    pub fn is_function_like(&self) -> bool {
        !self.params.is_empty() || self.return_type.is_some()
    }

    // Builder methods

    pub fn with_param(mut self, name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        self.params.push(JsDocParam {
            name: name.into(),
            type_expr: Some(type_expr.into()),
        });
        self
    }

    pub fn with_return(mut self, type_expr: impl Into<String>) -> Self {
        self.return_type = Some(type_expr.into());
        self
    }

    pub fn with_extends(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_implements(mut self, interface: impl Into<String>) -> Self {
        self.implemented_interfaces.push(interface.into());
        self
    }

    pub fn with_extended_interface(mut self, interface: impl Into<String>) -> Self {
        self.extended_interfaces.push(interface.into());
        self
    }

    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_type(mut self, type_expr: impl Into<String>) -> Self {
        self.type_expr = Some(type_expr.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
