//! Externs syntax tree.
//!
//! A flat arena of nodes produced by the externs parser, one arena per
//! source file. Only the node shapes the reference model inspects are
//! distinguished; everything else is `JsNodeKind::Other`.
//!
//! ```text
//! /** @constructor */ function Foo() {}      Function(doc) -> Name("Foo")
//! Foo.prototype.bar = function() {};        ExprResult -> Assign -> [GetProp("Foo.prototype.bar"), Function]
//! /** @type {number} */ Foo.prototype.x;    ExprResult -> GetProp("Foo.prototype.x", doc)
//! /** @const */ var ns = {};                Var(doc) -> Name("ns") -> ObjectLit
//! ```

use crate::jsdoc::JsDocInfo;
use asjx_common::Span;

/// Index of a node inside its [`JsAst`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JsNodeKind {
    Script,
    ExprResult,
    Var,
    Name,
    GetProp,
    Assign,
    Function,
    ObjectLit,
    StringKey,
    Literal,
    This,
    Other,
}

#[derive(Clone, Debug)]
pub struct JsNode {
    pub kind: JsNodeKind,
    /// Identifier or fully qualified name for `Name`/`GetProp`/`StringKey`,
    /// literal text for `Literal`, empty otherwise.
    pub text: String,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub jsdoc: Option<JsDocInfo>,
}

/// All nodes of one externs source file.
#[derive(Clone, Debug)]
pub struct JsAst {
    source_file: String,
    nodes: Vec<JsNode>,
}

impl JsAst {
    /// Create an arena holding only the `Script` root.
    pub fn new(source_file: impl Into<String>) -> Self {
        JsAst {
            source_file: source_file.into(),
            nodes: vec![JsNode {
                kind: JsNodeKind::Script,
                text: String::new(),
                span: Span::dummy(),
                parent: None,
                children: Vec::new(),
                jsdoc: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn source_file_name(&self) -> &str {
        &self.source_file
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn get(&self, id: NodeId) -> Option<&JsNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Handle for `id`. Accessors on the handle tolerate out of range ids.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { ast: self, id }
    }

    /// Top-level statements in source order.
    pub fn statements(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.node(self.root()).children()
    }

    /// Append a node under `parent` and return its id.
    pub fn add_node(&mut self, parent: NodeId, kind: JsNodeKind, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(JsNode {
            kind,
            text: text.into(),
            span: Span::dummy(),
            parent: Some(parent),
            children: Vec::new(),
            jsdoc: None,
        });
        if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
            parent_node.children.push(id);
        }
        id
    }

    pub fn set_jsdoc(&mut self, id: NodeId, jsdoc: JsDocInfo) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.jsdoc = Some(jsdoc);
        }
    }

    pub fn set_span(&mut self, id: NodeId, span: Span) {
        if let Some(node) = self.nodes.get_mut(id.0 as usize) {
            node.span = span;
        }
    }

    // =========================================================================
    // Statement builders (shapes produced by the externs parser)
    // =========================================================================

    /// `/** doc */ target = <value>;` - the doc lands on the `Assign` node.
    ///
    /// Returns the id of the `Name`/`GetProp` target.
    pub fn add_assignment(
        &mut self,
        target: &str,
        value: JsNodeKind,
        jsdoc: Option<JsDocInfo>,
    ) -> NodeId {
        let root = self.root();
        let stmt = self.add_node(root, JsNodeKind::ExprResult, "");
        let assign = self.add_node(stmt, JsNodeKind::Assign, "");
        if let Some(doc) = jsdoc {
            self.set_jsdoc(assign, doc);
        }
        let target_id = self.add_node(assign, target_kind(target), target);
        self.add_node(assign, value, "");
        target_id
    }

    /// `/** doc */ target;` - a declaration without a value; the doc lands on
    /// the target itself.
    pub fn add_declaration(&mut self, target: &str, jsdoc: Option<JsDocInfo>) -> NodeId {
        let root = self.root();
        let stmt = self.add_node(root, JsNodeKind::ExprResult, "");
        let target_id = self.add_node(stmt, target_kind(target), target);
        if let Some(doc) = jsdoc {
            self.set_jsdoc(target_id, doc);
        }
        target_id
    }

    /// `/** doc */ var name = <init>;` - the doc lands on the `Var` node.
    ///
    /// Returns the id of the `Name` node.
    pub fn add_var(
        &mut self,
        name: &str,
        init: Option<JsNodeKind>,
        jsdoc: Option<JsDocInfo>,
    ) -> NodeId {
        let root = self.root();
        let var = self.add_node(root, JsNodeKind::Var, "");
        if let Some(doc) = jsdoc {
            self.set_jsdoc(var, doc);
        }
        let name_id = self.add_node(var, JsNodeKind::Name, name);
        if let Some(kind) = init {
            self.add_node(name_id, kind, "");
        }
        name_id
    }

    /// `/** doc */ function name() {}` - returns the `Function` node.
    pub fn add_function(&mut self, name: &str, jsdoc: Option<JsDocInfo>) -> NodeId {
        let root = self.root();
        let function = self.add_node(root, JsNodeKind::Function, "");
        if let Some(doc) = jsdoc {
            self.set_jsdoc(function, doc);
        }
        self.add_node(function, JsNodeKind::Name, name);
        function
    }
}

fn target_kind(target: &str) -> JsNodeKind {
    if target.contains('.') {
        JsNodeKind::GetProp
    } else {
        JsNodeKind::Name
    }
}

/// A syntax node handle: an id plus the arena it lives in.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    ast: &'a JsAst,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a JsAst {
        self.ast
    }

    pub fn source_file_name(&self) -> &'a str {
        self.ast.source_file_name()
    }

    pub fn kind(&self) -> JsNodeKind {
        self.ast
            .get(self.id)
            .map_or(JsNodeKind::Other, |node| node.kind)
    }

    pub fn text(&self) -> &'a str {
        self.ast.get(self.id).map_or("", |node| node.text.as_str())
    }

    pub fn span(&self) -> Span {
        self.ast.get(self.id).map_or(Span::dummy(), |node| node.span)
    }

    pub fn jsdoc(&self) -> Option<&'a JsDocInfo> {
        self.ast.get(self.id)?.jsdoc.as_ref()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let parent = self.ast.get(self.id)?.parent?;
        Some(self.ast.node(parent))
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let ast = self.ast;
        ast.get(self.id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&id| ast.node(id))
    }

    pub fn first_child(self) -> Option<NodeRef<'a>> {
        self.children().next()
    }

    pub fn child(self, index: usize) -> Option<NodeRef<'a>> {
        self.children().nth(index)
    }

    /// The documentation that applies to this node.
    ///
    /// Externs often carry the comment on an enclosing node rather than on
    /// the node naming the declared entity: `/** @type {number} */ Foo.x = 1;`
    /// documents the `Assign`, not the `GetProp`. Walk upward through
    /// name, assignment, declaration, object key and function nodes until one
    /// has a comment; statement boundaries stop the search.
    pub fn best_jsdoc(&self) -> Option<&'a JsDocInfo> {
        let mut current = *self;
        loop {
            if let Some(doc) = current.jsdoc() {
                return Some(doc);
            }
            let parent = current.parent()?;
            match parent.kind() {
                JsNodeKind::Name
                | JsNodeKind::GetProp
                | JsNodeKind::Assign
                | JsNodeKind::Var
                | JsNodeKind::StringKey
                | JsNodeKind::Function => current = parent,
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/ast_tests.rs"]
mod tests;
