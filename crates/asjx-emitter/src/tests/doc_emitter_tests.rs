use super::*;
use crate::definitions::{Modifiers, ParameterDefinition, SyntaxKind};
use crate::resolver::ProjectIndex;

fn project() -> ProjectIndex {
    ProjectIndex::with_types([
        "com.acme.Base",
        "com.acme.Foo",
        "com.acme.IThing",
        "org.util.Helper",
    ])
}

#[test]
fn test_block_is_not_opened_without_tags() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let class = ClassDefinition::new("com.acme.Foo");
    let method = FunctionDefinition::method("run").with_return_type("void");
    assert_eq!(docs.emit_method_doc(&method, &class), "");

    docs.begin();
    docs.end();
    assert_eq!(docs.finish(), "");
}

#[test]
fn test_block_framing() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    docs.begin();
    docs.emit_tag(Token::Param, Some("number"), Some("count"));
    docs.end();
    assert_eq!(docs.finish(), "/**\n * @param {number} count\n */\n");
}

#[test]
fn test_constructor_skips_root_base() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let class = ClassDefinition::new("com.acme.Foo");
    let ctor = FunctionDefinition::constructor("Foo");
    assert_eq!(docs.emit_method_doc(&ctor, &class), "/**\n * @constructor\n */\n");
}

#[test]
fn test_constructor_extends_and_implements_in_order() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let class = ClassDefinition::new("com.acme.Foo")
        .extending("Base")
        .implementing("IThing")
        .implementing("IMissing");
    let ctor = FunctionDefinition::constructor("Foo")
        .with_parameter(ParameterDefinition::new("helper", "Helper"));
    assert_eq!(
        docs.emit_method_doc(&ctor, &class),
        "/**\n * @constructor\n * @extends {com.acme.Base}\n * @implements {com.acme.IThing}\n * @implements {IMissing}\n * @param {org.util.Helper} helper\n */\n"
    );
    assert_eq!(
        docs.diagnostics().codes(),
        vec![diagnostic_codes::UNRESOLVED_INTERFACE]
    );
}

#[test]
fn test_unresolved_base_is_kept_and_reported_once() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let class = ClassDefinition::new("com.acme.Foo").extending("Gone");
    assert_eq!(docs.base_class_name(&class).as_deref(), Some("Gone"));
    assert_eq!(docs.base_class_name(&class).as_deref(), Some("Gone"));
    assert_eq!(
        docs.take_diagnostics()
            .iter()
            .map(|d| d.code)
            .collect::<Vec<_>>(),
        vec![diagnostic_codes::UNRESOLVED_BASE_CLASS]
    );
}

#[test]
fn test_this_tag_from_nested_body() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let class = ClassDefinition::new("com.acme.Foo");
    let body = SyntaxNode::node(
        SyntaxKind::Block,
        vec![SyntaxNode::node(
            SyntaxKind::ExpressionStatement,
            vec![SyntaxNode::node(
                SyntaxKind::MemberAccess,
                vec![SyntaxNode::this_keyword(), SyntaxNode::identifier("x")],
            )],
        )],
    );
    let method = FunctionDefinition::method("run").with_body(body);
    assert_eq!(
        docs.emit_method_doc(&method, &class),
        "/**\n * @this {com.acme.Foo}\n */\n"
    );
}

#[test]
fn test_contains_this_reference() {
    let without = SyntaxNode::node(
        SyntaxKind::Block,
        vec![
            SyntaxNode::identifier("self"),
            SyntaxNode::node(SyntaxKind::Return, vec![SyntaxNode::leaf(SyntaxKind::Literal, "1")]),
        ],
    );
    assert!(!contains_this_reference(&without));

    let with = SyntaxNode::node(
        SyntaxKind::Block,
        vec![without.clone(), SyntaxNode::this_keyword()],
    );
    assert!(contains_this_reference(&with));
}

#[test]
fn test_params_return_and_override() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let class = ClassDefinition::new("com.acme.Foo");
    let method = FunctionDefinition::method("format")
        .with_parameter(ParameterDefinition::new("value", "int"))
        .with_parameter(ParameterDefinition::new("label", "String").with_default("\"\""))
        .with_parameter(ParameterDefinition::rest("rest"))
        .with_return_type("String")
        .with_modifiers(Modifiers::OVERRIDE);
    assert_eq!(
        docs.emit_method_doc(&method, &class),
        "/**\n * @param {number} value\n * @param {string=} label\n * @param {...} rest\n * @return {string}\n * @override\n */\n"
    );
}

#[test]
fn test_field_forms() {
    let project = project();
    let mut docs = DocEmitter::new(&project);

    let public = VariableDefinition::new("count", "int");
    assert_eq!(docs.emit_field_doc(&public, "com.acme"), "/** @type {number} */ ");

    let constant = VariableDefinition::constant("MAX", "uint");
    assert_eq!(
        docs.emit_field_doc(&constant, "com.acme"),
        "/**\n * @const\n * @type {number}\n */\n"
    );

    let private = VariableDefinition::new("helper", "Helper").with_visibility(Visibility::Private);
    assert_eq!(
        docs.emit_field_doc(&private, "com.acme"),
        "/**\n * @private\n * @type {com.acme.Helper}\n */\n"
    );

    let protected = VariableDefinition::constant("NAME", "String")
        .with_visibility(Visibility::Protected);
    assert_eq!(
        docs.emit_field_doc(&protected, "com.acme"),
        "/**\n * @protected\n * @const\n * @type {string}\n */\n"
    );
}

#[test]
fn test_var_doc_forms() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let local = VariableDefinition::new("item", "Foo");
    assert_eq!(docs.emit_var_doc(&local, "com.acme"), "/** @type {com.acme.Foo} */ ");

    let constant = VariableDefinition::constant("ZERO", "Number");
    assert_eq!(
        docs.emit_var_doc(&constant, "com.acme"),
        "\n/**\n * @const\n * @type {number}\n */\n"
    );
    assert_eq!(docs.emit_type_short("", ""), "/** @type {*} */ ");
}

#[test]
fn test_interface_doc() {
    let project = project();
    let mut docs = DocEmitter::new(&project);
    let interface = InterfaceDefinition::new("IA").extending("IB").extending("foo.IC");
    assert_eq!(
        docs.emit_interface_doc(&interface),
        "/**\n * @interface\n * @extends {IB}\n * @extends {foo.IC}\n */\n"
    );
}
