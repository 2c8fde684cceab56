use super::*;
use crate::ast::{JsAst, JsNodeKind};
use crate::types::NativeTypeRegistry;

fn messages(model: &ReferenceModel) -> Vec<String> {
    model
        .diagnostics()
        .iter()
        .map(|d| d.message.clone())
        .collect()
}

#[test]
fn test_duplicate_class_keeps_original() {
    let mut ast = JsAst::new("a.js");
    let first = ast.add_function("A", Some(JsDocInfo::constructor().with_extends("Base")));
    let second = ast.add_function("A", Some(JsDocInfo::constructor()));

    let mut model = ReferenceModel::new();
    model.add_class(ast.node(first), "A");
    model.add_class(ast.node(second), "A");

    assert_eq!(model.classes().count(), 1);
    let class = model.class_reference("A").expect("class A");
    assert_eq!(class.super_class_name(), Some("Base"));
    assert_eq!(messages(&model), vec!["Duplicate class [A]"]);
    assert_eq!(model.diagnostics().codes(), vec![diagnostic_codes::DUPLICATE_CLASS]);
    assert!(!model.diagnostics().has_errors());
}

#[test]
fn test_interface_and_final_class_share_the_class_registry() {
    let ast = JsAst::new("a.js");
    let node = ast.node(ast.root());
    let mut model = ReferenceModel::new();
    model.add_interface(node, "IA");
    model.add_class(node, "IA");
    model.add_final_class(node, "F");
    model.add_interface(node, "F");

    assert!(model.interface_reference("IA").is_some());
    assert!(model.interface_reference("F").is_none());
    assert!(model.class_reference("F").is_some_and(ClassReference::is_final));
    assert_eq!(
        messages(&model),
        vec!["Duplicate class [IA]", "Duplicate @interface [F]"]
    );
}

#[test]
fn test_duplicate_labels_per_registry() {
    let ast = JsAst::new("a.js");
    let node = ast.node(ast.root());
    let mut model = ReferenceModel::new();
    for _ in 0..2 {
        model.add_final_class(node, "Fin");
        model.add_typedef(node, "T");
        model.add_namespace(node, "ns");
        model.add_function(node, "f");
        model.add_constant(node, "C");
    }
    assert_eq!(
        messages(&model),
        vec![
            "Duplicate final class [Fin]",
            "Duplicate @typedef [T]",
            "Duplicate namespace [ns]",
            "Duplicate global function [f]",
            "Duplicate constant [C]",
        ]
    );
    assert_eq!(model.diagnostics().warning_count(), 5);
}

#[test]
fn test_classes_and_typedefs_are_independent() {
    let ast = JsAst::new("a.js");
    let node = ast.node(ast.root());
    let mut model = ReferenceModel::new();
    model.add_class(node, "Point");
    model.add_typedef(node, "Point");

    assert!(model.diagnostics().is_empty());
    assert!(model.has_class("Point"));
    assert!(model.has_typedef("Point"));
    assert!(model.typedef_reference("Point").is_some_and(ClassReference::is_typedef));
    assert_eq!(model.declared_type_names(), vec!["Point", "Point"]);
}

#[test]
fn test_namespaces_keep_insertion_order() {
    let ast = JsAst::new("a.js");
    let node = ast.node(ast.root());
    let mut model = ReferenceModel::new();
    for ns in ["goog", "goog.events", "chrome", "goog"] {
        model.add_namespace(node, ns);
    }
    let namespaces: Vec<_> = model.namespaces().collect();
    assert_eq!(namespaces, vec!["goog", "goog.events", "chrome"]);
    assert!(model.has_namespace("chrome"));
}

#[test]
fn test_orphan_member_reports_error_and_is_dropped() {
    let mut ast = JsAst::new("svg.js");
    let target = ast.add_assignment("B.prototype.run", JsNodeKind::Function, None);

    let mut model = ReferenceModel::new();
    model.add_method(ast.node(target), "B", "run");
    model.add_field(ast.node(target), "B", "x");
    model.add_static_field(ast.node(target), "B", "y");
    model.add_static_method(ast.node(target), "B", "z");

    assert!(!model.has_class("B"));
    assert_eq!(model.diagnostics().error_count(), 4);
    let first = &model.diagnostics().diagnostics()[0];
    assert_eq!(first.message, "Class [B] not found in svg.js");
    assert_eq!(first.file_name, "svg.js");
    assert_eq!(first.code, diagnostic_codes::MISSING_OWNER_CLASS);
}

#[test]
fn test_duplicate_member_warns_and_keeps_first() {
    let mut ast = JsAst::new("a.js");
    let class = ast.add_function("A", Some(JsDocInfo::constructor()));
    let first = ast.add_declaration("A.prototype.x", Some(JsDocInfo::of_type("number")));
    let second = ast.add_declaration("A.prototype.x", Some(JsDocInfo::of_type("string")));
    let statik = ast.add_declaration("A.x", Some(JsDocInfo::of_type("boolean")));

    let mut model = ReferenceModel::new();
    model.add_class(ast.node(class), "A");
    model.add_field(ast.node(first), "A", "x");
    model.add_field(ast.node(second), "A", "x");
    model.add_static_field(ast.node(statik), "A", "x");

    assert_eq!(messages(&model), vec!["Duplicate member [A.x]"]);
    let class = model.class_reference("A").expect("class A");
    assert_eq!(class.fields().len(), 2);
    assert_eq!(
        class
            .field("x", false)
            .and_then(|m| m.jsdoc())
            .and_then(|d| d.type_expr.as_deref()),
        Some("number")
    );
    assert!(class.field("x", true).is_some_and(MemberReference::is_static));
}

#[test]
fn test_static_members_find_documentation_on_enclosing_assignment() {
    let mut ast = JsAst::new("a.js");
    let class = ast.add_function("A", Some(JsDocInfo::constructor()));
    let create = ast.add_assignment(
        "A.create",
        JsNodeKind::Function,
        Some(JsDocInfo::default().with_return("A")),
    );
    let field = ast.add_assignment(
        "A.prototype.count",
        JsNodeKind::Literal,
        Some(JsDocInfo::of_type("number")),
    );

    let mut model = ReferenceModel::new();
    model.add_class(ast.node(class), "A");
    model.add_static_method(ast.node(create), "A", "create");
    model.add_field(ast.node(field), "A", "count");

    let class = model.class_reference("A").expect("class A");
    let create = class.method("create", true).expect("static method");
    assert_eq!(create.jsdoc().and_then(|d| d.return_type.as_deref()), Some("A"));
    // instance fields only look at their own node
    assert!(class.field("count", false).is_some_and(|m| m.jsdoc().is_none()));
}

#[test]
fn test_evaluate_without_registry_is_an_error() {
    let model = ReferenceModel::new();
    assert_eq!(
        model.evaluate(&TypeExpression::new("number")),
        Err(EvaluateError::NoRegistry)
    );
}

#[test]
fn test_evaluate_delegates_to_registry() {
    let mut model = ReferenceModel::new();
    model.set_type_registry(Arc::new(NativeTypeRegistry::with_names(["Element"])));
    assert_eq!(
        model.evaluate(&"?Element".into()),
        Ok(JsType::Nullable(Box::new(JsType::Named("Element".to_string()))))
    );
    assert!(matches!(
        model.evaluate(&"Nope".into()),
        Err(EvaluateError::UnknownType(_))
    ));
}

#[test]
fn test_constant_type_is_kept() {
    let ast = JsAst::new("a.js");
    let mut model = ReferenceModel::new();
    model.add_constant_type(ast.node(ast.root()), "Math.PI", JsType::Number);
    model.add_constant(ast.node(ast.root()), "VERSION");
    assert_eq!(
        model
            .constant_reference("Math.PI")
            .and_then(ConstantReference::evaluated_type),
        Some(&JsType::Number)
    );
    assert!(model.has_constant("VERSION"));
    let names: Vec<_> = model.constants().map(ConstantReference::qualified_name).collect();
    assert_eq!(names, vec!["Math.PI", "VERSION"]);
}

#[test]
fn test_take_diagnostics_empties_the_model() {
    let ast = JsAst::new("a.js");
    let mut model = ReferenceModel::new();
    model.add_field(ast.node(ast.root()), "Missing", "x");
    let taken = model.take_diagnostics();
    assert_eq!(taken.len(), 1);
    assert!(model.diagnostics().is_empty());
}
