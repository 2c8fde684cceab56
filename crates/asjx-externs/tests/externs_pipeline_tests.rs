//! End-to-end externs pass: collect, evaluate, synthesize.

use asjx_common::diagnostic_codes;
use asjx_externs::{
    DeclarationWriter, ExternsCollector, ExternsConfig, JsAst, JsDocInfo, JsNodeKind, JsType,
    NativeTypeRegistry, ReferenceModel, write_declarations,
};
use std::sync::Arc;

fn dom_externs() -> JsAst {
    let mut ast = JsAst::new("dom.js");
    ast.add_function("EventTarget", Some(JsDocInfo::interface()));
    ast.add_assignment(
        "EventTarget.prototype.addEventListener",
        JsNodeKind::Function,
        Some(
            JsDocInfo::default()
                .with_param("type", "string")
                .with_param("listener", "function(Event)")
                .with_param("useCapture", "boolean="),
        ),
    );
    ast.add_function(
        "Node",
        Some(JsDocInfo::constructor().with_implements("EventTarget")),
    );
    ast.add_declaration("Node.prototype.nodeName", Some(JsDocInfo::of_type("string")));
    ast.add_declaration("Node.ELEMENT_NODE", Some(JsDocInfo::of_type("number")));
    ast.add_function(
        "Element",
        Some(JsDocInfo::constructor().with_extends("Node")),
    );
    ast.add_assignment(
        "Element.prototype.getAttribute",
        JsNodeKind::Function,
        Some(
            JsDocInfo::default()
                .with_param("name", "string")
                .with_return("?string"),
        ),
    );
    ast.add_function("Event", Some(JsDocInfo::constructor()));
    ast
}

fn run(ast: &JsAst, config: ExternsConfig) -> ReferenceModel {
    let mut model = ReferenceModel::with_policy(config);
    ExternsCollector::collect(ast, &mut model);
    model.set_type_registry(Arc::new(NativeTypeRegistry::with_names(
        model.declared_type_names(),
    )));
    model
}

#[test]
fn test_discovery_order_is_preserved() {
    let model = run(&dom_externs(), ExternsConfig::default());
    let names: Vec<_> = model.classes().map(|c| c.qualified_name()).collect();
    assert_eq!(names, vec!["EventTarget", "Node", "Element", "Event"]);
    assert!(model.diagnostics().is_empty());
}

#[test]
fn test_synthesis_is_deterministic() {
    let first = {
        let model = run(&dom_externs(), ExternsConfig::default());
        DeclarationWriter::new(&model).write_all()
    };
    let second = {
        let model = run(&dom_externs(), ExternsConfig::default());
        DeclarationWriter::new(&model).write_all()
    };
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_interface_methods_map_closure_types() {
    let model = run(&dom_externs(), ExternsConfig::default());
    let mut writer = DeclarationWriter::new(&model);
    let target = model.interface_reference("EventTarget").expect("interface");
    let text = writer.write_class(target).expect("not excluded");
    assert!(text.contains(
        "function addEventListener(type:String, listener:Function, useCapture:Boolean = false):void;"
    ));
}

#[test]
fn test_class_heritage_and_static_fields() {
    let model = run(&dom_externs(), ExternsConfig::default());
    let mut writer = DeclarationWriter::new(&model);

    let node = writer
        .write_class(model.class_reference("Node").expect("Node"))
        .expect("not excluded");
    assert!(node.contains("public class Node implements EventTarget {"));
    assert!(node.contains("public static var ELEMENT_NODE:Number;"));

    let element = writer
        .write_class(model.class_reference("Element").expect("Element"))
        .expect("not excluded");
    assert!(element.contains("public class Element extends Node {"));
    assert!(element.contains("public function getAttribute(name:String):String {}"));
}

#[test]
fn test_duplicates_and_orphans_across_files() {
    let first = dom_externs();
    let mut second = JsAst::new("dom2.js");
    second.add_function("Node", Some(JsDocInfo::constructor()));
    second.add_assignment("Window.prototype.focus", JsNodeKind::Function, None);

    let mut model = ReferenceModel::new();
    ExternsCollector::collect(&first, &mut model);
    ExternsCollector::collect(&second, &mut model);

    let diagnostics = model.take_diagnostics();
    assert_eq!(
        diagnostics.codes(),
        vec![
            diagnostic_codes::DUPLICATE_CLASS,
            diagnostic_codes::MISSING_OWNER_CLASS
        ]
    );
    let rendered: Vec<_> = diagnostics.iter().map(|d| d.format_simple()).collect();
    assert_eq!(
        rendered,
        vec![
            "warning[JX1002]: Duplicate class [Node]",
            "error[JX1008]: Class [Window] not found in dom2.js",
        ]
    );
    // the first declaration wins
    assert_eq!(
        model
            .class_reference("Node")
            .map(|c| c.implemented_interfaces().len()),
        Some(1)
    );
}

#[test]
fn test_config_exclusions_drive_synthesis() {
    let config = ExternsConfig::from_json_str(
        r#"{
            "excludes": [
                { "class": "Event" },
                { "class": "Element", "member": "getAttribute", "reason": "shadowed" }
            ]
        }"#,
    )
    .expect("valid config");
    let model = run(&dom_externs(), config);

    let element = model.class_reference("Element").expect("Element");
    let member = element.method("getAttribute", false).expect("method");
    let excluded = model.is_excluded_member(element, member).expect("excluded");
    assert_eq!(excluded.describe(), "Element.getAttribute (shadowed)");

    let declarations = DeclarationWriter::new(&model).write_all();
    let names: Vec<_> = declarations.iter().map(|d| d.qualified_name.as_str()).collect();
    assert_eq!(names, vec!["EventTarget", "Node", "Element"]);
}

#[test]
fn test_constant_types_use_registry_when_installed_first() {
    let mut ast = JsAst::new("math.js");
    ast.add_var("Math2", Some(JsNodeKind::ObjectLit), Some(JsDocInfo::constant()));
    ast.add_declaration("Math2.PI", Some(JsDocInfo::constant().with_type("number")));

    let mut model = ReferenceModel::new();
    model.set_type_registry(Arc::new(NativeTypeRegistry::new()));
    ExternsCollector::collect(&ast, &mut model);

    assert_eq!(
        model
            .constant_reference("Math2.PI")
            .and_then(|c| c.evaluated_type()),
        Some(&JsType::Number)
    );
}

#[test]
fn test_write_declarations_to_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let model = run(&dom_externs(), ExternsConfig::default());
    let declarations = DeclarationWriter::new(&model).write_all();

    write_declarations(&declarations, dir.path()).expect("write");

    let written = std::fs::read_to_string(dir.path().join("Node.as")).expect("Node.as");
    assert!(written.starts_with("package {\n"));
}
