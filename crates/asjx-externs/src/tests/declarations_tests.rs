use super::*;
use crate::ast::{JsAst, JsNodeKind};
use crate::collector::ExternsCollector;
use crate::config::ExternsConfig;
use crate::types::NativeTypeRegistry;
use std::sync::Arc;

fn build(ast: &JsAst, config: ExternsConfig) -> ReferenceModel {
    let mut model = ReferenceModel::with_policy(config);
    ExternsCollector::collect(ast, &mut model);
    let registry = NativeTypeRegistry::with_names(model.declared_type_names());
    model.set_type_registry(Arc::new(registry));
    model
}

fn shape_externs() -> JsAst {
    let mut ast = JsAst::new("svg.js");
    ast.add_var("svg", Some(JsNodeKind::ObjectLit), Some(JsDocInfo::constant()));
    ast.add_assignment(
        "svg.Shape",
        JsNodeKind::Function,
        Some(
            JsDocInfo::constructor()
                .with_extends("Base")
                .with_param("w", "number")
                .with_param("label", "string="),
        ),
    );
    ast.add_declaration("svg.Shape.prototype.name", Some(JsDocInfo::of_type("string")));
    ast.add_declaration("svg.Shape.COUNT", Some(JsDocInfo::of_type("number")));
    ast.add_assignment(
        "svg.Shape.prototype.area",
        JsNodeKind::Function,
        Some(JsDocInfo::default().with_return("number")),
    );
    ast.add_assignment(
        "svg.Shape.create",
        JsNodeKind::Function,
        Some(
            JsDocInfo::default()
                .with_param("args", "...*")
                .with_return("!svg.Shape"),
        ),
    );
    ast
}

#[test]
fn test_as_type_name_primitives_and_wrappers() {
    assert_eq!(as_type_name(&JsType::Number), "Number");
    assert_eq!(as_type_name(&JsType::String), "String");
    assert_eq!(as_type_name(&JsType::Boolean), "Boolean");
    assert_eq!(as_type_name(&JsType::Undefined), "void");
    assert_eq!(as_type_name(&JsType::All), "*");
    assert_eq!(as_type_name(&JsType::Unknown), "*");
}

#[test]
fn test_as_type_name_structured_types() {
    let array = JsType::Generic {
        base: "Array".to_string(),
        args: vec![JsType::String],
    };
    assert_eq!(as_type_name(&array), "Array");
    assert_eq!(
        as_type_name(&JsType::Function {
            params: vec![],
            result: None
        }),
        "Function"
    );
    assert_eq!(as_type_name(&JsType::Record(vec![])), "Object");
    assert_eq!(
        as_type_name(&JsType::Nullable(Box::new(JsType::Named("svg.Shape".to_string())))),
        "svg.Shape"
    );
}

#[test]
fn test_as_type_name_unions() {
    assert_eq!(
        as_type_name(&JsType::Union(vec![JsType::String, JsType::Null])),
        "String"
    );
    assert_eq!(
        as_type_name(&JsType::Union(vec![JsType::String, JsType::Number])),
        "*"
    );
}

#[test]
fn test_class_declaration() {
    let ast = shape_externs();
    let model = build(&ast, ExternsConfig::default());
    let mut writer = DeclarationWriter::new(&model);
    let class = model.class_reference("svg.Shape").expect("svg.Shape");

    assert_eq!(
        writer.write_class(class).as_deref(),
        Some(concat!(
            "package svg {\n",
            "    public class Shape extends Base {\n",
            "        public function Shape(w:Number, label:String = null) {}\n",
            "        public var name:String;\n",
            "        public static var COUNT:Number;\n",
            "        public function area():Number {}\n",
            "        public static function create(...args):svg.Shape {}\n",
            "    }\n",
            "}\n",
        ))
    );
    assert!(writer.diagnostics().is_empty());
}

#[test]
fn test_excluded_members_and_classes_are_skipped() {
    let mut ast = shape_externs();
    ast.add_function("Hidden", Some(JsDocInfo::constructor()));
    let config = ExternsConfig::default()
        .exclude_member("svg.Shape", "area", Some("conflicts"))
        .exclude_member("svg.Shape", "COUNT", None)
        .exclude_class("Hidden");
    let model = build(&ast, config);

    let mut writer = DeclarationWriter::new(&model);
    let declarations = writer.write_all();
    let names: Vec<_> = declarations
        .iter()
        .map(|d| d.qualified_name.as_str())
        .collect();
    assert_eq!(names, vec!["svg.Shape"]);
    let text = &declarations[0].text;
    assert!(!text.contains("area"));
    assert!(!text.contains("COUNT"));
    assert!(text.contains("public var name:String;"));
}

#[test]
fn test_interface_declaration() {
    let mut ast = JsAst::new("dom.js");
    ast.add_assignment(
        "EventTarget",
        JsNodeKind::Function,
        Some(JsDocInfo::interface().with_extended_interface("IA")),
    );
    ast.add_declaration("EventTarget.prototype.id", Some(JsDocInfo::of_type("string")));
    ast.add_assignment(
        "EventTarget.prototype.dispatch",
        JsNodeKind::Function,
        Some(JsDocInfo::default().with_param("e", "Object").with_return("boolean")),
    );
    let model = build(&ast, ExternsConfig::default());
    let class = model.interface_reference("EventTarget").expect("interface");

    let mut writer = DeclarationWriter::new(&model);
    assert_eq!(
        writer.write_class(class).as_deref(),
        Some(concat!(
            "package {\n",
            "    public interface EventTarget extends IA {\n",
            "        function get id():String;\n",
            "        function dispatch(e:Object):Boolean;\n",
            "    }\n",
            "}\n",
        ))
    );
}

#[test]
fn test_typedef_record_becomes_class_with_fields() {
    let mut ast = JsAst::new("a.js");
    ast.add_var("Point", None, Some(JsDocInfo::typedef("{x: number, label: ?string}")));
    let model = build(&ast, ExternsConfig::default());
    let typedef = model.typedef_reference("Point").expect("typedef");

    let mut writer = DeclarationWriter::new(&model);
    assert_eq!(
        writer.write_class(typedef).as_deref(),
        Some(concat!(
            "package {\n",
            "    public class Point {\n",
            "        public var x:Number;\n",
            "        public var label:String;\n",
            "    }\n",
            "}\n",
        ))
    );
}

#[test]
fn test_function_and_constant_declarations() {
    let mut ast = JsAst::new("a.js");
    ast.add_function(
        "parseFoo",
        Some(JsDocInfo::default().with_param("s", "string").with_param("radix", "number=")),
    );
    ast.add_var("chrome", Some(JsNodeKind::ObjectLit), None);
    ast.add_declaration("chrome.VERSION", Some(JsDocInfo::constant().with_type("string")));
    let model = build(&ast, ExternsConfig::default());

    let mut writer = DeclarationWriter::new(&model);
    let function = model.function_reference("parseFoo").expect("function");
    assert_eq!(
        writer.write_function(function),
        "package {\n    public function parseFoo(s:String, radix:Number = NaN):void {}\n}\n"
    );
    let constant = model.constant_reference("chrome.VERSION").expect("constant");
    assert_eq!(
        writer.write_constant(constant),
        "package chrome {\n    public const VERSION:String;\n}\n"
    );
}

#[test]
fn test_unresolved_types_fall_back_to_any_and_warn() {
    let mut ast = JsAst::new("a.js");
    ast.add_function("Foo", Some(JsDocInfo::constructor()));
    ast.add_declaration("Foo.prototype.bar", Some(JsDocInfo::of_type("Bogus")));
    let model = build(&ast, ExternsConfig::default());

    let mut writer = DeclarationWriter::new(&model);
    let class = model.class_reference("Foo").expect("Foo");
    let text = writer.write_class(class).expect("not excluded");
    assert!(text.contains("public var bar:*;"));
    let diagnostics = writer.take_diagnostics();
    assert_eq!(diagnostics.codes(), vec![diagnostic_codes::UNRESOLVED_TYPE_EXPRESSION]);
    assert_eq!(
        diagnostics.diagnostics()[0].message,
        "Unresolved type [Bogus] in Foo.bar: unknown type 'Bogus'"
    );
    assert!(writer.diagnostics().is_empty());
}

#[test]
fn test_relative_path_follows_package() {
    let declaration = Declaration {
        qualified_name: "svg.Shape".to_string(),
        text: String::new(),
    };
    assert_eq!(declaration.relative_path(), PathBuf::from("svg/Shape.as"));
}

#[test]
fn test_typedef_sharing_a_class_name_does_not_overwrite_the_class() {
    let mut ast = JsAst::new("dup.js");
    let class_node = ast.add_function("Foo", Some(JsDocInfo::constructor()));
    let typedef_node = ast.add_var("Foo", None, Some(JsDocInfo::typedef("{x: number}")));

    let mut model = ReferenceModel::new();
    model.add_class(ast.node(class_node), "Foo");
    model.add_typedef(ast.node(typedef_node), "Foo");
    assert!(model.has_class("Foo"));
    assert!(model.has_typedef("Foo"));

    let mut writer = DeclarationWriter::new(&model);
    let declarations = writer.write_all();
    assert_eq!(declarations.len(), 1);

    let diagnostics = writer.take_diagnostics();
    assert_eq!(diagnostics.codes(), vec![diagnostic_codes::TYPEDEF_SHADOWED_BY_CLASS]);
    assert_eq!(diagnostics.diagnostics()[0].file_name, "dup.js");

    let dir = tempfile::tempdir().expect("temp dir");
    write_declarations(&declarations, dir.path()).expect("write");
    let written = std::fs::read_to_string(dir.path().join("Foo.as")).expect("read Foo.as");
    assert!(written.contains("public function Foo() {}"), "{written}");
}
