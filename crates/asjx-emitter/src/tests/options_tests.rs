use super::*;

#[test]
fn test_defaults() {
    let options = EmitOptions::default();
    assert_eq!(options.module_format, ModuleFormat::Goog);
    assert_eq!(options.runtime_module, "runtime/AS3");
    assert_eq!(options.runtime_name, "AS3");
}

#[test]
fn test_partial_json_keeps_defaults() {
    let options = EmitOptions::from_json_str(r#"{ "moduleFormat": "amd" }"#).unwrap();
    assert_eq!(options, EmitOptions::amd());

    let options =
        EmitOptions::from_json_str(r#"{ "runtimeModule": "lib/joo", "runtimeName": "joo" }"#)
            .unwrap();
    assert_eq!(options.module_format, ModuleFormat::Goog);
    assert_eq!(options.runtime_module, "lib/joo");
    assert_eq!(options.runtime_name, "joo");
}

#[test]
fn test_invalid_json_reports_context() {
    let err = EmitOptions::from_json_str(r#"{ "moduleFormat": "cjs" }"#).unwrap_err();
    assert!(err.to_string().contains("failed to parse emit options"));
}
