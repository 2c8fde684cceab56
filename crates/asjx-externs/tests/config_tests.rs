use asjx_externs::{ExcludeEntry, ExternsConfig};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_parse_full_config() {
    let config = ExternsConfig::from_json_str(
        r#"{
            "asRoot": "generated/as",
            "externs": ["svg.js", "dom.js"],
            "excludes": [
                { "class": "Window", "member": "focus", "reason": "conflicts" },
                { "class": "Arguments" }
            ]
        }"#,
    )
    .expect("valid config");

    assert_eq!(config.as_root, Some(PathBuf::from("generated/as")));
    assert_eq!(
        config.externs,
        vec![PathBuf::from("svg.js"), PathBuf::from("dom.js")]
    );
    assert_eq!(
        config.excludes,
        vec![
            ExcludeEntry {
                class_name: "Window".to_string(),
                member: Some("focus".to_string()),
                reason: Some("conflicts".to_string()),
            },
            ExcludeEntry {
                class_name: "Arguments".to_string(),
                member: None,
                reason: None,
            },
        ]
    );
}

#[test]
fn test_missing_sections_default_to_empty() {
    let config = ExternsConfig::from_json_str("{}").expect("valid config");
    assert_eq!(config, ExternsConfig::default());
}

#[test]
fn test_malformed_json_reports_context() {
    let err = ExternsConfig::from_json_str("{ \"excludes\": [ { } ] }").expect_err("class is required");
    assert!(err.to_string().contains("failed to parse externs config"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "externs": ["a.js"], "excludes": [{{ "class": "A" }}] }}"#).expect("write");

    let config = ExternsConfig::load(file.path()).expect("load");
    assert_eq!(config.externs, vec![PathBuf::from("a.js")]);
    assert_eq!(config.excludes.len(), 1);
}

#[test]
fn test_load_missing_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = ExternsConfig::load(&path).expect_err("missing file");
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn test_builders_round_trip_through_json() {
    let config = ExternsConfig::default()
        .exclude_class("Arguments")
        .exclude_member("Window", "focus", Some("conflicts"));
    let json = serde_json::to_string(&config).expect("serialize");
    assert!(json.contains(r#""class":"Window""#));
    let back = ExternsConfig::from_json_str(&json).expect("parse");
    assert_eq!(back, config);
}
