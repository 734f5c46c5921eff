use std::fs;

use pretty_assertions::assert_eq;
use tags_input::{EnvConfig, TagsInputOptions};
use tags_replay::{load_options, replay, unescape};

#[test]
fn loads_camel_case_options_and_applies_env_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("options.json");
    fs::write(
        &path,
        r#"{"name":"skills","label":"Skills","maxTags":3,"suggestions":["React","Redux"]}"#,
    )
    .expect("write options");

    let env = EnvConfig {
        suggestion_limit: Some(1),
        ..EnvConfig::default()
    };
    let options = load_options(&path, &env).expect("options load");
    assert_eq!(options.name, "skills");
    assert_eq!(options.max_tags.map(|max| max.get()), Some(3));
    assert_eq!(options.suggestion_limit, 1);
}

#[test]
fn missing_options_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.json");
    let err = load_options(&path, &EnvConfig::default()).expect_err("missing file");
    assert!(err.to_string().contains("missing.json"), "{err}");
}

#[test]
fn replay_reports_frame_and_state() {
    let options = TagsInputOptions::new("skills", "Skills")
        .max_tags(2)
        .beautify_name("skills");
    let report = replay(options, &unescape(r"rust\rgo\rzig\r"), 40).expect("replay");

    assert_eq!(report.state.tags, vec!["rust".to_string(), "go".to_string()]);
    assert_eq!(report.state.error, None);
    assert_eq!(
        report.frame,
        vec!["Skills  2/2 skills", "[rust] [go]", " Limit of 2 reached"]
    );

    let json = serde_json::to_value(&report.state).expect("serialize");
    assert_eq!(json, serde_json::json!({"tags": ["rust", "go"], "error": null}));
}
