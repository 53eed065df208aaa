use std::path::PathBuf;

use typolens::config::{ConfigFlags, load_config_flags, parse_flag_tokens, save_config_flags};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".typolensrc");
    let content = r#"
# comment
--watch

--suggestions analysis.json

--render-debug-log=render.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.suggestions, Some(PathBuf::from("analysis.json")));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".typolensrc");
    let content = "--watch\n--suggestions saved.json\n--render-debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "typolens".to_string(),
        "--suggestions".to_string(),
        "live.json".to_string(),
        "--no-panel".to_string(),
        "draft.txt".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.no_panel, "cli flags should be applied");
    assert_eq!(
        effective.suggestions,
        Some(PathBuf::from("live.json")),
        "cli should override the suggestions path"
    );
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_and_short_syntax() {
    let args = vec![
        "typolens".to_string(),
        "--dictionary=extra.json".to_string(),
        "-s".to_string(),
        "analysis.json".to_string(),
        "-w".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.dictionary, Some(PathBuf::from("extra.json")));
    assert_eq!(flags.suggestions, Some(PathBuf::from("analysis.json")));
    assert!(flags.watch);
}

#[test]
fn test_saved_flags_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = ConfigFlags {
        watch: true,
        perf: true,
        dictionary: Some(PathBuf::from("extra.json")),
        ..ConfigFlags::default()
    };
    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        watch: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        no_panel: true,
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.watch);
    assert!(merged.no_panel);
    assert!(merged.perf);
}
