use std::path::PathBuf;

use contextsite::config::{
    ConfigFlags, clear_config_flags, load_config_flags, parse_flag_tokens, save_config_flags,
};
use contextsite::i18n::Lang;

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".contextsiterc");
    let content = r"
# comment
--no-toc

--lang zh
   
--render-debug-log=render.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_toc);
    assert_eq!(flags.lang, Some(Lang::Zh));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".contextsiterc");
    std::fs::write(&path, "--no-toc\n--lang zh\n--render-debug-log file.log\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "contextsite".to_string(),
        "--lang".to_string(),
        "fr".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_toc, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.lang, Some(Lang::Fr), "cli should override language");
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "contextsite".to_string(),
        "--lang=fr".to_string(),
        "--render-debug-log=render.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.lang, Some(Lang::Fr));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_saved_flags_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config");
    let flags = ConfigFlags {
        no_toc: true,
        perf: false,
        lang: Some(Lang::Zh),
        render_debug_log: Some(PathBuf::from("debug.log")),
    };

    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);

    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
    assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
}

#[test]
fn test_config_union_merges_booleans() {
    let a = ConfigFlags {
        no_toc: true,
        ..ConfigFlags::default()
    };
    let b = ConfigFlags {
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = a.union(&b);
    assert!(merged.no_toc);
    assert!(merged.perf);
    assert_eq!(merged.lang, None);
}
