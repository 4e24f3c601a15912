use std::fs;

use template_deps::{canonicalize_or_current, load_config_or_default, read_template};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = canonicalize_or_current(".").expect("canonicalize");
    assert_eq!(result, cwd);
}

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(subdir.to_str().unwrap()).expect("canonicalize nested");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path() {
    let result = canonicalize_or_current("does-not-exist-yet").expect("canonicalize");
    assert!(result.is_absolute());
    assert!(result.ends_with("does-not-exist-yet"));
}

#[test]
fn read_template_reports_missing_file() {
    let err = read_template("/definitely/not/here.liquid").unwrap_err();
    assert!(err.to_string().contains("Failed to read template"));
}

#[test]
fn load_config_or_default_without_path_uses_defaults() {
    let config = load_config_or_default(None).expect("default config");
    assert_eq!(config.conditional_tags, vec!["if".to_string()]);
}
