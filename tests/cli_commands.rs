//! Tests that run the built binary.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::temp_config;

fn itemkeeper(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_itemkeeper"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("ITEMKEEPER_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_help_lists_subcommands() {
    let output = Command::new(env!("CARGO_BIN_EXE_itemkeeper"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["list", "add", "delete", "show"] {
        assert!(stdout.contains(subcommand), "missing {subcommand}");
    }
}

#[test]
fn test_in_memory_list_is_empty() {
    let (_dir, config) = temp_config("");
    let output = itemkeeper(&config, &["--in-memory"]);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["No items".to_string()]);
}

#[test]
fn test_add_delete_and_show_persist_across_runs() {
    let (dir, config) = temp_config("");
    let db = dir.path().join("items.sqlite3");
    let db = db.to_str().unwrap();

    assert!(itemkeeper(&config, &["--db", db, "add"]).status.success());
    let output = itemkeeper(&config, &["--db", db, "add"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 2);

    let output = itemkeeper(&config, &["--db", db, "delete", "0"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 1);

    let output = itemkeeper(&config, &["--db", db, "show", "0"]);
    assert!(stdout_lines(&output)[0].starts_with("Item at "));

    let output = itemkeeper(&config, &["--db", db, "show", "5"]);
    assert_eq!(stdout_lines(&output), vec!["Select an item".to_string()]);
}

#[test]
fn test_config_file_selects_database() {
    let temp = tempfile::TempDir::new().unwrap();
    let db = temp.path().join("from-config.sqlite3");
    let (_dir, config) = temp_config(&format!(
        "[storage]\ndatabase_path = {:?}\n",
        db.to_str().unwrap()
    ));

    let output = itemkeeper(&config, &["add"]);
    assert!(output.status.success());
    assert!(db.exists());
}

#[test]
fn test_json_output_parses() {
    let (dir, config) = temp_config("");
    let db = dir.path().join("items.sqlite3");
    let db = db.to_str().unwrap();

    let output = itemkeeper(&config, &["--db", db, "--json", "add"]);
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["index"], 0);
    assert!(listed[0]["timestamp"].is_string());
}

#[test]
fn test_invalid_config_exits_with_error() {
    let (_dir, config) = temp_config("[storage\n");
    let output = itemkeeper(&config, &["list"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: could not load configuration"));
}

#[test]
fn test_unopenable_database_exits_with_error() {
    let (dir, config) = temp_config("");
    // Parent is a regular file, so the database directory cannot be created.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let db = blocker.join("items.sqlite3");

    let output = itemkeeper(&config, &["--db", db.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not open item database"));
}

#[test]
fn test_flags_replace_invalid_config_database_path() {
    let (dir, config) = temp_config("");
    std::fs::write(
        &config,
        format!("[storage]\ndatabase_path = {:?}\n", dir.path().to_str().unwrap()),
    )
    .unwrap();

    let output = itemkeeper(&config, &["list"]);
    assert_eq!(output.status.code(), Some(1));

    let output = itemkeeper(&config, &["--in-memory", "list"]);
    assert!(output.status.success());

    let db = dir.path().join("ok.sqlite3");
    let output = itemkeeper(&config, &["--db", db.to_str().unwrap(), "add"]);
    assert!(output.status.success());
    assert!(db.exists());
}
