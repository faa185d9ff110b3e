// Smoke tests for the compiled binaries: each runs against the fixture catalog
// with its store redirected into a scratch directory.
mod support;

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use std::process::Command;
use support::{fixture_path, run_command};
use tempfile::TempDir;

fn command(binary: &str, store_dir: &Path) -> Command {
    let mut cmd = Command::new(binary);
    cmd.env("KHAJA_STORE", store_dir.join("store.json"))
        .env_remove("KHAJA_FAVORITES_KEY")
        .env_remove("KHAJA_JOURNAL_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn menu_search(store_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = command(env!("CARGO_BIN_EXE_menu-search"), store_dir);
    cmd.arg("--catalog").arg(fixture_path("menu.json")).args(args);
    cmd
}

fn stdout_json(cmd: Command) -> Result<Value> {
    let output = run_command(cmd)?;
    serde_json::from_slice(&output.stdout).context("stdout is not JSON")
}

fn visible_names(report: &Value) -> Vec<String> {
    report["page"]["sections"]
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|section| section["cards"].as_array().into_iter().flatten())
        .filter(|card| card["visible"] == Value::Bool(true))
        .filter_map(|card| card["name"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn menu_search_applies_filter_and_query() -> Result<()> {
    let dir = TempDir::new()?;
    let report = stdout_json(menu_search(
        dir.path(),
        &["--filter", "veg", "--query", "MOMO"],
    ))?;

    assert_eq!(report["title"], "Khaja Time");
    assert_eq!(report["engine"], "catalog");
    assert_eq!(report["query"], "momo");
    assert_eq!(report["filter"], "veg");
    assert_eq!(visible_names(&report), ["Veg Momo"]);
    assert!(report["page"].get("notice").is_none());
    Ok(())
}

#[test]
fn menu_search_custom_mode_reports_no_results() -> Result<()> {
    let dir = TempDir::new()?;
    let report = stdout_json(menu_search(dir.path(), &["--custom", "--query", "xyz123"]))?;

    assert_eq!(report["engine"], "custom");
    assert!(visible_names(&report).is_empty());
    assert_eq!(report["page"]["notice"]["heading"], "No results found");
    Ok(())
}

#[test]
fn menu_search_rejects_unknown_filter() -> Result<()> {
    let dir = TempDir::new()?;
    let output = menu_search(dir.path(), &["--filter", "dessert"]).output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown filter 'dessert'"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn favorites_toggle_is_visible_to_list_and_search() -> Result<()> {
    let dir = TempDir::new()?;
    let catalog = fixture_path("menu.json");

    let mut toggle = command(env!("CARGO_BIN_EXE_menu-favorites"), dir.path());
    toggle.arg("--toggle").arg("m1").arg("--catalog").arg(&catalog);
    let toggled = stdout_json(toggle)?;
    assert_eq!(toggled["favorite"], true);
    assert_eq!(toggled["total"], 1);
    assert_eq!(toggled["cards"], 2);

    let mut list = command(env!("CARGO_BIN_EXE_menu-favorites"), dir.path());
    list.arg("--list").arg("--catalog").arg(&catalog);
    let listed = stdout_json(list)?;
    assert_eq!(listed, serde_json::json!([{"id": "m1", "name": "Chicken Momo"}]));

    let report = stdout_json(menu_search(dir.path(), &[]))?;
    let hearts: Vec<&Value> = report["page"]["sections"]
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|section| section["cards"].as_array().into_iter().flatten())
        .filter(|card| card["id"] == "m1")
        .map(|card| &card["favorite"])
        .collect();
    assert_eq!(hearts, [&Value::from("filled"), &Value::from("filled")]);
    Ok(())
}

#[test]
fn favorites_toggle_rejects_unknown_item() -> Result<()> {
    let dir = TempDir::new()?;
    let output = command(env!("CARGO_BIN_EXE_menu-favorites"), dir.path())
        .arg("--toggle")
        .arg("nope")
        .arg("--catalog")
        .arg(fixture_path("menu.json"))
        .output()?;

    assert!(!output.status.success());
    assert!(!dir.path().join("store.json").exists());
    Ok(())
}

#[test]
fn mood_journal_validates_and_counts_entries() -> Result<()> {
    let dir = TempDir::new()?;
    let journal = || command(env!("CARGO_BIN_EXE_mood-journal"), dir.path());

    let short = journal().arg("--add").arg(" hi ").output()?;
    assert!(!short.status.success());
    assert!(String::from_utf8_lossy(&short.stderr).contains("Please write something meaningful!"));

    let mut add = journal();
    add.arg("--add").arg("Had jhol momo with friends");
    let entry = stdout_json(add)?;
    assert_eq!(entry["text"], "Had jhol momo with friends");
    assert!(entry["timestamp"].as_str().is_some_and(|stamp| !stamp.is_empty()));

    let mut count = journal();
    count.arg("--count");
    let output = run_command(count)?;
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
    Ok(())
}
