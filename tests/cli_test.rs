//! Integration tests for the align-dash binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn dash(data_dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd.arg("--no-color");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("quick-link"))
        .stdout(predicate::str::contains("--data-dir"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn prefs_show_defaults_on_fresh_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let prefs = stdout_json(dash(&temp).args(["prefs", "show", "--json"]));
    assert_eq!(prefs["tableDensity"], "comfortable");
    assert_eq!(prefs["autoRefresh"], false);
    assert_eq!(prefs["autoRefreshIntervalSeconds"], 60);
    assert_eq!(prefs["rememberView"], true);
    Ok(())
}

#[test]
fn prefs_set_persists() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["prefs", "set", "table-density", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tableDensity = compact"));

    let prefs = stdout_json(dash(&temp).args(["prefs", "show", "--json"]));
    assert_eq!(prefs["tableDensity"], "compact");
    Ok(())
}

#[test]
fn prefs_set_rejects_bad_values() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["prefs", "set", "auto-refresh-interval", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1 second"));

    dash(&temp)
        .args(["prefs", "set", "theme", "dark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown preference: theme"));
    Ok(())
}

#[test]
fn prefs_reset_restores_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["prefs", "set", "remember-view", "false"])
        .assert()
        .success();
    dash(&temp).args(["prefs", "reset"]).assert().success();

    let prefs = stdout_json(dash(&temp).args(["prefs", "show", "--json"]));
    assert_eq!(prefs["rememberView"], true);
    Ok(())
}

#[test]
fn prefs_schema_is_json_schema() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let schema = stdout_json(dash(&temp).args(["prefs", "schema"]));
    assert!(schema["properties"]["autoRefreshIntervalSeconds"].is_object());
    Ok(())
}

#[test]
fn malformed_preferences_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["prefs", "set", "auto-refresh", "true"])
        .assert()
        .success();

    for entry in fs::read_dir(temp.path())? {
        let path = entry?.path();
        let content = fs::read_to_string(&path)?;
        if content.contains("align-academy-preferences") {
            let envelope = serde_json::json!({
                "key": "align-academy-preferences",
                "value": "{not json",
            });
            fs::write(&path, envelope.to_string())?;
        }
    }

    let prefs = stdout_json(dash(&temp).args(["prefs", "show", "--json"]));
    assert_eq!(prefs["autoRefresh"], false);
    Ok(())
}

#[test]
fn recent_moves_revisits_to_front() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    for (href, label) in [("/sla", "SLA"), ("/csat", "CSAT"), ("/sla", "SLA")] {
        dash(&temp)
            .args(["recent", "add", href, label])
            .assert()
            .success();
    }

    let items = stdout_json(dash(&temp).args(["recent", "list", "--json"]));
    let hrefs: Vec<&str> = items
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["href"].as_str().unwrap())
        .collect();
    assert_eq!(hrefs, ["/sla", "/csat"]);
    Ok(())
}

#[test]
fn recent_list_and_clear() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["recent", "add", "/analytics", "Analytics"])
        .assert()
        .success();
    dash(&temp)
        .args(["recent", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Analytics"))
        .stdout(predicate::str::contains("just now"));

    dash(&temp).args(["recent", "clear"]).assert().success();
    dash(&temp)
        .args(["recent", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recent pages."));
    Ok(())
}

#[test]
fn favorite_toggle_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["favorite", "toggle", "/agents", "Agents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added to favorites"));

    dash(&temp)
        .args(["favorite", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/agents"));

    dash(&temp)
        .args(["favorite", "toggle", "/agents", "Agents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed from favorites"));

    dash(&temp)
        .args(["favorite", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No favorites yet."));
    Ok(())
}

#[test]
fn quick_links_start_with_starter_set() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let links = stdout_json(dash(&temp).args(["quick-link", "list", "--json"]));
    let hrefs: Vec<&str> = links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["href"].as_str().unwrap())
        .collect();
    assert_eq!(hrefs, ["/clients", "/agents", "/analytics"]);
    Ok(())
}

#[test]
fn quick_links_respect_capacity() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    for href in ["/a", "/b", "/c"] {
        dash(&temp)
            .args(["quick-link", "add", href, href])
            .assert()
            .success();
    }
    dash(&temp)
        .args(["quick-link", "add", "/d", "D"])
        .assert()
        .success()
        .stderr(predicate::str::contains("not added"));

    dash(&temp)
        .args(["quick-link", "remove", "/clients"])
        .assert()
        .success();
    let links = stdout_json(dash(&temp).args(["quick-link", "list", "--json"]));
    assert_eq!(links.as_array().unwrap().len(), 5);
    Ok(())
}

#[test]
fn config_capacity_applies() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("config.yml"), "recent_capacity: 2\n")?;
    for href in ["/a", "/b", "/c"] {
        dash(&temp)
            .args(["recent", "add", href, href])
            .assert()
            .success();
    }
    let items = stdout_json(dash(&temp).args(["recent", "list", "--json"]));
    assert_eq!(items.as_array().unwrap().len(), 2);
    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("config.yml"), "quick_link_capacity: 0\n")?;
    dash(&temp)
        .args(["quick-link", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn missing_explicit_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["--config", "/nonexistent/align.yml", "recent", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn view_save_show_clear() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args([
            "view",
            "save",
            "clients",
            "--sort-by",
            "mrr",
            "--sort-order",
            "desc",
            "--filter",
            "tier=gold",
            "--page-size",
            "50",
        ])
        .assert()
        .success();

    let view = stdout_json(dash(&temp).args(["view", "show", "clients", "--json"]));
    assert_eq!(view["sortBy"], "mrr");
    assert_eq!(view["sortOrder"], "desc");
    assert_eq!(view["filters"]["tier"], "gold");
    assert_eq!(view["pageSize"], 50);
    assert!(view.get("page").is_none());

    dash(&temp)
        .args(["view", "clear", "clients"])
        .assert()
        .success();
    dash(&temp)
        .args(["view", "show", "clients"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved view"));
    Ok(())
}

#[test]
fn view_not_saved_when_remember_view_off() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["prefs", "set", "remember-view", "off"])
        .assert()
        .success();
    dash(&temp)
        .args(["view", "save", "agents", "--page", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("remember-view is off"));

    dash(&temp)
        .args(["prefs", "set", "remember-view", "on"])
        .assert()
        .success();
    dash(&temp)
        .args(["view", "show", "agents"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved view"));
    Ok(())
}

fn unwritable(temp: &TempDir) -> Command {
    // A regular file where the data directory should be.
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.arg("--data-dir").arg(&blocker);
    cmd.arg("--no-color");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn navigation_writes_fail_loudly_on_unwritable_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    for args in [
        vec!["quick-link", "add", "/sla", "SLA"],
        vec!["recent", "add", "/sla", "SLA"],
        vec!["favorite", "toggle", "/sla", "SLA"],
    ] {
        unwritable(&temp)
            .args(&args)
            .assert()
            .failure()
            .stdout(predicate::str::contains("✓").not())
            .stderr(predicate::str::contains("Error"));
    }
    Ok(())
}

#[test]
fn view_save_fails_loudly_on_unwritable_dir() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    unwritable(&temp)
        .args(["view", "save", "clients", "--sort-by", "name"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Saved view").not())
        .stderr(predicate::str::contains("Error"));
    Ok(())
}

#[test]
fn watch_exits_when_auto_refresh_off() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["watch", "--ticks", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Auto-refresh is off"));
    Ok(())
}

#[test]
fn watch_ticks_at_preference_interval() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    dash(&temp)
        .args(["prefs", "set", "auto-refresh-interval", "1"])
        .assert()
        .success();
    dash(&temp)
        .args(["watch", "--ticks", "2", "--interval", "600", "--force"])
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .success()
        .stdout(predicate::str::contains("Refreshing every 1s"))
        .stdout(predicate::str::contains("Refresh #2"));

    let prefs = stdout_json(dash(&temp).args(["prefs", "show", "--json"]));
    assert_eq!(prefs["autoRefresh"], false);
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("align-dash"));
    Ok(())
}

#[test]
fn data_dir_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("align-dash"));
    cmd.env("ALIGN_DASH_HOME", temp.path());
    cmd.args(["recent", "add", "/env", "Env"]).assert().success();

    let items = stdout_json(dash(&temp).args(["recent", "list", "--json"]));
    assert_eq!(items[0]["href"], "/env");
    Ok(())
}
