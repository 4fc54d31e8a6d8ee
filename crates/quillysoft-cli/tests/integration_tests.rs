//! Integration tests for quillysoft-cli.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// `quillysoft` running inside `dir` with colours and `.env` noise removed.
fn quillysoft(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("quillysoft");
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Temp dir with a `.git` marker so the upward search stops here.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join(".git")).unwrap();
    temp
}

#[test]
fn help_lists_commands() {
    let temp = project();
    quillysoft(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_flag() {
    let temp = project();
    quillysoft(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── init ──────────────────────────────────────────────────────────────────────

#[test]
fn init_writes_default_configuration() {
    let temp = project();
    quillysoft(temp.path()).arg("init").assert().success();

    let text = fs::read_to_string(temp.path().join("quillysoft-cli.json")).unwrap();
    assert!(text.contains("\"schemaVersion\": \"1.0\""));
    assert!(text.contains("\"name\": \"MyProject\""));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let temp = project();
    quillysoft(temp.path()).arg("init").assert().success();

    quillysoft(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    quillysoft(temp.path())
        .args(["init", "--sample", "--force"])
        .assert()
        .success();
    let text = fs::read_to_string(temp.path().join("quillysoft-cli.json")).unwrap();
    assert!(text.contains("Contoso.Inventory"));
}

#[test]
fn init_to_custom_path_creates_parents() {
    let temp = project();
    quillysoft(temp.path())
        .args(["init", "--path", "config/nested/quillysoft-cli.json"])
        .assert()
        .success();
    assert!(temp.path().join("config/nested/quillysoft-cli.json").exists());
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_builtin_entity_to_stdout() {
    let temp = project();
    quillysoft(temp.path())
        .args(["render", "entity", "--set", "EntityName=Order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("namespace MyProject.Domain.Entities;"))
        .stdout(predicate::str::contains("public class Order"));
}

#[test]
fn render_uses_configuration_values() {
    let temp = project();
    quillysoft(temp.path())
        .args(["init", "--sample"])
        .assert()
        .success();

    quillysoft(temp.path())
        .args(["render", "repository", "-s", "EntityName=Widget"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "namespace Contoso.Inventory.Persistence.Repositories;",
        ))
        .stdout(predicate::str::contains("interface IWidgetRepository"));
}

#[test]
fn render_flag_disables_conditional_region() {
    let temp = project();
    quillysoft(temp.path())
        .args([
            "render",
            "controller",
            "--set",
            "EntityName=Order",
            "--set",
            "GeneratePermissions=false",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("OrderController"))
        .stdout(predicate::str::contains("Authorize").not());
}

#[test]
fn render_template_file_with_model() {
    let temp = project();
    fs::write(
        temp.path().join("dto.tmpl"),
        "record {{EntityName}}Dto({{#each Fields}}{{Type}} {{Name}}, {{/each}});",
    )
    .unwrap();
    fs::write(
        temp.path().join("model.json"),
        r#"{ "EntityName": "Order", "Fields": [
            { "Type": "Guid", "Name": "Id" },
            { "Type": "decimal", "Name": "Total" }
        ] }"#,
    )
    .unwrap();

    quillysoft(temp.path())
        .args(["render", "dto.tmpl", "--file", "--model", "model.json"])
        .assert()
        .success()
        .stdout("record OrderDto(Guid Id, decimal Total, );");
}

#[test]
fn render_to_output_file() {
    let temp = project();
    quillysoft(temp.path())
        .args([
            "render",
            "unit-test",
            "--set",
            "EntityName=Order",
            "--output",
            "tests/OrderTests.cs",
        ])
        .assert()
        .success();

    let text = fs::read_to_string(temp.path().join("tests/OrderTests.cs")).unwrap();
    assert!(text.contains("public class OrderTests"));
}

#[test]
fn render_missing_template_exits_not_found() {
    let temp = project();
    quillysoft(temp.path())
        .args(["render", "doesNotExist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template not found: doesNotExist"))
        .stderr(predicate::str::contains("quillysoft list"));
}

#[test]
fn render_rejects_malformed_assignment() {
    let temp = project();
    quillysoft(temp.path())
        .args(["render", "entity", "--set", "EntityName"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn corrupt_configuration_falls_back_to_defaults() {
    let temp = project();
    fs::write(temp.path().join("quillysoft-cli.json"), "{ this is not json").unwrap();

    quillysoft(temp.path())
        .args(["render", "entity", "--set", "EntityName=Order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("namespace MyProject.Domain.Entities;"))
        .stderr(predicate::str::contains("ignoring invalid configuration file"));
}

// ── custom templates ──────────────────────────────────────────────────────────

#[test]
fn custom_templates_and_overrides_apply() {
    let temp = project();
    fs::create_dir_all(temp.path().join("tpl")).unwrap();
    fs::write(temp.path().join("tpl/dto.tmpl"), "dto for {{EntityName}}").unwrap();
    fs::write(
        temp.path().join("quillysoft-cli.json"),
        r#"{
            "projectPaths": { "rootPath": "." },
            "templateSettings": {
                "enableCustomTemplates": true,
                "customTemplatesPath": "tpl",
                "templateOverrides": { "entity": "dto" }
            }
        }"#,
    )
    .unwrap();

    quillysoft(temp.path())
        .args(["list", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dto"))
        .stdout(predicate::str::contains("audited-entity"));

    quillysoft(temp.path())
        .args(["render", "entity", "--set", "EntityName=Order"])
        .assert()
        .success()
        .stdout("dto for Order");
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_json_is_parseable() {
    let temp = project();
    let assert = quillysoft(temp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let names: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        ["audited-entity", "controller", "entity", "repository", "unit-test"]
    );
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_get_reads_dotted_keys() {
    let temp = project();
    quillysoft(temp.path())
        .args(["init", "--sample"])
        .assert()
        .success();

    quillysoft(temp.path())
        .args(["config", "get", "projectInfo.name"])
        .assert()
        .success()
        .stdout("Contoso.Inventory\n");

    quillysoft(temp.path())
        .args(["config", "get", "codeGenerationSettings.generateEvents"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn config_get_unknown_key_exits_not_found() {
    let temp = project();
    quillysoft(temp.path())
        .args(["config", "get", "projectInfo.nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("projectInfo.nope"));
}

#[test]
fn config_path_reports_source() {
    let temp = project();
    quillysoft(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(defaults)"));

    quillysoft(temp.path()).arg("init").assert().success();

    quillysoft(temp.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quillysoft-cli.json"));
}

#[test]
fn config_is_found_from_subdirectory() {
    let temp = project();
    quillysoft(temp.path())
        .args(["init", "--sample"])
        .assert()
        .success();
    let nested = temp.path().join("src/Api");
    fs::create_dir_all(&nested).unwrap();

    quillysoft(&nested)
        .args(["config", "get", "projectInfo.namespace"])
        .assert()
        .success()
        .stdout("Contoso.Inventory\n");
}

#[test]
fn explicit_config_flag_wins() {
    let temp = project();
    quillysoft(temp.path()).arg("init").assert().success();
    quillysoft(temp.path())
        .args(["init", "--sample", "--path", "other.json"])
        .assert()
        .success();

    quillysoft(temp.path())
        .args(["--config", "other.json", "config", "get", "projectInfo.name"])
        .assert()
        .success()
        .stdout("Contoso.Inventory\n");
}

#[test]
fn config_show_toml() {
    let temp = project();
    quillysoft(temp.path())
        .args(["config", "show", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[projectInfo]"))
        .stdout(predicate::str::contains("schemaVersion = \"1.0\""));
}

// ── completions ───────────────────────────────────────────────────────────────

#[test]
fn completions_bash() {
    let temp = project();
    quillysoft(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quillysoft"));
}
