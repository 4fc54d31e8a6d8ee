//! Built-in, custom and overridden templates assembled from a configuration.

use std::{collections::BTreeMap, fs};

use quillysoft_adapters::{bootstrap, custom_templates_dir};
use quillysoft_core::domain::{Configuration, Model};
use tempfile::TempDir;

fn config_with_custom(root: &std::path::Path) -> Configuration {
    let mut config = Configuration::with_root(root);
    config.template_settings.enable_custom_templates = true;
    config.template_settings.custom_templates_path = Some("tpl".into());
    config
}

#[test]
fn custom_templates_shadow_builtins() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("tpl")).unwrap();
    fs::write(temp.path().join("tpl/entity.tmpl"), "custom {{EntityName}}").unwrap();
    fs::write(temp.path().join("tpl/dto.tmpl"), "dto {{EntityName}}").unwrap();

    let (engine, summary) = bootstrap(&config_with_custom(temp.path())).unwrap();
    let model = Model::new().with("EntityName", "Order");

    assert_eq!(engine.render("entity", &model).unwrap(), "custom Order");
    assert_eq!(engine.render("dto", &model).unwrap(), "dto Order");
    assert!(engine.exists("repository"));
    assert_eq!(summary.loaded.len(), 2);
    assert_eq!(summary.loaded[1].1, 2);
}

#[test]
fn custom_templates_ignored_when_disabled() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("tpl")).unwrap();
    fs::write(temp.path().join("tpl/entity.tmpl"), "custom").unwrap();

    let mut config = config_with_custom(temp.path());
    config.template_settings.enable_custom_templates = false;

    assert!(custom_templates_dir(&config).is_none());
    let (engine, summary) = bootstrap(&config).unwrap();
    assert_ne!(engine.get("entity").unwrap().body(), "custom");
    assert_eq!(summary.loaded.len(), 1);
}

#[test]
fn missing_custom_directory_is_not_an_error() {
    let temp = TempDir::new().unwrap();
    let (engine, _) = bootstrap(&config_with_custom(temp.path())).unwrap();
    assert!(engine.exists("entity"));
}

#[test]
fn overrides_redirect_names() {
    let mut config = Configuration::default();
    let mut overrides = BTreeMap::new();
    overrides.insert("entity".to_string(), "audited-entity".to_string());
    overrides.insert("mapper".to_string(), "nowhere".to_string());
    config.template_settings.template_overrides = overrides;

    let (engine, summary) = bootstrap(&config).unwrap();

    assert_eq!(
        engine.get("entity").unwrap().body(),
        engine.get("audited-entity").unwrap().body()
    );
    assert_eq!(summary.overrides_applied, 1);
    assert_eq!(summary.overrides_skipped, ["mapper"]);
}
