use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["viewsDir"], "views");
    assert_eq!(parsed["localesDir"], "locales");
    assert_eq!(parsed["sourceLanguage"], "en");
    assert_eq!(parsed["targetLanguage"], "en");
    assert_eq!(parsed["templates"], serde_json::json!(["**/*"]));

    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"));

    assert!(test.exists(".xlfsyncrc.json"));
    let content = test.read_file(".xlfsyncrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".xlfsyncrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"));

    assert_eq!(test.read_file(".xlfsyncrc.json")?, "{}");
    Ok(())
}

#[test]
fn test_init_config_is_picked_up_by_sync() -> Result<()> {
    let test = CliTest::project()?;
    assert!(test.command().arg("init").status()?.success());
    test.write_file("views/page.twig", "{{ 'Hi'|trans }}")?;

    let status = test.sync_command().args(["messages", "-v"]).status()?;
    assert!(status.success());
    assert!(test.exists("locales/messages"));

    Ok(())
}
