use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["localesPath"], "./locales");
    assert_eq!(parsed["fnNames"], serde_json::json!(["t"]));
    assert_eq!(parsed["baseLang"], "en");
    assert_eq!(parsed["silent"], true);
    assert!(
        parsed.get("unknownKeys").is_some(),
        "Config should have 'unknownKeys' field"
    );

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("Created .gleanrc.json"));
    assert!(test.root().join(".gleanrc.json").exists());

    let content = test.read_file(".gleanrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".gleanrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".gleanrc.json already exists"));
    assert_eq!(test.read_file(".gleanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;

    test.write_file("src/app.tsx", r#"export const title = t("app.title");"#)?;
    test.write_file("locales/en.json", r#"{ "app": { "title": "App" } }"#)?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "Extract should work with initialized config. stderr: {}",
        stderr(&output)
    );
    assert_eq!(
        test.read_json("locales/parsed/en.json")?,
        serde_json::json!({ "app": { "title": "App" } })
    );

    Ok(())
}
