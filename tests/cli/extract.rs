use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, stderr, stdout};

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file(
        "locales/en.json",
        r#"{ "home": { "title": "Home", "intro": "Welcome" } }"#,
    )?;
    test.write_file(
        "locales/fr.json",
        r#"{ "home": { "title": "Accueil", "intro": "Welcome" } }"#,
    )?;
    Ok(test)
}

#[test]
fn test_extract_merges_keys_into_every_locale() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/app.tsx",
        r#"
  export function Home() {
      return (
          <main>
              <h1>{t("home.title")}</h1>
              <p>{t("home.intro")}</p>
              <small>{t("home.footer")}</small>
          </main>
      );
  }
  "#,
    )?;

    let output = test.extract_command().output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("locales/parsed/en.json")?,
        json!({ "home": { "title": "Home", "intro": "Welcome", "footer": "home.footer" } })
    );
    assert_eq!(
        test.read_json("locales/parsed/fr.json")?,
        json!({ "home": { "title": "Accueil", "intro": "Welcome", "footer": "home.footer" } })
    );
    assert_eq!(
        test.read_json("locales/parsed/_untranslated.json")?,
        json!({ "fr": { "home": { "intro": "Welcome", "footer": "home.footer" } } })
    );

    let out = stdout(&output);
    assert!(out.contains("Extracted 3 keys from 1 source file into 2 locales"));
    assert!(out.contains("  - fr: 2 untranslated"));
    assert!(out.contains("Wrote 3 file(s) to "));

    Ok(())
}

#[test]
fn test_extract_drops_keys_no_longer_used() -> Result<()> {
    let test = project()?;
    test.write_file("src/app.ts", r#"t("home.title");"#)?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        test.read_json("locales/parsed/en.json")?,
        json!({ "home": { "title": "Home" } })
    );
    assert!(!test.root().join("locales/parsed/_untranslated.json").exists());

    Ok(())
}

#[test]
fn test_extract_unknown_call_is_bucketed() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/page.tsx",
        r#"export const label = (name) => t(name) + t("home.title");"#,
    )?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let en = test.read_json("locales/parsed/en.json")?;
    assert_eq!(
        en,
        json!({ "__UNKNOWN": { "t(name)": "t(name)" }, "home": { "title": "Home" } })
    );
    // The unknown bucket is written first.
    let raw = test.read_file("locales/parsed/en.json")?;
    assert!(raw.find("__UNKNOWN").unwrap() < raw.find("home").unwrap());

    // `silent` defaults to true: only the count is reported.
    let out = stdout(&output);
    assert!(!out.contains("unknown translation key"));
    assert!(out.contains("1 translation call(s) with unknown keys (use -v for details)"));
    assert!(out.contains("1 problems (0 errors, 1 warning)"));
    assert!(!stderr(&output).contains("t(name)"));

    Ok(())
}

#[test]
fn test_extract_strict_fails_on_unknown_call() -> Result<()> {
    let test = project()?;
    test.write_file("src/page.ts", r#"t(key);"#)?;

    let output = test.extract_command().arg("--strict").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("error: unknown translation key \"t(key)\""));
    // Files are still written.
    assert!(test.root().join("locales/parsed/en.json").exists());

    Ok(())
}

#[test]
fn test_extract_expands_known_unknown_keys() -> Result<()> {
    let test = project()?;
    test.write_file(
        ".gleanrc.json",
        r#"{ "unknownKeys": { "t(`home.${part}`)": ["home.title", "home.intro"] } }"#,
    )?;
    test.write_file(
        "src/page.ts",
        "export const text = (part) => t(`home.${part}`);",
    )?;

    let output = test
        .extract_command()
        .arg("--strict")
        .output()?;

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert_eq!(
        test.read_json("locales/parsed/fr.json")?,
        json!({ "home": { "title": "Accueil", "intro": "Welcome" } })
    );
    assert!(!stdout(&output).contains("unknown translation key"));

    Ok(())
}

#[test]
fn test_extract_expansion_from_locale_unknown_bucket() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "locales/en.json",
        r#"{ "__UNKNOWN": { "t(kind)": ["kind.a", "kind.b"] }, "kind": { "a": "A" } }"#,
    )?;
    test.write_file("src/kind.ts", "t(kind);")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        test.read_json("locales/parsed/en.json")?,
        json!({ "kind": { "a": "A", "b": "kind.b" } })
    );

    Ok(())
}

#[test]
fn test_extract_dry_run_writes_nothing() -> Result<()> {
    let test = project()?;
    test.write_file("src/app.ts", r#"t("home.title");"#)?;

    let output = test.extract_command().arg("--dry-run").output()?;

    assert!(output.status.success());
    assert!(!test.root().join("locales/parsed").exists());
    assert!(stdout(&output).contains("Dry run: nothing written to "));

    Ok(())
}

#[test]
fn test_extract_without_keys_writes_nothing() -> Result<()> {
    let test = project()?;
    test.write_file("src/app.ts", "export const answer = 42;")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    assert!(!test.root().join("locales/parsed").exists());
    assert!(stdout(&output).contains("No changes to write."));

    Ok(())
}

#[test]
fn test_extract_cli_overrides() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/de.json", r#"{ "menu": { "open": "Öffnen" } }"#)?;
    test.write_file("i18n/en.json", r#"{ "menu": { "open": "Open" } }"#)?;
    test.write_file(
        "src/menu.jsx",
        r#"const a = translate("menu.open"); const b = t("menu.close");"#,
    )?;

    let output = test
        .extract_command()
        .args(["--locales-path", "i18n", "--out", "dist/i18n"])
        .args(["--base-lang", "de", "--fn-name", "translate"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_json("dist/i18n/en.json")?,
        json!({ "menu": { "open": "Open" } })
    );
    assert_eq!(
        test.read_json("dist/i18n/de.json")?,
        json!({ "menu": { "open": "Öffnen" } })
    );
    assert!(!test.root().join("i18n/parsed").exists());

    Ok(())
}

#[test]
fn test_extract_parse_error_is_a_warning() -> Result<()> {
    let test = project()?;
    test.write_file("src/app.ts", r#"t("home.title");"#)?;
    test.write_file("src/broken.ts", "const = ;")?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("1 file(s) could not be parsed (use -v for details)"));
    assert!(test.root().join("locales/parsed/en.json").exists());

    Ok(())
}

#[test]
fn test_extract_skips_test_files_by_default() -> Result<()> {
    let test = project()?;
    test.write_file("src/app.ts", r#"t("home.title");"#)?;
    test.write_file("src/app.test.ts", r#"t("home.test_only");"#)?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        test.read_json("locales/parsed/en.json")?,
        json!({ "home": { "title": "Home" } })
    );

    Ok(())
}

#[test]
fn test_extract_missing_locales_dir_fails() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", r#"t("home.title");"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"));

    Ok(())
}

#[test]
fn test_extract_invalid_locale_json_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.json", "{ nope")?;
    test.write_file("src/app.ts", r#"t("home.title");"#)?;

    let output = test.extract_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse locale file"));

    Ok(())
}

#[test]
fn test_extract_verbose_warns_once_per_unknown_call() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/page.tsx",
        r#"export const label = (name) => t(name) + t("home.title");"#,
    )?;

    let output = test.extract_command().arg("-v").output()?;

    assert!(output.status.success());
    let all = format!("{}{}", stdout(&output), stderr(&output));
    assert_eq!(all.matches("t(name)").count(), 2, "output: {}", all);
    assert_eq!(
        all.matches("warning: unknown translation key \"t(name)\"").count(),
        1
    );
    assert!(all.contains("--> ./src/page.tsx:1:32"));
    assert!(all.contains("1 problems (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_extract_silent_false_in_config_shows_warnings() -> Result<()> {
    let test = project()?;
    test.write_file(".gleanrc.json", r#"{ "silent": false }"#)?;
    test.write_file("src/page.ts", "t(key);")?;

    let output = test.extract_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        stdout(&output)
            .matches("warning: unknown translation key \"t(key)\"")
            .count(),
        1
    );

    Ok(())
}

#[test]
fn test_extract_verbose_prints_write_info() -> Result<()> {
    let test = project()?;
    test.write_file("src/app.ts", r#"t("home.title");"#)?;

    let output = test.extract_command().arg("-v").output()?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("write lang strings to "));

    Ok(())
}
