use std::fs;

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, unit_ids};

const FRENCH: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file source-language="en" target-language="fr" datatype="plaintext" original="messages.fr.xlf">
    <body>
      <trans-unit id="Hello World">
        <source>Hello World</source>
        <target>Bonjour le monde</target>
      </trans-unit>
      <trans-unit id="Old">
        <source>Old</source>
        <target>Vieux</target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

const FRENCH_SYNCED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff xmlns="urn:oasis:names:tc:xliff:document:1.2" version="1.2">
  <file source-language="en" target-language="fr" datatype="plaintext" original="messages.fr.xlf">
    <body>
      <trans-unit id="Hello World">
        <source>Hello World</source>
        <target>Bonjour le monde</target>
      </trans-unit>
      <trans-unit id="Bye">
        <source>Bye</source>
        <target/>
      </trans-unit>
      <trans-unit id="Home">
        <source>Home</source>
        <target/>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;

fn setup_views(test: &CliTest) -> Result<()> {
    test.write_file(
        "views/index.twig",
        r#"<h1>{% trans %}Hello World{% endtrans %}</h1>
<p>{{ 'Bye'|trans }}</p>
"#,
    )?;
    test.write_file(
        "views/partials/nav.html.twig",
        r#"<a>{{ app.translator.trans('Home') }}</a> <a>{{ "Bye" | trans }}</a>"#,
    )
}

#[test]
fn test_sync_creates_new_document() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;

    assert_cmd_snapshot!(
        test.sync_command()
            .args(["messages.fr.xlf", "--lang", "en/fr"])
    );

    let content = test.read_file("locales/messages.fr.xlf")?;
    assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(content.contains(r#"source-language="en" target-language="fr""#));
    assert_eq!(unit_ids(&content), vec!["Bye", "Hello World", "Home"]);
    assert!(content.contains("<source>Hello World</source>"));
    Ok(())
}

#[test]
fn test_sync_adds_and_removes_keeping_translations() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;
    test.write_file("locales/messages.fr.xlf", FRENCH)?;

    // Extension is resolved automatically.
    assert_cmd_snapshot!(test.sync_command().arg("messages.fr"));

    assert_eq!(test.read_file("locales/messages.fr.xlf")?, FRENCH_SYNCED);
    assert!(!test.exists("locales/messages.fr"));
    Ok(())
}

#[test]
fn test_sync_twice_is_idempotent() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;
    test.write_file("locales/messages.fr.xlf", FRENCH)?;

    assert!(test.sync_command().arg("messages.fr.xlf").status()?.success());
    let modified = fs::metadata(test.root().join("locales/messages.fr.xlf"))?.modified()?;

    assert_cmd_snapshot!(test.sync_command().arg("messages.fr.xlf"));

    assert_eq!(test.read_file("locales/messages.fr.xlf")?, FRENCH_SYNCED);
    assert_eq!(
        fs::metadata(test.root().join("locales/messages.fr.xlf"))?.modified()?,
        modified
    );
    Ok(())
}

#[test]
fn test_sync_dry_run_prints_document() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;
    test.write_file("locales/messages.fr.xlf", FRENCH)?;

    assert_cmd_snapshot!(test.sync_command().args(["messages.fr.xlf", "--dry"]));

    assert_eq!(test.read_file("locales/messages.fr.xlf")?, FRENCH);
    Ok(())
}

#[test]
fn test_sync_dry_run_does_not_create_document() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;

    let status = test.sync_command().args(["messages", "--dry"]).status()?;
    assert!(status.success());
    assert!(!test.exists("locales/messages"));
    Ok(())
}

#[test]
fn test_sync_keeps_keys_of_latin1_templates() -> Result<()> {
    let test = CliTest::project()?;
    test.write_bytes(
        "views/index.twig",
        b"<p>Caf\xe9</p>\n{{ 'Welcome'|trans }}\n",
    )?;
    let document = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2">
  <file source-language="en" target-language="fr">
    <body>
      <trans-unit id="Welcome">
        <source>Welcome</source>
        <target>Bienvenue</target>
      </trans-unit>
    </body>
  </file>
</xliff>
"#;
    test.write_file("locales/messages.fr.xlf", document)?;

    assert_cmd_snapshot!(test.sync_command().arg("messages.fr.xlf"));

    assert_eq!(test.read_file("locales/messages.fr.xlf")?, document);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_sync_unreadable_template_aborts() -> Result<()> {
    use std::os::unix::fs::symlink;

    let test = CliTest::project()?;
    setup_views(&test)?;
    symlink(
        test.root().join("views/missing.twig"),
        test.root().join("views/broken.twig"),
    )?;
    test.write_file("locales/messages.fr.xlf", FRENCH)?;

    let status = test.sync_command().arg("messages.fr.xlf").status()?;
    assert_eq!(status.code(), Some(1));
    assert_eq!(test.read_file("locales/messages.fr.xlf")?, FRENCH);
    Ok(())
}

#[test]
fn test_sync_custom_directories() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("templates/page.twig", "{{ 'Custom'|trans }}")?;
    test.create_dir("translations")?;

    assert_cmd_snapshot!(test.sync_command().args([
        "messages.xliff",
        "--views-dir",
        "templates",
        "--locales-dir",
        "translations",
    ]));

    assert_eq!(
        unit_ids(&test.read_file("translations/messages.xliff")?),
        vec!["Custom"]
    );
    Ok(())
}

#[test]
fn test_sync_uses_config_file() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".xlfsyncrc.json",
        r#"{
            "viewsDir": "templates",
            "localesDir": "i18n",
            "targetLanguage": "de",
            "templates": ["**/*.twig"]
        }"#,
    )?;
    test.write_file("templates/page.twig", "{{ 'Scanned'|trans }}")?;
    test.write_file("templates/README.md", "{{ 'Ignored'|trans }}")?;
    test.create_dir("i18n")?;

    assert!(test.sync_command().arg("messages.de.xlf").status()?.success());

    let content = test.read_file("i18n/messages.de.xlf")?;
    assert_eq!(unit_ids(&content), vec!["Scanned"]);
    assert!(content.contains(r#"target-language="de""#));
    Ok(())
}

#[test]
fn test_sync_nothing_found_does_not_create_document() -> Result<()> {
    let test = CliTest::project()?;
    test.write_file("views/index.twig", "<p>{{ title }}</p>")?;

    assert_cmd_snapshot!(test.sync_command().arg("messages.xlf"));

    assert!(!test.exists("locales/messages.xlf"));
    Ok(())
}

#[test]
fn test_sync_malformed_document_fails() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;
    let broken = "<xliff><file><body></file></xliff>";
    test.write_file("locales/messages.xlf", broken)?;

    let status = test.sync_command().arg("messages.xlf").status()?;
    assert_eq!(status.code(), Some(1));
    assert_eq!(test.read_file("locales/messages.xlf")?, broken);
    Ok(())
}

#[test]
fn test_sync_rejects_non_xliff_document() -> Result<()> {
    let test = CliTest::project()?;
    setup_views(&test)?;
    test.write_file("locales/messages.xlf", "<html><body/></html>")?;

    assert_cmd_snapshot!(test.sync_command().arg("messages.xlf"));
    Ok(())
}

#[test]
fn test_sync_missing_views_dir_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.create_dir("locales")?;

    assert_cmd_snapshot!(test.sync_command().arg("messages.xlf"));
    Ok(())
}

#[test]
fn test_sync_missing_project_root_fails() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(
        test.command()
            .args(["sync", "does-not-exist", "messages.xlf"])
    );
    Ok(())
}

#[test]
fn test_sync_rejects_bad_language_pair() -> Result<()> {
    let test = CliTest::project()?;
    let status = test
        .sync_command()
        .args(["messages.xlf", "--lang", "english"])
        .status()?;
    assert_eq!(status.code(), Some(2));
    assert!(!test.exists("locales/messages.xlf"));
    Ok(())
}
