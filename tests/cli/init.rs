use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, Some(0));
    assert_eq!(
        stdout,
        "✓ Created .arbifyrc.json\n  resources: lib/l10n/app_en.arb, hook: flutter pub get\n"
    );

    let content = test.read_file(".arbifyrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["l10nDir"], "lib/l10n");
    assert_eq!(parsed["defaultLocale"], "en");
    assert_eq!(parsed["triggerMode"], "caret");
    assert_eq!(parsed["runHook"], true);
    assert!(content.contains("\n  \"l10nDir\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".arbifyrc.json", "{}")?;

    let (code, stdout, stderr) = run({
        let mut cmd = test.command();
        cmd.arg("init");
        cmd
    })?;

    assert_eq!(code, Some(1));
    assert_eq!(stdout, "");
    assert_eq!(stderr, "✘ .arbifyrc.json already exists\n");
    assert_eq!(test.read_file(".arbifyrc.json")?, "{}");

    Ok(())
}
