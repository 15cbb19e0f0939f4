use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const HOME_WIDGET: &str = "import 'package:flutter/material.dart';

class Home extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return Text('Welcome Home');
  }
}
";

const L10N_IMPORT: &str = "import 'package:flutter_gen/gen_l10n/app_localizations.dart';";

fn offset_of(source: &str, needle: &str) -> String {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not in source", needle))
        .to_string()
}

#[test]
fn test_extract_welcome_home() -> Result<()> {
    let test = CliTest::flutter_project("lib/main.dart", HOME_WIDGET)?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--line", "6", "--column", "18"]);
    let (code, stdout, stderr) = run(cmd)?;

    assert_eq!(stderr, "");
    assert_eq!(code, Some(0));
    insta::assert_snapshot!(stdout, @r#"
    ✓ Extracted "Welcome Home" as welcome_home
      lib/l10n/app_en.arb: added
      lib/main.dart: rewritten, import added
    "#);

    assert_eq!(
        test.read_file("lib/main.dart")?,
        format!(
            "import 'package:flutter/material.dart';
{}

class Home extends StatelessWidget {{
  @override
  Widget build(BuildContext context) {{
    return Text(AppLocalizations.of(context)!.welcome_home);
  }}
}}
",
            L10N_IMPORT
        )
    );
    assert_eq!(
        test.read_file("lib/l10n/app_en.arb")?,
        "{\n  \"welcome_home\": \"Welcome Home\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_writes_every_resource_file() -> Result<()> {
    let source = "Widget build(BuildContext context) => Text(\"Sign in\");\n";
    let test = CliTest::flutter_project("lib/login.dart", source)?;
    test.write_file("lib/l10n/app_en.arb", "{\n  \"hello\": \"Hello\"\n}\n")?;
    test.write_file("lib/l10n/app_de.arb", "{\"hello\":\"Hallo\"}")?;
    test.write_file("lib/l10n/notes.txt", "not a resource file")?;

    let mut cmd = test.extract_command("lib/login.dart");
    cmd.args(["--offset", &offset_of(source, "Sign")]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(0));
    insta::assert_snapshot!(stdout, @r#"
    ✓ Extracted "Sign in" as sign_in
      lib/l10n/app_de.arb: added
      lib/l10n/app_en.arb: added
      lib/login.dart: rewritten, import added
    "#);

    // Existing entries keep their order; the new key goes last.
    assert_eq!(
        test.read_file("lib/l10n/app_de.arb")?,
        "{\n  \"hello\": \"Hallo\",\n  \"sign_in\": \"Sign in\"\n}\n"
    );
    assert_eq!(
        test.read_file("lib/l10n/app_en.arb")?,
        "{\n  \"hello\": \"Hello\",\n  \"sign_in\": \"Sign in\"\n}\n"
    );
    assert_eq!(test.read_file("lib/l10n/notes.txt")?, "not a resource file");
    assert_eq!(
        test.read_file("lib/login.dart")?,
        format!(
            "{}\nWidget build(BuildContext context) => Text(AppLocalizations.of(context)!.sign_in);\n",
            L10N_IMPORT
        )
    );

    Ok(())
}

#[test]
fn test_extract_overwrites_existing_value() -> Result<()> {
    let source = "Text('Hi')";
    let test = CliTest::flutter_project("lib/main.dart", source)?;
    test.write_file("lib/l10n/app_en.arb", "{\"hi\": \"Hello\"}")?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--offset", "7"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("lib/l10n/app_en.arb: updated"));
    assert_eq!(
        test.read_file("lib/l10n/app_en.arb")?,
        "{\n  \"hi\": \"Hi\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_partial_failure_keeps_other_files() -> Result<()> {
    let source = "Text('Hi')";
    let test = CliTest::flutter_project("lib/main.dart", source)?;
    test.write_file("lib/l10n/app_en.arb", "{}")?;
    test.write_file("lib/l10n/app_fr.arb", "{ broken")?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--offset", "7"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("lib/l10n/app_en.arb: added"));
    assert!(stdout.contains("Failed to update 1 resource file:"));
    assert!(stdout.contains("lib/l10n/app_fr.arb: Failed to parse JSON"));

    assert_eq!(test.read_file("lib/l10n/app_fr.arb")?, "{ broken");
    assert_eq!(
        test.read_file("lib/l10n/app_en.arb")?,
        "{\n  \"hi\": \"Hi\"\n}\n"
    );
    assert_eq!(
        test.read_file("lib/main.dart")?,
        format!("{}\nText(AppLocalizations.of(context)!.hi)", L10N_IMPORT)
    );

    Ok(())
}

#[test]
fn test_extract_total_failure_leaves_source_unchanged() -> Result<()> {
    let source = "Text('Hi')";
    let test = CliTest::flutter_project("lib/main.dart", source)?;
    test.write_file("lib/l10n/app_en.arb", "[1, 2]")?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--offset", "7"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(1));
    assert!(stdout.contains("Root of resource file must be an object"));
    assert!(stdout.contains("note: lib/main.dart was left unchanged"));
    assert_eq!(test.read_file("lib/main.dart")?, source);
    assert_eq!(test.read_file("lib/l10n/app_en.arb")?, "[1, 2]");

    Ok(())
}

#[test]
fn test_extract_keeps_existing_import() -> Result<()> {
    let source = format!("{}\n\nfinal title = Text(\"Settings\");\n", L10N_IMPORT);
    let test = CliTest::flutter_project("lib/settings.dart", &source)?;

    let mut cmd = test.extract_command("lib/settings.dart");
    cmd.args(["--offset", &offset_of(&source, "Settings")]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("lib/settings.dart: rewritten\n"));
    assert_eq!(
        test.read_file("lib/settings.dart")?,
        format!(
            "{}\n\nfinal title = Text(AppLocalizations.of(context)!.settings);\n",
            L10N_IMPORT
        )
    );

    Ok(())
}

#[test]
fn test_extract_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::flutter_project("lib/main.dart", HOME_WIDGET)?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--line", "6", "--column", "20", "--dry-run"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(0));
    insta::assert_snapshot!(stdout, @r#"
    Would extract "Welcome Home" as welcome_home
      --> lib/main.dart:6:17
      |
    6 |     return Text('Welcome Home');
      |                 ^^^^^^^^^^^^^^
       = replace with: AppLocalizations.of(context)!.welcome_home
       = add import: import 'package:flutter_gen/gen_l10n/app_localizations.dart';
       = resource files: lib/l10n/app_en.arb (new)
    "#);

    assert_eq!(test.read_file("lib/main.dart")?, HOME_WIDGET);
    assert!(!test.root().join("lib/l10n").exists());

    Ok(())
}

#[test]
fn test_extract_without_literal_fails() -> Result<()> {
    let source = "final answer = 42;\n";
    let test = CliTest::flutter_project("lib/main.dart", source)?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--line", "1", "--column", "3"]);
    let (code, stdout, stderr) = run(cmd)?;

    assert_eq!(code, Some(1));
    assert_eq!(stdout, "");
    assert_eq!(stderr, "✘ No string literal at lib/main.dart:1:3\n");
    assert_eq!(test.read_file("lib/main.dart")?, source);
    assert!(!test.root().join("lib/l10n").exists());

    Ok(())
}

#[test]
fn test_extract_skips_import_lines() -> Result<()> {
    let test = CliTest::flutter_project("lib/main.dart", HOME_WIDGET)?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--line", "1", "--column", "12"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, Some(1));
    assert!(stderr.contains("No string literal"));
    assert_eq!(test.read_file("lib/main.dart")?, HOME_WIDGET);

    Ok(())
}

#[test]
fn test_extract_rejects_unknown_file_type() -> Result<()> {
    let test = CliTest::flutter_project("notes.txt", "say('hello')")?;

    let mut cmd = test.extract_command("notes.txt");
    cmd.args(["--offset", "6"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, Some(1));
    assert!(stderr.contains("is not a source file (expected .dart)"));
    assert!(!test.root().join("lib/l10n").exists());

    Ok(())
}

#[test]
fn test_extract_selection_mode_accepts_any_file() -> Result<()> {
    let source = "say('hello there')";
    let test = CliTest::flutter_project("notes.txt", source)?;

    let mut cmd = test.extract_command("notes.txt");
    cmd.args(["--mode", "selection", "--selection", "5..16"]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("as hello_there"));
    assert_eq!(
        test.read_file("notes.txt")?,
        format!("{}\nsay(AppLocalizations.of(context)!.hello_there)", L10N_IMPORT)
    );

    Ok(())
}

#[test]
fn test_extract_selection_needs_selection_mode() -> Result<()> {
    let source = "Text('Hi')";
    let test = CliTest::flutter_project("lib/main.dart", source)?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--selection", "6..8"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, Some(1));
    assert!(stderr.contains("--mode selection"));
    assert_eq!(test.read_file("lib/main.dart")?, source);

    Ok(())
}

#[test]
fn test_extract_l10n_dir_override() -> Result<()> {
    let source = "Text('Hi')";
    let test = CliTest::flutter_project("lib/main.dart", source)?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args([
        "--offset",
        "7",
        "--l10n-dir",
        "assets/i18n",
        "--default-locale",
        "de",
    ]);
    let (code, stdout, _) = run(cmd)?;

    assert_eq!(code, Some(0));
    assert!(stdout.contains("assets/i18n/app_de.arb: added"));
    assert_eq!(
        test.read_file("assets/i18n/app_de.arb")?,
        "{\n  \"hi\": \"Hi\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_offset_past_end_is_an_error() -> Result<()> {
    let test = CliTest::flutter_project("lib/main.dart", "Text('Hi')")?;

    let mut cmd = test.extract_command("lib/main.dart");
    cmd.args(["--offset", "100"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, Some(2));
    assert!(stderr.starts_with("Error: Position 100 is past the end of the file"));

    Ok(())
}

#[test]
fn test_extract_missing_file_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.extract_command("lib/missing.dart");
    cmd.args(["--offset", "0"]);
    let (code, _, stderr) = run(cmd)?;

    assert_eq!(code, Some(2));
    assert!(stderr.starts_with("Error: Failed to resolve path: lib/missing.dart"));

    Ok(())
}
