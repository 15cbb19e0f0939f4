use anyhow::Result;

use crate::{CliTest, run};

fn key_command(test: &CliTest, words: &[&str]) -> std::process::Command {
    let mut cmd = test.command();
    cmd.arg("key").args(words);
    cmd
}

#[test]
fn test_key_prints_derived_key() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(key_command(&test, &["Hello, World!"]))?;

    assert_eq!(code, Some(0));
    assert_eq!(stdout, "hello_world\n");
    Ok(())
}

#[test]
fn test_key_joins_words() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, _) = run(key_command(&test, &["Sign", "in", "now"]))?;

    assert_eq!(code, Some(0));
    assert_eq!(stdout, "sign_in_now\n");
    Ok(())
}

#[test]
fn test_key_without_usable_characters_fails() -> Result<()> {
    let test = CliTest::new()?;

    let (code, stdout, stderr) = run(key_command(&test, &["¡¿...?!"]))?;

    assert_eq!(code, Some(1));
    assert_eq!(stdout, "");
    assert!(stderr.contains("no letters or digits"));
    Ok(())
}
