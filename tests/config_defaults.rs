// tests/config_defaults.rs

use std::error::Error;
use std::fs;

use sardine_bridge::config::{load_from_path, load_or_default};
use sardine_bridge::types::FeedbackStyle;
use tempfile::tempdir;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn missing_file_yields_defaults() -> TestResult {
    let dir = tempdir()?;
    let config = load_or_default(dir.path().join("Sardine.toml"))?;
    assert_eq!(config.sardine.path, None);
    assert_eq!(config.sardine.sclang_path, None);
    assert_eq!(config.feedback.style, FeedbackStyle::Log);
    Ok(())
}

#[test]
fn full_config_parses() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Sardine.toml");
    fs::write(
        &path,
        r#"
[sardine]
path = "/opt/sardine/bin"
sclang_path = "/usr/local/bin/sclang"

[feedback]
style = "notify"
"#,
    )?;
    let config = load_from_path(&path)?;
    assert_eq!(config.sardine.path.as_deref(), Some("/opt/sardine/bin"));
    assert_eq!(
        config.sardine.sclang_path.as_deref(),
        Some("/usr/local/bin/sclang")
    );
    assert_eq!(config.feedback.style, FeedbackStyle::Notify);
    Ok(())
}

#[test]
fn partial_config_keeps_other_defaults() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Sardine.toml");
    fs::write(&path, "[feedback]\nstyle = \"notify\"\n")?;
    let config = load_from_path(&path)?;
    assert_eq!(config.sardine.path, None);
    assert_eq!(config.feedback.style, FeedbackStyle::Notify);
    Ok(())
}

#[test]
fn invalid_toml_is_an_error() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("Sardine.toml");
    fs::write(&path, "[feedback]\nstyle = \"shout\"\n")?;
    assert!(load_from_path(&path).is_err());
    // load_or_default only tolerates absence, not corruption.
    assert!(load_or_default(&path).is_err());
    Ok(())
}

#[test]
fn feedback_style_parses_from_str() {
    assert_eq!("log".parse::<FeedbackStyle>(), Ok(FeedbackStyle::Log));
    assert_eq!(" Notify ".parse::<FeedbackStyle>(), Ok(FeedbackStyle::Notify));
    assert!("shout".parse::<FeedbackStyle>().is_err());
}
