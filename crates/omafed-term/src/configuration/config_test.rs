use std::fs;

use anyhow::Result;
use clap::Arg;
use clap::Command;
use serial_test::serial;
use tempfile::TempDir;

use super::Config;
use super::ConfigKey;
use crate::domain::models::ConvertScope;

fn command() -> Command {
    return Command::new("omafed")
        .arg(Arg::new("config-file").long("config-file").help("Path to a config file"))
        .arg(Arg::new("repo-dir").long("repo-dir").help("Script repository directory"))
        .arg(Arg::new("repo-url").long("repo-url").help("Repository to clone"))
        .arg(
            Arg::new("script-suffix")
                .long("script-suffix")
                .help("Suffix of script files"),
        )
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .help("Rows shown at once [default: 10]"),
        )
        .arg(
            Arg::new("convert-scope")
                .long("convert-scope")
                .help("Which scripts to convert")
                .value_parser(["all", "unselected"]),
        );
}

fn write_config(dir: &TempDir, content: &str) -> String {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    return path.to_string_lossy().to_string();
}

#[test]
fn it_provides_defaults() {
    assert_eq!(Config::default(ConfigKey::RepoDir), "./omakub");
    assert_eq!(
        Config::default(ConfigKey::RepoUrl),
        "https://github.com/omakub/omakub.git"
    );
    assert_eq!(Config::default(ConfigKey::ScriptSuffix), ".sh");
    assert_eq!(Config::default(ConfigKey::WindowSize), "10");
    assert_eq!(Config::default(ConfigKey::ConvertScope), "all");
    assert!(Config::default(ConfigKey::ConfigFile).ends_with("omafed/config.toml"));
}

#[tokio::test]
#[serial]
async fn it_loads_defaults_without_a_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing.toml");
    let matches = command().get_matches_from(vec![
        "omafed",
        "--config-file",
        missing.to_str().unwrap(),
    ]);

    Config::load(command(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::RepoDir), "./omakub");
    assert_eq!(Config::window_size()?, 10);
    assert_eq!(Config::convert_scope()?, ConvertScope::All);
    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_loads_values_from_the_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let config_file = write_config(
        &dir,
        "repo-dir = \"/srv/omakub\"\nwindow-size = 5\nconvert-scope = \"unselected\"\nscript-suffix = \"\"\n",
    );
    let matches = command().get_matches_from(vec!["omafed", "--config-file", config_file.as_str()]);

    Config::load(command(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::RepoDir), "/srv/omakub");
    assert_eq!(Config::window_size()?, 5);
    assert_eq!(Config::convert_scope()?, ConvertScope::Unselected);
    assert_eq!(Config::get(ConfigKey::ScriptSuffix), ".sh");
    assert_eq!(Config::get(ConfigKey::ConfigFile), config_file);
    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_prefers_flags_over_the_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let config_file = write_config(&dir, "repo-dir = \"/srv/omakub\"\n");
    let matches = command().get_matches_from(vec![
        "omafed",
        "--config-file",
        config_file.as_str(),
        "--repo-dir",
        "/tmp/elsewhere",
        "--window-size",
        "7",
    ]);

    Config::load(command(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::RepoDir), "/tmp/elsewhere");
    assert_eq!(Config::window_size()?, 7);
    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_rejects_values_outside_the_possible_values() -> Result<()> {
    let dir = TempDir::new()?;
    let config_file = write_config(&dir, "convert-scope = \"some\"\n");
    let matches = command().get_matches_from(vec!["omafed", "--config-file", config_file.as_str()]);

    let err = Config::load(command(), vec![&matches]).await.unwrap_err();

    assert!(err.to_string().contains("invalid value for key 'convert-scope'"));
    assert!(err.to_string().contains("all, unselected"));
    return Ok(());
}

#[tokio::test]
#[serial]
async fn it_rejects_a_bad_window_size() -> Result<()> {
    let dir = TempDir::new()?;
    let missing = dir.path().join("missing.toml");
    let matches = command().get_matches_from(vec![
        "omafed",
        "--config-file",
        missing.to_str().unwrap(),
        "--window-size",
        "lots",
    ]);

    Config::load(command(), vec![&matches]).await?;

    assert!(Config::window_size().is_err());
    return Ok(());
}

#[test]
fn it_serializes_defaults() {
    let toml_str = Config::serialize_default(command());

    assert!(toml_str.contains("# Script repository directory\nrepo-dir = \"./omakub\""));
    assert!(toml_str.contains("# Rows shown at once\nwindow-size = 10"));
    assert!(toml_str.contains(
        "# Which scripts to convert [possible values: all, unselected]\nconvert-scope = \"all\""
    ));
    assert!(!toml_str.contains("config-file"));
}
