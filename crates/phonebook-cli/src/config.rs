//! Layered settings: CLI flags override the TOML config file, which
//! overrides built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_FILE: &str = "phonebook.json";

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  /// Path to the phonebook document.
  file: Option<PathBuf>,
}

/// Fully-resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub file: PathBuf,
}

impl Settings {
  pub fn resolve(config: Option<&Path>, file_flag: Option<PathBuf>) -> Result<Self> {
    let file_cfg = match config {
      Some(path) => {
        let raw = std::fs::read_to_string(path)
          .with_context(|| format!("reading config file {}", path.display()))?;
        parse(&raw).with_context(|| format!("parsing config file {}", path.display()))?
      }
      None => ConfigFile::default(),
    };

    let file = file_flag
      .or(file_cfg.file)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE));

    Ok(Self { file: expand_tilde(&file) })
  }
}

fn parse(raw: &str) -> Result<ConfigFile> { Ok(toml::from_str(raw)?) }

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_local_document() {
    let s = Settings::resolve(None, None).unwrap();
    assert_eq!(s.file, PathBuf::from("phonebook.json"));
  }

  #[test]
  fn config_file_sets_path() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    std::fs::write(&cfg, "file = \"/data/book.json\"\n").unwrap();

    let s = Settings::resolve(Some(&cfg), None).unwrap();
    assert_eq!(s.file, PathBuf::from("/data/book.json"));
  }

  #[test]
  fn flag_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    std::fs::write(&cfg, "file = \"/data/book.json\"\n").unwrap();

    let s = Settings::resolve(Some(&cfg), Some("/tmp/other.json".into())).unwrap();
    assert_eq!(s.file, PathBuf::from("/tmp/other.json"));
  }

  #[test]
  fn unknown_config_keys_are_rejected() {
    assert!(parse("path = \"x\"").is_err());
    assert!(parse("").unwrap().file.is_none());
  }

  #[test]
  fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(Settings::resolve(Some(&missing), None).is_err());
  }

  #[test]
  fn non_tilde_paths_are_untouched() {
    assert_eq!(expand_tilde(Path::new("a/b.json")), PathBuf::from("a/b.json"));
    assert_eq!(expand_tilde(Path::new("/abs.json")), PathBuf::from("/abs.json"));
  }
}
