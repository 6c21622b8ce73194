//! Configuration for locating the dashboard sources
//!
//! Precedence: `--data-dir` flag, then `FUNDBOARD_DATA_DIR`, then the config
//! file, then the current directory. Per-source paths in the config file are
//! joined onto the data directory when relative.

use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SourceKind};
use crate::resolver::{DataResolver, MalformedPolicy, SourcePaths};

pub const DATA_DIR_ENV: &str = "FUNDBOARD_DATA_DIR";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub trade_history: Option<PathBuf>,
    pub investment_reports: Option<PathBuf>,
    pub recommendations: Option<PathBuf>,
    pub malformed_policy: Option<MalformedPolicy>,
}

/// Effective settings after applying precedence
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub sources: SourcePaths,
    pub policy: MalformedPolicy,
}

impl Settings {
    pub fn from_parts(
        file: FileConfig,
        data_dir_flag: Option<&Path>,
        data_dir_env: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir_flag
            .map(Path::to_path_buf)
            .or(data_dir_env)
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let source = |configured: Option<PathBuf>, kind: SourceKind| match configured {
            Some(path) => data_dir.join(path),
            None => data_dir.join(kind.default_file_name()),
        };

        let sources = SourcePaths {
            trade_history: source(file.trade_history, SourceKind::TradeHistory),
            investment_reports: source(file.investment_reports, SourceKind::InvestmentReports),
            recommendations: source(file.recommendations, SourceKind::Recommendations),
        };

        Self {
            sources,
            policy: file.malformed_policy.unwrap_or_default(),
            data_dir,
        }
    }

    pub fn resolver(&self) -> DataResolver {
        DataResolver::new(self.sources.clone()).with_policy(self.policy)
    }
}

/// `<config_home>/fundboard/config.toml`, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("fundboard").join("config.toml"))
}

pub fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Invalid config file {:?}", path))
}

/// Build settings from an explicit config path (must exist) or the default
/// location (optional), the data-dir flag and the environment
pub fn load_settings(config_path: Option<&Path>, data_dir_flag: Option<&Path>) -> Result<Settings> {
    let file = match config_path {
        Some(path) => load_config_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => {
                debug!("Using config file {:?}", path);
                load_config_file(&path)?
            }
            _ => FileConfig::default(),
        },
    };

    let data_dir_env = std::env::var_os(DATA_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);

    Ok(Settings::from_parts(file, data_dir_flag, data_dir_env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_use_current_dir_and_original_names() {
        let settings = Settings::from_parts(FileConfig::default(), None, None);

        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.sources, SourcePaths::in_dir("."));
        assert_eq!(settings.policy, MalformedPolicy::Fail);
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let file = FileConfig {
            data_dir: Some(PathBuf::from("from-file")),
            ..FileConfig::default()
        };

        let settings = Settings::from_parts(
            file.clone(),
            Some(Path::new("from-flag")),
            Some(PathBuf::from("from-env")),
        );
        assert_eq!(settings.data_dir, PathBuf::from("from-flag"));

        let settings = Settings::from_parts(file.clone(), None, Some(PathBuf::from("from-env")));
        assert_eq!(settings.data_dir, PathBuf::from("from-env"));

        let settings = Settings::from_parts(file, None, None);
        assert_eq!(settings.data_dir, PathBuf::from("from-file"));
    }

    #[test]
    fn test_parse_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
data_dir = "/srv/fund"
trade_history = "exports/history.xlsx"
recommendations = "/tmp/recs.csv"
malformed_policy = "synthesize"
"#,
        )
        .unwrap();

        let file = load_config_file(&path).unwrap();
        let settings = Settings::from_parts(file, None, None);

        assert_eq!(
            settings.sources.trade_history,
            PathBuf::from("/srv/fund/exports/history.xlsx")
        );
        assert_eq!(
            settings.sources.investment_reports,
            PathBuf::from("/srv/fund/stock_investment_reports.csv")
        );
        assert_eq!(settings.sources.recommendations, PathBuf::from("/tmp/recs.csv"));
        assert_eq!(settings.policy, MalformedPolicy::Synthesize);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "datadir = \"typo\"\n").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_settings(Some(&missing), None).is_err());
    }
}
