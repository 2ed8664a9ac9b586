//! Startup configuration
//!
//! Values are layered: command line first, then the settings file in the
//! user's config directory, then built-in defaults.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::sort::SortKey;

const DEFAULT_DATA_FILE: &str = "data/photographers.json";
const DEFAULT_ASSET_ROOT: &str = "assets";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Command line arguments
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "portfolio", version, about = "Browse photographer portfolios")]
pub struct Cli {
    /// Portfolio document (JSON with `photographers` and `media`)
    #[arg(long, env = "PORTFOLIO_DATA")]
    pub data: Option<PathBuf>,

    /// Directory holding `photographers/` and `media/` assets
    #[arg(long, env = "PORTFOLIO_ASSETS")]
    pub assets: Option<PathBuf>,

    /// Initial gallery order: popularity, date or title. Unknown values fall back to popularity.
    #[arg(long, env = "PORTFOLIO_SORT")]
    pub sort: Option<String>,

    /// Log filter used when RUST_LOG is not set (e.g. `debug`, `portfolio=trace`)
    #[arg(long)]
    pub log: Option<String>,

    /// Page to open, e.g. `index.html` or `photographer.html?id=243`
    pub route: Option<String>,
}

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// Persistent defaults read from `settings.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_file: Option<PathBuf>,
    pub asset_root: Option<PathBuf>,
    pub theme: ThemeMode,
    pub sort: Option<String>,
    pub log_level: Option<String>,
}

impl Settings {
    /// `<config dir>/portfolio/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("portfolio").join("settings.json"))
    }

    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("invalid settings in {}: {}", path.display(), e))
    }
}

/// Resolves asset references to files.
/// Existence is not checked; the reference is passed through to the image widget.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn portrait(&self, file: &str) -> PathBuf {
        self.root.join("photographers").join(file)
    }

    pub fn image(&self, file: &str) -> PathBuf {
        self.root.join("media").join("image").join(file)
    }

    pub fn video(&self, file: &str) -> PathBuf {
        self.root.join("media").join("video").join(file)
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub assets: AssetPaths,
    pub theme: ThemeMode,
    pub sort: SortKey,
    pub log_filter: String,
    pub start_route: String,
}

impl AppConfig {
    /// Merge command line and settings, command line winning
    pub fn resolve(cli: Cli, settings: Settings) -> Self {
        Self {
            data_file: cli
                .data
                .or(settings.data_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            assets: AssetPaths::new(
                cli.assets
                    .or(settings.asset_root)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT)),
            ),
            theme: settings.theme,
            sort: cli
                .sort
                .or(settings.sort)
                .and_then(|label| SortKey::from_label(&label))
                .unwrap_or_default(),
            log_filter: cli
                .log
                .or(settings.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            start_route: cli.route.unwrap_or_default(),
        }
    }

    /// Parse the process arguments and read the settings file.
    ///
    /// Runs before logging is set up, so a broken settings file is returned
    /// as a warning for the caller to log once the subscriber exists.
    pub fn from_env() -> (Self, Option<String>) {
        let cli = Cli::parse();
        let (settings, warning) = match Settings::default_path() {
            Some(path) => match Settings::load(&path) {
                Ok(settings) => (settings, None),
                Err(e) => (Settings::default(), Some(e)),
            },
            None => (Settings::default(), None),
        };
        (Self::resolve(cli, settings), warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::resolve(Cli::default(), Settings::default());
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.sort, SortKey::Popularity);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.start_route, "");
    }

    #[test]
    fn test_cli_wins_over_settings() {
        let cli = Cli {
            data: Some(PathBuf::from("/tmp/cli.json")),
            ..Cli::default()
        };
        let settings = Settings {
            data_file: Some(PathBuf::from("/tmp/settings.json")),
            asset_root: Some(PathBuf::from("/srv/assets")),
            theme: ThemeMode::Light,
            sort: Some("titre".to_string()),
            log_level: Some("debug".to_string()),
        };

        let config = AppConfig::resolve(cli, settings);
        assert_eq!(config.data_file, PathBuf::from("/tmp/cli.json"));
        assert_eq!(
            config.assets.portrait("Mimi.jpg"),
            PathBuf::from("/srv/assets/photographers/Mimi.jpg")
        );
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.sort, SortKey::Title);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_unknown_sort_label_falls_back() {
        let cli = Cli {
            sort: Some("by-colour".to_string()),
            ..Cli::default()
        };
        let config = AppConfig::resolve(cli, Settings::default());
        assert_eq!(config.sort, SortKey::Popularity);
    }

    #[test]
    fn test_cli_parses_route_and_flags() {
        let cli = Cli::try_parse_from([
            "portfolio",
            "--assets",
            "static",
            "--sort",
            "date",
            "photographer.html?id=82",
        ])
        .unwrap();
        assert_eq!(cli.assets, Some(PathBuf::from("static")));
        assert_eq!(cli.route.as_deref(), Some("photographer.html?id=82"));
        assert_eq!(cli.sort.as_deref(), Some("date"));
    }

    #[test]
    fn test_settings_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.json");

        // Missing file gives defaults
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());

        fs::write(&path, r#"{"theme": "light", "data_file": "portfolio.json"}"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.theme, ThemeMode::Light);
        assert_eq!(settings.data_file, Some(PathBuf::from("portfolio.json")));
        assert_eq!(settings.asset_root, None);

        fs::write(&path, "{ not json").unwrap();
        assert!(Settings::load(&path).is_err());
    }

    #[test]
    fn test_asset_directories() {
        let assets = AssetPaths::new(PathBuf::from("assets"));
        assert_eq!(assets.image("a.jpg"), PathBuf::from("assets/media/image/a.jpg"));
        assert_eq!(assets.video("a.mp4"), PathBuf::from("assets/media/video/a.mp4"));
    }
}
