use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::{CoachError, ErrorKind};
use crate::skills::weakness::RemovalWindow;

const APP_DIR: &str = "dev.algocoach";
const CONFIG_ENV: &str = "ALGOCOACH_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    pub review: ReviewConfig,
    pub weakness: WeaknessConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// How many due problems the host shows at once
    pub due_limit: usize,
    /// How many recent records go into a recommendation when nothing is due
    pub recent_limit: usize,
    /// Score used when the grader's text has no parsable score
    pub default_score: f64,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        ReviewConfig {
            due_limit: 5,
            recent_limit: 5,
            default_score: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaknessConfig {
    pub removal_window: RemovalWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: app_data_dir().join("coach_state.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
    /// "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Platform-specific app data directory
pub fn app_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_DIR);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_DIR);
            return dir;
        }
    }

    // Fallback
    PathBuf::from(".")
}

fn get_config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => PathBuf::from(path),
        None => app_data_dir().join("coach.toml"),
    }
}

/// Parse a config document. Missing keys take their defaults.
pub fn parse_config(content: &str) -> Result<CoachConfig, CoachError> {
    let config: CoachConfig = toml::from_str(content)?;
    if !config.review.default_score.is_finite() {
        return Err(CoachError::new(
            ErrorKind::Config,
            "review.default_score must be a finite number",
            "config",
        ));
    }
    Ok(config)
}

/// Load config from `path`. A missing file yields defaults; a malformed one is an error.
pub fn load_config(path: &Path) -> Result<CoachConfig, CoachError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .map_err(|e| e.with_context(format!("path: {:?}", path))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CoachConfig::default()),
        Err(e) => Err(CoachError::new(
            ErrorKind::Io,
            format!("Failed to read config: {}", e),
            "config",
        )
        .with_context(format!("path: {:?}", path))),
    }
}

fn load_config_internal() -> CoachConfig {
    let path = get_config_path();
    // Logging is not up yet when this runs, so problems go to stderr
    match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[Config] {}; using defaults", e);
            CoachConfig::default()
        }
    }
}

lazy_static! {
    static ref COACH_CONFIG: CoachConfig = load_config_internal();
}

/// Get the cached process-wide configuration (loaded once on first use)
pub fn get_config() -> &'static CoachConfig {
    &COACH_CONFIG
}
