use crate::errors::{AppError, AppResult};
use crate::models::LectureWindow;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_lecture_start")]
    pub lecture_start: String,
    #[serde(default = "default_lecture_end")]
    pub lecture_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_interval_secs() -> u64 {
    5
}
fn default_lecture_start() -> String {
    "10:00 AM".to_string()
}
fn default_lecture_end() -> String {
    "11:20 AM".to_string()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            lecture_start: default_lecture_start(),
            lecture_end: default_lecture_end(),
            seed_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.tapfeed`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tapfeed")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("tapfeed.conf")
    }

    /// Resolve an optional `--config` override against the standard location
    pub fn resolve_path(custom: Option<&str>) -> PathBuf {
        custom
            .map(expand_tilde)
            .unwrap_or_else(Self::config_file)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.interval_secs == 0 {
            return Err(AppError::Config(
                "interval_secs must be greater than zero".into(),
            ));
        }
        self.lecture_window()?;
        self.log_level
            .parse::<tracing::Level>()
            .map_err(|_| AppError::Config(format!("unknown log_level '{}'", self.log_level)))?;
        Ok(())
    }

    pub fn lecture_window(&self) -> AppResult<LectureWindow> {
        LectureWindow::parse(&self.lecture_start, &self.lecture_end)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the default configuration to `path`, creating its directory.
    /// In test mode nothing is written.
    pub fn init_file(path: &Path, is_test: bool) -> AppResult<Self> {
        let config = Self::default();

        if !is_test {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(path)?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
