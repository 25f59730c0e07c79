//! Persistent service configuration model and defaults.

use std::path::{Path, PathBuf};

use log::{info, warn};

/// Root configuration persisted to `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Config {
    #[serde(default)]
    /// Locations of the template, status and star-table files.
    pub files: FilesConfig,
    #[serde(default)]
    /// Log output preferences.
    pub logging: LoggingConfig,
}

/// File locations. Relative names resolve against `user_data_dir`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FilesConfig {
    #[serde(default = "default_user_data_dir")]
    pub user_data_dir: PathBuf,
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,
    #[serde(default = "default_template_file")]
    pub template_file: PathBuf,
    #[serde(default = "default_star_table_file")]
    pub star_table_file: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            user_data_dir: default_user_data_dir(),
            status_file: default_status_file(),
            template_file: default_template_file(),
            star_table_file: default_star_table_file(),
        }
    }
}

impl FilesConfig {
    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.user_data_dir.join(file)
        }
    }

    pub fn status_path(&self) -> PathBuf {
        self.resolve(&self.status_file)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template_file)
    }

    pub fn star_table_path(&self) -> PathBuf {
        self.resolve(&self.star_table_file)
    }
}

/// Log verbosity for the console logger.
#[derive(Debug, Clone, Copy, serde::Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
}

fn default_user_data_dir() -> PathBuf {
    PathBuf::from("UserData")
}

fn default_status_file() -> PathBuf {
    PathBuf::from("songStatus.txt")
}

fn default_template_file() -> PathBuf {
    PathBuf::from("songStatusTemplate.txt")
}

fn default_star_table_file() -> PathBuf {
    PathBuf::from("star.csv")
}

/// Replaces empty file names with their defaults.
pub fn sanitize_config(config: Config) -> Config {
    fn non_empty(path: PathBuf, fallback: fn() -> PathBuf) -> PathBuf {
        if path.as_os_str().is_empty() {
            fallback()
        } else {
            path
        }
    }

    let files = config.files;
    Config {
        files: FilesConfig {
            user_data_dir: non_empty(files.user_data_dir, default_user_data_dir),
            status_file: non_empty(files.status_file, default_status_file),
            template_file: non_empty(files.template_file, default_template_file),
            star_table_file: non_empty(files.star_table_file, default_star_table_file),
        },
        logging: config.logging,
    }
}

/// `<platform config dir>/songstatus/config.toml`, when a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("songstatus").join("config.toml"))
}

/// Reads the config at `config_file`, writing defaults first when it is missing.
///
/// Unreadable or invalid files fall back to defaults.
pub fn load_or_create_config(config_file: &Path) -> Config {
    if !config_file.exists() {
        let default_config = Config::default();
        info!(
            "Config file not found. Creating default config. path={}",
            config_file.display()
        );
        if let Err(err) = write_config(config_file, &default_config) {
            warn!(
                "Failed to write default config to {}: {}",
                config_file.display(),
                err
            );
        }
        return default_config;
    }

    let config = std::fs::read_to_string(config_file)
        .map_err(|err| err.to_string())
        .and_then(|content| toml::from_str::<Config>(&content).map_err(|err| err.to_string()));
    match config {
        Ok(config) => sanitize_config(config),
        Err(err) => {
            warn!(
                "Failed to load config {}: {}. Using defaults",
                config_file.display(),
                err
            );
            Config::default()
        }
    }
}

fn write_config(config_file: &Path, config: &Config) -> Result<(), String> {
    if let Some(parent) = config_file.parent() {
        std::fs::create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    let config_text = toml::to_string(config).map_err(|err| err.to_string())?;
    std::fs::write(config_file, config_text).map_err(|err| err.to_string())
}
