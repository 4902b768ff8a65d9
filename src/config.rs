use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::errors::ConfigError;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    /// Reported by GET /system/version.
    pub server_version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 80,
            log_level: "info".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load `config.json` from the first of `dirs` that has one, or fall
    /// back to defaults when none does.
    ///
    /// Returns the path that was used, if any.
    pub fn discover(dirs: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        for dir in dirs {
            let candidate = dir.join(CONFIG_FILE);
            match fs::metadata(&candidate) {
                Ok(_) => return Ok((Self::load_from_file(&candidate)?, Some(candidate))),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(ConfigError::Read {
                        path: candidate.display().to_string(),
                        source,
                    })
                }
            }
        }
        Ok((Self::default(), None))
    }

    /// Directories searched for `config.json`: the executable's folder,
    /// then its parent.
    pub fn search_dirs() -> Vec<PathBuf> {
        let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        else {
            return Vec::new();
        };
        let parent = exe_dir.join("..");
        vec![exe_dir, parent]
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "itemstore-config-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = AppConfig::from_json(r#"{"port": 8080}"#).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.server_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn level_filter_is_case_insensitive() {
        let mut cfg = AppConfig::default();
        cfg.log_level = "DEBUG".into();
        assert_eq!(cfg.level_filter(), LevelFilter::DEBUG);
        cfg.log_level = "loud".into();
        assert_eq!(cfg.level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn discover_uses_first_dir_with_config() {
        let empty = temp_dir("empty");
        let with_cfg = temp_dir("present");
        fs::write(
            with_cfg.join(CONFIG_FILE),
            r#"{"port": 9000, "log_level": "warn", "server_version": "9.9"}"#,
        )
        .unwrap();

        let (cfg, used) = AppConfig::discover(&[empty, with_cfg.clone()]).unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.server_version, "9.9");
        assert_eq!(used, Some(with_cfg.join(CONFIG_FILE)));
    }

    #[test]
    fn discover_without_config_falls_back_to_defaults() {
        let empty = temp_dir("none");
        let (cfg, used) = AppConfig::discover(&[empty]).unwrap();
        assert_eq!(cfg.port, 80);
        assert!(used.is_none());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = temp_dir("invalid");
        fs::write(dir.join(CONFIG_FILE), "{ not json").unwrap();

        assert!(matches!(
            AppConfig::discover(&[dir]),
            Err(ConfigError::Parse { .. })
        ));
    }
}
