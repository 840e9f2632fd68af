use crate::core::submit::PhotoPolicy;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const APP_DIR: &str = ".staffcheck";
const CONFIG_FILE: &str = "staffcheck.conf";
const DB_FILE: &str = "staffcheck.sqlite";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub default_staff: Option<String>,
    #[serde(default)]
    pub require_route_photo: bool,
    #[serde(default)]
    pub require_appearance_photo: bool,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_staff: None,
            require_route_photo: false,
            require_appearance_photo: false,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("staffcheck")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(APP_DIR)
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE)
    }

    /// Load configuration from file, or defaults if there is none.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)
    }

    /// Database path with `~/` expanded.
    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn photo_policy(&self) -> PhotoPolicy {
        PhotoPolicy {
            require_route_photo: self.require_route_photo,
            require_appearance_photo: self.require_appearance_photo,
        }
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Create the config directory, the config file (unless `is_test`)
    /// and an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join(DB_FILE),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }
        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = Config::from_yaml("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.default_staff, None);
        assert!(!cfg.require_route_photo);
        assert_eq!(cfg.separator(), '-');
    }

    #[test]
    fn photo_policy_follows_flags() {
        let cfg = Config::from_yaml(
            "database: db.sqlite\nrequire_route_photo: true\ndefault_staff: alice\nseparator_char: '='\n",
        )
        .unwrap();
        let policy = cfg.photo_policy();
        assert!(policy.require_route_photo);
        assert!(!policy.require_appearance_photo);
        assert_eq!(cfg.default_staff.as_deref(), Some("alice"));
        assert_eq!(cfg.separator(), '=');
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = Config::from_yaml("database: [unclosed").unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
