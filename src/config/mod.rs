use crate::errors::{AppError, AppResult};
use crate::models::report::NO_VALUE;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_machines")]
    pub default_machines: Vec<String>,
    #[serde(default = "default_causes")]
    pub default_causes: Vec<String>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

pub fn default_machines() -> Vec<String> {
    ["CTL 1250", "CTL 1600", "CTL 12", "PBM 120"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_causes() -> Vec<String> {
    ["Panne", "Attente MP", "Qualité", "Réglage", "MO", "Attente chariot"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_placeholder() -> String {
    NO_VALUE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_machines: default_machines(),
            default_causes: default_causes(),
            placeholder: default_placeholder(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rshiftlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rshiftlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rshiftlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rshiftlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that `init` must use.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
