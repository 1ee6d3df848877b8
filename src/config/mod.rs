use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Keys every configuration file is expected to carry.
pub const KNOWN_KEYS: [&str; 7] = [
    "database",
    "sales_reps",
    "ip_geolocation_url",
    "geolocation_timeout_secs",
    "photo_max_dimension",
    "photo_jpeg_quality",
    "location_session",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_sales_reps")]
    pub sales_reps: Vec<String>,
    #[serde(default = "default_ip_geolocation_url")]
    pub ip_geolocation_url: String,
    #[serde(default = "default_geolocation_timeout")]
    pub geolocation_timeout_secs: u64,
    #[serde(default = "default_photo_max_dimension")]
    pub photo_max_dimension: u32,
    #[serde(default = "default_photo_jpeg_quality")]
    pub photo_jpeg_quality: u8,
    #[serde(default = "default_location_session")]
    pub location_session: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_sales_reps() -> Vec<String> {
    vec!["SHUBRAM KAR".to_string(), "RAJU DAS".to_string()]
}
fn default_ip_geolocation_url() -> String {
    "https://ipinfo.io/json".to_string()
}
fn default_geolocation_timeout() -> u64 {
    3
}
fn default_photo_max_dimension() -> u32 {
    800
}
fn default_photo_jpeg_quality() -> u8 {
    85
}
fn default_location_session() -> String {
    Config::config_dir()
        .join("location.yaml")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            sales_reps: default_sales_reps(),
            ip_geolocation_url: default_ip_geolocation_url(),
            geolocation_timeout_secs: default_geolocation_timeout(),
            photo_max_dimension: default_photo_max_dimension(),
            photo_jpeg_quality: default_photo_jpeg_quality(),
            location_session: default_location_session(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("storevisit")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".storevisit")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("storevisit.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("storevisit.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> AppResult<()> {
        if self.sales_reps.iter().all(|r| r.trim().is_empty()) {
            return Err(AppError::Config(
                "'sales_reps' must list at least one salesperson".into(),
            ));
        }
        if self.photo_max_dimension == 0 {
            return Err(AppError::Config(
                "'photo_max_dimension' must be greater than zero".into(),
            ));
        }
        if !(1..=100).contains(&self.photo_jpeg_quality) {
            return Err(AppError::Config(
                "'photo_jpeg_quality' must be between 1 and 100".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a salesperson name against the configured list
    /// (case-insensitive), returning the configured spelling.
    pub fn resolve_sales_rep(&self, name: &str) -> Option<&str> {
        let wanted = name.trim();
        self.sales_reps
            .iter()
            .find(|r| r.trim().eq_ignore_ascii_case(wanted))
            .map(|r| r.trim())
    }

    /// Return the keys missing from a raw YAML configuration.
    pub fn missing_keys(content: &str) -> AppResult<Vec<&'static str>> {
        let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
        let map = yaml
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration root is not a mapping".into()))?;

        Ok(KNOWN_KEYS
            .iter()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .copied()
            .collect())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("storevisit.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path).map_err(|e| {
                io::Error::new(e.kind(), format!("{}: {}", db_path.display(), e))
            })?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}
