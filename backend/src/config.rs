//! Dashboard configuration file support.
//!
//! Settings are read from a TOML file (`dashboard.toml`), every field has a
//! default, and a few environment variables override the file:
//!
//! - `HOST`: server host
//! - `PORT`: server port
//! - `GYM_DATA_PATH`: path of the member exercise CSV

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{
    DurationRange, DEFAULT_WORKOUT_TYPES, DURATION_SLIDER_MAX, DURATION_SLIDER_MIN,
};
use crate::services::pivot::SortOrder;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: '{value}'")]
    Env { var: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub panels: PanelSettings,

    #[serde(default)]
    pub content: ContentSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Location of the member exercise data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/gym_members_exercise_tracking_cleaned.csv")
}

/// Filter defaults and per-panel row order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelSettings {
    /// Preselected workout types (only those present in the data are used)
    #[serde(default = "default_workout_types")]
    pub default_workout_types: Vec<String>,
    #[serde(default)]
    pub default_duration: DurationRange,
    #[serde(default = "default_calories_order")]
    pub calories_order: SortOrder,
    #[serde(default = "default_water_intake_order")]
    pub water_intake_order: SortOrder,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            default_workout_types: default_workout_types(),
            default_duration: DurationRange::default(),
            calories_order: default_calories_order(),
            water_intake_order: default_water_intake_order(),
        }
    }
}

fn default_calories_order() -> SortOrder {
    SortOrder::Ascending
}

fn default_water_intake_order() -> SortOrder {
    SortOrder::Descending
}

fn default_workout_types() -> Vec<String> {
    DEFAULT_WORKOUT_TYPES.iter().map(|s| s.to_string()).collect()
}

/// Landing page copy and outbound links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSettings {
    #[serde(default = "default_product_name")]
    pub product_name: String,
    #[serde(default = "default_tagline")]
    pub tagline: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_checkout_url")]
    pub checkout_url: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    #[serde(default = "default_demo_video_url")]
    pub demo_video_url: String,
    #[serde(default = "default_portfolio_url")]
    pub portfolio_url: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            tagline: default_tagline(),
            description: default_description(),
            checkout_url: default_checkout_url(),
            contact_email: default_contact_email(),
            demo_video_url: default_demo_video_url(),
            portfolio_url: default_portfolio_url(),
        }
    }
}

fn default_product_name() -> String {
    "The Fitness Hive".to_string()
}

fn default_tagline() -> String {
    "A hub of group energy and personal strength.".to_string()
}

fn default_description() -> String {
    "At The Fitness Hive, we believe in fostering a vibrant fitness community while \
     supporting your individual goals. Join our group classes to stay motivated or use our \
     state-of-the-art strength equipment for solo workouts. Membership optional: pay per \
     session or enjoy exclusive benefits with our flexible plans."
        .to_string()
}

fn default_checkout_url() -> String {
    "https://buy.stripe.com/6oEdRj2Jp6I29qw3cd".to_string()
}

fn default_contact_email() -> String {
    "ainurafifah57@gmail.com".to_string()
}

fn default_demo_video_url() -> String {
    "https://www.youtube.com/watch?v=5if4cjO5nxo".to_string()
}

fn default_portfolio_url() -> String {
    "https://ainurafifah00.github.io/".to_string()
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the first `dashboard.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when none exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("dashboard.toml"),
            PathBuf::from("backend/dashboard.toml"),
            PathBuf::from("../dashboard.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Using configuration file {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::info!("No dashboard.toml found, using defaults");
        Ok(Self::default())
    }

    /// Apply `HOST`, `PORT` and `GYM_DATA_PATH` overrides from the environment.
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::Env {
                var: "PORT".to_string(),
                value: port.clone(),
            })?;
        }
        if let Ok(path) = std::env::var("GYM_DATA_PATH") {
            self.data.path = PathBuf::from(path);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = self.panels.default_duration;
        if range.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "panels.default_duration lo ({}) exceeds hi ({})",
                range.lo, range.hi
            )));
        }
        if range.lo < DURATION_SLIDER_MIN || range.hi > DURATION_SLIDER_MAX {
            return Err(ConfigError::Invalid(format!(
                "panels.default_duration must lie within [{}, {}]",
                DURATION_SLIDER_MIN, DURATION_SLIDER_MAX
            )));
        }
        Ok(())
    }

    /// Socket address string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.panels.default_duration, DurationRange::new(45, 60));
        assert_eq!(config.panels.calories_order, SortOrder::Ascending);
        assert_eq!(config.panels.water_intake_order, SortOrder::Descending);
        assert_eq!(config.panels.default_workout_types.len(), 4);
        assert_eq!(config.content.product_name, "The Fitness Hive");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000

[data]
path = "fixtures/gym.csv"

[panels]
default_workout_types = ["Yoga"]
default_duration = { lo = 30, hi = 90 }
calories_order = "desc"
water_intake_order = "asc"

[content]
contact_email = "hello@example.com"
"#;

        let config = DashboardConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.data.path, PathBuf::from("fixtures/gym.csv"));
        assert_eq!(config.panels.default_workout_types, vec!["Yoga"]);
        assert_eq!(config.panels.default_duration, DurationRange::new(30, 90));
        assert_eq!(config.panels.calories_order, SortOrder::Descending);
        assert_eq!(config.panels.water_intake_order, SortOrder::Ascending);
        assert_eq!(config.content.contact_email, "hello@example.com");
        assert_eq!(config.content.product_name, "The Fitness Hive");
    }

    #[test]
    fn test_inverted_default_duration_rejected() {
        let toml = "[panels]\ndefault_duration = { lo = 90, hi = 45 }\n";
        assert!(matches!(
            DashboardConfig::from_toml_str(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_default_duration_outside_slider_rejected() {
        let toml = "[panels]\ndefault_duration = { lo = 10, hi = 45 }\n";
        assert!(DashboardConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            DashboardConfig::from_toml_str("[server\nport = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}
