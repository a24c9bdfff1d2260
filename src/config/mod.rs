//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/trail-lens/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Initial map surface
    #[serde(default)]
    pub map: MapConfig,

    /// Keyword search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Tourism service settings
    #[serde(default)]
    pub tourism: TourismConfig,

    /// Hazard and peak dataset locations
    #[serde(default)]
    pub datasets: DatasetsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Initial map surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Zoom level (smaller is closer)
    #[serde(default = "default_map_level")]
    pub level: u8,
}

/// Keyword search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Backend name: kakao or nominatim
    #[serde(default = "default_search_backend")]
    pub backend: String,

    /// Maximum candidates per query
    #[serde(default = "default_search_size")]
    pub size: usize,
}

/// Tourism service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourismConfig {
    #[serde(default = "default_tourism_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_mobile_os")]
    pub mobile_os: String,

    #[serde(default = "default_mobile_app")]
    pub mobile_app: String,
}

/// Dataset locations (file paths or http(s) URLs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetsConfig {
    #[serde(default = "default_hazard_areas")]
    pub hazard_areas: String,

    #[serde(default = "default_peaks")]
    pub peaks: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Kakao REST API key
    #[serde(default)]
    pub kakao: String,

    /// data.go.kr service key for the tourism service
    #[serde(default)]
    pub tourism: String,
}

// Default value functions for serde
fn default_center_lat() -> f64 {
    DEFAULT_CENTER_LAT
}
fn default_center_lng() -> f64 {
    DEFAULT_CENTER_LNG
}
fn default_map_level() -> u8 {
    DEFAULT_MAP_LEVEL
}
fn default_search_backend() -> String {
    DEFAULT_SEARCH_BACKEND.to_string()
}
fn default_search_size() -> usize {
    DEFAULT_SEARCH_SIZE
}
fn default_tourism_endpoint() -> String {
    DEFAULT_TOURISM_ENDPOINT.to_string()
}
fn default_mobile_os() -> String {
    DEFAULT_MOBILE_OS.to_string()
}
fn default_mobile_app() -> String {
    DEFAULT_MOBILE_APP.to_string()
}
fn default_hazard_areas() -> String {
    DEFAULT_HAZARD_AREAS.to_string()
}
fn default_peaks() -> String {
    DEFAULT_PEAKS.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            level: default_map_level(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            backend: default_search_backend(),
            size: default_search_size(),
        }
    }
}

impl Default for TourismConfig {
    fn default() -> Self {
        Self {
            endpoint: default_tourism_endpoint(),
            mobile_os: default_mobile_os(),
            mobile_app: default_mobile_app(),
        }
    }
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            hazard_areas: default_hazard_areas(),
            peaks: default_peaks(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["map", "center_lat"] => Some(self.map.center_lat.to_string()),
            ["map", "center_lng"] => Some(self.map.center_lng.to_string()),
            ["map", "level"] => Some(self.map.level.to_string()),

            ["search", "backend"] => Some(self.search.backend.clone()),
            ["search", "size"] => Some(self.search.size.to_string()),

            ["tourism", "endpoint"] => Some(self.tourism.endpoint.clone()),
            ["tourism", "mobile_os"] => Some(self.tourism.mobile_os.clone()),
            ["tourism", "mobile_app"] => Some(self.tourism.mobile_app.clone()),

            ["datasets", "hazard_areas"] => Some(self.datasets.hazard_areas.clone()),
            ["datasets", "peaks"] => Some(self.datasets.peaks.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["api_keys", "kakao"] => Some(self.api_keys.kakao.clone()),
            ["api_keys", "tourism"] => Some(self.api_keys.tourism.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["map", "center_lat"] => {
                let lat: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid latitude value: {}", value))
                })?;
                GeoPoint::new(lat, self.map.center_lng)?;
                self.map.center_lat = lat;
            }
            ["map", "center_lng"] => {
                let lng: f64 = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid longitude value: {}", value))
                })?;
                GeoPoint::new(self.map.center_lat, lng)?;
                self.map.center_lng = lng;
            }
            ["map", "level"] => {
                self.map.level = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid level value: {}", value))
                })?;
            }

            ["search", "backend"] => {
                self.search.backend = value.to_string();
            }
            ["search", "size"] => {
                self.search.size = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid size value: {}", value))
                })?;
            }

            ["tourism", "endpoint"] => {
                self.tourism.endpoint = value.to_string();
            }
            ["tourism", "mobile_os"] => {
                self.tourism.mobile_os = value.to_string();
            }
            ["tourism", "mobile_app"] => {
                self.tourism.mobile_app = value.to_string();
            }

            ["datasets", "hazard_areas"] => {
                self.datasets.hazard_areas = value.to_string();
            }
            ["datasets", "peaks"] => {
                self.datasets.peaks = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["api_keys", "kakao"] => {
                self.api_keys.kakao = value.to_string();
            }
            ["api_keys", "tourism"] => {
                self.api_keys.tourism = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "map.center_lat",
            "map.center_lng",
            "map.level",
            "search.backend",
            "search.size",
            "tourism.endpoint",
            "tourism.mobile_os",
            "tourism.mobile_app",
            "datasets.hazard_areas",
            "datasets.peaks",
            "server.host",
            "server.port",
            "api_keys.kakao",
            "api_keys.tourism",
        ]
    }

    /// Initial map center
    pub fn map_center(&self) -> Result<GeoPoint> {
        GeoPoint::new(self.map.center_lat, self.map.center_lng)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.search.backend, "kakao");
        assert_eq!(config.map.level, 4);
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.tourism.mobile_app, "TravelVigil");
        assert!(config.tourism.endpoint.ends_with("locationBasedList1"));
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("search.backend"), Some("kakao".to_string()));

        config.set("search.backend", "nominatim").unwrap();
        assert_eq!(config.get("search.backend"), Some("nominatim".to_string()));

        config.set("map.level", "7").unwrap();
        assert_eq!(config.map.level, 7);

        config.set("api_keys.tourism", "secret").unwrap();
        assert_eq!(config.get("api_keys.tourism"), Some("secret".to_string()));
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("map.center_lat", "91").is_err());
        assert_eq!(config.map.center_lat, DEFAULT_CENTER_LAT);
    }

    #[test]
    fn test_map_center() {
        let config = Config::default();
        let center = config.map_center().unwrap();
        assert_eq!(center.latitude(), DEFAULT_CENTER_LAT);
        assert_eq!(center.longitude(), DEFAULT_CENTER_LNG);
    }

    #[test]
    fn test_save_and_load_from() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.search.backend = "nominatim".to_string();
        config.datasets.peaks = "https://example.org/peaks.json".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.search.backend, "nominatim");
        assert_eq!(loaded.datasets.peaks, "https://example.org/peaks.json");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(loaded.server.port, 8080);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.search.size, 15);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[map]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[tourism]"));
        assert!(toml.contains("[datasets]"));
        assert!(toml.contains("[api_keys]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7979");
    }

    #[test]
    fn test_available_keys_round_trip_through_get() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }
}
