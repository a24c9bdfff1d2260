//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Initial map center latitude (Jeju)
pub const DEFAULT_CENTER_LAT: f64 = 33.4506810661721;

/// Initial map center longitude (Jeju)
pub const DEFAULT_CENTER_LNG: f64 = 126.57049341667;

/// Initial map zoom level
pub const DEFAULT_MAP_LEVEL: u8 = 4;

/// Default keyword search backend
pub const DEFAULT_SEARCH_BACKEND: &str = "kakao";

/// Default maximum number of candidates per query
pub const DEFAULT_SEARCH_SIZE: usize = 15;

/// Default tourism service endpoint
pub const DEFAULT_TOURISM_ENDPOINT: &str = crate::constants::api::TOURISM_URL;

/// `MobileOS` parameter sent to the tourism service
pub const DEFAULT_MOBILE_OS: &str = "ETC";

/// `MobileApp` parameter sent to the tourism service
pub const DEFAULT_MOBILE_APP: &str = "TravelVigil";

/// Default hazard area dataset location
pub const DEFAULT_HAZARD_AREAS: &str = "data/hikingRiskAreas.json";

/// Default peak dataset location
pub const DEFAULT_PEAKS: &str = "data/mountainPeaks.json";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "trail-lens";
