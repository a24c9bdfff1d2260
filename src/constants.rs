//! Centralized constants for the trail-lens crate
//!
//! Values shared by several modules, plus the fixed parameters of the
//! external services.

/// External API endpoints
pub mod api {
    /// Kakao Local keyword search
    pub const KAKAO_KEYWORD_URL: &str = "https://dapi.kakao.com/v2/local/search/keyword.json";

    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Korea Tourism Organization location based list
    pub const TOURISM_URL: &str = "http://apis.data.go.kr/B551011/KorService1/locationBasedList1";
}

/// Fixed parameters of the nearby tourism request
pub mod nearby {
    /// Rows per page
    pub const NUM_OF_ROWS: u32 = 20;

    /// Only the first page is ever requested
    pub const PAGE_NO: u32 = 1;

    /// Search radius in meters
    pub const RADIUS_METERS: u32 = 5000;

    /// Arrangement code "A" (the service sorts by distance)
    pub const ARRANGE: &str = "A";

    /// Request a list rather than a count
    pub const LIST_YN: &str = "Y";

    /// Response type
    pub const RESPONSE_TYPE: &str = "json";
}

/// Marker imagery
pub mod marker {
    /// Marker image width in pixels
    pub const WIDTH: u32 = 24;

    /// Marker image height in pixels
    pub const HEIGHT: u32 = 35;

    pub const SELECTED_IMAGE: &str = "/Image/MarkerBlue.png";
    pub const PEAK_IMAGE: &str = "/Image/MarkerBlack.png";
    pub const DANGER_IMAGE: &str = "/Image/MarkerRed.png";
    pub const SHELTER_IMAGE: &str = "/Image/MarkerOrange.png";
}
