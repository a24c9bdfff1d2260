//! Korea Tourism Organization client (KorService `locationBasedList1`)

use crate::config::Config;
use crate::constants::nearby;
use crate::error::{Error, Result};
use crate::geo::{f64_from_number_or_string, opt_f64_from_number_or_string, GeoPoint};
use crate::tourism::{NearbyQuery, TourismSource, TourismSpot};
use serde::Deserialize;
use serde_json::Value;

/// HTTP client for the location based tourism list
#[derive(Debug, Clone)]
pub struct KorServiceClient {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
    mobile_os: String,
    mobile_app: String,
}

/// One element of `response.body.items.item`
#[derive(Debug, Deserialize)]
struct TourItem {
    title: String,
    #[serde(default)]
    addr1: String,
    #[serde(deserialize_with = "f64_from_number_or_string")]
    dist: f64,
    #[serde(default, deserialize_with = "opt_f64_from_number_or_string")]
    mapx: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_from_number_or_string")]
    mapy: Option<f64>,
    #[serde(default)]
    contentid: Option<Value>,
}

impl From<TourItem> for TourismSpot {
    fn from(item: TourItem) -> Self {
        let location = match (item.mapy, item.mapx) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng).ok(),
            _ => None,
        };
        let content_id = item.contentid.and_then(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        TourismSpot {
            title: item.title,
            address: item.addr1,
            distance_meters: item.dist,
            location,
            content_id,
        }
    }
}

impl KorServiceClient {
    pub fn new(endpoint: &str, service_key: &str, mobile_os: &str, mobile_app: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            service_key: service_key.to_string(),
            mobile_os: mobile_os.to_string(),
            mobile_app: mobile_app.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.tourism.endpoint,
            &config.api_keys.tourism,
            &config.tourism.mobile_os,
            &config.tourism.mobile_app,
        )
    }

    /// Query string parameters for a request, in the service's order
    pub fn params(&self, query: &NearbyQuery) -> Vec<(&'static str, String)> {
        vec![
            ("serviceKey", self.service_key.clone()),
            ("numOfRows", query.num_of_rows.to_string()),
            ("pageNo", query.page_no.to_string()),
            ("MobileOS", self.mobile_os.clone()),
            ("MobileApp", self.mobile_app.clone()),
            ("arrange", query.arrange.to_string()),
            ("mapX", query.map_x.to_string()),
            ("mapY", query.map_y.to_string()),
            ("radius", query.radius.to_string()),
            ("listYN", nearby::LIST_YN.to_string()),
            ("_type", nearby::RESPONSE_TYPE.to_string()),
        ]
    }

    /// Extract spots from a response body
    ///
    /// `response.body` must exist. A body with `totalCount` 0 or an empty
    /// `items` (the service sends `""`) holds no spots; otherwise
    /// `items.item` may be an array or a single object.
    pub fn parse_body(body: &Value) -> Result<Vec<TourismSpot>> {
        let response_body = body
            .pointer("/response/body")
            .ok_or_else(|| Error::Tourism("Response has no response.body".to_string()))?;

        if Self::total_count(response_body) == Some(0) {
            return Ok(Vec::new());
        }

        let items = match response_body.get("items") {
            Some(Value::Null) | Some(Value::String(_)) => return Ok(Vec::new()),
            Some(items) => items.get("item").ok_or_else(|| {
                Error::Tourism("Response has no response.body.items.item".to_string())
            })?,
            None => {
                return Err(Error::Tourism(
                    "Response has no response.body.items".to_string(),
                ))
            }
        };

        let items: Vec<TourItem> = match items {
            Value::Null => Vec::new(),
            Value::Array(_) => serde_json::from_value(items.clone())?,
            Value::Object(_) => vec![serde_json::from_value(items.clone())?],
            other => {
                return Err(Error::Tourism(format!(
                    "Unexpected item collection: {}",
                    other
                )))
            }
        };

        Ok(items.into_iter().map(TourismSpot::from).collect())
    }

    /// `totalCount` as a number, whether sent as a number or a string
    fn total_count(response_body: &Value) -> Option<u64> {
        match response_body.get("totalCount")? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl TourismSource for KorServiceClient {
    async fn nearby(&self, query: &NearbyQuery) -> Result<Vec<TourismSpot>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.params(query))
            .send()
            .await
            .map_err(|e| Error::Tourism(format!("Tourism request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Tourism(format!(
                "Tourism service returned status: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Tourism(format!("Failed to parse tourism response: {}", e)))?;

        Self::parse_body(&body)
    }
}
