//! Dataset loading
//!
//! Hazard areas and peaks are JSON arrays read once at startup, either from
//! a local file or over HTTP.

use crate::error::{Error, Result};
use crate::terrain::{RawHazardRecord, RawPeakRecord};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Where a dataset lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(String),
}

impl DatasetSource {
    /// Interpret a configured location; http(s) prefixes mean a URL
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Loads JSON datasets
#[derive(Debug, Clone, Default)]
pub struct DatasetLoader {
    client: reqwest::Client,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the hazard area dataset
    pub async fn hazard_areas(&self, source: &DatasetSource) -> Result<Vec<RawHazardRecord>> {
        let records = self.load(source).await?;
        info!("Loaded {} hazard areas from {}", records.len(), source);
        Ok(records)
    }

    /// Load the peak dataset
    pub async fn peaks(&self, source: &DatasetSource) -> Result<Vec<RawPeakRecord>> {
        let records = self.load(source).await?;
        info!("Loaded {} peaks from {}", records.len(), source);
        Ok(records)
    }

    async fn load<T: DeserializeOwned>(&self, source: &DatasetSource) -> Result<Vec<T>> {
        match source {
            DatasetSource::File(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Dataset(format!("Failed to read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    Error::Dataset(format!("Failed to parse {}: {}", path.display(), e))
                })
            }
            DatasetSource::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| Error::Dataset(format!("Request to {} failed: {}", url, e)))?;

                if !response.status().is_success() {
                    return Err(Error::Dataset(format!(
                        "{} returned status: {}",
                        url,
                        response.status()
                    )));
                }

                response
                    .json()
                    .await
                    .map_err(|e| Error::Dataset(format!("Failed to parse {}: {}", url, e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            DatasetSource::parse("https://example.org/a.json"),
            DatasetSource::Url("https://example.org/a.json".to_string())
        );
        assert_eq!(
            DatasetSource::parse("data/a.json"),
            DatasetSource::File(PathBuf::from("data/a.json"))
        );
    }

    #[tokio::test]
    async fn test_load_files() {
        let dir = TempDir::new().unwrap();
        let areas_path = dir.path().join("areas.json");
        let peaks_path = dir.path().join("peaks.json");
        fs::write(
            &areas_path,
            r#"[{"lat":33.4,"lot":126.5,"plcNm":"Ridge","plcTypeCd":"DANGER"}]"#,
        )
        .unwrap();
        fs::write(&peaks_path, r#"[{"lat":33.5,"lot":126.6,"placeNm":"Peak1"}]"#).unwrap();

        let loader = DatasetLoader::new();
        let areas = loader.hazard_areas(&DatasetSource::File(areas_path)).await.unwrap();
        let peaks = loader.peaks(&DatasetSource::File(peaks_path)).await.unwrap();

        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name, "Ridge");
        assert_eq!(peaks[0].name, "Peak1");
    }

    #[tokio::test]
    async fn test_missing_file_is_dataset_error() {
        let loader = DatasetLoader::new();
        let err = loader
            .peaks(&DatasetSource::File(PathBuf::from("/nonexistent/peaks.json")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Dataset(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_dataset_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let loader = DatasetLoader::new();
        assert!(loader.hazard_areas(&DatasetSource::File(path)).await.is_err());
    }

    #[tokio::test]
    async fn test_bundled_datasets() {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let loader = DatasetLoader::new();

        let areas = loader
            .hazard_areas(&DatasetSource::File(root.join("data/hikingRiskAreas.json")))
            .await
            .unwrap();
        let peaks = loader
            .peaks(&DatasetSource::File(root.join("data/mountainPeaks.json")))
            .await
            .unwrap();

        assert_eq!(areas.len(), 5);
        assert_eq!(peaks.len(), 4);
        assert_eq!(crate::terrain::classify(&areas, &peaks).len(), 9);
    }
}
