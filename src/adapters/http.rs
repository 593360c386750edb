use crate::core::{ApodSource, ConfigProvider, DateRange, MediaItem};
use crate::utils::error::{GalleryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";

/// reqwest-backed client for the APOD endpoint.
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ApodClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.api_endpoint(), config.api_key())
    }

    pub fn request_url(&self, range: &DateRange) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("api_key", self.api_key.clone()),
                ("start_date", range.start_param()),
                ("end_date", range.end_param()),
            ],
        )
        .map_err(|e| GalleryError::InvalidConfigValueError {
            field: "api_endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl ApodSource for ApodClient {
    async fn fetch_range(&self, range: &DateRange) -> Result<Vec<MediaItem>> {
        let url = self.request_url(range)?;

        tracing::debug!(
            "Making API request to: {} ({} → {})",
            self.endpoint,
            range.start_param(),
            range.end_param()
        );
        let response = self.client.get(url).send().await?;

        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(GalleryError::StatusError {
                status: response.status().as_u16(),
            });
        }

        // 先取整個 body 再解析，格式錯誤歸類為 SerializationError
        let body = response.bytes().await?;
        let items: Vec<MediaItem> = serde_json::from_slice(&body)?;

        tracing::debug!("Parsed {} media items", items.len());
        Ok(items)
    }
}
