//! HTTP client for the marketplace backend.
//!
//! One request per call: no retries and, unless configured, no timeout.
//! Callers decide how a failure degrades.

mod error;

pub use error::ApiError;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::models::creator::Creator;
use crate::models::offer::Offer;
use crate::models::settings::ApiConfig;

pub const OFFERS_ENDPOINT: &str = "getOffer";
pub const CREATORS_ENDPOINT: &str = "getCreators";

pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CreatorsResponse {
    processed_creators: Option<Vec<serde_json::Value>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().default_headers(no_cache_headers());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to build marketplace HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// All offers, in the order the backend ranks them.
    pub async fn fetch_offers(&self) -> Result<Vec<Offer>, ApiError> {
        let body = self.get(OFFERS_ENDPOINT).await?;
        let offers: Vec<Offer> = decode(OFFERS_ENDPOINT, &body)?;
        log::info!("Fetched {} offer(s)", offers.len());
        Ok(offers)
    }

    /// Creators with listing defaults applied. A response without a
    /// `processedCreators` array is an empty list.
    pub async fn fetch_creators(&self) -> Result<Vec<Creator>, ApiError> {
        let body = self.get(CREATORS_ENDPOINT).await?;
        let creators = parse_creators(&body)?;
        log::info!("Fetched {} creator(s)", creators.len());
        Ok(creators)
    }

    async fn get(&self, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.endpoint_url(endpoint);
        let parsed = reqwest::Url::parse(&url).map_err(|err| ApiError::InvalidUrl {
            url: url.clone(),
            reason: err.to_string(),
        })?;

        log::debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;
        Ok(bytes.to_vec())
    }
}

fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers
}

fn decode<T: serde::de::DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn parse_creators(body: &[u8]) -> Result<Vec<Creator>, ApiError> {
    let response: CreatorsResponse = decode(CREATORS_ENDPOINT, body)?;
    Ok(response
        .processed_creators
        .unwrap_or_default()
        .iter()
        .map(Creator::from_record)
        .collect())
}
