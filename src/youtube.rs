use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header::HeaderMap, Client};
use serde_json::Value;
use tracing::{debug, info};

use crate::{error::SchemaProxyError, types::VideoMetadata, utils::normalize_description, Result};

const VIDEOS_API_URL: &str = "https://www.googleapis.com/youtube/v3/videos";

#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Fetches normalized metadata for one video. Callers validate that the
    /// id is non-empty before reaching this point.
    async fn fetch_video(&self, video_id: &str) -> Result<VideoMetadata>;
}

pub struct YouTubeClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String, timeout: std::time::Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", "application/json".parse().unwrap());

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        info!("Initialized YouTube Data API client");

        Ok(Self {
            client,
            api_key,
            api_url: VIDEOS_API_URL.to_string(),
        })
    }
}

#[async_trait]
impl MetadataFetcher for YouTubeClient {
    async fn fetch_video(&self, video_id: &str) -> Result<VideoMetadata> {
        debug!("Fetching video metadata for ID: {}", video_id);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("id", video_id),
                ("part", "snippet,contentDetails,statistics"),
                ("key", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SchemaProxyError::Upstream(format!(
                "YouTube API returned status {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let video = first_item(&json, video_id)?;
        parse_video_metadata(video)
    }
}

/// Resolves `items[0]` of a videos.list response; an empty list means the
/// video does not exist upstream.
fn first_item<'a>(json: &'a Value, video_id: &str) -> Result<&'a Value> {
    let items = json["items"]
        .as_array()
        .ok_or_else(|| SchemaProxyError::Upstream("no items array in response".to_string()))?;

    items
        .first()
        .ok_or_else(|| SchemaProxyError::VideoNotFound(video_id.to_string()))
}

/// Extracts the normalized record from one `items[]` entry of a videos.list
/// response. Pure over the JSON value, so it is testable without HTTP.
pub fn parse_video_metadata(video: &Value) -> Result<VideoMetadata> {
    let snippet = video
        .get("snippet")
        .filter(|s| s.is_object())
        .ok_or_else(|| SchemaProxyError::Upstream("missing snippet".to_string()))?;

    let title = snippet["title"].as_str().unwrap_or("Untitled").to_string();

    let description = snippet["description"].as_str().unwrap_or("").to_string();
    let description_normalized = normalize_description(&description);

    // Thumbnail policy: prefer the "default" resolution, fall back to "high".
    let thumbnail_url = snippet["thumbnails"]["default"]["url"]
        .as_str()
        .or_else(|| snippet["thumbnails"]["high"]["url"].as_str())
        .map(|s| s.to_string());

    let published_at = snippet["publishedAt"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| SchemaProxyError::Upstream("missing or invalid publishedAt".to_string()))?;

    // Verbatim ISO-8601, never reformatted.
    let duration = video["contentDetails"]["duration"]
        .as_str()
        .ok_or_else(|| SchemaProxyError::Upstream("missing contentDetails.duration".to_string()))?
        .to_string();

    let channel_title = snippet["channelTitle"].as_str().unwrap_or("").to_string();
    let channel_id = snippet["channelId"].as_str().unwrap_or("").to_string();

    let view_count = video["statistics"]["viewCount"]
        .as_str()
        .unwrap_or("0")
        .to_string();

    Ok(VideoMetadata {
        title,
        description,
        description_normalized,
        thumbnail_url,
        published_at,
        duration,
        channel_title,
        channel_id,
        view_count,
    })
}
