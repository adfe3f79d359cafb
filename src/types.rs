use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized per-request view of one upstream video record. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    /// Description exactly as the upstream returned it.
    pub description: String,
    /// Description with runs of newlines and multiple spaces collapsed.
    pub description_normalized: String,
    pub thumbnail_url: Option<String>,
    pub published_at: DateTime<Utc>,
    /// ISO-8601 duration, passed through verbatim (e.g. "PT1M30S").
    pub duration: String,
    pub channel_title: String,
    pub channel_id: String,
    /// View count as the upstream string form; "0" when statistics are absent.
    pub view_count: String,
}
