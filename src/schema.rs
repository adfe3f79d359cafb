use chrono::SecondsFormat;
use serde_json::{json, Value};

use crate::types::VideoMetadata;

/// Builds the JSON-LD `VideoObject` document for one video. Pure, no I/O.
///
/// Includes `contentUrl` and the nested `publisher` organization alongside
/// the required keys, matching the richer of the observed output shapes.
pub fn video_object(metadata: &VideoMetadata, video_id: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "VideoObject",
        "name": metadata.title,
        "description": metadata.description_normalized,
        "thumbnailUrl": metadata.thumbnail_url,
        "uploadDate": metadata
            .published_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        "duration": metadata.duration,
        "contentUrl": format!("https://www.youtube.com/watch?v={}", video_id),
        "embedUrl": format!("https://www.youtube.com/embed/{}", video_id),
        "interactionCount": metadata.view_count,
        "publisher": {
            "@type": "Organization",
            "name": metadata.channel_title,
            "url": format!("https://www.youtube.com/channel/{}", metadata.channel_id),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_metadata() -> VideoMetadata {
        VideoMetadata {
            title: "T".to_string(),
            description: "line1\n\nline2".to_string(),
            description_normalized: "line1 line2".to_string(),
            thumbnail_url: Some("u".to_string()),
            published_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            duration: "PT1M".to_string(),
            channel_title: "C".to_string(),
            channel_id: "CID".to_string(),
            view_count: "42".to_string(),
        }
    }

    #[test]
    fn test_maps_worked_example() {
        let doc = video_object(&sample_metadata(), "poRNZFixeao");

        assert_eq!(doc["@context"], "https://schema.org");
        assert_eq!(doc["@type"], "VideoObject");
        assert_eq!(doc["name"], "T");
        assert_eq!(doc["description"], "line1 line2");
        assert_eq!(doc["thumbnailUrl"], "u");
        assert_eq!(doc["uploadDate"], "2020-01-01T00:00:00Z");
        assert_eq!(doc["duration"], "PT1M");
        assert_eq!(doc["interactionCount"], "42");
        assert_eq!(doc["embedUrl"], "https://www.youtube.com/embed/poRNZFixeao");
        assert_eq!(
            doc["contentUrl"],
            "https://www.youtube.com/watch?v=poRNZFixeao"
        );
    }

    #[test]
    fn test_publisher_points_at_channel() {
        let doc = video_object(&sample_metadata(), "poRNZFixeao");
        assert_eq!(doc["publisher"]["@type"], "Organization");
        assert_eq!(doc["publisher"]["name"], "C");
        assert_eq!(doc["publisher"]["url"], "https://www.youtube.com/channel/CID");
    }

    #[test]
    fn test_missing_thumbnail_serializes_as_null() {
        let mut metadata = sample_metadata();
        metadata.thumbnail_url = None;
        let doc = video_object(&metadata, "poRNZFixeao");
        assert!(doc["thumbnailUrl"].is_null());
    }
}
