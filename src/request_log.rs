use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

/// Terminal state of one handled request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Ok,
    Invalid,
    Limit,
    NotFound,
    UpstreamError,
}

impl RequestOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOutcome::Ok => "ok",
            RequestOutcome::Invalid => "invalid",
            RequestOutcome::Limit => "limit",
            RequestOutcome::NotFound => "not_found",
            RequestOutcome::UpstreamError => "upstream_error",
        }
    }
}

/// Append-only log of handled requests, one tab-separated line each:
/// timestamp, video id (`-` when absent), outcome tag. Lines are serialized
/// through a mutex so concurrent appends never interleave.
pub struct RequestLogger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RequestLogger {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Appends one line. A logging failure never surfaces to the caller;
    /// the response already computed for the request must still go out.
    pub async fn append(&self, video_id: Option<&str>, outcome: RequestOutcome) {
        if let Err(e) = self.try_append(video_id, outcome).await {
            warn!("failed to append request log entry: {}", e);
        }
    }

    async fn try_append(
        &self,
        video_id: Option<&str>,
        outcome: RequestOutcome,
    ) -> std::io::Result<()> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let line = format!(
            "{}\t{}\t{}\n",
            timestamp,
            video_id.unwrap_or("-"),
            outcome.as_str()
        );

        let _guard = self.lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_appends_one_line_per_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.log");
        let logger = RequestLogger::new(path.clone());

        logger.append(Some("abc123"), RequestOutcome::Ok).await;
        logger.append(None, RequestOutcome::Invalid).await;
        logger.append(Some("abc123"), RequestOutcome::Limit).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);

        let fields: Vec<&str> = lines[0].split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1], "abc123");
        assert_eq!(fields[2], "ok");

        assert!(lines[1].ends_with("\t-\tinvalid"));
        assert!(lines[2].ends_with("\tabc123\tlimit"));
    }

    #[tokio::test]
    async fn test_append_failure_is_swallowed() {
        let logger = RequestLogger::new(PathBuf::from("/nonexistent/dir/requests.log"));
        // Must not panic or propagate.
        logger.append(Some("abc123"), RequestOutcome::Ok).await;
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.log");
        let logger = std::sync::Arc::new(RequestLogger::new(path.clone()));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let logger = std::sync::Arc::clone(&logger);
            handles.push(tokio::spawn(async move {
                logger.append(Some("vid"), RequestOutcome::Ok).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 20);
        for line in lines {
            assert!(line.ends_with("\tvid\tok"));
        }
    }
}
