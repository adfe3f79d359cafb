/*!
# Video Schema Proxy

HTTP proxy that fetches metadata for a single YouTube video and reshapes it
into a JSON-LD `VideoObject` document for structured-data consumers.

## Features

- JSON-LD VideoObject generation from YouTube Data API v3 responses
- Daily request quota with a file-backed, restart-surviving counter
- Append-only request log
- CORS-friendly API surface
*/

pub mod config;
pub mod error;
pub mod quota;
pub mod request_log;
pub mod schema;
pub mod server;
pub mod types;
pub mod utils;
pub mod youtube;

use error::SchemaProxyError;

pub type Result<T> = std::result::Result<T, SchemaProxyError>;

// Re-export main types for convenience
pub use quota::{FileQuotaStore, MemoryQuotaStore, QuotaStore};
pub use request_log::{RequestLogger, RequestOutcome};
pub use server::AppState;
pub use types::VideoMetadata;
pub use youtube::{MetadataFetcher, YouTubeClient};
