// Extraction Service Module
//
// Client for the third-party extraction API that resolves platform page URLs
// (YouTube, TikTok, ...) into direct media URLs. The proxy handler only sees
// the `MediaResolver` trait so the collaborator can be stubbed in tests.

mod client;
mod types;

pub use client::ExtractorClient;
pub use types::{ExtractResponse, ExtractStatus, PickerItem, ResolveError};

use async_trait::async_trait;
use url::Url;

/// Resolves a platform page URL to a direct media URL.
///
/// Every failure mode (API rejection, transport error, malformed response)
/// surfaces as a `ResolveError`; callers decide how much of it to expose.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, target: &Url) -> Result<Url, ResolveError>;
}
