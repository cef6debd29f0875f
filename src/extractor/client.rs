use async_trait::async_trait;
use url::Url;

use super::types::{ExtractRequest, ExtractResponse, ExtractStatus, ResolveError};
use super::MediaResolver;

// Fixed request parameters sent with every extraction call.
const VIDEO_QUALITY: &str = "720";
const FILENAME_STYLE: &str = "basic";
const DOWNLOAD_MODE: &str = "auto";
const AUDIO_FORMAT: &str = "mp3";

/// HTTP client for the extraction endpoint.
pub struct ExtractorClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl ExtractorClient {
    pub fn new(endpoint: Url, http: reqwest::Client) -> Self {
        Self { endpoint, http }
    }
}

#[async_trait]
impl MediaResolver for ExtractorClient {
    async fn resolve(&self, target: &Url) -> Result<Url, ResolveError> {
        let request = ExtractRequest {
            url: target.as_str(),
            video_quality: VIDEO_QUALITY,
            filename_style: FILENAME_STYLE,
            download_mode: DOWNLOAD_MODE,
            audio_format: AUDIO_FORMAT,
        };

        log::debug!("Extraction request: {}", target);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Upstream(status));
        }

        let body: ExtractResponse = response.json().await?;
        let media_url = pick_media_url(body)?;
        Url::parse(&media_url).map_err(|_| ResolveError::Malformed)
    }
}

/// Map a decoded extraction response onto a media URL or a failure.
fn pick_media_url(response: ExtractResponse) -> Result<String, ResolveError> {
    match response.status {
        ExtractStatus::Redirect | ExtractStatus::Tunnel | ExtractStatus::Stream => {
            response.url.ok_or(ResolveError::Malformed)
        }
        ExtractStatus::Picker => response
            .picker
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|item| item.url)
            .ok_or(ResolveError::Malformed),
        status => Err(ResolveError::Rejected(status)),
    }
}
