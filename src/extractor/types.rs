// Extraction API wire types.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request body for the extraction endpoint. Quality and format knobs are
/// fixed by the caller (see the consts in `client.rs`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest<'a> {
    pub url: &'a str,
    pub video_quality: &'a str,
    pub filename_style: &'a str,
    pub download_mode: &'a str,
    pub audio_format: &'a str,
}

/// Response envelope. `url` and `picker` are each only present for the
/// status values that carry them.
#[derive(Debug, Deserialize)]
pub struct ExtractResponse {
    pub status: ExtractStatus,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub picker: Option<Vec<PickerItem>>,
}

/// One entry of a `picker` response (multi-asset posts). Only the URL is
/// relevant here; the API sends more fields which serde ignores.
#[derive(Debug, Deserialize)]
pub struct PickerItem {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractStatus {
    Error,
    RateLimit,
    Redirect,
    Tunnel,
    Stream,
    Picker,
    /// Anything the API adds later. Treated like a rejection.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("extraction request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("extraction service returned HTTP {0}")]
    Upstream(StatusCode),
    #[error("extraction service rejected the request ({0:?})")]
    Rejected(ExtractStatus),
    #[error("extraction response carried no usable media url")]
    Malformed,
}
