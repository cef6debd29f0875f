// Proxy Handler Module
//
// The core request/response translation, independent of any hosting adapter:
// take an inbound request carrying a `url` query parameter, resolve platform
// URLs through the extraction service, fetch the result, and hand the bytes
// back with permissive CORS headers.
//
// Behavior:
// - OPTIONS answers the CORS preflight and nothing else
// - missing/invalid `url` parameter -> 400 with a JSON error body
// - recognized platform whose extraction fails -> 422, no fallback fetch
// - anything else that goes wrong -> 500, the cause stays server-side

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::header::{self, HeaderValue};
use axum::http::{HeaderMap, HeaderName, Method, StatusCode};
use serde::Serialize;
use url::Url;

use crate::extractor::MediaResolver;
use crate::platform::Platform;

/// Platform tag (or `direct`) attached to successful proxy responses.
pub const X_PLATFORM: HeaderName = HeaderName::from_static("x-platform");

// Generic browser identity for upstream fetches. Some CDNs refuse requests
// without a plausible User-Agent.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Shared collaborators for the handler. Built once at startup, cloned per
/// request by the hosting adapter.
pub struct ProxyContext {
    resolver: Arc<dyn MediaResolver>,
    http: reqwest::Client,
}

impl ProxyContext {
    pub fn new(resolver: Arc<dyn MediaResolver>, http: reqwest::Client) -> Self {
        Self { resolver, http }
    }
}

/// Inbound request, normalized by the hosting adapter: the method and the
/// raw (still percent-encoded) query string.
pub struct ProxyRequest {
    pub method: Method,
    pub query: Option<String>,
}

/// Outbound response, to be translated back into the host's native shape.
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    platform: Option<Platform>,
}

/// Handle one proxy request end to end. Never panics and never lets a raw
/// transport error escape: every outcome is a structured `ProxyResponse`.
pub async fn handle(request: ProxyRequest, ctx: &ProxyContext) -> ProxyResponse {
    if request.method == Method::OPTIONS {
        return preflight();
    }

    match proxy(request, ctx).await {
        Ok(response) => response,
        Err(e) => {
            log::error!("Proxy request failed: {e:#}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Failed to fetch",
                    message: Some(e.to_string()),
                    platform: None,
                },
            )
        }
    }
}

async fn proxy(request: ProxyRequest, ctx: &ProxyContext) -> anyhow::Result<ProxyResponse> {
    let Some(raw_target) = target_param(request.query.as_deref()) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: "Missing url parameter",
                message: None,
                platform: None,
            },
        ));
    };

    let Ok(target) = Url::parse(&raw_target) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: "Invalid URL",
                message: None,
                platform: None,
            },
        ));
    };

    let platform = Platform::detect(target.as_str());

    // Platform URLs go through the extraction service first; the fetch target
    // becomes whatever it resolved. The Referer below stays derived from the
    // original target either way.
    let fetch_url = match platform {
        Some(platform) => match ctx.resolver.resolve(&target).await {
            Ok(resolved) => {
                log::info!("Resolved {} media: {}", platform, truncate(resolved.as_str(), 100));
                resolved
            }
            Err(e) => {
                log::warn!("Extraction failed for {} ({}): {}", platform, target, e);
                return Ok(extraction_failed(platform));
            }
        },
        None => target.clone(),
    };

    log::debug!("Fetching {}", truncate(fetch_url.as_str(), 100));

    let referer = target.origin().ascii_serialization();
    let upstream = ctx
        .http
        .request(request.method, fetch_url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, "*/*")
        .header(header::REFERER, referer)
        .send()
        .await?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let body = upstream.bytes().await?;

    log::debug!("Upstream responded {} with {} bytes", status, body.len());

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        content_type.unwrap_or_else(|| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );
    headers.insert(
        X_PLATFORM,
        HeaderValue::from_static(match platform {
            Some(platform) => platform.as_str(),
            None => "direct",
        }),
    );

    Ok(ProxyResponse {
        status,
        headers,
        body,
    })
}

/// Pull the decoded `url` parameter out of the raw query string. An empty
/// value counts as missing.
fn target_param(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key.as_ref() == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn preflight() -> ProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    ProxyResponse {
        status: StatusCode::NO_CONTENT,
        headers,
        body: Bytes::new(),
    }
}

fn extraction_failed(platform: Platform) -> ProxyResponse {
    error_response(
        StatusCode::UNPROCESSABLE_ENTITY,
        ErrorBody {
            error: "Failed to extract media",
            message: Some(format!(
                "Could not extract media from {}. Content may be private or unavailable.",
                platform
            )),
            platform: Some(platform),
        },
    )
}

fn error_response(status: StatusCode, body: ErrorBody) -> ProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    // Serialization of ErrorBody cannot fail.
    let body = serde_json::to_vec(&body).unwrap();

    ProxyResponse {
        status,
        headers,
        body: body.into(),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_param_decodes_percent_encoding() {
        assert_eq!(
            target_param(Some("url=https%3A%2F%2Fexample.com%2Fa%20b.mp4")),
            Some("https://example.com/a b.mp4".to_string())
        );
    }

    #[test]
    fn test_target_param_ignores_other_keys() {
        assert_eq!(
            target_param(Some("token=abc&url=https://example.com/v.mp4")),
            Some("https://example.com/v.mp4".to_string())
        );
        assert_eq!(target_param(Some("token=abc")), None);
        assert_eq!(target_param(None), None);
    }

    #[test]
    fn test_target_param_treats_empty_value_as_missing() {
        assert_eq!(target_param(Some("url=")), None);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
