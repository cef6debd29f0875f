// Platform Detection Module
//
// Classifies target URLs into the set of platforms the extraction service
// understands. Matching is substring-based over the lowercased URL: that is
// the contract the frontend relies on, so the table stays deliberately dumb
// (no host parsing, no public-suffix logic).

use serde::Serialize;

/// Platforms the extraction service can resolve to direct media URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
    Facebook,
    Twitter,
    Threads,
}

impl Platform {
    /// Classify a URL. First match wins; `None` means direct passthrough.
    pub fn detect(url: &str) -> Option<Platform> {
        let lower = url.to_lowercase();

        if lower.contains("youtube.com") || lower.contains("youtu.be") {
            return Some(Platform::Youtube);
        }
        if lower.contains("tiktok.com") {
            return Some(Platform::Tiktok);
        }
        if lower.contains("instagram.com") {
            return Some(Platform::Instagram);
        }
        if lower.contains("facebook.com") || lower.contains("fb.com") || lower.contains("fb.watch")
        {
            return Some(Platform::Facebook);
        }
        if lower.contains("twitter.com") || lower.contains("x.com") {
            return Some(Platform::Twitter);
        }
        if lower.contains("threads.net") {
            return Some(Platform::Threads);
        }

        None
    }

    /// Tag used in the `X-Platform` header and extraction error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Threads => "threads",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_youtube_variants() {
        assert_eq!(
            Platform::detect("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some(Platform::Youtube)
        );
        assert_eq!(
            Platform::detect("https://youtu.be/dQw4w9WgXcQ"),
            Some(Platform::Youtube)
        );
        // Case insensitive
        assert_eq!(
            Platform::detect("https://WWW.YOUTUBE.com/watch?v=x"),
            Some(Platform::Youtube)
        );
    }

    #[test]
    fn test_detect_each_platform() {
        assert_eq!(
            Platform::detect("https://www.tiktok.com/@user/video/1"),
            Some(Platform::Tiktok)
        );
        assert_eq!(
            Platform::detect("https://www.instagram.com/reel/abc/"),
            Some(Platform::Instagram)
        );
        assert_eq!(
            Platform::detect("https://www.facebook.com/watch?v=1"),
            Some(Platform::Facebook)
        );
        assert_eq!(Platform::detect("https://fb.watch/abc/"), Some(Platform::Facebook));
        assert_eq!(
            Platform::detect("https://twitter.com/user/status/1"),
            Some(Platform::Twitter)
        );
        assert_eq!(
            Platform::detect("https://x.com/user/status/1"),
            Some(Platform::Twitter)
        );
        assert_eq!(
            Platform::detect("https://www.threads.net/@user/post/1"),
            Some(Platform::Threads)
        );
    }

    #[test]
    fn test_detect_none_for_direct_urls() {
        assert_eq!(Platform::detect("https://example.com/video.mp4"), None);
        assert_eq!(Platform::detect("https://cdn.example.net/clip.webm"), None);
    }

    #[test]
    fn test_first_match_wins() {
        // The table is checked in order, so an earlier platform's domain
        // anywhere in the URL shadows a later one.
        assert_eq!(
            Platform::detect("https://youtube.com/redirect?next=tiktok.com"),
            Some(Platform::Youtube)
        );
    }

    #[test]
    fn test_substring_semantics() {
        // Matching runs over the whole URL string, not the parsed host.
        assert_eq!(
            Platform::detect("https://example.com/share?src=instagram.com"),
            Some(Platform::Instagram)
        );
    }

    #[test]
    fn test_as_str_tags() {
        assert_eq!(Platform::Youtube.as_str(), "youtube");
        assert_eq!(Platform::Twitter.to_string(), "twitter");
    }
}
