//! Allow-list of hosts book cover images may be loaded from.
//!
//! This is a fixed configuration contract: images from anywhere else are not
//! rendered.

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemotePattern {
    pub protocol: &'static str,
    pub hostname: &'static str,
    /// Path prefix; everything below it matches.
    pub path_prefix: &'static str,
}

impl RemotePattern {
    pub fn matches(&self, url: &Url) -> bool {
        url.scheme() == self.protocol
            && url.host_str() == Some(self.hostname)
            && url.port().is_none()
            && url.path().starts_with(self.path_prefix)
    }
}

pub const IMAGE_REMOTE_PATTERNS: &[RemotePattern] = &[
    RemotePattern {
        protocol: "https",
        hostname: "images-na.ssl-images-amazon.com",
        path_prefix: "/images/",
    },
    RemotePattern {
        protocol: "https",
        hostname: "m.media-amazon.com",
        path_prefix: "/images/",
    },
];

/// Whether `src` may be rendered as an image.
pub fn is_allowed_image(src: &str) -> bool {
    match Url::parse(src) {
        Ok(url) => IMAGE_REMOTE_PATTERNS.iter().any(|p| p.matches(&url)),
        Err(_) => false,
    }
}

/// `src` when it is non-empty and allow-listed.
pub fn allowed_image(src: &str) -> Option<&str> {
    (!src.is_empty() && is_allowed_image(src)).then_some(src)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amazon_image_hosts_pass() {
        assert!(is_allowed_image(
            "https://m.media-amazon.com/images/I/81abc._SY466_.jpg"
        ));
        assert!(is_allowed_image(
            "https://images-na.ssl-images-amazon.com/images/P/B000.01.L.jpg"
        ));
    }

    #[test]
    fn other_hosts_schemes_ports_and_paths_fail() {
        assert!(!is_allowed_image("https://example.com/images/a.jpg"));
        assert!(!is_allowed_image("http://m.media-amazon.com/images/a.jpg"));
        assert!(!is_allowed_image("https://m.media-amazon.com:8443/images/a.jpg"));
        assert!(!is_allowed_image("https://m.media-amazon.com/other/a.jpg"));
        assert!(!is_allowed_image("https://evil.m.media-amazon.com/images/a.jpg"));
        assert!(!is_allowed_image("not a url"));
    }

    #[test]
    fn empty_source_is_not_an_image() {
        assert_eq!(allowed_image(""), None);
        assert_eq!(
            allowed_image("https://m.media-amazon.com/images/x.jpg"),
            Some("https://m.media-amazon.com/images/x.jpg")
        );
    }
}
