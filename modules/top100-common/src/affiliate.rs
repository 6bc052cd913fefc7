//! Outbound purchase links.

/// Associate tag appended to every purchase link unless configured otherwise.
pub const DEFAULT_AFFILIATE_TAG: &str = "tbsp02-20";

/// `url` with `tag=<tag>` appended as one more query parameter.
///
/// The rest of the URL is left byte-for-byte as scraped.
pub fn affiliate_url(url: &str, tag: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    let tag: String = url::form_urlencoded::byte_serialize(tag.as_bytes()).collect();
    format!("{url}{separator}tag={tag}")
}
