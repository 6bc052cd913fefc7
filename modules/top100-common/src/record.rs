//! Scraped records and the display shape they are adapted into.
//!
//! Scraped records come from an external scraping task whose schema this
//! crate does not own, so [`RawRecord`] stays a loose JSON object. All field
//! name variance is resolved in exactly one place, [`DisplayRecord::from_raw`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Author shown when a record has none.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Key of the nested bestseller rank object on scraped records.
const NESTED_RANK_KEY: &str = "bestsellerPageData";

/// A scraped record exactly as the scraping task produced it.
///
/// Serializes back to the same object, field order included, so snapshots
/// can be written verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// A field's value when it is a JSON string. Null, missing, and
    /// non-string values all read as `None`.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn number_field(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Flat `position` field, when it holds an integral number.
    pub fn flat_position(&self) -> Option<i64> {
        self.0.get("position").and_then(integral)
    }

    /// The nested `bestsellerPageData` object, when present.
    pub fn nested_rank(&self) -> Option<&Map<String, Value>> {
        self.0.get(NESTED_RANK_KEY).and_then(Value::as_object)
    }
}

fn integral(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// Rank of a record inside its category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub category_name: String,
    pub position: i64,
}

/// Uniform shape every scraped record is rendered from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub title: String,
    pub url: String,
    pub asin: String,
    pub author: String,
    pub stars: Option<f64>,
    pub thumbnail_image: String,
    pub high_resolution_images: Option<Vec<String>>,
    pub book_description: Option<String>,
    pub rank: Rank,
}

impl DisplayRecord {
    /// Adapt one scraped record. `index` is the record's 0-based position in
    /// the input list, before any sorting.
    ///
    /// Fallbacks, first match wins:
    /// - `title`: non-empty `title`, then `name`, then `""`
    /// - `author`: `author`, then [`UNKNOWN_AUTHOR`]
    /// - `thumbnailImage`: `thumbnailImage`, then `""`
    /// - `url`, `asin`: the field, then `""`
    /// - `rank.position`: `bestsellerPageData.position`, then `position`, then `index + 1`
    /// - `rank.categoryName`: `bestsellerPageData.categoryName`, then `""`
    ///
    /// Values of the wrong JSON type count as missing.
    pub fn from_raw(raw: &RawRecord, index: usize) -> Self {
        let title = raw
            .str_field("title")
            .filter(|t| !t.is_empty())
            .or_else(|| raw.str_field("name"))
            .unwrap_or_default()
            .to_string();

        let nested = raw.nested_rank();
        let position = nested
            .and_then(|n| n.get("position"))
            .and_then(integral)
            .or_else(|| raw.flat_position())
            .unwrap_or(index as i64 + 1);
        let category_name = nested
            .and_then(|n| n.get("categoryName"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let high_resolution_images = raw
            .get("highResolutionImages")
            .and_then(Value::as_array)
            .map(|images| {
                images
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            });

        Self {
            title,
            url: raw.str_field("url").unwrap_or_default().to_string(),
            asin: raw.str_field("asin").unwrap_or_default().to_string(),
            author: raw
                .str_field("author")
                .unwrap_or(UNKNOWN_AUTHOR)
                .to_string(),
            stars: raw.number_field("stars"),
            thumbnail_image: raw
                .str_field("thumbnailImage")
                .unwrap_or_default()
                .to_string(),
            high_resolution_images,
            book_description: raw.str_field("bookDescription").map(str::to_string),
            rank: Rank {
                category_name,
                position,
            },
        }
    }

    /// First high-resolution image, used for the hover preview.
    pub fn preview_image(&self) -> Option<&str> {
        self.high_resolution_images
            .as_ref()
            .and_then(|images| images.first())
            .map(String::as_str)
    }

    /// Star rating worth showing. Zero reads as "no rating".
    pub fn visible_stars(&self) -> Option<f64> {
        self.stars.filter(|s| *s != 0.0 && !s.is_nan())
    }
}
