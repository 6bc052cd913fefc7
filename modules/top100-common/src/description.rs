//! Splitting scraped book descriptions into display paragraphs.

use std::sync::LazyLock;

use regex::Regex;

static BR_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Rewrite every line-break spelling found in scraped descriptions to `\n`.
///
/// Applied in order: `<br>` markup, literal backslash-n sequences, CRLF, lone CR.
pub fn normalize_line_breaks(text: &str) -> String {
    BR_TAG
        .replace_all(text, "\n")
        .replace("\\n", "\n")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Paragraphs of one description, split on runs of newlines, trimmed, with
/// blanks dropped.
///
/// Holds the normalized text and splits it lazily; every call to
/// [`Paragraphs::iter`] starts from the first paragraph again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraphs {
    text: String,
}

impl Paragraphs {
    pub fn new(description: &str) -> Self {
        Self {
            text: normalize_line_breaks(description),
        }
    }

    pub fn from_optional(description: Option<&str>) -> Self {
        description.map(Self::new).unwrap_or_default()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            parts: self.text.split('\n'),
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.first().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }
}

impl<'a> IntoIterator for &'a Paragraphs {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    parts: std::str::Split<'a, char>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.parts.by_ref().map(str::trim).find(|p| !p.is_empty())
    }
}
