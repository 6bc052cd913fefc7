//! Interactive state of the rankings directory: which category tab is
//! active and which cards have their descriptions expanded.

use std::collections::BTreeSet;

use crate::affiliate::affiliate_url;
use crate::category::Category;
use crate::disclosure::{DescriptionView, Disclosure};
use crate::images::allowed_image;
use crate::record::DisplayRecord;
use crate::snapshot::Catalog;

/// Per-visitor view state. Cards are identified by [`card_key`] within the
/// active category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    active: Category,
    expanded: BTreeSet<String>,
}

impl DirectoryState {
    pub fn new(active: Category) -> Self {
        Self {
            active,
            expanded: BTreeSet::new(),
        }
    }

    pub fn with_expanded<I, S>(active: Category, asins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active,
            expanded: asins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    /// Keys of the expanded cards, sorted.
    pub fn expanded(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Switch tabs. Switching to a different category recreates every card,
    /// so all of them start collapsed again.
    pub fn select(&mut self, category: Category) {
        if category != self.active {
            self.active = category;
            self.expanded.clear();
        }
    }

    pub fn selected(&self, category: Category) -> Self {
        let mut next = self.clone();
        next.select(category);
        next
    }

    pub fn disclosure(&self, key: &str) -> Disclosure {
        if self.expanded.contains(key) {
            Disclosure::Expanded
        } else {
            Disclosure::Collapsed
        }
    }

    pub fn show_more(&mut self, key: &str) {
        self.set(key, self.disclosure(key).show_more());
    }

    pub fn show_less(&mut self, key: &str) {
        self.set(key, self.disclosure(key).show_less());
    }

    pub fn toggle(&mut self, key: &str) {
        self.set(key, self.disclosure(key).toggle());
    }

    /// This state with one card toggled.
    pub fn toggled(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.toggle(key);
        next
    }

    fn set(&mut self, key: &str, state: Disclosure) {
        match state {
            Disclosure::Expanded => {
                self.expanded.insert(key.to_string());
            }
            Disclosure::Collapsed => {
                self.expanded.remove(key);
            }
        }
    }

    /// Cards of the active category in rank order.
    pub fn cards(&self, catalog: &Catalog) -> Vec<Card> {
        catalog
            .display(self.active)
            .into_iter()
            .enumerate()
            .map(|(slot, record)| {
                let key = card_key(&record, slot);
                let state = self.disclosure(&key);
                Card::new(key, record, state)
            })
            .collect()
    }
}

/// Identity of a card's disclosure state: its ASIN, or `#<n>` for the n-th
/// card of the list when the record has no ASIN. Never empty.
pub fn card_key(record: &DisplayRecord, slot: usize) -> String {
    if record.asin.is_empty() {
        format!("#{}", slot + 1)
    } else {
        record.asin.clone()
    }
}

/// One rendered book: its display record plus its description's disclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub key: String,
    pub record: DisplayRecord,
    pub description: DescriptionView,
}

impl Card {
    pub fn new(key: String, record: DisplayRecord, state: Disclosure) -> Self {
        let description =
            DescriptionView::new(record.book_description.as_deref()).with_state(state);
        Self {
            key,
            record,
            description,
        }
    }

    pub fn affiliate_url(&self, tag: &str) -> String {
        affiliate_url(&self.record.url, tag)
    }

    /// Thumbnail, when present and from an allowed image host.
    pub fn thumbnail(&self) -> Option<&str> {
        allowed_image(&self.record.thumbnail_image)
    }

    /// Hover preview, when present and from an allowed image host.
    pub fn preview_image(&self) -> Option<&str> {
        self.record.preview_image().and_then(allowed_image)
    }
}
