//! Expand/collapse state of a book card's description.

use crate::description::Paragraphs;

/// Descriptions longer than this many characters get a "show more" control.
pub const SHOW_MORE_THRESHOLD: usize = 400;

/// Disclosure state of one card. Starts collapsed; there is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Disclosure {
    #[default]
    Collapsed,
    Expanded,
}

impl Disclosure {
    pub fn show_more(self) -> Self {
        Disclosure::Expanded
    }

    pub fn show_less(self) -> Self {
        Disclosure::Collapsed
    }

    pub fn toggle(self) -> Self {
        match self {
            Disclosure::Collapsed => self.show_more(),
            Disclosure::Expanded => self.show_less(),
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Disclosure::Expanded
    }
}

/// The control offered under a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    ShowMore,
    ShowLess,
}

impl Affordance {
    pub fn label(self) -> &'static str {
        match self {
            Affordance::ShowMore => "SEE_MORE",
            Affordance::ShowLess => "SEE_LESS",
        }
    }
}

/// A description as one card presents it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptionView {
    paragraphs: Paragraphs,
    long: bool,
    state: Disclosure,
}

impl DescriptionView {
    /// A fresh, collapsed view of `description`.
    pub fn new(description: Option<&str>) -> Self {
        Self {
            paragraphs: Paragraphs::from_optional(description),
            long: description.is_some_and(|d| d.chars().count() > SHOW_MORE_THRESHOLD),
            state: Disclosure::Collapsed,
        }
    }

    pub fn with_state(mut self, state: Disclosure) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> Disclosure {
        self.state
    }

    pub fn paragraphs(&self) -> &Paragraphs {
        &self.paragraphs
    }

    /// Whether the raw description crosses [`SHOW_MORE_THRESHOLD`].
    pub fn is_long(&self) -> bool {
        self.long
    }

    pub fn show_more(&mut self) {
        self.state = self.state.show_more();
    }

    pub fn show_less(&mut self) {
        self.state = self.state.show_less();
    }

    pub fn toggle(&mut self) {
        self.state = self.state.toggle();
    }

    /// Collapsed shows the first paragraph only; expanded shows all of them.
    pub fn visible_paragraphs(&self) -> Vec<&str> {
        match self.state {
            Disclosure::Collapsed => self.paragraphs.first().into_iter().collect(),
            Disclosure::Expanded => self.paragraphs.iter().collect(),
        }
    }

    pub fn affordance(&self) -> Option<Affordance> {
        if self.paragraphs.is_empty() {
            return None;
        }
        match self.state {
            Disclosure::Collapsed if self.long => Some(Affordance::ShowMore),
            Disclosure::Collapsed => None,
            Disclosure::Expanded => Some(Affordance::ShowLess),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_description() -> String {
        let first = "a".repeat(150);
        let second = "b".repeat(150);
        let third = "c".repeat(146);
        let text = format!("{first}\n{second}\n{third}");
        assert_eq!(text.chars().count(), 450);
        text
    }

    #[test]
    fn transitions() {
        assert_eq!(Disclosure::default(), Disclosure::Collapsed);
        assert_eq!(Disclosure::Collapsed.show_more(), Disclosure::Expanded);
        assert_eq!(Disclosure::Expanded.show_less(), Disclosure::Collapsed);
        assert_eq!(Disclosure::Collapsed.toggle().toggle(), Disclosure::Collapsed);
        assert_eq!(Disclosure::Expanded.show_more(), Disclosure::Expanded);
        assert_eq!(Disclosure::Collapsed.show_less(), Disclosure::Collapsed);
    }

    #[test]
    fn long_description_expand_and_collapse() {
        let text = long_description();
        let mut view = DescriptionView::new(Some(&text));

        assert_eq!(view.affordance(), Some(Affordance::ShowMore));
        assert_eq!(view.visible_paragraphs(), vec!["a".repeat(150)]);

        view.toggle();
        assert_eq!(view.state(), Disclosure::Expanded);
        assert_eq!(view.affordance(), Some(Affordance::ShowLess));
        assert_eq!(view.affordance().unwrap().label(), "SEE_LESS");
        assert_eq!(view.visible_paragraphs().len(), 3);

        view.toggle();
        assert_eq!(view.affordance(), Some(Affordance::ShowMore));
        assert_eq!(view.visible_paragraphs(), vec!["a".repeat(150)]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let at = "x".repeat(SHOW_MORE_THRESHOLD);
        assert_eq!(DescriptionView::new(Some(&at)).affordance(), None);

        let over = "x".repeat(SHOW_MORE_THRESHOLD + 1);
        assert_eq!(
            DescriptionView::new(Some(&over)).affordance(),
            Some(Affordance::ShowMore)
        );
    }

    #[test]
    fn length_counts_raw_text_including_markup() {
        let text = format!("{}<br>{}", "x".repeat(198), "y".repeat(198));
        assert_eq!(text.chars().count(), 400);
        assert!(!DescriptionView::new(Some(&text)).is_long());

        let text = format!("{}<br/>{}", "x".repeat(198), "y".repeat(198));
        assert!(DescriptionView::new(Some(&text)).is_long());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let text = "é".repeat(300);
        assert!(text.len() > SHOW_MORE_THRESHOLD);
        assert!(!DescriptionView::new(Some(&text)).is_long());
    }

    #[test]
    fn astral_characters_count_once() {
        // 400 chars, 800 UTF-16 code units: still short.
        let at = "\u{1D538}".repeat(SHOW_MORE_THRESHOLD);
        assert_eq!(at.encode_utf16().count(), 2 * SHOW_MORE_THRESHOLD);
        assert!(!DescriptionView::new(Some(&at)).is_long());

        let over = "\u{1D538}".repeat(SHOW_MORE_THRESHOLD + 1);
        assert!(DescriptionView::new(Some(&over)).is_long());
    }

    #[test]
    fn no_description_means_no_controls() {
        let view = DescriptionView::new(None);
        assert!(view.visible_paragraphs().is_empty());
        assert_eq!(view.affordance(), None);

        let blank = " ".repeat(500);
        let view = DescriptionView::new(Some(&blank)).with_state(Disclosure::Expanded);
        assert_eq!(view.affordance(), None);
    }
}
