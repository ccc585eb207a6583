//! Code completion for templ documents.
//!
//! Completion is not context-aware: every request gets the templ keywords
//! followed by a fixed set of common HTML tags.

use smol_str::SmolStr;

/// Characters that make the editor ask for completions.
pub const TRIGGER_CHARACTERS: &[&str] = &["<", " ", "{"];

/// Templ keywords offered as completions.
pub const TEMPL_KEYWORDS: &[&str] = &[
    "component",
    "css",
    "script",
    "if",
    "else",
    "for",
    "switch",
    "case",
    "default",
];

/// HTML tags offered as completions.
pub const HTML_TAGS: &[&str] = &[
    "div", "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "a", "img", "button", "input", "form",
    "label", "textarea", "select", "option", "ul", "ol", "li", "table", "tr", "td", "th",
];

const KEYWORD_PRIORITY: u32 = 100;
const HTML_TAG_PRIORITY: u32 = 200;

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    /// A templ keyword.
    Keyword,
    /// An HTML tag name.
    HtmlTag,
}

/// A completion item.
#[derive(Debug, Clone)]
pub struct CompletionItem {
    /// The label shown in the completion list.
    pub label: SmolStr,
    /// The kind of completion.
    pub kind: CompletionKind,
    /// Additional detail shown next to the label.
    pub detail: Option<SmolStr>,
    /// Sort priority (lower = higher priority).
    pub sort_priority: u32,
}

impl CompletionItem {
    /// Creates a new completion item.
    pub fn new(label: impl Into<SmolStr>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            sort_priority: 100,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the sort priority.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.sort_priority = priority;
        self
    }
}

/// Returns the completion list: keywords first, then HTML tags, each group
/// in declaration order.
pub fn complete() -> Vec<CompletionItem> {
    let keywords = TEMPL_KEYWORDS.iter().zip(0u32..).map(|(keyword, idx)| {
        CompletionItem::new(*keyword, CompletionKind::Keyword)
            .with_detail("Templ keyword")
            .with_priority(KEYWORD_PRIORITY + idx)
    });
    let tags = HTML_TAGS.iter().zip(0u32..).map(|(tag, idx)| {
        CompletionItem::new(*tag, CompletionKind::HtmlTag)
            .with_detail("HTML tag")
            .with_priority(HTML_TAG_PRIORITY + idx)
    });
    keywords.chain(tags).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_sort_before_tags() {
        let items = complete();
        assert_eq!(items.len(), TEMPL_KEYWORDS.len() + HTML_TAGS.len());
        let first_tag = items
            .iter()
            .position(|item| item.kind == CompletionKind::HtmlTag)
            .expect("html tags present");
        assert_eq!(first_tag, TEMPL_KEYWORDS.len());
        assert!(items
            .windows(2)
            .all(|pair| pair[0].sort_priority < pair[1].sort_priority));
    }

    #[test]
    fn items_carry_group_detail() {
        let items = complete();
        let component = items.iter().find(|item| item.label == "component").unwrap();
        assert_eq!(component.kind, CompletionKind::Keyword);
        assert_eq!(component.detail.as_deref(), Some("Templ keyword"));

        let textarea = items.iter().find(|item| item.label == "textarea").unwrap();
        assert_eq!(textarea.kind, CompletionKind::HtmlTag);
        assert_eq!(textarea.detail.as_deref(), Some("HTML tag"));
    }
}
