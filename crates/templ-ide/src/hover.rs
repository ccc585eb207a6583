//! Hover documentation for templ block keywords.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

/// Characters that separate words, in addition to whitespace.
const WORD_SEPARATORS: &str = "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

static KEYWORD_DOCS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut docs = FxHashMap::default();
    docs.insert(
        "component",
        "**Templ Component**\n\nDefines a new templ component.\n\n\
         Usage: `component ComponentName(params) { ... }`",
    );
    docs.insert(
        "css",
        "**Templ CSS Block**\n\nEmbeds CSS styles within a templ component.\n\n\
         Usage: `css { ... }`",
    );
    docs.insert(
        "script",
        "**Templ Script Block**\n\nEmbeds JavaScript within a templ component.\n\n\
         Usage: `script { ... }`",
    );
    docs
});

/// Result of a hover request.
#[derive(Debug, Clone)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// The range of the hovered word.
    pub range: Option<TextRange>,
}

impl HoverResult {
    /// Creates a new hover result.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            range: None,
        }
    }

    /// Sets the range.
    #[must_use]
    pub fn with_range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }
}

/// Computes hover documentation for the word at `offset`.
///
/// Only the templ block keywords `component`, `css` and `script` are
/// documented; any other word yields `None`.
pub fn hover(source: &str, offset: TextSize) -> Option<HoverResult> {
    let range = word_range_at(source, offset)?;
    let word = &source[range];
    let doc = KEYWORD_DOCS.get(word)?;
    Some(HoverResult::new(*doc).with_range(range))
}

/// Returns the range of the word touching `offset`, if any.
///
/// A cursor placed directly after a word still selects it.
pub fn word_range_at(source: &str, offset: TextSize) -> Option<TextRange> {
    let offset = usize::from(offset);
    if !source.is_char_boundary(offset) {
        return None;
    }

    let start = source[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_char(*c))
        .last()
        .map_or(offset, |(idx, _)| idx);
    let end = source[offset..]
        .char_indices()
        .find(|(_, c)| !is_word_char(*c))
        .map_or(source.len(), |(idx, _)| offset + idx);

    if start == end {
        return None;
    }
    Some(TextRange::new(
        TextSize::from(start as u32),
        TextSize::from(end as u32),
    ))
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !WORD_SEPARATORS.contains(c)
}
