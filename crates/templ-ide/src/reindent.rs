//! Indentation-based reformatting for templ sources.
//!
//! The reindenter does not parse the document. Every line is trimmed and
//! matched against a few prefix/suffix patterns that open or close a nesting
//! level, and its leading whitespace is rebuilt from a running depth counter.
//!
//! For each non-blank line, in order:
//!
//! 1. A line starting with `</`, `}`, or one of the branch keywords
//!    (`else`, `case`, `default`) closes a level before it is emitted.
//! 2. The line is emitted at the current depth.
//! 3. A line that opens a tag (`<x...>`, not self-closing) or ends with `{`
//!    (outside a `//` comment) opens a level for the lines that follow.
//!
//! Lines that both close and open (`} else {`) are not merged in any way:
//! they render one level shallower and leave the depth where it was.

use text_size::{TextRange, TextSize};

/// Indent width used when the editor does not supply one.
pub const DEFAULT_INDENT_WIDTH: u32 = 2;

/// Keywords that continue a block at the enclosing level.
const BRANCH_KEYWORDS: &[&str] = &["else", "case", "default"];

/// Indentation settings for a single formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentStyle {
    /// Spaces per level when `use_spaces` is set (floored at 1).
    pub width: u32,
    /// Indent with spaces; otherwise each level is a single tab.
    pub use_spaces: bool,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::spaces(DEFAULT_INDENT_WIDTH)
    }
}

impl IndentStyle {
    /// Indent with `width` spaces per level.
    pub fn spaces(width: u32) -> Self {
        Self {
            width,
            use_spaces: true,
        }
    }

    /// Indent with one tab per level.
    pub fn tabs() -> Self {
        Self {
            width: DEFAULT_INDENT_WIDTH,
            use_spaces: false,
        }
    }

    /// Sets the indent width. Zero means "unset" and selects
    /// [`DEFAULT_INDENT_WIDTH`].
    pub fn set_width(&mut self, width: u32) {
        self.width = if width == 0 {
            DEFAULT_INDENT_WIDTH
        } else {
            width
        };
    }

    /// The whitespace emitted for one nesting level.
    pub fn unit(&self) -> String {
        if self.use_spaces {
            " ".repeat(self.width.max(1) as usize)
        } else {
            "\t".to_string()
        }
    }
}

/// Replacement text for the full span of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    /// Zero-based line index.
    pub line: u32,
    /// Byte range of the original line, excluding its line terminator.
    pub range: TextRange,
    /// Re-indented line text.
    pub new_text: String,
}

impl LineEdit {
    /// Length in bytes of the original line text being replaced.
    pub fn original_len(&self) -> TextSize {
        self.range.len()
    }
}

/// Re-indents `source`, returning one edit per non-blank line.
///
/// Blank and whitespace-only lines produce no edit and do not affect the
/// depth. The depth never drops below zero and has no upper bound, so
/// unbalanced input yields skewed indentation rather than an error.
pub fn reindent(source: &str, style: IndentStyle) -> Vec<LineEdit> {
    let unit = style.unit();
    let mut depth: usize = 0;
    let mut edits = Vec::new();
    let mut line_start = 0usize;

    for (line_idx, raw) in source.split('\n').enumerate() {
        let start = line_start;
        line_start += raw.len() + 1;

        // `\r` belongs to the CRLF terminator, not to the line.
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let content = trim_line(text);
        if content.is_empty() {
            continue;
        }

        if closes_level(content) {
            depth = depth.saturating_sub(1);
        }

        let mut new_text = String::with_capacity(unit.len() * depth + content.len());
        for _ in 0..depth {
            new_text.push_str(&unit);
        }
        new_text.push_str(content);

        edits.push(LineEdit {
            line: line_idx as u32,
            range: TextRange::at(TextSize::from(start as u32), TextSize::from(text.len() as u32)),
            new_text,
        });

        if opens_level(content) {
            depth += 1;
        }
    }

    edits
}

/// Re-indents `source` and returns only the edits for lines
/// `start_line..=end_line`.
///
/// Depth is still tracked from the top of the document, so a line gets the
/// same indentation it would get from a whole-document pass.
pub fn reindent_range(
    source: &str,
    style: IndentStyle,
    start_line: u32,
    end_line: u32,
) -> Vec<LineEdit> {
    reindent(source, style)
        .into_iter()
        .filter(|edit| (start_line..=end_line).contains(&edit.line))
        .collect()
}

/// Re-indents `source` and returns the rewritten text.
pub fn reindent_text(source: &str, style: IndentStyle) -> String {
    apply_line_edits(source, &reindent(source, style))
}

/// Applies edits produced by [`reindent`] to the text they were computed for.
///
/// Edits must be ordered by position; edits that overlap an earlier one or
/// fall outside `source` are skipped.
pub fn apply_line_edits(source: &str, edits: &[LineEdit]) -> String {
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in edits {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        if start < cursor || source.get(start..end).is_none() {
            continue;
        }
        output.push_str(&source[cursor..start]);
        output.push_str(&edit.new_text);
        cursor = end;
    }
    output.push_str(&source[cursor..]);
    output
}

/// Trims the ECMAScript whitespace set: Unicode `White_Space` without NEL
/// (U+0085), plus the byte order mark.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}')
}

fn closes_level(content: &str) -> bool {
    content.starts_with("</")
        || content.starts_with('}')
        || BRANCH_KEYWORDS
            .iter()
            .any(|keyword| starts_with_word(content, keyword))
}

fn opens_level(content: &str) -> bool {
    if opens_tag(content) && !content.ends_with("/>") {
        return true;
    }
    content.ends_with('{') && !content.starts_with("//")
}

/// `<`, then any character but `/`, then a `>` somewhere after it.
fn opens_tag(content: &str) -> bool {
    let mut chars = content.chars();
    if chars.next() != Some('<') {
        return false;
    }
    match chars.next() {
        Some('/') | None => false,
        Some(_) => chars.as_str().contains('>'),
    }
}

fn starts_with_word(content: &str, word: &str) -> bool {
    content
        .strip_prefix(word)
        .is_some_and(|rest| rest.chars().next().is_none_or(|c| !is_word_char(c)))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    fn lines(source: &[&str]) -> String {
        source.join("\n")
    }

    fn edit_texts(edits: &[LineEdit]) -> Vec<(u32, &str)> {
        edits
            .iter()
            .map(|edit| (edit.line, edit.new_text.as_str()))
            .collect()
    }

    #[test]
    fn nested_tags_follow_the_literal_opening_rule() {
        let source = lines(&["<div>", "<p>hello</p>", "</div>"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        // `<p>hello</p>` matches the opening-tag pattern, so it also raises
        // the depth; the closing `</div>` only undoes one of the two levels.
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "<div>"), (1, "  <p>hello</p>"), (2, "  </div>")]
        );
    }

    #[test]
    fn braces_open_and_close_blocks() {
        let source = lines(&["if true {", "  doStuff()", "}"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "if true {"), (1, "  doStuff()"), (2, "}")]
        );
    }

    #[test]
    fn stray_closers_floor_at_zero() {
        let source = lines(&["}", "}"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(0, "}"), (1, "}")]);
    }

    #[test]
    fn blank_lines_produce_no_edits() {
        let source = lines(&["", "<div>", ""]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(1, "<div>")]);
        assert_eq!(edits[0].range, range(1, 6));
    }

    #[test]
    fn whitespace_only_lines_keep_depth() {
        let source = lines(&["<ul>", "   \t ", "<li>a</li>"]);
        let edits = reindent(&source, IndentStyle::spaces(4));
        assert_eq!(edit_texts(&edits), vec![(0, "<ul>"), (2, "    <li>a</li>")]);
    }

    #[test]
    fn empty_document_has_no_edits() {
        assert!(reindent("", IndentStyle::default()).is_empty());
        assert!(reindent("\n\n  \n", IndentStyle::default()).is_empty());
    }

    #[test]
    fn self_closing_tags_do_not_open() {
        let source = lines(&["<img src=\"x\"/>", "<span>"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(0, "<img src=\"x\"/>"), (1, "<span>")]);
    }

    #[test]
    fn line_comments_ending_in_brace_do_not_open() {
        let source = lines(&["// foo {", "bar"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(0, "// foo {"), (1, "bar")]);
    }

    #[test]
    fn closing_tag_is_not_an_opening_tag() {
        let source = lines(&["<div>", "</div>", "text"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(0, "<div>"), (1, "</div>"), (2, "text")]);
    }

    #[test]
    fn tag_without_closing_angle_does_not_open() {
        let source = lines(&["<div", "class=\"a\">", "x"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "<div"), (1, "class=\"a\">"), (2, "x")]
        );
    }

    #[test]
    fn branch_keywords_dedent_their_own_line() {
        let source = lines(&[
            "switch x {",
            "case 1:",
            "one()",
            "default:",
            "other()",
        ]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        // `case 1:` and `default:` never open a level, so each one pulls the
        // depth down permanently.
        assert_eq!(
            edit_texts(&edits),
            vec![
                (0, "switch x {"),
                (1, "case 1:"),
                (2, "one()"),
                (3, "default:"),
                (4, "other()"),
            ]
        );
    }

    #[test]
    fn branch_keywords_need_a_word_boundary() {
        let source = lines(&["if a {", "elsewhere()", "cases", "default_value", "else"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(
            edit_texts(&edits),
            vec![
                (0, "if a {"),
                (1, "  elsewhere()"),
                (2, "  cases"),
                (3, "  default_value"),
                (4, "else"),
            ]
        );
    }

    #[test]
    fn close_and_reopen_on_one_line_is_not_merged() {
        let source = lines(&["if a {", "x", "} else {", "y", "}"]);
        let edits = reindent(&source, IndentStyle::spaces(2));
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "if a {"), (1, "  x"), (2, "} else {"), (3, "  y"), (4, "}")]
        );
    }

    #[test]
    fn unmatched_openers_keep_depth_elevated() {
        let source = lines(&["<html>", "<body>", "text"]);
        let edits = reindent(&source, IndentStyle::spaces(1));
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "<html>"), (1, " <body>"), (2, "  text")]
        );
    }

    #[test]
    fn tabs_use_one_tab_per_level() {
        let source = lines(&["<div>", "<span>", "x"]);
        let edits = reindent(&source, IndentStyle::tabs());
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "<div>"), (1, "\t<span>"), (2, "\t\tx")]
        );
    }

    #[test]
    fn zero_width_is_floored_to_one_space() {
        assert_eq!(IndentStyle::spaces(0).unit(), " ");
    }

    #[test]
    fn crlf_terminators_are_outside_the_edit_range() {
        let source = "<div>\r\n    <p>\r\n";
        let edits = reindent(source, IndentStyle::spaces(2));
        assert_eq!(edits[0].range, range(0, 5));
        assert_eq!(edits[1].range, range(7, 14));
        assert_eq!(reindent_text(source, IndentStyle::spaces(2)), "<div>\r\n  <p>\r\n");
    }

    #[test]
    fn byte_order_mark_is_trimmed() {
        let edits = reindent("\u{feff}  <div>", IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(0, "<div>")]);
    }

    #[test]
    fn next_line_character_is_content() {
        let edits = reindent("<div>\n\u{85}\nx", IndentStyle::spaces(2));
        assert_eq!(
            edit_texts(&edits),
            vec![(0, "<div>"), (1, "  \u{85}"), (2, "  x")]
        );

        let edits = reindent("\u{a0}\u{2028}<p>\u{3000}", IndentStyle::spaces(2));
        assert_eq!(edit_texts(&edits), vec![(0, "<p>")]);
    }

    #[test]
    fn zero_width_selects_the_default() {
        let mut style = IndentStyle::spaces(4);
        style.set_width(0);
        assert_eq!(style, IndentStyle::default());
        style.set_width(3);
        assert_eq!(style.unit(), "   ");
    }

    #[test]
    fn range_uses_depth_from_document_start() {
        let source = lines(&["<div>", "<section>", "text", "</section>", "</div>"]);
        let edits = reindent_range(&source, IndentStyle::spaces(2), 2, 3);
        assert_eq!(edit_texts(&edits), vec![(2, "    text"), (3, "  </section>")]);
    }

    #[test]
    fn apply_skips_out_of_bounds_edits() {
        let edit = LineEdit {
            line: 3,
            range: range(40, 45),
            new_text: "x".to_string(),
        };
        assert_eq!(apply_line_edits("short", &[edit]), "short");
    }

    #[test]
    fn reindents_a_component() {
        let source = r#"package main

templ hello(name string) {
<div class="greeting">
        if name != "" {
  <p>Hello, { name }!</p>
            } else {
<p>Hello!</p>
}
<br/>
    </div>
}
"#;
        let formatted = reindent_text(source, IndentStyle::spaces(4));
        expect![[r#"
package main

templ hello(name string) {
    <div class="greeting">
        if name != "" {
            <p>Hello, { name }!</p>
            } else {
                <p>Hello!</p>
                }
                <br/>
            </div>
        }
"#]]
        .assert_eq(&formatted);
    }

    #[test]
    fn already_indented_brace_blocks_are_stable() {
        let source = "script greet() {\n  alert(1)\n}\n";
        let once = reindent_text(source, IndentStyle::spaces(2));
        assert_eq!(once, source);
        assert_eq!(reindent_text(&once, IndentStyle::spaces(2)), once);
    }
}
