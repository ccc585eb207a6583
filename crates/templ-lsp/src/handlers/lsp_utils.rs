//! LSP conversion helpers.
//!
//! LSP positions count UTF-16 code units within a line; `templ-ide` works in
//! byte offsets.

use text_size::{TextRange, TextSize};
use tower_lsp::lsp_types::{Position, Range};

pub(crate) fn offset_to_position(content: &str, offset: u32) -> Position {
    let offset = offset as usize;
    let mut line = 0u32;
    let mut col = 0u32;

    for (i, c) in content.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += c.len_utf16() as u32;
        }
    }

    Position {
        line,
        character: col,
    }
}

pub(crate) fn position_to_offset(content: &str, position: Position) -> Option<u32> {
    let mut line = 0u32;
    let mut col = 0u32;

    for (i, c) in content.char_indices() {
        if line == position.line && col >= position.character {
            return Some(i as u32);
        }
        if c == '\n' {
            if line == position.line {
                // Position is past the end of this line
                return Some(i as u32);
            }
            line += 1;
            col = 0;
        } else {
            col += c.len_utf16() as u32;
        }
    }

    // Position is at end of file
    if line == position.line {
        Some(content.len() as u32)
    } else {
        None
    }
}

pub(crate) fn text_range_to_lsp(content: &str, range: TextRange) -> Range {
    Range {
        start: offset_to_position(content, range.start().into()),
        end: offset_to_position(content, range.end().into()),
    }
}

pub(crate) fn position_to_text_size(content: &str, position: Position) -> Option<TextSize> {
    position_to_offset(content, position).map(TextSize::from)
}

/// Length of `text` in UTF-16 code units.
pub(crate) fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}
