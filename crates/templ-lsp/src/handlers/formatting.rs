//! Document formatting handler.

use serde_json::Value;
use templ_ide::{IndentStyle, LineEdit};
use tower_lsp::lsp_types::{
    DocumentFormattingParams, DocumentRangeFormattingParams, FormattingOptions, Position, Range,
    TextEdit, Url,
};
use tracing::debug;

use crate::config::{bool_with_aliases, config_section, u64_with_aliases};
use crate::state::ServerState;

use super::lsp_utils::utf16_len;

/// Resolves the indentation style for a document.
///
/// Precedence, lowest first: the client's formatting options, the
/// workspace `templ-lsp.toml`, then the client's `templLsp.format` settings.
fn indent_style(state: &ServerState, uri: &Url, options: &FormattingOptions) -> IndentStyle {
    let mut style = IndentStyle {
        use_spaces: options.insert_spaces,
        ..IndentStyle::default()
    };
    style.set_width(options.tab_size);

    if let Some(workspace_config) = state.workspace_config_for_uri(uri) {
        workspace_config.format.apply(&mut style);
    }

    let value = state.config();
    let format = config_section(&value)
        .and_then(|v| v.get("format"))
        .or_else(|| config_section(&value).and_then(|v| v.get("formatting")));
    if let Some(format) = format {
        apply_client_format(&mut style, format);
    }

    style
}

fn apply_client_format(style: &mut IndentStyle, format: &Value) {
    if let Some(width) = u64_with_aliases(format, &["indentWidth", "indent_width", "tabSize"]) {
        style.set_width(u32::try_from(width).unwrap_or(u32::MAX));
    }
    if let Some(insert) = bool_with_aliases(format, &["insertSpaces", "insert_spaces"]) {
        style.use_spaces = insert;
    }
}

pub fn formatting(state: &ServerState, params: DocumentFormattingParams) -> Option<Vec<TextEdit>> {
    let uri = &params.text_document.uri;
    let doc = state.get_document(uri)?;
    let style = indent_style(state, uri, &params.options);
    let edits = templ_ide::reindent(&doc.content, style);
    debug!(
        "formatting {} (v{}): {} line edits",
        doc.uri,
        doc.version,
        edits.len()
    );
    Some(to_text_edits(&doc.content, edits))
}

pub fn range_formatting(
    state: &ServerState,
    params: DocumentRangeFormattingParams,
) -> Option<Vec<TextEdit>> {
    let uri = &params.text_document.uri;
    let doc = state.get_document(uri)?;
    let style = indent_style(state, uri, &params.options);

    let start_line = params.range.start.line;
    let mut end_line = params.range.end.line;
    if params.range.end.character == 0 && end_line > start_line {
        end_line = end_line.saturating_sub(1);
    }
    if start_line > end_line {
        return Some(Vec::new());
    }

    let edits = templ_ide::reindent_range(&doc.content, style, start_line, end_line);
    Some(to_text_edits(&doc.content, edits))
}

/// Maps each line edit to a full-line LSP edit.
fn to_text_edits(content: &str, edits: Vec<LineEdit>) -> Vec<TextEdit> {
    edits
        .into_iter()
        .map(|edit| {
            let original = &content[edit.range];
            TextEdit {
                range: Range {
                    start: Position::new(edit.line, 0),
                    end: Position::new(edit.line, utf16_len(original)),
                },
                new_text: edit.new_text,
            }
        })
        .collect()
}
