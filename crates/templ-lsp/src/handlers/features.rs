//! LSP language feature handlers.

use tower_lsp::lsp_types::*;
use tracing::debug;

use crate::state::ServerState;

use super::lsp_utils::{position_to_text_size, text_range_to_lsp};

pub fn hover(state: &ServerState, params: HoverParams) -> Option<Hover> {
    let uri = &params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    let doc = state.get_document(uri)?;
    let offset = position_to_text_size(&doc.content, position)?;
    let result = templ_ide::hover(&doc.content, offset)?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: result.contents,
        }),
        range: result
            .range
            .map(|range| text_range_to_lsp(&doc.content, range)),
    })
}

pub fn completion(params: CompletionParams) -> Option<CompletionResponse> {
    let position = params.text_document_position;
    debug!(
        "completion at {}:{}:{}",
        position.text_document.uri, position.position.line, position.position.character
    );

    let items = templ_ide::complete()
        .into_iter()
        .map(|item| {
            let kind = match item.kind {
                templ_ide::CompletionKind::Keyword => CompletionItemKind::KEYWORD,
                templ_ide::CompletionKind::HtmlTag => CompletionItemKind::PROPERTY,
            };
            CompletionItem {
                label: item.label.to_string(),
                kind: Some(kind),
                detail: item.detail.map(|s| s.to_string()),
                sort_text: Some(format!("{:05}", item.sort_priority)),
                ..Default::default()
            }
        })
        .collect();

    Some(CompletionResponse::Array(items))
}
