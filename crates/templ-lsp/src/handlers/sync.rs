//! Document synchronization handlers.

use tower_lsp::lsp_types::*;
use tracing::{debug, info, warn};

use crate::state::ServerState;

use super::lsp_utils::position_to_offset;

pub fn did_open(state: &ServerState, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    info!("Document opened: {}", uri);
    state.open_document(uri, params.text_document.version, params.text_document.text);
}

pub fn did_change(state: &ServerState, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;
    let version = params.text_document.version;

    debug!("Document changed: {}", uri);

    if params.content_changes.is_empty() {
        return;
    }

    let Some(doc) = state.get_document(&uri) else {
        warn!("Received change for unknown document: {}", uri);
        return;
    };

    let Some(updated) = apply_content_changes(&doc.content, &params.content_changes) else {
        warn!("Failed to apply incremental changes for {}", uri);
        return;
    };

    state.update_document(&uri, version, updated);
}

/// Applies the changes in order, each against the result of the previous one.
///
/// Range columns count UTF-16 code units; `position_to_offset` maps them to
/// byte offsets on a char boundary. A change without a range replaces the
/// whole text.
fn apply_content_changes(
    content: &str,
    changes: &[TextDocumentContentChangeEvent],
) -> Option<String> {
    let mut updated = content.to_string();
    for change in changes {
        let Some(range) = change.range else {
            updated.clone_from(&change.text);
            continue;
        };
        let start = position_to_offset(&updated, range.start)? as usize;
        let end = position_to_offset(&updated, range.end)? as usize;
        if start > end {
            return None;
        }
        updated.replace_range(start..end, &change.text);
    }
    Some(updated)
}

pub fn did_save(state: &ServerState, params: DidSaveTextDocumentParams) {
    let uri = params.text_document.uri;
    info!("Document saved: {}", uri);

    // Clients that send the text on save get a resync for free.
    if let Some(text) = params.text {
        if let Some(doc) = state.get_document(&uri) {
            state.update_document(&uri, doc.version, text);
        }
    }
}

pub fn did_close(state: &ServerState, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    info!("Document closed: {}", uri);
    state.close_document(&uri);
}
