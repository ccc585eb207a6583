//! LSP workspace/executeCommand handlers.

use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use templ_ide::{InfoAction, InfoMessage};
use tower_lsp::lsp_types::{
    ExecuteCommandParams, MessageActionItem, MessageType, ShowDocumentParams,
    TextDocumentIdentifier, Url,
};
use tower_lsp::Client;
use tracing::{debug, warn};

use crate::config::{config_section, string_with_aliases};
use crate::state::ServerState;

pub const SHOW_INFO_COMMAND: &str = "templ.showInfo";
pub const STATUS_COMMAND: &str = "templ.status";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InfoCommandArgs {
    #[serde(default)]
    text_document: Option<TextDocumentIdentifier>,
}

/// What a command asks of the server once its arguments are resolved.
#[derive(Debug, PartialEq)]
pub(crate) enum CommandOutcome {
    /// Reply to the request with this value.
    Reply(Option<Value>),
    /// Show the info message, then reply with `null`.
    ShowInfo(InfoMessage),
}

pub(crate) fn resolve_command(state: &ServerState, params: ExecuteCommandParams) -> CommandOutcome {
    match params.command.as_str() {
        SHOW_INFO_COMMAND => CommandOutcome::ShowInfo(info_message_for(state, params.arguments)),
        STATUS_COMMAND => CommandOutcome::Reply(Some(status_value())),
        other => {
            warn!("Unknown command: {other}");
            CommandOutcome::Reply(None)
        }
    }
}

pub async fn execute_command(
    client: &Client,
    state: &ServerState,
    params: ExecuteCommandParams,
) -> Option<Value> {
    match resolve_command(state, params) {
        CommandOutcome::Reply(value) => value,
        CommandOutcome::ShowInfo(message) => {
            show_info(client, &message).await;
            None
        }
    }
}

pub(crate) fn status_value() -> Value {
    let status = templ_ide::status_indicator();
    json!({
        "text": status.text,
        "tooltip": status.tooltip,
        "active": status.active,
    })
}

pub(crate) fn info_message_for(state: &ServerState, args: Vec<Value>) -> InfoMessage {
    let issues_url = issues_url(state, args);
    templ_ide::info_message(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        issues_url.as_deref(),
    )
}

/// Resolves the issue tracker: client settings, then the project config of
/// the document passed as argument (or any workspace that sets one), then the
/// package repository.
fn issues_url(state: &ServerState, args: Vec<Value>) -> Option<String> {
    let value = state.config();
    if let Some(url) = config_section(&value)
        .and_then(|section| section.get("info"))
        .and_then(|info| string_with_aliases(info, &["issuesUrl", "issues_url"]))
    {
        return Some(url);
    }

    let parsed = args
        .into_iter()
        .next()
        .and_then(|arg| serde_json::from_value::<InfoCommandArgs>(arg).ok())
        .unwrap_or_default();
    let from_document = parsed
        .text_document
        .and_then(|doc| state.workspace_config_for_uri(&doc.uri))
        .and_then(|config| config.info.issues_url);
    if from_document.is_some() {
        return from_document;
    }

    let mut configs = state.workspace_configs();
    configs.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
    if let Some(url) = configs
        .into_iter()
        .find_map(|(_, config)| config.info.issues_url)
    {
        return Some(url);
    }

    let repository = env!("CARGO_PKG_REPOSITORY").trim_end_matches('/');
    (!repository.is_empty()).then(|| format!("{repository}/issues"))
}

fn message_actions(message: &InfoMessage) -> Vec<MessageActionItem> {
    message
        .actions
        .iter()
        .map(|action| MessageActionItem {
            title: action.title().to_string(),
            properties: HashMap::new(),
        })
        .collect()
}

/// Maps the action the user picked to the external page it opens.
pub(crate) fn show_document_params(
    message: &InfoMessage,
    selected: &str,
) -> Option<ShowDocumentParams> {
    let action = InfoAction::from_title(selected)?;
    let url = message.url_for(action)?;
    let uri = match Url::parse(url) {
        Ok(uri) => uri,
        Err(err) => {
            warn!("Invalid info link {url}: {err}");
            return None;
        }
    };
    Some(ShowDocumentParams {
        uri,
        external: Some(true),
        take_focus: None,
        selection: None,
    })
}

async fn show_info(client: &Client, message: &InfoMessage) {
    let selected = match client
        .show_message_request(
            MessageType::INFO,
            message.text.clone(),
            Some(message_actions(message)),
        )
        .await
    {
        Ok(Some(selected)) => selected,
        Ok(None) => return,
        Err(err) => {
            warn!("Failed to show templ info: {err}");
            return;
        }
    };

    let Some(params) = show_document_params(message, &selected.title) else {
        return;
    };
    let uri = params.uri.clone();
    debug!("Opening {uri}");
    match client.show_document(params).await {
        Ok(true) => {}
        Ok(false) => warn!("Client declined to open {uri}"),
        Err(err) => warn!("Failed to open {uri}: {err}"),
    }
}
