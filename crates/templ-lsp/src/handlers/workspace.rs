//! Workspace configuration handlers.

use serde_json::json;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams, DidChangeWatchedFilesParams, MessageType, Registration, Url,
};
use tower_lsp::Client;
use tracing::info;

use crate::config::{is_config_file, ProjectConfig, CONFIG_FILES};
use crate::state::{uri_to_path, ServerState};

pub async fn register_file_watchers(client: &Client) {
    let watchers: Vec<_> = CONFIG_FILES
        .iter()
        .map(|name| json!({ "globPattern": format!("**/{name}") }))
        .collect();

    let registration = Registration {
        id: "templlsp-watchers".to_string(),
        method: "workspace/didChangeWatchedFiles".to_string(),
        register_options: Some(json!({ "watchers": watchers })),
    };
    if let Err(err) = client.register_capability(vec![registration]).await {
        client
            .log_message(
                MessageType::WARNING,
                format!("Failed to register file watchers: {err}"),
            )
            .await;
    }
}

/// Loads `templ-lsp.toml` for every workspace folder.
pub fn load_workspace_configs(state: &ServerState) -> usize {
    let mut loaded = 0usize;
    for folder in state.workspace_folders() {
        let Some(root) = uri_to_path(&folder) else {
            continue;
        };
        let config = ProjectConfig::load(&root);
        if let Some(path) = &config.config_path {
            info!("Loaded {}", path.display());
            loaded += 1;
        }
        state.set_workspace_config(folder, config);
    }
    loaded
}

pub fn did_change_configuration(state: &ServerState, params: DidChangeConfigurationParams) {
    state.set_config(params.settings);
    info!("Updated workspace configuration");
}

pub fn did_change_watched_files(state: &ServerState, params: DidChangeWatchedFilesParams) {
    let config_changed = params.changes.iter().any(|change| {
        uri_to_path(&change.uri).is_some_and(|path| is_config_file(&path))
    });
    if config_changed {
        let loaded = load_workspace_configs(state);
        info!("Reloaded workspace configuration ({loaded} config files)");
    }
}

/// Records the workspace folders announced by the client.
pub fn set_workspace_folders(state: &ServerState, folders: Vec<Url>) {
    if !folders.is_empty() {
        info!("Workspace folders: {:?}", folders);
    }
    state.set_workspace_folders(folders);
}
