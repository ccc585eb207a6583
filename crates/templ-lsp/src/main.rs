//! `templ-lsp` - Language Server Protocol implementation for templ templates.
//!
//! This is the main entry point for the templ language server and the
//! `format` command.

mod cli;
mod config;
mod format;
mod handlers;
mod state;

use clap::Parser;
use serde_json::Value;
use std::sync::Arc;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::format::FormatOptions;
use crate::handlers::{SHOW_INFO_COMMAND, STATUS_COMMAND};
use crate::state::ServerState;

/// The main language server struct.
pub struct TemplLanguageServer {
    /// LSP client for sending notifications.
    client: Client,
    /// Server state.
    state: Arc<ServerState>,
}

impl TemplLanguageServer {
    /// Creates a new language server instance.
    fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::new()),
        }
    }
}

pub(crate) fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        // Text document sync - incremental updates
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::INCREMENTAL),
                save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                    include_text: Some(true),
                })),
                ..Default::default()
            },
        )),

        hover_provider: Some(HoverProviderCapability::Simple(true)),

        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(
                templ_ide::TRIGGER_CHARACTERS
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
            ),
            resolve_provider: Some(false),
            ..Default::default()
        }),

        execute_command_provider: Some(ExecuteCommandOptions {
            commands: vec![SHOW_INFO_COMMAND.to_string(), STATUS_COMMAND.to_string()],
            ..Default::default()
        }),

        document_formatting_provider: Some(OneOf::Left(true)),
        document_range_formatting_provider: Some(OneOf::Left(true)),

        workspace: Some(WorkspaceServerCapabilities {
            workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                supported: Some(true),
                change_notifications: None,
            }),
            file_operations: None,
        }),

        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for TemplLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("templ language server initializing");

        let mut workspace_folders = Vec::new();
        if let Some(folders) = params.workspace_folders {
            workspace_folders.extend(folders.into_iter().map(|folder| folder.uri));
        } else if let Some(root_uri) = params.root_uri {
            workspace_folders.push(root_uri);
        }
        handlers::set_workspace_folders(&self.state, workspace_folders);

        if let Some(options) = params.initialization_options {
            self.state.set_config(options);
        }

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        let loaded = handlers::load_workspace_configs(&self.state);
        info!("templ language server initialized ({loaded} config files)");
        handlers::register_file_watchers(&self.client).await;

        let status = templ_ide::status_indicator();
        self.client
            .log_message(
                MessageType::INFO,
                format!("{} ({})", status.text, status.tooltip),
            )
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("templ language server shutting down");
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::did_change_configuration(&self.state, params);
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::did_open(&self.state, params);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::did_change(&self.state, params);
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        handlers::did_save(&self.state, params);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::did_close(&self.state, params);
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::did_change_watched_files(&self.state, params);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        Ok(handlers::hover(&self.state, params))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        Ok(handlers::completion(params))
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        Ok(handlers::execute_command(&self.client, &self.state, params).await)
    }

    async fn range_formatting(
        &self,
        params: DocumentRangeFormattingParams,
    ) -> Result<Option<Vec<TextEdit>>> {
        Ok(handlers::range_formatting(&self.state, params))
    }

    async fn formatting(&self, params: DocumentFormattingParams) -> Result<Option<Vec<TextEdit>>> {
        Ok(handlers::formatting(&self.state, params))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn serve() {
    info!("Starting templ language server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(TemplLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        None | Some(Command::Serve) => {
            serve().await;
            Ok(())
        }
        Some(Command::Format {
            check,
            tab_size,
            use_tabs,
            files,
        }) => {
            let options = FormatOptions {
                check,
                tab_size,
                use_tabs,
            };
            let summary = format::run_format(&files, options)?;
            if check && !summary.changed.is_empty() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
