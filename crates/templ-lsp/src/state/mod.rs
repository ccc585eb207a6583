//! Server state management.
//!
//! This module manages the state of the language server: open documents,
//! client settings, and per-workspace configuration.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use tower_lsp::lsp_types::Url;

use crate::config::ProjectConfig;

mod path;

pub(crate) use path::uri_to_path;

/// A document managed by the server.
#[derive(Debug, Clone)]
pub struct Document {
    /// The document URI.
    pub uri: Url,
    /// The document version.
    pub version: i32,
    /// The document content.
    pub content: String,
}

impl Document {
    /// Creates a new document.
    pub fn new(uri: Url, version: i32, content: String) -> Self {
        Self {
            uri,
            version,
            content,
        }
    }
}

/// The server state.
pub struct ServerState {
    /// Documents currently open in the editor.
    documents: RwLock<FxHashMap<Url, Document>>,
    /// Current client configuration settings.
    config: RwLock<Value>,
    /// Workspace folders.
    workspace_folders: RwLock<Vec<Url>>,
    /// Workspace configuration per root.
    workspace_configs: RwLock<FxHashMap<Url, ProjectConfig>>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Creates a new server state.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(FxHashMap::default()),
            config: RwLock::new(Value::Null),
            workspace_folders: RwLock::new(Vec::new()),
            workspace_configs: RwLock::new(FxHashMap::default()),
        }
    }

    /// Stores the workspace folders.
    pub fn set_workspace_folders(&self, folders: Vec<Url>) {
        *self.workspace_folders.write() = folders;
    }

    /// Returns the current workspace folders.
    pub fn workspace_folders(&self) -> Vec<Url> {
        self.workspace_folders.read().clone()
    }

    /// Stores configuration for a workspace root.
    pub fn set_workspace_config(&self, root: Url, config: ProjectConfig) {
        self.workspace_configs.write().insert(root, config);
    }

    /// Returns all workspace configurations with their roots.
    pub fn workspace_configs(&self) -> Vec<(Url, ProjectConfig)> {
        self.workspace_configs
            .read()
            .iter()
            .map(|(root, config)| (root.clone(), config.clone()))
            .collect()
    }

    /// Returns the best-matching workspace configuration for a document URI.
    pub fn workspace_config_for_uri(&self, uri: &Url) -> Option<ProjectConfig> {
        path::workspace_config_for_uri(self, uri)
    }

    /// Opens a document, replacing any previous content.
    pub fn open_document(&self, uri: Url, version: i32, content: String) {
        let doc = Document::new(uri.clone(), version, content);
        self.documents.write().insert(uri, doc);
    }

    /// Updates a document. Stale versions are ignored.
    pub fn update_document(&self, uri: &Url, version: i32, content: String) {
        let mut documents = self.documents.write();
        match documents.get_mut(uri) {
            Some(doc) if version >= doc.version => {
                doc.version = version;
                doc.content = content;
            }
            Some(_) => {}
            None => {
                documents.insert(uri.clone(), Document::new(uri.clone(), version, content));
            }
        }
    }

    /// Closes a document.
    pub fn close_document(&self, uri: &Url) {
        self.documents.write().remove(uri);
    }

    /// Gets a document by URI.
    pub fn get_document(&self, uri: &Url) -> Option<Document> {
        self.documents.read().get(uri).cloned()
    }

    /// Stores updated client configuration settings.
    pub fn set_config(&self, config: Value) {
        *self.config.write() = config;
    }

    /// Returns the current configuration snapshot.
    pub fn config(&self) -> Value {
        self.config.read().clone()
    }
}
