use std::path::{Component, PathBuf};

use percent_encoding::percent_decode_str;
use tower_lsp::lsp_types::Url;

use crate::config::ProjectConfig;

use super::ServerState;

pub(super) fn workspace_config_for_uri(state: &ServerState, uri: &Url) -> Option<ProjectConfig> {
    let configs = state.workspace_configs.read();
    if let Some(path) = uri_to_path(uri) {
        let path = normalize_match_path(path);
        let mut best: Option<(usize, &ProjectConfig)> = None;
        for (root_url, config) in configs.iter() {
            let Some(root_path) = uri_to_path(root_url) else {
                continue;
            };
            let root_path = normalize_match_path(root_path);
            if path.starts_with(&root_path) {
                update_best_match(&mut best, root_path.components().count(), config);
            }
        }
        if let Some((_, config)) = best {
            return Some(config.clone());
        }
    }

    // Non-file URIs (untitled buffers, remote schemes) match on path segments.
    let uri_segments = path_segments(uri);
    let mut best: Option<(usize, &ProjectConfig)> = None;
    for (root_url, config) in configs.iter() {
        if root_url.scheme() != uri.scheme() {
            continue;
        }
        let root_segments = path_segments(root_url);
        if root_segments.is_empty() || uri_segments.len() < root_segments.len() {
            continue;
        }
        if uri_segments[..root_segments.len()] == root_segments[..] {
            update_best_match(&mut best, root_segments.len(), config);
        }
    }
    best.map(|(_, config)| config.clone())
}

fn update_best_match<'a>(
    best: &mut Option<(usize, &'a ProjectConfig)>,
    depth: usize,
    config: &'a ProjectConfig,
) {
    if best
        .as_ref()
        .is_none_or(|(best_depth, _)| depth > *best_depth)
    {
        *best = Some((depth, config));
    }
}

fn path_segments(uri: &Url) -> Vec<&str> {
    uri.path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default()
}

pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
    if let Ok(path) = uri.to_file_path() {
        return Some(path);
    }
    if uri.scheme() != "file" {
        return None;
    }
    let raw_path = uri.path();
    if raw_path.is_empty() {
        return None;
    }
    let decoded = percent_decode_str(raw_path).decode_utf8_lossy();
    Some(PathBuf::from(decoded.as_ref()))
}

fn normalize_match_path(path: PathBuf) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}
