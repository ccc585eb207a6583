//! Workspace/project configuration for templ-lsp.
//!
//! Two sources feed the server: a `templ-lsp.toml` file at a workspace root,
//! and the settings object the client pushes through
//! `workspace/didChangeConfiguration`.

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use templ_ide::IndentStyle;
use thiserror::Error;
use tracing::warn;

pub(crate) const CONFIG_FILES: &[&str] = &["templ-lsp.toml", ".templ-lsp.toml"];

/// Errors raised while loading a project config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read templ-lsp config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse templ-lsp config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Project configuration loaded from `templ-lsp.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Root directory for the workspace.
    pub root: PathBuf,
    /// Config file path (if found).
    pub config_path: Option<PathBuf>,
    /// Formatting overrides.
    pub format: FormatSettings,
    /// Info command settings.
    pub info: InfoSettings,
}

/// Indentation overrides from `[format]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSettings {
    pub indent_width: Option<u32>,
    pub insert_spaces: Option<bool>,
}

impl FormatSettings {
    /// Applies the overrides that are set on top of `style`.
    pub fn apply(&self, style: &mut IndentStyle) {
        if let Some(width) = self.indent_width {
            style.set_width(width);
        }
        if let Some(insert) = self.insert_spaces {
            style.use_spaces = insert;
        }
    }
}

/// Settings from `[info]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoSettings {
    /// Issue tracker opened by the "Report Issue" action.
    pub issues_url: Option<String>,
}

impl ProjectConfig {
    fn base(root: &Path, config_path: Option<PathBuf>) -> Self {
        Self {
            root: root.to_path_buf(),
            config_path,
            ..Self::default()
        }
    }

    /// Load configuration for a workspace root, falling back to defaults when
    /// the file is missing or broken.
    pub fn load(root: &Path) -> Self {
        match Self::try_load(root) {
            Ok(config) => config,
            Err(err) => {
                warn!("{err}");
                ProjectConfig::base(root, find_config_file(root))
            }
        }
    }

    /// Load configuration for a workspace root, reporting read/parse errors.
    pub fn try_load(root: &Path) -> Result<Self, ConfigError> {
        let Some(path) = find_config_file(root) else {
            return Ok(ProjectConfig::base(root, None));
        };
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        ProjectConfig::from_contents(root, Some(path), &contents)
    }

    pub fn from_contents(
        root: &Path,
        config_path: Option<PathBuf>,
        contents: &str,
    ) -> Result<Self, ConfigError> {
        let parsed: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: config_path
                .clone()
                .unwrap_or_else(|| root.join(CONFIG_FILES[0])),
            source,
        })?;

        let mut config = ProjectConfig::base(root, config_path);
        config.format = FormatSettings {
            indent_width: parsed.format.indent_width,
            insert_spaces: parsed.format.insert_spaces,
        };
        config.info = InfoSettings {
            issues_url: parsed.info.issues_url.filter(|url| !url.trim().is_empty()),
        };
        Ok(config)
    }

    /// Finds the closest directory at or above `start` that holds a config
    /// file and loads it.
    pub fn discover(start: &Path) -> Result<Option<Self>, ConfigError> {
        for dir in start.ancestors() {
            if find_config_file(dir).is_some() {
                return ProjectConfig::try_load(dir).map(Some);
            }
        }
        Ok(None)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    format: FormatSection,
    #[serde(default)]
    info: InfoSection,
}

#[derive(Debug, Default, Deserialize)]
struct FormatSection {
    #[serde(default, alias = "tab_size")]
    indent_width: Option<u32>,
    #[serde(default)]
    insert_spaces: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct InfoSection {
    #[serde(default)]
    issues_url: Option<String>,
}

pub(crate) fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

pub(crate) fn is_config_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| CONFIG_FILES.contains(&name))
}

/// Returns the templ-lsp section of the client settings.
pub(crate) fn config_section(value: &Value) -> Option<&Value> {
    value
        .get("templLsp")
        .or_else(|| value.get("templ-lsp"))
        .or_else(|| value.get("templ_lsp"))
}

pub(crate) fn bool_with_aliases(value: &Value, keys: &[&str]) -> Option<bool> {
    keys.iter().find_map(|key| value.get(*key).and_then(Value::as_bool))
}

pub(crate) fn u64_with_aliases(value: &Value, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| value.get(*key).and_then(Value::as_u64))
}

pub(crate) fn string_with_aliases(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{prefix}-{stamp}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn loads_project_config_with_format_and_info() {
        let root = temp_dir("templlsp-config");
        fs::write(
            root.join("templ-lsp.toml"),
            r#"
[format]
indent_width = 4
insert_spaces = false

[info]
issues_url = "https://example.com/issues"
"#,
        )
        .expect("write config");

        let config = ProjectConfig::load(&root);
        assert_eq!(config.config_path, Some(root.join("templ-lsp.toml")));
        assert_eq!(config.format.indent_width, Some(4));
        assert_eq!(config.format.insert_spaces, Some(false));
        assert_eq!(
            config.info.issues_url.as_deref(),
            Some("https://example.com/issues")
        );

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn missing_config_uses_defaults() {
        let root = temp_dir("templlsp-config-missing");
        let config = ProjectConfig::load(&root);
        assert_eq!(config.config_path, None);
        assert_eq!(config.format, FormatSettings::default());
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn invalid_config_reports_parse_error() {
        let root = Path::new("/workspace");
        let err = ProjectConfig::from_contents(root, None, "[format]\nindent_width = \"wide\"")
            .expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("templ-lsp.toml"));
    }

    #[test]
    fn hidden_config_file_is_found() {
        let root = temp_dir("templlsp-config-hidden");
        fs::write(root.join(".templ-lsp.toml"), "[format]\ntab_size = 8\n").expect("write");
        let config = ProjectConfig::load(&root);
        assert_eq!(config.format.indent_width, Some(8));
        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn discover_walks_up_to_the_nearest_config() {
        let root = temp_dir("templlsp-config-discover");
        let nested = root.join("components").join("cards");
        fs::create_dir_all(&nested).expect("create nested");
        fs::write(root.join("templ-lsp.toml"), "[format]\nindent_width = 3\n").expect("write");

        let config = ProjectConfig::discover(&nested)
            .expect("load")
            .expect("config found");
        assert_eq!(config.root, root);
        assert_eq!(config.format.indent_width, Some(3));

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn format_settings_zero_width_is_default() {
        let mut style = IndentStyle::spaces(4);
        FormatSettings {
            indent_width: Some(0),
            insert_spaces: Some(true),
        }
        .apply(&mut style);
        assert_eq!(style, IndentStyle::default());
    }

    #[test]
    fn client_section_aliases() {
        let value = json!({ "templ-lsp": { "format": { "insertSpaces": false } } });
        let format = config_section(&value).and_then(|v| v.get("format")).unwrap();
        assert_eq!(
            bool_with_aliases(format, &["insertSpaces", "insert_spaces"]),
            Some(false)
        );
        assert!(config_section(&json!({ "other": {} })).is_none());
    }

    #[test]
    fn recognizes_config_file_names() {
        assert!(is_config_file(Path::new("/w/templ-lsp.toml")));
        assert!(is_config_file(Path::new("/w/.templ-lsp.toml")));
        assert!(!is_config_file(Path::new("/w/page.templ")));
    }
}
