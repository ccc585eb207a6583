//! `templ-lsp format`: reindent files from the command line.

use anyhow::Context;
use std::path::{Path, PathBuf};
use templ_ide::IndentStyle;
use tracing::debug;

use crate::config::ProjectConfig;

/// Flags passed to the format command.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    pub check: bool,
    pub tab_size: Option<u32>,
    pub use_tabs: bool,
}

/// Counts collected while formatting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormatSummary {
    pub checked: usize,
    pub changed: Vec<PathBuf>,
}

pub fn run_format(files: &[PathBuf], options: FormatOptions) -> anyhow::Result<FormatSummary> {
    let mut summary = FormatSummary::default();
    for path in files {
        if format_file(path, options)? {
            if options.check {
                println!("Would reindent {}", path.display());
            } else {
                println!("Reindented {}", path.display());
            }
            summary.changed.push(path.clone());
        }
        summary.checked += 1;
    }

    let verb = if options.check { "would change" } else { "changed" };
    println!(
        "{} file(s) checked, {} {verb}",
        summary.checked,
        summary.changed.len()
    );
    Ok(summary)
}

/// Reindents one file. Returns whether its content differs from the result.
fn format_file(path: &Path, options: FormatOptions) -> anyhow::Result<bool> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let style = style_for(path, options)?;
    let formatted = templ_ide::reindent_text(&source, style);
    if formatted == source {
        return Ok(false);
    }
    if !options.check {
        std::fs::write(path, &formatted)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(true)
}

/// Flags win over the nearest `templ-lsp.toml`, which wins over defaults.
fn style_for(path: &Path, options: FormatOptions) -> anyhow::Result<IndentStyle> {
    let mut style = IndentStyle::default();
    let start = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if let Some(config) = ProjectConfig::discover(start)? {
        debug!(
            "using {} for {}",
            config
                .config_path
                .as_deref()
                .unwrap_or(&config.root)
                .display(),
            path.display()
        );
        config.format.apply(&mut style);
    }
    if let Some(width) = options.tab_size {
        style.set_width(width);
        style.use_spaces = true;
    }
    if options.use_tabs {
        style.use_spaces = false;
    }
    Ok(style)
}
