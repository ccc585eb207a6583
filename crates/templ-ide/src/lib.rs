//! `templ-ide` - Editor-assist features for templ templates.
//!
//! This crate provides the language-agnostic pieces of the templ language
//! server:
//!
//! - **Reindent**: Line-based re-indentation driven by a nesting depth counter
//! - **Completion**: Templ keywords and common HTML tags
//! - **Hover**: Documentation for templ block keywords
//! - **Info**: Status indicator and product information
//!
//! # Architecture
//!
//! Every feature is a pure function over the document text and the
//! parameters the editor supplies (cursor offset, indentation style). There
//! is no parser and no state carried between calls.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod completion;
pub mod hover;
pub mod info;
pub mod reindent;

pub use completion::{complete, CompletionItem, CompletionKind, TRIGGER_CHARACTERS};
pub use hover::{hover, word_range_at, HoverResult};
pub use info::{info_message, status_indicator, InfoAction, InfoMessage, StatusIndicator};
pub use reindent::{
    apply_line_edits, reindent, reindent_range, reindent_text, IndentStyle, LineEdit,
};
pub use text_size::{TextRange, TextSize};
