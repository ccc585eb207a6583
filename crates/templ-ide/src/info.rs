//! Product information surfaced by the editor integration.
//!
//! The status indicator and the info message are static; the caller passes
//! in the server name and version so this crate stays free of build metadata.

/// Where the "View Documentation" action points.
pub const DOCUMENTATION_URL: &str = "https://templ.guide";

/// Text and tooltip for the editor's status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusIndicator {
    /// Label, using the editor's codicon syntax.
    pub text: &'static str,
    /// Tooltip shown when hovering the label.
    pub tooltip: &'static str,
    /// Whether templ support is active.
    pub active: bool,
}

/// Returns the status indicator shown while the server is running.
pub fn status_indicator() -> StatusIndicator {
    StatusIndicator {
        text: "$(symbol-namespace) Templ",
        tooltip: "Templ Language Server Active",
        active: true,
    }
}

/// A button offered alongside the info message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoAction {
    /// Open the templ documentation.
    ViewDocumentation,
    /// Open the issue tracker.
    ReportIssue,
}

impl InfoAction {
    /// Button title shown to the user.
    pub fn title(self) -> &'static str {
        match self {
            InfoAction::ViewDocumentation => "View Documentation",
            InfoAction::ReportIssue => "Report Issue",
        }
    }

    /// Maps a clicked button title back to its action.
    pub fn from_title(title: &str) -> Option<Self> {
        [InfoAction::ViewDocumentation, InfoAction::ReportIssue]
            .into_iter()
            .find(|action| action.title() == title)
    }
}

/// The informational message and the actions it offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoMessage {
    /// Message text.
    pub text: String,
    /// Offered actions, in display order.
    pub actions: Vec<InfoAction>,
    issues_url: Option<String>,
}

impl InfoMessage {
    /// The URL an action opens, if it is offered.
    pub fn url_for(&self, action: InfoAction) -> Option<&str> {
        if !self.actions.contains(&action) {
            return None;
        }
        match action {
            InfoAction::ViewDocumentation => Some(DOCUMENTATION_URL),
            InfoAction::ReportIssue => self.issues_url.as_deref(),
        }
    }
}

/// Builds the info message for `name` at `version`.
///
/// "Report Issue" is only offered when an issue tracker URL is known.
pub fn info_message(name: &str, version: &str, issues_url: Option<&str>) -> InfoMessage {
    let issues_url = issues_url
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string);
    let mut actions = vec![InfoAction::ViewDocumentation];
    if issues_url.is_some() {
        actions.push(InfoAction::ReportIssue);
    }
    InfoMessage {
        text: format!("{name} v{version} - Provides editor support for .templ files"),
        actions,
        issues_url,
    }
}
