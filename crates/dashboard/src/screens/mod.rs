//! Screen logic, independent of HTTP.
//!
//! Each screen is a function of the collaborators, the session state and the
//! submitted form. It validates locally, calls at most one collaborator
//! method, updates the session state and returns what to show. Route handlers
//! in [`crate::routes`] only move data between HTTP and these functions.
//!
//! Validation failures never reach a collaborator; collaborator failures are
//! shown with the collaborator's own message when it gave one.

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod settings;

/// Kind of message shown above a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Message shown to the user after a submission.
///
/// Serializable so it can survive a redirect as a flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Secondary line, e.g. the id of a created account.
    pub detail: Option<String>,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// CSS modifier used by the templates.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "notice-success",
            NoticeKind::Error => "notice-error",
            NoticeKind::Info => "notice-info",
        }
    }
}
