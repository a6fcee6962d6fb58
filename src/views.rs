//! Per-screen controllers.
//!
//! Every controller follows the same shape: `load` issues the calls the
//! screen needs and lands in exactly one of loading / failed / ready;
//! mutations either re-fetch what they touched or patch local state; a
//! failed mutation sets an inline `notice` and leaves loaded data alone.
//! Nothing retries on its own; `retry` re-runs the last load.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::warn;

use crate::model::Identity;
use crate::remote::{RemoteClient, ResourceResult, UNEXPECTED_RESPONSE};
use crate::session::SessionState;

mod admin;
mod auth;
mod catalog;
mod dashboard;
mod editor;
mod inbox;
mod lesson;
mod profile;

pub use self::admin::AdminUsersView;
pub use self::auth::{LoginOutcome, LoginView, RegisterView, Rejection};
pub use self::catalog::{CourseDetail, CourseDetailView, CourseListView, NO_LESSONS};
pub use self::dashboard::{InstructorDashboardView, StudentDashboardView};
pub use self::editor::{CourseEditorView, EditorData, EditorMode};
pub use self::inbox::InboxView;
pub use self::lesson::{LessonPage, LessonView};
pub use self::profile::ProfileView;

/// Shown for transport failures; the detail goes to the log.
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn from_outcome(outcome: std::result::Result<T, String>) -> Self {
        match outcome {
            Ok(v) => Self::Ready(v),
            Err(msg) => Self::Failed(msg),
        }
    }
}

/// Liveness of a mounted controller. Results that arrive after
/// [`Mount::unmount`] are dropped; the request itself is not aborted.
#[derive(Clone, Debug)]
pub struct Mount(Rc<Cell<bool>>);

impl Mount {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.get()
    }

    pub fn unmount(&self) {
        self.0.set(false);
    }
}

impl Default for Mount {
    fn default() -> Self {
        Self::new()
    }
}

/// What every controller is handed: the transport and the observable
/// session.
#[derive(Clone)]
pub struct ViewContext {
    pub client: Rc<RemoteClient>,
    pub session: watch::Receiver<SessionState>,
}

impl ViewContext {
    pub fn new(client: Rc<RemoteClient>, session: watch::Receiver<SessionState>) -> Self {
        Self { client, session }
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session.borrow().identity().cloned()
    }
}

/// Reduces a call to its payload or the message the screen should show.
pub(crate) fn settle<T>(
    outcome: Result<ResourceResult<T>>,
    label: &str,
) -> std::result::Result<T, String> {
    match outcome {
        Err(err) => {
            warn!(call = label, error = %format!("{:#}", err), "transport failure");
            Err(GENERIC_ERROR.to_string())
        }
        Ok(res) if res.is_success => res.into_payload().ok_or_else(|| {
            warn!(call = label, "success without payload");
            UNEXPECTED_RESPONSE.to_string()
        }),
        Ok(res) => Err(failure_message(&res)),
    }
}

/// Like [`settle`] for calls whose payload is optional: a success that
/// carries `data: null` is still a success.
pub(crate) fn settle_optional<T>(
    outcome: Result<ResourceResult<T>>,
    label: &str,
) -> std::result::Result<Option<T>, String> {
    match outcome {
        Err(err) => {
            warn!(call = label, error = %format!("{:#}", err), "transport failure");
            Err(GENERIC_ERROR.to_string())
        }
        Ok(res) if res.is_success => Ok(res.into_payload()),
        Ok(res) => Err(failure_message(&res)),
    }
}

/// Like [`settle`] for calls whose payload does not matter.
pub(crate) fn settle_ack<T>(
    outcome: Result<ResourceResult<T>>,
    label: &str,
) -> std::result::Result<(), String> {
    settle_optional(outcome, label).map(|_| ())
}

pub(crate) fn failure_message<T>(res: &ResourceResult<T>) -> String {
    let summary = res.summary();
    if summary.is_empty() {
        format!("request failed ({})", res.status_code)
    } else {
        summary
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
