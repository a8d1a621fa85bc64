//! User-visible status shared by every component of one editor session.

use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// What the user should currently see in the status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Notice {
    /// Nothing to report
    #[default]
    Idle,
    /// Work in progress
    Loading(String),
    /// Last action succeeded
    Success(String),
    /// Action refused or had no effect
    Warning(String),
    /// Action failed
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Idle => Ok(()),
            Notice::Loading(message) | Notice::Success(message) => f.write_str(message),
            Notice::Warning(message) => write!(f, "warning: {}", message),
            Notice::Error(message) => write!(f, "error: {}", message),
        }
    }
}

impl Notice {
    /// Whether work is in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self, Notice::Loading(_))
    }

    /// Whether this notice reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Explicit handle for reporting status.
///
/// Cloning is cheap; every clone publishes to the same watchers. Create one per
/// application session and pass it to whatever needs to report progress.
///
/// # Examples
///
/// ```
/// use folio_editor::{Notice, StatusContext};
///
/// let status = StatusContext::new();
/// let watcher = status.subscribe();
///
/// status.set_loading("Saving");
/// assert_eq!(*watcher.borrow(), Notice::Loading("Saving".into()));
///
/// status.set_success("Saved");
/// assert_eq!(status.current(), Notice::Success("Saved".into()));
/// ```
#[derive(Debug, Clone)]
pub struct StatusContext {
    sender: Arc<watch::Sender<Notice>>,
}

impl Default for StatusContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusContext {
    /// Fresh context showing [`Notice::Idle`].
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Notice::Idle);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Report a failure.
    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        error!(status = %message, "Status: error");
        self.publish(Notice::Error(message));
    }

    /// Report success.
    pub fn set_success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(status = %message, "Status: success");
        self.publish(Notice::Success(message));
    }

    /// Report a refused or no-op action.
    pub fn set_warning(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(status = %message, "Status: warning");
        self.publish(Notice::Warning(message));
    }

    /// Report work in progress.
    pub fn set_loading(&self, message: impl Into<String>) {
        let message = message.into();
        debug!(status = %message, "Status: loading");
        self.publish(Notice::Loading(message));
    }

    /// Back to idle.
    pub fn clear(&self) {
        debug!("Status cleared");
        self.publish(Notice::Idle);
    }

    /// Latest notice.
    pub fn current(&self) -> Notice {
        self.sender.borrow().clone()
    }

    /// Watch for changes.
    pub fn subscribe(&self) -> watch::Receiver<Notice> {
        self.sender.subscribe()
    }

    fn publish(&self, notice: Notice) {
        // Succeeds with or without receivers.
        self.sender.send_replace(notice);
    }
}
