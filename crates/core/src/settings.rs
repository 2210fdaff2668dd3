//! Settings panel behavior: interval choices and error notifications.

use std::cell::Cell;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::result::{Result, ResultExt};
use crate::scheduler::RefreshConfig;

/// Outcome of a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// The user dismissed the prompt without deciding.
    Default,
}

/// Platform notification facility.
#[async_trait(?Send)]
pub trait Notifier {
    /// Asks the user for permission to show notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform request itself fails.
    async fn request_permission(&self) -> Result<Permission>;

    /// Shows one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses to show it.
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}

/// State the notification toggle settles on after a user change.
///
/// Turning it off never prompts. Turning it on prompts, and anything but an
/// explicit grant reverts it to off.
pub async fn resolve_notification_toggle<N: Notifier + ?Sized>(
    requested: bool,
    notifier: &N,
) -> bool {
    if !requested {
        return false;
    }
    match notifier.request_permission().await {
        Ok(Permission::Granted) => true,
        Ok(permission) => {
            warn!(?permission, "notification permission not granted");
            false
        }
        Err(e) => {
            warn!(error = %e, "notification permission request failed");
            false
        }
    }
}

/// One entry of the refresh-interval selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalChoice {
    pub secs: u32,
    pub label: String,
}

/// Selector entries for the configured choices; invalid ones are dropped.
#[must_use]
pub fn interval_choices(secs: &[u32]) -> Vec<IntervalChoice> {
    secs.iter()
        .copied()
        .filter(|&s| RefreshConfig::from_secs(s).is_ok())
        .map(|s| IntervalChoice {
            secs: s,
            label: if s == 1 {
                "1 second".to_string()
            } else {
                format!("{s} seconds")
            },
        })
        .collect()
}

/// Raises a notification when a refresh observes new errors.
pub struct ErrorNotifier<N> {
    notifier: N,
    enabled: Cell<bool>,
}

impl<N: Notifier> ErrorNotifier<N> {
    /// Starts disabled.
    pub const fn new(notifier: N) -> Self {
        Self {
            notifier,
            enabled: Cell::new(false),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Applies a toggle change and returns the state it settled on.
    pub async fn set_enabled(&self, requested: bool) -> bool {
        let enabled = resolve_notification_toggle(requested, &self.notifier).await;
        self.enabled.set(enabled);
        debug!(requested, enabled, "notification toggle changed");
        enabled
    }

    /// Notifies about `new_errors` if enabled; returns whether one was shown.
    pub fn on_new_errors(&self, new_errors: u64) -> bool {
        if !self.enabled.get() || new_errors == 0 {
            return false;
        }
        let body = if new_errors == 1 {
            "1 new connection error".to_string()
        } else {
            format!("{new_errors} new connection errors")
        };
        self.notifier
            .notify("Cinnamon", &body)
            .into_option_logged("failed to show error notification")
            .is_some()
    }
}
