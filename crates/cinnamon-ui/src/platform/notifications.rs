//! Browser notifications.

use async_trait::async_trait;
use cinnamon_core::{Error, Notifier, Permission, Result};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Notification, NotificationOptions};

use crate::error::describe_js;

/// Maps the permission string the browser resolves with.
#[must_use]
pub fn parse_permission(value: &str) -> Permission {
    match value {
        "granted" => Permission::Granted,
        "denied" => Permission::Denied,
        _ => Permission::Default,
    }
}

/// The page's Notification API.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

#[async_trait(?Send)]
impl Notifier for BrowserNotifier {
    async fn request_permission(&self) -> Result<Permission> {
        let failed = |e: wasm_bindgen::JsValue| Error::PermissionFailed {
            reason: describe_js(&e),
        };
        let promise = Notification::request_permission().map_err(failed)?;
        let answer = JsFuture::from(promise).await.map_err(failed)?;
        Ok(parse_permission(&answer.as_string().unwrap_or_default()))
    }

    fn notify(&self, title: &str, body: &str) -> Result<()> {
        let options = NotificationOptions::new();
        options.set_body(body);
        Notification::new_with_options(title, &options)
            .map(|_| ())
            .map_err(|e| Error::PermissionFailed {
                reason: describe_js(&e),
            })
    }
}
