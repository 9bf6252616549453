#![allow(missing_docs)]

use std::collections::HashMap;

use zbus::{Result, proxy, zvariant::Value};

/// Desktop notification service proxy
///
/// Covers the single method this tool needs from the freedesktop
/// notification spec.
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
pub trait Notifications {
    /// Shows a notification and returns its server-assigned id.
    ///
    /// A non-zero `replaces_id` updates that notification in place instead
    /// of creating a new one.
    #[allow(clippy::too_many_arguments)]
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: HashMap<&str, Value<'_>>,
        expire_timeout: i32,
    ) -> Result<u32>;
}
