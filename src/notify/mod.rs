//! Desktop notifications over the session bus.
//!
//! Absolute-volume notifications keep their server-assigned id in a plain
//! text file under the system temp directory, so a later invocation updates
//! the popup instead of stacking a new one. The file is incidental state:
//! any unreadable or malformed content degrades to a fresh notification.

/// org.freedesktop.Notifications proxy
pub mod proxy;

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use zbus::{Connection, zvariant::Value};

use crate::{
    APP_NAME,
    pulse::{DeviceIndex, StreamIndex},
};

use proxy::NotificationsProxy;

/// Notification errors
#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    /// Session bus or notification daemon unreachable
    #[error("notification service unavailable: {0}")]
    Bus(#[from] zbus::Error),
}

/// One notification to display.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Short title line
    pub summary: String,
    /// Body text
    pub body: String,
    /// Progress bar value (0..=100) shown via the `value` hint
    pub progress: Option<i32>,
    /// Where to persist the notification id; `None` always creates a new
    /// notification
    pub id_file: Option<PathBuf>,
}

/// Id file for a sink input notification.
pub fn sink_input_id_file(stream: StreamIndex) -> PathBuf {
    std::env::temp_dir().join(format!("{APP_NAME}-sink-input-{}", stream.0))
}

/// Id file for a sink notification.
pub fn sink_id_file(device: DeviceIndex) -> PathBuf {
    std::env::temp_dir().join(format!("{APP_NAME}-sink-{}", device.0))
}

/// Shows the notification, updating a previous one when an id is on file.
///
/// # Errors
/// Returns error if the session bus or the notification daemon cannot be
/// reached. Id file problems are logged and never fatal.
pub async fn send(notification: &Notification) -> Result<(), NotifyError> {
    let connection = Connection::session().await?;
    let notifications = NotificationsProxy::new(&connection).await?;

    let replaces_id = notification
        .id_file
        .as_deref()
        .and_then(read_notification_id)
        .unwrap_or(0);
    debug!("notification id file: {:?}", notification.id_file);
    debug!("replacing notification id: {replaces_id}");

    let mut hints = HashMap::new();
    if let Some(progress) = notification.progress {
        hints.insert("value", Value::I32(progress));
    }

    let id = notifications
        .notify(
            APP_NAME,
            replaces_id,
            "",
            &notification.summary,
            &notification.body,
            &[],
            hints,
            -1,
        )
        .await?;

    // Remember the id so the next invocation can update this notification.
    if replaces_id == 0
        && let Some(path) = &notification.id_file
        && let Err(e) = fs::write(path, id.to_string())
    {
        warn!("could not persist notification id to {}: {e}", path.display());
    }

    Ok(())
}

/// Reads a previously stored notification id.
///
/// Missing file means no prior notification. Unreadable or malformed
/// contents are logged and treated the same.
fn read_notification_id(path: &Path) -> Option<u32> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("could not read notification id file {}: {e}", path.display());
            return None;
        }
    };
    match contents.trim().parse() {
        Ok(id) => Some(id),
        Err(_) => {
            warn!("notification id file malformed: {}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn reads_stored_notification_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id");
        fs::write(&path, "42\n").unwrap();
        assert_eq!(read_notification_id(&path), Some(42));
    }

    #[test]
    fn missing_id_file_means_no_prior_notification() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_notification_id(&dir.path().join("absent")), None);
    }

    #[test]
    fn malformed_id_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("id");
        fs::write(&path, "not-a-number").unwrap();
        assert_eq!(read_notification_id(&path), None);
    }

    #[test]
    fn id_files_are_separated_by_kind_and_index() {
        let stream_file = sink_input_id_file(StreamIndex(7));
        let sink_file = sink_id_file(DeviceIndex(7));
        assert_ne!(stream_file, sink_file);
        assert!(
            stream_file
                .file_name()
                .unwrap()
                .to_string_lossy()
                .ends_with("sink-input-7")
        );
    }
}
