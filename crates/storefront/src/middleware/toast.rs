//! Session-queued toasts for full-page navigations.
//!
//! A redirect cannot carry an `HX-Trigger` header to the next page, so the
//! toast is stored in the session and drained by `GET /api/toasts`.

use tower_sessions::Session;

use crate::models::Toast;
use crate::models::session::keys;

/// Append a toast to the session queue.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn queue_toast(session: &Session, toast: Toast) -> Result<(), tower_sessions::session::Error> {
    let mut queued: Vec<Toast> = session.get(keys::TOASTS).await?.unwrap_or_default();
    queued.push(toast);
    session.insert(keys::TOASTS, queued).await
}

/// Remove and return every queued toast, oldest first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_toasts(session: &Session) -> Result<Vec<Toast>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<Toast>>(keys::TOASTS)
        .await?
        .unwrap_or_default())
}
