//! Toast queue drain.

use axum::Json;
use serde_json::{Value, json};
use tower_sessions::Session;

use crate::error::Result;
use crate::middleware::take_toasts;

/// Return and clear the toasts queued by redirects.
pub async fn drain(session: Session) -> Result<Json<Value>> {
    let toasts = take_toasts(&session).await?;
    Ok(Json(json!({ "success": true, "toasts": toasts })))
}
