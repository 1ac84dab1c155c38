//! Guarded account endpoints.
//!
//! `/account` is a page route: unauthenticated visitors are redirected to the
//! signup route. `/api/account` is its JSON twin and answers 401 instead.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::user::UserView;
use crate::services::AuthService;
use crate::state::AppState;

#[instrument(skip(state, current), fields(user_id = %current.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<Value>> {
    let user = AuthService::new(state.pool()).get_user(current.id).await?;
    Ok(Json(json!({ "success": true, "user": UserView::from(&user) })))
}
