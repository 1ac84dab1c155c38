//! Account authentication handlers.
//!
//! Password login backed by argon2 hashes; the session holds the logged-in
//! [`CurrentUser`] under the `token` key.

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use flipzokart_core::UserRole;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::models::user::UserView;
use crate::services::AuthService;
use crate::services::auth::Registration;
use crate::state::AppState;

/// Registration body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub password: String,
}

impl RegisterBody {
    pub(crate) fn registration(&self) -> Registration<'_> {
        Registration {
            name: self.name.trim(),
            email: &self.email,
            phone: self.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            password: &self.password,
        }
    }
}

/// Login body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Write the session for a freshly authenticated user.
pub(crate) async fn start_session(session: &Session, user: &User) -> Result<()> {
    set_current_user(session, &CurrentUser::from(user)).await?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Create a customer account and log it in.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .register(body.registration(), UserRole::User)
        .await?;
    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Account registered");

    Ok((
        axum::http::StatusCode::CREATED,
        Json(json!({ "success": true, "user": UserView::from(&user) })),
    ))
}

/// Log in with email and password.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<serde_json::Value>> {
    if body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_owned(),
        ));
    }

    let user = AuthService::new(state.pool())
        .login(&body.email, &body.password)
        .await?;
    start_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "Logged in");

    Ok(Json(json!({ "success": true, "user": UserView::from(&user) })))
}

/// Log out; succeeds whether or not a session existed.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<serde_json::Value>> {
    clear_current_user(&session).await?;
    session.flush().await?;
    clear_sentry_user();
    Ok(Json(json!({ "success": true })))
}

/// The logged-in user, reloaded from the database.
#[instrument(skip(state, current), fields(user_id = %current.id))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<serde_json::Value>> {
    let user = AuthService::new(state.pool()).get_user(current.id).await?;
    Ok(Json(json!({ "success": true, "user": UserView::from(&user) })))
}
