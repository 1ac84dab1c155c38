//! Authentication gate and extractors.
//!
//! A session is logged in when it holds a [`CurrentUser`] under
//! [`keys::TOKEN`]. The gate decision is computed by [`AuthGate::check`];
//! the extractors turn a redirect decision into the response that suits the
//! request (browser navigation, HTMX swap, or JSON API call).

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri},
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tower_sessions::Session;

use crate::models::session::keys;
use crate::models::{CurrentUser, Toast};
use crate::state::AppState;

use super::toast::queue_toast;

/// Message shown when a guarded route is visited without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please login or create an account to continue";

/// Outcome of the authentication gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the guarded content.
    Proceed,
    /// Send the visitor to the signup route, remembering where they were.
    Redirect { location: String, toast: Toast },
}

/// Route guard configuration.
#[derive(Debug, Clone)]
pub struct AuthGate {
    redirect_path: String,
}

impl AuthGate {
    /// Create a gate that redirects to `redirect_path`.
    #[must_use]
    pub fn new(redirect_path: impl Into<String>) -> Self {
        Self {
            redirect_path: redirect_path.into(),
        }
    }

    /// Decide whether a request may proceed.
    ///
    /// `current_path` is the request path including its query string.
    #[must_use]
    pub fn check(&self, authenticated: bool, current_path: &str) -> GateDecision {
        if authenticated {
            return GateDecision::Proceed;
        }

        GateDecision::Redirect {
            location: format!(
                "{}?redirect={}",
                self.redirect_path,
                urlencoding::encode(current_path)
            ),
            toast: Toast::error(LOGIN_REQUIRED_MESSAGE),
        }
    }
}

/// Rejection produced by the authentication extractors.
#[derive(Debug)]
pub enum AuthRejection {
    /// Full-page navigation: 303 to the signup route.
    RedirectToSignup { location: String },
    /// HTMX request: client-side redirect plus toast trigger.
    HtmxRedirect { location: String, toast: Toast },
    /// API request: 401 with the toast in headers and body.
    Unauthorized { toast: Toast },
    /// Logged in, but the role does not allow this route.
    Forbidden,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToSignup { location } => Redirect::to(&location).into_response(),
            Self::HtmxRedirect { location, toast } => (
                [("HX-Redirect", location), ("HX-Trigger", toast.hx_trigger())],
                StatusCode::OK,
            )
                .into_response(),
            Self::Unauthorized { toast } => (
                StatusCode::UNAUTHORIZED,
                [("HX-Trigger", toast.hx_trigger())],
                Json(json!({ "success": false, "message": toast.message })),
            )
                .into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({ "success": false, "message": "Access denied" })),
            )
                .into_response(),
        }
    }
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

async fn session_user(parts: &Parts) -> (Option<Session>, Option<CurrentUser>) {
    let Some(session) = parts.extensions.get::<Session>().cloned() else {
        return (None, None);
    };
    let user = session
        .get::<CurrentUser>(keys::TOKEN)
        .await
        .ok()
        .flatten();
    (Some(session), user)
}

/// Run the gate for a request and shape the rejection.
async fn require_user(parts: &Parts, state: &AppState) -> Result<CurrentUser, AuthRejection> {
    let (session, user) = session_user(parts).await;

    // Nested routers see a stripped URI; the gate needs the one the client sent
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map_or(&parts.uri, |original| &original.0);
    let current_path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), |pq| pq.as_str().to_owned());
    let gate = AuthGate::new(&state.config().auth_redirect_path);

    let (location, toast) = match gate.check(user.is_some(), &current_path) {
        GateDecision::Proceed => {
            return user.ok_or_else(|| AuthRejection::Unauthorized {
                toast: Toast::error(LOGIN_REQUIRED_MESSAGE),
            });
        }
        GateDecision::Redirect { location, toast } => (location, toast),
    };

    if uri.path().starts_with("/api/") {
        return Err(AuthRejection::Unauthorized { toast });
    }
    if is_htmx(&parts.headers) {
        return Err(AuthRejection::HtmxRedirect { location, toast });
    }

    if let Some(session) = session
        && let Err(e) = queue_toast(&session, toast).await
    {
        tracing::warn!(error = %e, "Failed to queue login toast");
    }
    Err(AuthRejection::RedirectToSignup { location })
}

/// Extractor that requires a logged-in user.
///
/// # Example
///
/// ```rust,ignore
/// async fn account(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_user(parts, state).await.map(Self)
    }
}

/// Extractor that requires an `admin` user.
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require_user(parts, state).await?;
        if user.role != flipzokart_core::UserRole::Admin {
            tracing::warn!(user_id = %user.id, "Non-admin denied admin route");
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(user))
    }
}

/// Extractor that requires a seller, including one still onboarding.
pub struct RequireSeller(pub CurrentUser);

impl FromRequestParts<AppState> for RequireSeller {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = require_user(parts, state).await?;
        if !user.role.is_seller() {
            return Err(AuthRejection::Forbidden);
        }
        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user. Never rejects.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_user(parts).await.1))
    }
}

/// Store the logged-in user in the session.
///
/// The session ID is cycled first to prevent fixation.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(keys::TOKEN, user).await
}

/// Remove the logged-in user from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<CurrentUser>(keys::TOKEN).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_proceeds() {
        let gate = AuthGate::new("/signup");
        assert_eq!(gate.check(true, "/account"), GateDecision::Proceed);
    }

    #[test]
    fn test_redirect_encodes_path_and_query() {
        let gate = AuthGate::new("/signup");
        let GateDecision::Redirect { location, toast } =
            gate.check(false, "/checkout?step=2&coupon=SAVE10")
        else {
            panic!("expected redirect");
        };
        assert_eq!(
            location,
            "/signup?redirect=%2Fcheckout%3Fstep%3D2%26coupon%3DSAVE10"
        );
        assert_eq!(toast, Toast::error(LOGIN_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_redirect_path_is_configurable() {
        let gate = AuthGate::new("/login");
        assert!(matches!(
            gate.check(false, "/"),
            GateDecision::Redirect { location, .. } if location == "/login?redirect=%2F"
        ));
    }

    #[test]
    fn test_rejection_statuses() {
        let toast = Toast::error(LOGIN_REQUIRED_MESSAGE);
        let res = AuthRejection::RedirectToSignup {
            location: "/signup?redirect=%2Faccount".to_owned(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/signup?redirect=%2Faccount")
        );

        let res = AuthRejection::Unauthorized {
            toast: toast.clone(),
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().contains_key("HX-Trigger"));

        let res = AuthRejection::HtmxRedirect {
            location: "/signup".to_owned(),
            toast,
        }
        .into_response();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("HX-Redirect"));

        assert_eq!(
            AuthRejection::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_htmx_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", axum::http::HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
    }
}
