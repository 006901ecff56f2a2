use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::Registry;
use crate::error::{InfraError, InfraResult};
use crate::models::user::{OAuthProfile, SessionUser};
use crate::renderer::{render_landing, render_nav, render_root_layout};
use crate::services::{SignInError, SignInOutcome};

/// Run the HTTP server
pub async fn serve(addr: std::net::SocketAddr, registry: Arc<Registry>) -> InfraResult<()> {
    let app = router(registry);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(InfraError::from)?;
    axum::serve(listener, app).await.map_err(InfraError::from)?;
    Ok(())
}

pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/auth/providers", get(providers))
        .route("/api/auth/callback/google", post(google_callback))
        .route("/api/auth/session", get(session))
        .with_state(registry)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn index(State(registry): State<Arc<Registry>>) -> Html<String> {
    let meta = &registry.config.site;
    Html(render_root_layout(meta, &render_nav(meta, None), &render_landing(meta)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderInfo {
    id: &'static str,
    name: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    signin_url: String,
    callback_url: String,
}

async fn providers(State(registry): State<Arc<Registry>>) -> Json<serde_json::Value> {
    let base = registry.config.public_url.trim_end_matches('/');
    let google = ProviderInfo {
        id: "google",
        name: "Google",
        kind: "oauth",
        signin_url: format!("{base}/api/auth/signin/google"),
        callback_url: format!("{base}/api/auth/callback/google"),
    };

    Json(json!({ "google": google }))
}

#[derive(Debug, Serialize)]
struct SignInResponse {
    ok: bool,
    created: bool,
    user: SessionUser,
}

async fn google_callback(State(registry): State<Arc<Registry>>, Json(profile): Json<OAuthProfile>) -> Response {
    match registry.services.auth.sign_in(&profile).await {
        SignInOutcome::Admitted(p) => Json(SignInResponse {
            ok: true,
            created: p.created,
            user: SessionUser::from(&p.user),
        })
        .into_response(),
        // The reason stays in the server log
        SignInOutcome::Denied(_) => {
            (StatusCode::FORBIDDEN, Json(json!({ "ok": false, "error": "AccessDenied" }))).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    email: String,
}

async fn session(
    State(registry): State<Arc<Registry>>,
    Query(q): Query<SessionQuery>,
) -> Result<Json<SessionUser>, SignInError> {
    let user = registry.services.auth.session(&q.email).await?;
    Ok(Json(user))
}

impl IntoResponse for SignInError {
    fn into_response(self) -> Response {
        let status = match &self {
            SignInError::UnknownUser(_) => StatusCode::NOT_FOUND,
            SignInError::MissingEmail | SignInError::Validation(_) => StatusCode::BAD_REQUEST,
            SignInError::UsernameTaken(_) => StatusCode::CONFLICT,
            SignInError::Database(e) => {
                tracing::error!(error = %e, "storage failure while serving request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match status {
            StatusCode::INTERNAL_SERVER_ERROR => "internal error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
