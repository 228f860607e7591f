//! API routing and bearer-token authentication

mod analytics;
mod auth;
mod blockchain;
mod habits;
mod rewards;
mod streaks;

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use constrix_core::{Error, User};
use tower_http::cors::CorsLayer;

/// Authenticated user attached to the request by the auth middleware
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Raw session token attached alongside the user (logout needs it)
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/auth/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/habits", get(habits::list).post(habits::create))
        .route(
            "/api/habits/{id}",
            get(habits::get_one).delete(habits::delete),
        )
        .route("/api/habits/{id}/checkin", post(habits::checkin))
        .route("/api/habits/{id}/streak", get(streaks::for_habit))
        .route("/api/streaks", get(streaks::list))
        .route("/api/rewards", get(rewards::list))
        .route("/api/analytics", get(analytics::summary))
        .route("/api/blockchain/sync", post(blockchain::sync))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/health
async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Pull the token out of an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Resolve the bearer token to a user and attach it to the request
async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError(Error::Unauthorized("Access token required".to_string())))?;

    let user = constrix_persistence::sqlite::sessions::resolve(state.db.pool(), &token)
        .await?
        .ok_or_else(|| ApiError(Error::Unauthorized("Invalid or expired token".to_string())))?;

    req.extensions_mut().insert(CurrentUser(user));
    req.extensions_mut().insert(SessionToken(token));
    Ok(next.run(req).await)
}
