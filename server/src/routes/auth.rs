//! Wallet-based login, session introspection, logout

use crate::error::{ApiError, ApiResult};
use crate::routes::{CurrentUser, SessionToken};
use crate::state::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use constrix_core::{is_valid_wallet_address, Error, User};
use constrix_persistence::sqlite::sessions;
use constrix_persistence::sqlite::users;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub wallet_address: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/auth/login
///
/// Creates the account on first login. Addresses are normalized to lowercase
/// so checksummed and lowercase forms resolve to the same user.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if !is_valid_wallet_address(&body.wallet_address) {
        return Err(ApiError(Error::Validation(
            "Invalid wallet address".to_string(),
        )));
    }

    let wallet = body.wallet_address.to_lowercase();
    let user = users::get_or_create(state.db.pool(), &wallet).await?;

    let token = Uuid::new_v4().to_string();
    sessions::create(state.db.pool(), &token, user.id).await?;

    info!("User {} logged in", user.id);
    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "user": user }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> ApiResult<Json<serde_json::Value>> {
    sessions::delete(state.db.pool(), &token).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
