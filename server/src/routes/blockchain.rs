//! Milestone sync endpoint

use crate::error::ApiResult;
use crate::routes::CurrentUser;
use crate::state::AppState;
use axum::extract::State;
use axum::{Extension, Json};
use constrix_core::SyncOutcome;
use constrix_engine::sync_pending;

/// POST /api/blockchain/sync
///
/// Pushes every unsynced milestone for the caller to the chain gateway.
/// Per-record rejections come back inline in the result; an unreachable
/// gateway surfaces as 502 and leaves the whole batch pending.
pub async fn sync(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> ApiResult<Json<SyncOutcome>> {
    let outcome = sync_pending(&state.db, state.chain.as_ref(), user.id).await?;
    Ok(Json(outcome))
}
