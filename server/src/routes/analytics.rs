//! Analytics endpoint

use crate::error::ApiResult;
use crate::routes::CurrentUser;
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use chrono::Utc;
use constrix_engine::analytics::{user_analytics, AnalyticsSummary, Period};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub period: Option<String>,
}

/// GET /api/analytics?period=7d|30d|6m|1y
pub async fn summary(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(query): Query<AnalyticsQuery>,
) -> ApiResult<Json<AnalyticsSummary>> {
    let period = match query.period.as_deref() {
        Some(tag) => tag.parse()?,
        None => Period::default(),
    };

    let summary = user_analytics(&state.db, user.id, period, Utc::now().date_naive()).await?;
    Ok(Json(summary))
}
