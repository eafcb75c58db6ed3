use axum::response::IntoResponse;
use axum::Json;
use replydesk_core::plan::PlanStatus;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// GET /api/v1/plan
///
/// Current plan and conversation quota. Billing is not integrated yet, so
/// every caller sees the free plan.
pub async fn get_plan(_user: AuthUser) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: PlanStatus::mocked(),
    }))
}
