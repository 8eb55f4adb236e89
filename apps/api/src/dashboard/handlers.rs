use axum::Json;

use crate::dashboard::{dashboard_summary, DashboardSummary};

/// GET /api/v1/dashboard
pub async fn handle_dashboard() -> Json<DashboardSummary> {
    Json(dashboard_summary())
}
