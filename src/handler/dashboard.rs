// handler/dashboard.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::dashboarddtos::DashboardScopeQueryDto,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

pub fn dashboard_handler() -> Router {
    Router::new()
        .route("/data", get(get_dashboard_data))
        .route("/stats", get(get_dashboard_stats))
        .route(
            "/data/:role",
            get(get_dashboard_data_for_role).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
}

// The caller's own dashboard; scope comes from the authenticated user.
pub async fn get_dashboard_data(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> impl IntoResponse {
    let result = app_state
        .dashboard_service
        .get_dashboard_data(
            user.user.role.to_str(),
            &user.user.user_id,
            Some(user.user.department_id.as_str()),
        )
        .await;

    match result {
        Ok(data) => Json(serde_json::json!({
            "success": true,
            "data": data,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Error retrieving dashboard data: {}", e);
            internal_server_error()
        }
    }
}

pub async fn get_dashboard_stats(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> impl IntoResponse {
    let result = app_state
        .dashboard_service
        .get_dashboard_stats(
            user.user.role.to_str(),
            &user.user.user_id,
            Some(user.user.department_id.as_str()),
        )
        .await;

    match result {
        Ok(stats) => Json(serde_json::json!({
            "success": true,
            "data": stats,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Error retrieving dashboard stats: {}", e);
            internal_server_error()
        }
    }
}

// Administrators can inspect the dashboard of any role/user/department.
pub async fn get_dashboard_data_for_role(
    Path(role): Path<String>,
    Query(query): Query<DashboardScopeQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    let user_id = query.user_id.unwrap_or_default();

    let result = app_state
        .dashboard_service
        .get_dashboard_data(&role, &user_id, query.department_id.as_deref())
        .await;

    match result {
        Ok(data) => Json(serde_json::json!({
            "success": true,
            "data": data,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Error retrieving dashboard data for role {}: {}", role, e);
            internal_server_error()
        }
    }
}

fn internal_server_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "success": false,
            "message": "Internal server error",
        })),
    )
        .into_response()
}
