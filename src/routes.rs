use std::sync::Arc;

use axum::{middleware, response::IntoResponse, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handler::{
        account::account_handler, auth::auth_handler, dashboard::dashboard_handler,
        departments::departments_handler, feedback::feedback_handler,
        knowledgebase::knowledgebase_handler, tickets::tickets_handler, users::users_handler,
    },
    middleware::auth,
    AppState,
};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let upload_dir = app_state.env.upload_dir.clone();

    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/account", account_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/tickets", tickets_handler())
        .nest("/departments", departments_handler())
        .nest("/knowledgebase", knowledgebase_handler())
        .nest("/feedback", feedback_handler())
        .nest("/dashboard", dashboard_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .nest("/api", api_route)
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}
