// handler/feedback.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    dtos::feedbackdtos::{FeedbackListItemDto, SubmitFeedbackDto, SubmitTicketFeedbackDto},
    dtos::userdtos::ApiResultDto,
    error::ApiError,
    service::feedback_service::{validate_site_feedback, validate_ticket_feedback},
    AppState,
};

pub fn feedback_handler() -> Router {
    Router::new()
        .route("/", get(get_feedbacks).post(submit_feedback))
        .route("/ticket", post(submit_ticket_feedback))
        .route("/:id", get(get_feedback))
}

pub async fn get_feedbacks(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let feedbacks = app_state.feedback_service.get_feedbacks().await.map_err(|e| {
        tracing::error!("Error retrieving feedbacks: {}", e);
        ApiError::server_error("An error occurred while retrieving feedbacks")
    })?;

    Ok(Json(ApiResultDto::success(
        Some(FeedbackListItemDto::from_feedbacks(&feedbacks)),
        "Feedbacks retrieved successfully",
    )))
}

pub async fn get_feedback(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let feedback = app_state
        .feedback_service
        .get_feedback(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving feedback {}: {}", id, e);
            ApiError::server_error("An error occurred while retrieving feedback")
        })?
        .ok_or(ApiError::not_found("Feedback not found"))?;

    Ok(Json(ApiResultDto::success(
        Some(FeedbackListItemDto::from_feedback(&feedback)),
        "Feedback retrieved successfully",
    )))
}

pub async fn submit_feedback(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SubmitFeedbackDto>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validate_site_feedback(&body);
    if !errors.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResultDto::error(
                Some(errors),
                "Please fix the validation errors before submitting.",
            )),
        )
            .into_response());
    }

    app_state
        .feedback_service
        .submit_site_feedback(body)
        .await
        .map_err(|e| {
            tracing::error!("Error submitting feedback: {}", e);
            ApiError::server_error("An error occurred while submitting feedback")
        })?;

    Ok(Json(ApiResultDto::<()>::success(None, "Thank you for your feedback!")).into_response())
}

// Ticket feedback keeps its own `{success, ...}` envelope.
pub async fn submit_ticket_feedback(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SubmitTicketFeedbackDto>,
) -> impl IntoResponse {
    let errors = validate_ticket_feedback(&body);
    if !errors.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "success": false,
                "errors": errors,
            })),
        )
            .into_response();
    }

    match app_state.feedback_service.submit_ticket_feedback(body).await {
        Ok(()) => Json(serde_json::json!({
            "success": true,
            "message": "Feedback submitted successfully!",
        }))
        .into_response(),
        Err(e) => {
            tracing::error!("Error submitting ticket feedback: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "message": format!("An error occurred while submitting feedback: {}", e),
                })),
            )
                .into_response()
        }
    }
}
