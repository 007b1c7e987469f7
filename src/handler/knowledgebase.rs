// handler/knowledgebase.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};

use crate::{
    dtos::articledtos::{ArticleDetailDto, SaveArticleDto},
    dtos::userdtos::ApiResultDto,
    error::ApiError,
    middleware::{auth, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::knowledge_service::validate_article,
    AppState,
};

pub fn knowledgebase_handler() -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/articles", post(add_article))
        .route("/articles/:id", get(get_article).put(update_article))
        .route(
            "/articles/:id",
            delete(delete_article).layer(middleware::from_fn(auth)),
        )
}

pub async fn get_categories(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .knowledge_service
        .get_categories()
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving knowledge base categories: {}", e);
            ApiError::server_error("An error occurred while retrieving categories")
        })?;

    Ok(Json(categories))
}

pub async fn get_article(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let article = app_state
        .knowledge_service
        .get_article(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving article {}: {}", id, e);
            ApiError::server_error("An error occurred while retrieving article")
        })?
        .ok_or(ApiError::not_found("Article not found"))?;

    Ok(Json(ArticleDetailDto::from_article(&article)))
}

pub async fn add_article(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveArticleDto>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validate_article(&body);
    if !errors.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResultDto::error(
                Some(errors),
                "Please fix the validation errors before saving.",
            )),
        )
            .into_response());
    }

    app_state
        .knowledge_service
        .add_article(body)
        .await
        .map_err(|e| {
            tracing::error!("Error adding article: {}", e);
            ApiError::server_error("An error occurred while adding article")
        })?;

    Ok(Json(ApiResultDto::<()>::success(None, "Article added successfully")).into_response())
}

pub async fn update_article(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveArticleDto>,
) -> Result<impl IntoResponse, ApiError> {
    // Existence is reported before validation.
    if app_state
        .knowledge_service
        .get_article(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error updating article {}: {}", id, e);
            ApiError::server_error("An error occurred while updating article")
        })?
        .is_none()
    {
        return Err(ApiError::not_found("Article not found"));
    }

    let errors = validate_article(&body);
    if !errors.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResultDto::error(
                Some(errors),
                "Please fix the validation errors before saving.",
            )),
        )
            .into_response());
    }

    app_state
        .knowledge_service
        .update_article(&id, body)
        .await
        .map_err(|e| {
            tracing::error!("Error updating article {}: {}", id, e);
            ApiError::server_error("An error occurred while updating article")
        })?
        .ok_or(ApiError::not_found("Article not found"))?;

    Ok(Json(ApiResultDto::<()>::success(None, "Article updated successfully")).into_response())
}

pub async fn delete_article(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, ApiError> {
    if !matches!(user.user.role, UserRole::Admin | UserRole::SuperAdmin) {
        return Err(ApiError::unauthorized(
            "Only administrators can delete articles",
        ));
    }

    let deleted = app_state
        .knowledge_service
        .delete_article(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting article {}: {}", id, e);
            ApiError::server_error("An error occurred while deleting article")
        })?;

    if !deleted {
        return Err(ApiError::not_found("Article not found"));
    }

    Ok(Json(ApiResultDto::<()>::success(None, "Article deleted successfully")))
}
