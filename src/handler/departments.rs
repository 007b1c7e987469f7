// handler/departments.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::departmentdtos::{
        ActiveDepartmentDto, CreateDepartmentDto, FilterDepartmentDto, UpdateDepartmentDto,
    },
    dtos::userdtos::ApiResultDto,
    error::ApiError,
    middleware::{auth, role_check},
    models::usermodel::UserRole,
    service::error::ServiceError,
    AppState,
};

use super::validation_errors;

pub fn departments_handler() -> Router {
    Router::new()
        .route("/", get(get_departments))
        .route("/active", get(get_active_departments))
        .route("/:id", get(get_department))
        .route(
            "/",
            post(create_department)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id",
            put(update_department)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
                }))
                .layer(middleware::from_fn(auth)),
        )
        .route(
            "/:id",
            delete(delete_department)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
                }))
                .layer(middleware::from_fn(auth)),
        )
}

pub async fn get_departments(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let departments = app_state
        .department_service
        .get_all_departments()
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving departments: {}", e);
            ApiError::server_error("An error occurred while retrieving departments")
        })?;

    Ok(Json(ApiResultDto::success(
        Some(FilterDepartmentDto::filter_departments(&departments)),
        "Departments retrieved successfully",
    )))
}

pub async fn get_active_departments(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let departments = app_state
        .department_service
        .get_active_departments()
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving active departments: {}", e);
            ApiError::server_error("An error occurred while retrieving active departments")
        })?;

    let active = departments
        .iter()
        .map(|department| ActiveDepartmentDto {
            id: department.id.to_owned(),
            name: department.name.to_owned(),
            description: department.description.to_owned(),
        })
        .collect::<Vec<_>>();

    Ok(Json(ApiResultDto::success(
        Some(active),
        "Active departments retrieved successfully",
    )))
}

pub async fn get_department(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let department = app_state
        .department_service
        .get_department(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving department {}: {}", id, e);
            ApiError::server_error("An error occurred while retrieving department")
        })?
        .ok_or(ApiError::not_found("Department not found"))?;

    Ok(Json(ApiResultDto::success(
        Some(FilterDepartmentDto::filter_department(&department)),
        "Department found",
    )))
}

pub async fn create_department(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateDepartmentDto>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(errors) = body.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResultDto::error(
                Some(validation_errors(&errors)),
                "Invalid request data",
            )),
        )
            .into_response());
    }

    let department = app_state
        .department_service
        .create_department(body)
        .await
        .map_err(|e| match e {
            ServiceError::Validation(message) => ApiError::bad_request(message),
            other => {
                tracing::error!("Error creating department: {}", other);
                ApiError::server_error(format!(
                    "An error occurred while creating department: {}",
                    other
                ))
            }
        })?;

    Ok(Json(ApiResultDto::success(
        Some(serde_json::json!({
            "id": department.id,
            "name": department.name,
            "description": department.description,
            "isActive": department.is_active,
            "createdTime": department.created_time,
        })),
        "Department created successfully",
    ))
    .into_response())
}

pub async fn update_department(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateDepartmentDto>,
) -> Result<impl IntoResponse, ApiError> {
    if let Err(errors) = body.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResultDto::error(
                Some(validation_errors(&errors)),
                "Invalid request data",
            )),
        )
            .into_response());
    }

    let department = app_state
        .department_service
        .update_department(&id, body)
        .await
        .map_err(|e| match e {
            ServiceError::Validation(message) => ApiError::bad_request(message),
            other => {
                tracing::error!("Error updating department {}: {}", id, other);
                ApiError::server_error(format!(
                    "An error occurred while updating department: {}",
                    other
                ))
            }
        })?;

    Ok(Json(ApiResultDto::success(
        Some(serde_json::json!({
            "id": department.id,
            "name": department.name,
            "description": department.description,
            "isActive": department.is_active,
            "updatedTime": department.updated_time,
        })),
        "Department updated successfully",
    ))
    .into_response())
}

pub async fn delete_department(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .department_service
        .delete_department(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting department {}: {}", id, e);
            ApiError::server_error("An error occurred while deleting department")
        })?;

    if !deleted {
        return Err(ApiError::not_found("Department not found"));
    }

    Ok(Json(ApiResultDto::<()>::success(
        None,
        "Department deleted successfully",
    )))
}
