// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, put},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{ApiResultDto, FilterUserDto, RegisterUserDto, UpdateUserDto, UserData, UserResponseDto},
    error::{ApiError, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    service::error::ServiceError,
    AppState,
};

use super::validation_errors;

pub fn users_handler() -> Router {
    Router::new()
        .route(
            "/",
            get(get_users)
                .post(create_user)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
                })),
        )
        .route("/me", get(get_me))
        .route("/exists/:username", get(user_exists))
        .route(
            "/role/:role",
            get(get_users_by_role).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
        .route(
            "/department/:department",
            get(get_users_by_department).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
        .route("/:user_id", get(get_user))
        .route(
            "/:user_id",
            put(update_user)
                .delete(delete_user)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
                })),
        )
        .route(
            "/:user_id/deactivate",
            patch(deactivate_user).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
        .route(
            "/:user_id/activate",
            patch(activate_user).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin, UserRole::SuperAdmin])
            })),
        )
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    let response_data = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    };

    Ok(Json(response_data))
}

pub async fn get_users(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state.db_client.get_users().await.map_err(|e| {
        tracing::error!("Error retrieving users: {}", e);
        ApiError::server_error("An error occurred while retrieving users")
    })?;

    let user_list: Vec<serde_json::Value> = users
        .iter()
        .map(|user| {
            serde_json::json!({
                "id": user.id,
                "userId": user.user_id,
                "username": user.username,
                "email": user.email,
                "role": user.role.to_str(),
                "departmentId": user.department_id,
                "firstName": user.first_name,
                "lastName": user.last_name,
                "isActive": user.is_active,
                "createdTime": user.created_time,
                "password": "***"
            })
        })
        .collect();

    Ok(Json(ApiResultDto::success(
        Some(user_list),
        "Users retrieved successfully",
    )))
}

pub async fn get_user(
    Path(user_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = app_state
        .db_client
        .get_user(None, Some(&user_id), None, None)
        .await
        .map_err(|e| {
            tracing::error!("Error getting user {}: {}", user_id, e);
            ApiError::server_error("An error occurred while retrieving user information")
        })?
        .ok_or(ApiError::not_found("User not found"))?;

    let response = serde_json::json!({
        "id": user.id,
        "userId": user.user_id,
        "username": user.username,
        "email": user.email,
        "firstName": user.first_name,
        "lastName": user.last_name,
        "role": user.role.to_str(),
        "departmentId": user.department_id,
        "isActive": user.is_active,
        "createdTime": user.created_time,
        "updatedTime": user.updated_time
    });

    Ok(Json(ApiResultDto::success(Some(response), "User found")))
}

pub async fn user_exists(
    Path(username): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let exists = app_state
        .user_service
        .user_exists(&username)
        .await
        .map_err(|e| {
            tracing::error!("Error checking if user exists {}: {}", username, e);
            ApiError::server_error("An error occurred while checking user existence")
        })?;

    let message = if exists { "User exists" } else { "User does not exist" };

    Ok(Json(ApiResultDto::success(Some(exists), message)))
}

pub async fn get_users_by_role(
    Path(role): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    // An unknown role name matches no rows rather than failing the request.
    let users = match UserRole::from_str(&role) {
        Some(parsed) => app_state
            .db_client
            .get_users_by_role(parsed)
            .await
            .map_err(|e| {
                tracing::error!("Error retrieving users by role {}: {}", role, e);
                ApiError::server_error("An error occurred while retrieving users")
            })?,
        None => Vec::new(),
    };

    let user_list: Vec<serde_json::Value> = users
        .iter()
        .map(|user| {
            serde_json::json!({
                "id": user.id,
                "userId": user.user_id,
                "username": user.username,
                "email": user.email,
                "role": user.role.to_str(),
                "departmentId": user.department_id,
                "firstName": user.first_name,
                "lastName": user.last_name,
                "isActive": user.is_active,
                "createdTime": user.created_time
            })
        })
        .collect();

    Ok(Json(ApiResultDto::success(
        Some(user_list),
        "Users retrieved successfully",
    )))
}

pub async fn get_users_by_department(
    Path(department): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let users = app_state
        .db_client
        .get_users_by_department(&department)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving users by department {}: {}", department, e);
            ApiError::server_error("An error occurred while retrieving users")
        })?;

    let user_list: Vec<serde_json::Value> = users
        .iter()
        .map(|user| {
            serde_json::json!({
                "id": user.id,
                "userId": user.user_id,
                "username": user.username,
                "email": user.email,
                "role": user.role.to_str(),
                "departmentId": user.department_id,
                "firstName": user.first_name,
                "lastName": user.last_name,
                "isActive": user.is_active,
                "createdTime": user.created_time
            })
        })
        .collect();

    Ok(Json(ApiResultDto::success(
        Some(user_list),
        "Users retrieved successfully",
    )))
}

pub async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
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

    let taken = app_state
        .user_service
        .user_exists(&body.username)
        .await
        .map_err(|e| {
            tracing::error!("Error creating user: {}", e);
            ApiError::server_error(format!("An error occurred while creating user: {}", e))
        })?;

    if taken {
        return Err(ApiError::bad_request("Username already exists"));
    }

    let user = app_state
        .user_service
        .create_user(body)
        .await
        .map_err(|e| match e {
            ServiceError::Validation(message) => ApiError::bad_request(message),
            other => {
                tracing::error!("Error creating user: {}", other);
                ApiError::server_error(format!("An error occurred while creating user: {}", other))
            }
        })?;

    let response = serde_json::json!({
        "id": user.id,
        "userId": user.user_id,
        "username": user.username,
        "email": user.email,
        "role": user.role.to_str(),
        "departmentId": user.department_id,
        "firstName": user.first_name,
        "lastName": user.last_name,
        "isActive": user.is_active,
        "createdTime": user.created_time
    });

    Ok((
        StatusCode::OK,
        Json(ApiResultDto::success(
            Some(response),
            "User created successfully",
        )),
    )
        .into_response())
}

pub async fn update_user(
    Path(user_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateUserDto>,
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

    let updated = app_state
        .user_service
        .update_user(&user_id, body)
        .await
        .map_err(|e| match e {
            ServiceError::Validation(message) => ApiError::bad_request(message),
            other => {
                tracing::error!("Error updating user {}: {}", user_id, other);
                ApiError::server_error("An error occurred while updating user")
            }
        })?;

    let user = match updated {
        Some(user) => user,
        None => return Err(ApiError::not_found("User not found")),
    };

    let response = serde_json::json!({
        "id": user.id,
        "userId": user.user_id,
        "username": user.username,
        "email": user.email,
        "role": user.role.to_str(),
        "departmentId": user.department_id,
        "firstName": user.first_name,
        "lastName": user.last_name,
        "isActive": user.is_active,
        "createdTime": user.created_time,
        "updatedTime": user.updated_time
    });

    Ok((
        StatusCode::OK,
        Json(ApiResultDto::success(
            Some(response),
            "User updated successfully",
        )),
    )
        .into_response())
}

pub async fn delete_user(
    Path(user_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = app_state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting user {}: {}", user_id, e);
            ApiError::server_error("An error occurred while deleting user")
        })?;

    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(ApiResultDto::<()>::success(
        None,
        "User deleted successfully",
    )))
}

pub async fn deactivate_user(
    Path(user_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let found = app_state
        .user_service
        .deactivate_user(&user_id)
        .await
        .map_err(|e| {
            tracing::error!("Error deactivating user {}: {}", user_id, e);
            ApiError::server_error("An error occurred while deactivating user")
        })?;

    if !found {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(ApiResultDto::<()>::success(
        None,
        "User deactivated successfully",
    )))
}

pub async fn activate_user(
    Path(user_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let found = app_state
        .user_service
        .activate_user(&user_id)
        .await
        .map_err(|e| {
            tracing::error!("Error activating user {}: {}", user_id, e);
            ApiError::server_error("An error occurred while activating user")
        })?;

    if !found {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(ApiResultDto::<()>::success(
        None,
        "User activated successfully",
    )))
}
