// handler/account.rs
use std::sync::Arc;

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{ApiResultDto, LoginResponseDto, LoginUserDto, UsernameQueryDto},
    error::ApiError,
    middleware::{auth, JWTAuthMiddeware},
    utils::token,
    AppState,
};

use super::validation_errors;

pub fn account_handler() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/user", get(get_user))
        .route("/validate", post(validate_credentials))
        .route("/signout", post(signout))
        .route("/profile", get(get_profile).layer(middleware::from_fn(auth)))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
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

    let valid = app_state
        .user_service
        .validate_credentials(&body.username, &body.password)
        .await
        .map_err(|e| {
            tracing::error!("Error during login for user {}: {}", body.username, e);
            ApiError::server_error("An error occurred during login. Please try again.")
        })?;

    if !valid {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let user = app_state
        .db_client
        .get_user(None, None, Some(&body.username), None)
        .await
        .map_err(|e| {
            tracing::error!("Error during login for user {}: {}", body.username, e);
            ApiError::server_error("An error occurred during login. Please try again.")
        })?;

    let user = match user {
        Some(user) => user,
        None => return Err(ApiError::unauthorized("User not found")),
    };

    if !user.is_active {
        return Err(ApiError::unauthorized(
            "Account is deactivated. Please contact administrator.",
        ));
    }

    let token = token::create_token(
        &user,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| {
        tracing::error!("Error during login for user {}: {}", user.username, e);
        ApiError::server_error("An error occurred during login. Please try again.")
    })?;

    let response = LoginResponseDto::from_user(&user, Some(token));

    Ok((
        StatusCode::OK,
        Json(ApiResultDto::success(Some(response), "Login successful")),
    )
        .into_response())
}

pub async fn get_user(
    Query(query): Query<UsernameQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let username = query.username.unwrap_or_default();

    if username.trim().is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }

    let user = app_state
        .db_client
        .get_user(None, None, Some(&username), None)
        .await
        .map_err(|e| {
            tracing::error!("Error getting user {}: {}", username, e);
            ApiError::server_error("An error occurred while retrieving user information")
        })?
        .ok_or(ApiError::not_found("User not found"))?;

    let response = LoginResponseDto::from_user(&user, None);

    Ok(Json(ApiResultDto::success(Some(response), "User found")))
}

pub async fn validate_credentials(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
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

    let valid = app_state
        .user_service
        .validate_credentials(&body.username, &body.password)
        .await
        .map_err(|e| {
            tracing::error!(
                "Error validating credentials for user {}: {}",
                body.username,
                e
            );
            ApiError::server_error("An error occurred during validation")
        })?;

    if !valid {
        return Ok((
            StatusCode::OK,
            Json(ApiResultDto::success(Some(false), "Invalid credentials")),
        )
            .into_response());
    }

    let user = app_state
        .db_client
        .get_user(None, None, Some(&body.username), None)
        .await
        .map_err(|e| {
            tracing::error!(
                "Error validating credentials for user {}: {}",
                body.username,
                e
            );
            ApiError::server_error("An error occurred during validation")
        })?
        .ok_or_else(|| ApiError::server_error("An error occurred during validation"))?;

    let response = LoginResponseDto::from_user(&user, None);

    Ok((
        StatusCode::OK,
        Json(ApiResultDto::success(Some(response), "Credentials valid")),
    )
        .into_response())
}

pub async fn signout() -> Result<impl IntoResponse, ApiError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let mut response = Json(ApiResultDto::<()>::success(None, "Signed out successfully"))
        .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn get_profile(
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, ApiError> {
    let user = &user.user;

    let profile = serde_json::json!({
        "userId": user.user_id,
        "username": user.username,
        "role": user.role.to_str(),
        "email": user.email,
        "department": user.department_id,
        "isAuthenticated": true,
        "authenticationType": "Bearer",
    });

    Ok(Json(ApiResultDto::success(
        Some(profile),
        "Profile retrieved successfully",
    )))
}
