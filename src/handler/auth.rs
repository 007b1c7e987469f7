// handler/auth.rs
use std::sync::Arc;

use axum::{
    http::{header, HeaderMap},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::Cookie;
use validator::Validate;

use crate::{
    dtos::userdtos::{AuthUserData, LoginUserDto, UserLoginResponseDto},
    error::{ErrorMessage, HttpError},
    utils::token,
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

pub async fn login(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|_| HttpError::bad_request("Invalid request data"))?;

    let user = app_state
        .user_service
        .authenticate(&body.username, &body.password)
        .await
        .map_err(|e| {
            tracing::error!("Error during login for user {}: {}", body.username, e);
            HttpError::server_error("An error occurred during login")
        })?
        .ok_or(HttpError::unauthorized(
            ErrorMessage::WrongCredentials.to_string(),
        ))?;

    if !user.is_active {
        return Err(HttpError::unauthorized(
            ErrorMessage::AccountDeactivated.to_string(),
        ));
    }

    let token = token::create_token(
        &user,
        app_state.env.jwt_secret.as_bytes(),
        app_state.env.jwt_maxage,
    )
    .map_err(|e| HttpError::server_error(e.to_string()))?;

    let cookie_duration = time::Duration::minutes(app_state.env.jwt_maxage * 60);
    let cookie = Cookie::build(("token", token.clone()))
        .path("/")
        .max_age(cookie_duration)
        .http_only(true)
        .build();

    let full_name = user.full_name();
    let response = Json(UserLoginResponseDto {
        status: "Success".to_string(),
        response: AuthUserData {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role.to_str().to_string(),
            department_id: user.department_id,
            full_name,
            is_active: user.is_active,
            token,
        },
    });

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let mut response = response.into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}

pub async fn logout() -> Result<impl IntoResponse, HttpError> {
    let cookie = Cookie::build(("token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build();

    let mut headers = HeaderMap::new();
    headers.append(header::SET_COOKIE, cookie.to_string().parse().unwrap());

    let mut response = Json(serde_json::json!({
        "message": "Logged out successfully"
    }))
    .into_response();
    response.headers_mut().extend(headers);

    Ok(response)
}
