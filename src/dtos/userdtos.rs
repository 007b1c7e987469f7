use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::usermodel::User;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct LoginUserDto {
    #[validate(length(min = 1, message = "Username is required."))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(
        length(min = 1, message = "First name is required"),
        length(max = 50, message = "First name must not exceed 50 characters")
    )]
    #[serde(rename = "firstName")]
    pub first_name: String,

    #[validate(
        length(min = 1, message = "Last name is required"),
        length(max = 50, message = "Last name must not exceed 50 characters")
    )]
    #[serde(rename = "lastName")]
    pub last_name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        length(max = 50, message = "Email must not exceed 50 characters"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Username is required"),
        length(max = 30, message = "Username must not exceed 30 characters")
    )]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub role: Option<String>,

    #[serde(rename = "departmentId")]
    pub department_id: Option<String>,

    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    #[validate(length(max = 50, message = "First name must not exceed 50 characters"))]
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    #[validate(length(max = 50, message = "Last name must not exceed 50 characters"))]
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    #[validate(
        length(max = 50, message = "Email must not exceed 50 characters"),
        email(message = "Email is invalid")
    )]
    pub email: Option<String>,

    #[validate(length(max = 30, message = "Username must not exceed 30 characters"))]
    pub username: Option<String>,

    pub password: Option<String>,

    pub role: Option<String>,

    #[serde(rename = "departmentId")]
    pub department_id: Option<String>,

    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterUserDto {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub role: String,
    #[serde(rename = "departmentId")]
    pub department_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    #[serde(rename = "updatedTime")]
    pub updated_time: DateTime<Utc>,
}

impl FilterUserDto {
    // Passwords never leave the API, even encrypted.
    pub fn filter_user(user: &User) -> Self {
        FilterUserDto {
            id: user.id.to_owned(),
            first_name: user.first_name.to_owned(),
            last_name: user.last_name.to_owned(),
            email: user.email.to_owned(),
            username: user.username.to_owned(),
            password: "***".to_string(),
            is_active: user.is_active,
            role: user.role.to_str().to_string(),
            department_id: user.department_id.to_owned(),
            user_id: user.user_id.to_owned(),
            created_by: user.created_by.to_owned(),
            created_time: user.created_time,
            updated_time: user.updated_time,
        }
    }

    pub fn filter_users(users: &[User]) -> Vec<FilterUserDto> {
        users.iter().map(FilterUserDto::filter_user).collect()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserData {
    pub user: FilterUserDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponseDto {
    pub status: String,
    pub data: UserData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponseDto {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "departmentId")]
    pub department_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub token: Option<String>,
}

impl LoginResponseDto {
    pub fn from_user(user: &User, token: Option<String>) -> Self {
        LoginResponseDto {
            user_id: user.user_id.to_owned(),
            email: user.email.to_owned(),
            role: user.role.to_str().to_string(),
            department_id: user.department_id.to_owned(),
            full_name: user.full_name(),
            is_active: user.is_active,
            token,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUserData {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "departmentId")]
    pub department_id: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserLoginResponseDto {
    pub status: String,
    pub response: AuthUserData,
}

// Response envelope of the legacy /api/account surface.
#[derive(Debug, Serialize)]
pub struct ApiResultDto<T: Serialize> {
    pub status: String,
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResultDto<T> {
    pub fn success(data: Option<T>, message: impl Into<String>) -> Self {
        ApiResultDto {
            status: "Success".to_string(),
            data,
            message: message.into(),
        }
    }

    pub fn error(data: Option<T>, message: impl Into<String>) -> Self {
        ApiResultDto {
            status: "Error".to_string(),
            data,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UsernameQueryDto {
    pub username: Option<String>,
}
