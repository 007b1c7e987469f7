use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Agent,
    Staff,
}

impl UserRole {
    pub fn to_str(&self) -> &str {
        match self {
            UserRole::SuperAdmin => "superadmin",
            UserRole::Admin => "admin",
            UserRole::Agent => "agent",
            UserRole::Staff => "staff",
        }
    }

    pub fn from_str(value: &str) -> Option<UserRole> {
        match value.to_lowercase().as_str() {
            "superadmin" => Some(UserRole::SuperAdmin),
            "admin" => Some(UserRole::Admin),
            "agent" => Some(UserRole::Agent),
            "staff" => Some(UserRole::Staff),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct User {
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
    pub role: UserRole,
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

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
