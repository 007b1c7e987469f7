use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "updatedTime")]
    pub updated_time: DateTime<Utc>,
    #[serde(rename = "updatedBy")]
    pub updated_by: String,
}
