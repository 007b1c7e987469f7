use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub message: String,
    pub experience: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "ticketId")]
    pub ticket_id: Option<String>,
}
