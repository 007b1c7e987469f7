use chrono::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub department: String,
    #[serde(rename = "submittedBy")]
    pub submitted_by: String,
    #[serde(rename = "submittedDate")]
    pub submitted_date: DateTime<Utc>,
    pub status: String,
    #[serde(rename = "assignedTo")]
    pub assigned_to: String,
    #[serde(rename = "resolvedBy")]
    pub resolved_by: String,
    #[serde(rename = "resolvedDate")]
    pub resolved_date: Option<DateTime<Utc>>,
    #[serde(rename = "resolutionDescription")]
    pub resolution_description: Option<String>,
    #[serde(rename = "agentFeedback")]
    pub agent_feedback: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct TicketAttachment {
    pub id: String,
    #[serde(rename = "ticketId")]
    pub ticket_id: String,
    pub name: String,
    pub size: Option<i32>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    #[serde(rename = "uploadDate")]
    pub upload_date: Option<DateTime<Utc>>,
    pub url: String,
}
