use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateTicketDto {
    #[validate(
        length(min = 1, message = "Title is required"),
        length(max = 50, message = "Title must not exceed 50 characters")
    )]
    pub title: String,

    #[validate(
        length(min = 1, message = "Description is required"),
        length(max = 2000, message = "Description must not exceed 2000 characters")
    )]
    pub description: String,

    #[validate(
        length(min = 1, message = "Priority is required"),
        length(max = 10, message = "Priority must not exceed 10 characters")
    )]
    pub priority: String,

    #[validate(
        length(min = 1, message = "Department is required"),
        length(max = 50, message = "Department must not exceed 50 characters")
    )]
    pub department: String,

    #[validate(
        length(min = 1, message = "Submitter is required"),
        length(max = 100, message = "Submitter must not exceed 100 characters")
    )]
    #[serde(rename = "submittedBy")]
    pub submitted_by: String,

    #[validate(length(max = 100, message = "Assignee must not exceed 100 characters"))]
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateTicketDto {
    #[validate(length(max = 50, message = "Title must not exceed 50 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 10, message = "Priority must not exceed 10 characters"))]
    pub priority: Option<String>,

    #[validate(length(max = 50, message = "Department must not exceed 50 characters"))]
    pub department: Option<String>,

    #[validate(length(max = 20, message = "Status must not exceed 20 characters"))]
    pub status: Option<String>,

    #[validate(length(max = 100, message = "Assignee must not exceed 100 characters"))]
    #[serde(rename = "assignedTo")]
    pub assigned_to: Option<String>,

    #[validate(length(max = 100, message = "Resolver must not exceed 100 characters"))]
    #[serde(rename = "resolvedBy")]
    pub resolved_by: Option<String>,

    #[serde(rename = "resolvedDate")]
    pub resolved_date: Option<DateTime<Utc>>,

    #[serde(rename = "resolutionDescription")]
    pub resolution_description: Option<String>,

    #[serde(rename = "agentFeedback")]
    pub agent_feedback: Option<String>,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct TicketQueryDto {
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<usize>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub department: Option<String>,
}

// File metadata captured while streaming a multipart upload to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketAttachmentDto {
    pub name: String,
    pub size: i32,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub url: String,
}
