use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::feedbackmodel::Feedback;

// Site-wide feedback form (knowledge-base page).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SubmitFeedbackDto {
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub rating: Option<String>,
    #[serde(rename = "articleTitle")]
    pub article_title: Option<String>,
    #[serde(rename = "feedbackText")]
    pub feedback_text: Option<String>,
}

// Per-ticket feedback form. The date arrives as a free-form string and falls
// back to "now" when it does not parse.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SubmitTicketFeedbackDto {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub experience: Option<String>,
    #[serde(rename = "ticketId")]
    pub ticket_id: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackListItemDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub title: Option<String>,
    pub rating: String,
    #[serde(rename = "feedbackText")]
    pub feedback_text: String,
    pub date: Option<DateTime<Utc>>,
}

impl FeedbackListItemDto {
    pub fn from_feedback(feedback: &Feedback) -> Self {
        FeedbackListItemDto {
            id: feedback.id.to_owned(),
            name: feedback.name.to_owned(),
            email: feedback.email.to_owned(),
            title: feedback.title.clone(),
            rating: feedback.experience.to_owned(),
            feedback_text: feedback.message.to_owned(),
            date: feedback.date,
        }
    }

    pub fn from_feedbacks(feedbacks: &[Feedback]) -> Vec<FeedbackListItemDto> {
        feedbacks.iter().map(FeedbackListItemDto::from_feedback).collect()
    }
}
