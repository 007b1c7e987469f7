// services/feedback_service.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::{articledb::ArticleExt, db::DBClient, feedbackdb::FeedbackExt},
    dtos::feedbackdtos::{SubmitFeedbackDto, SubmitTicketFeedbackDto},
    models::feedbackmodel::Feedback,
    service::error::ServiceError,
};

const VALID_RATINGS: [&str; 5] = ["Poor", "Fair", "Good", "Very Good", "Excellent"];

#[derive(Debug, Clone)]
pub struct FeedbackService {
    db_client: Arc<DBClient>,
}

impl FeedbackService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn get_feedbacks(&self) -> Result<Vec<Feedback>, ServiceError> {
        Ok(self.db_client.get_feedbacks().await?)
    }

    pub async fn get_feedback(&self, id: &str) -> Result<Option<Feedback>, ServiceError> {
        Ok(self.db_client.get_feedback(id).await?)
    }

    // Site-wide feedback from the knowledge-base page. When the form names an
    // article, its id lands in the ticket_id column; the table predates the
    // article link and never grew a second reference field.
    pub async fn submit_site_feedback(
        &self,
        body: SubmitFeedbackDto,
    ) -> Result<(), ServiceError> {
        let article_title = body.article_title.map(|title| title.trim().to_string());

        let article_id = match article_title.as_deref() {
            Some(title) if !title.is_empty() => self
                .db_client
                .get_article_by_title(title)
                .await?
                .map(|article| article.id),
            _ => None,
        };

        self.db_client
            .save_feedback(
                new_feedback_id(),
                trimmed(body.customer_name),
                trimmed(body.email),
                article_title,
                trimmed(body.feedback_text),
                trimmed(body.rating),
                Utc::now(),
                article_id,
            )
            .await?;

        Ok(())
    }

    pub async fn submit_ticket_feedback(
        &self,
        body: SubmitTicketFeedbackDto,
    ) -> Result<(), ServiceError> {
        let id = body
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let date = body
            .date
            .as_deref()
            .and_then(|date| date.parse::<DateTime<Utc>>().ok())
            .unwrap_or_else(Utc::now);

        self.db_client
            .save_feedback(
                id,
                trimmed(body.name),
                trimmed(body.email),
                body.title.map(|title| title.trim().to_string()),
                trimmed(body.message),
                trimmed(body.experience),
                date,
                body.ticket_id.map(|ticket_id| ticket_id.trim().to_string()),
            )
            .await?;

        Ok(())
    }
}

// Site feedback shares the 8-character uppercase id scheme of the articles.
fn new_feedback_id() -> String {
    Uuid::new_v4().to_string()[..8].to_uppercase()
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn is_valid_email(email: &str) -> bool {
    regex::Regex::new(r"(?i)^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .unwrap()
        .is_match(email)
}

pub fn validate_site_feedback(body: &SubmitFeedbackDto) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(body.customer_name.as_deref()) {
        errors.push("Customer Name is required.".to_string());
    }

    if is_blank(body.email.as_deref()) {
        errors.push("Email is required.".to_string());
    } else if !is_valid_email(body.email.as_deref().unwrap_or_default()) {
        errors.push("Please enter a valid email address.".to_string());
    }

    if is_blank(body.rating.as_deref()) {
        errors.push("Experience Rating is required.".to_string());
    } else if !VALID_RATINGS.contains(&body.rating.as_deref().unwrap_or_default()) {
        errors.push("Please select a valid experience rating.".to_string());
    }

    if is_blank(body.feedback_text.as_deref()) {
        errors.push("Feedback text is required.".to_string());
    } else if body.feedback_text.as_deref().unwrap_or_default().chars().count() < 20 {
        errors.push("Feedback text must be at least 20 characters.".to_string());
    }

    errors
}

pub fn validate_ticket_feedback(body: &SubmitTicketFeedbackDto) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(body.name.as_deref()) {
        errors.push("Name is required.".to_string());
    }

    if is_blank(body.email.as_deref()) {
        errors.push("Email is required.".to_string());
    } else if !is_valid_email(body.email.as_deref().unwrap_or_default()) {
        errors.push("Invalid email format.".to_string());
    }

    if is_blank(body.title.as_deref()) {
        errors.push("Title is required.".to_string());
    }

    if is_blank(body.message.as_deref()) {
        errors.push("Message is required.".to_string());
    }

    if is_blank(body.experience.as_deref()) {
        errors.push("Experience rating is required.".to_string());
    }

    if is_blank(body.ticket_id.as_deref()) {
        errors.push("Ticket ID is required.".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_site_feedback_collects_all_errors() {
        let errors = validate_site_feedback(&SubmitFeedbackDto::default());

        assert_eq!(
            errors,
            vec![
                "Customer Name is required.".to_string(),
                "Email is required.".to_string(),
                "Experience Rating is required.".to_string(),
                "Feedback text is required.".to_string(),
            ]
        );
    }

    #[test]
    fn site_feedback_rejects_bad_email_rating_and_short_text() {
        let body = SubmitFeedbackDto {
            customer_name: Some("Ana".to_string()),
            email: Some("not-an-email".to_string()),
            rating: Some("Amazing".to_string()),
            article_title: None,
            feedback_text: Some("too short".to_string()),
        };

        let errors = validate_site_feedback(&body);

        assert_eq!(
            errors,
            vec![
                "Please enter a valid email address.".to_string(),
                "Please select a valid experience rating.".to_string(),
                "Feedback text must be at least 20 characters.".to_string(),
            ]
        );
    }

    #[test]
    fn site_feedback_accepts_every_listed_rating() {
        for rating in VALID_RATINGS {
            let body = SubmitFeedbackDto {
                customer_name: Some("Ana".to_string()),
                email: Some("ana@example.com".to_string()),
                rating: Some(rating.to_string()),
                article_title: Some("VPN setup".to_string()),
                feedback_text: Some("This article saved me a lot of time today.".to_string()),
            };

            assert!(validate_site_feedback(&body).is_empty(), "rating {}", rating);
        }
    }

    #[test]
    fn empty_ticket_feedback_collects_all_errors() {
        let errors = validate_ticket_feedback(&SubmitTicketFeedbackDto::default());

        assert_eq!(
            errors,
            vec![
                "Name is required.".to_string(),
                "Email is required.".to_string(),
                "Title is required.".to_string(),
                "Message is required.".to_string(),
                "Experience rating is required.".to_string(),
                "Ticket ID is required.".to_string(),
            ]
        );
    }

    #[test]
    fn ticket_feedback_flags_email_format() {
        let body = SubmitTicketFeedbackDto {
            id: None,
            name: Some("Ben".to_string()),
            email: Some("ben@".to_string()),
            title: Some("Resolved quickly".to_string()),
            message: Some("Great support".to_string()),
            experience: Some("Excellent".to_string()),
            ticket_id: Some("T-100".to_string()),
            date: None,
        };

        assert_eq!(
            validate_ticket_feedback(&body),
            vec!["Invalid email format.".to_string()]
        );
    }

    #[test]
    fn email_check_allows_mixed_case() {
        assert!(is_valid_email("Jane.Doe@NexDesk.COM"));
        assert!(!is_valid_email("jane doe@nexdesk.com"));
        assert!(!is_valid_email("jane@nexdesk"));
    }
}
