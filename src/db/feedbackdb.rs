// db/feedbackdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::db::DBClient;

use crate::models::feedbackmodel::Feedback;

#[async_trait]
pub trait FeedbackExt {
    async fn get_feedback(&self, id: &str) -> Result<Option<Feedback>, sqlx::Error>;

    async fn get_feedbacks(&self) -> Result<Vec<Feedback>, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn save_feedback<T: Into<String> + Send>(
        &self,
        id: T,
        name: T,
        email: T,
        title: Option<String>,
        message: T,
        experience: T,
        date: DateTime<Utc>,
        ticket_id: Option<String>,
    ) -> Result<Feedback, sqlx::Error>;
}

#[async_trait]
impl FeedbackExt for DBClient {
    async fn get_feedback(&self, id: &str) -> Result<Option<Feedback>, sqlx::Error> {
        sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, name, email, title, message, experience, date, ticket_id
            FROM feedbacks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_feedbacks(&self) -> Result<Vec<Feedback>, sqlx::Error> {
        sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, name, email, title, message, experience, date, ticket_id
            FROM feedbacks
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn save_feedback<T: Into<String> + Send>(
        &self,
        id: T,
        name: T,
        email: T,
        title: Option<String>,
        message: T,
        experience: T,
        date: DateTime<Utc>,
        ticket_id: Option<String>,
    ) -> Result<Feedback, sqlx::Error> {
        sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedbacks (id, name, email, title, message, experience, date, ticket_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, title, message, experience, date, ticket_id
            "#,
        )
        .bind(id.into())
        .bind(name.into())
        .bind(email.into())
        .bind(title)
        .bind(message.into())
        .bind(experience.into())
        .bind(date)
        .bind(ticket_id)
        .fetch_one(&self.pool)
        .await
    }
}
