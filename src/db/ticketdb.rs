// db/ticketdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::db::DBClient;

use crate::models::ticketmodel::{Ticket, TicketAttachment};

#[async_trait]
pub trait TicketExt {
    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, sqlx::Error>;

    async fn get_tickets(
        &self,
        status: Option<&str>,
        priority: Option<&str>,
        department: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Ticket>, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn save_ticket<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        description: T,
        priority: T,
        department: T,
        submitted_by: T,
        submitted_date: DateTime<Utc>,
        status: T,
        assigned_to: T,
        resolved_by: T,
        resolved_date: DateTime<Utc>,
    ) -> Result<Ticket, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn update_ticket<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        description: T,
        priority: T,
        department: T,
        status: T,
        assigned_to: T,
        resolved_by: T,
        resolved_date: Option<DateTime<Utc>>,
        resolution_description: Option<String>,
        agent_feedback: Option<String>,
    ) -> Result<Ticket, sqlx::Error>;

    async fn delete_ticket(&self, id: &str) -> Result<u64, sqlx::Error>;

    async fn get_attachments(
        &self,
        ticket_id: &str,
    ) -> Result<Vec<TicketAttachment>, sqlx::Error>;

    async fn get_attachment(
        &self,
        id: &str,
    ) -> Result<Option<TicketAttachment>, sqlx::Error>;

    async fn save_attachment<T: Into<String> + Send>(
        &self,
        id: T,
        ticket_id: T,
        name: T,
        size: i32,
        content_type: T,
        url: T,
    ) -> Result<TicketAttachment, sqlx::Error>;

    async fn delete_attachment(&self, id: &str) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl TicketExt for DBClient {
    async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT
                id, title, description, priority, department, submitted_by,
                submitted_date, status, assigned_to, resolved_by, resolved_date,
                resolution_description, agent_feedback
            FROM tickets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_tickets(
        &self,
        status: Option<&str>,
        priority: Option<&str>,
        department: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<Ticket>, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            SELECT
                id, title, description, priority, department, submitted_by,
                submitted_date, status, assigned_to, resolved_by, resolved_date,
                resolution_description, agent_feedback
            FROM tickets
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR priority = $2)
              AND ($3::text IS NULL OR department = $3)
            ORDER BY submitted_date DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(status)
        .bind(priority)
        .bind(department)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn save_ticket<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        description: T,
        priority: T,
        department: T,
        submitted_by: T,
        submitted_date: DateTime<Utc>,
        status: T,
        assigned_to: T,
        resolved_by: T,
        resolved_date: DateTime<Utc>,
    ) -> Result<Ticket, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (id, title, description, priority, department, submitted_by, submitted_date, status, assigned_to, resolved_by, resolved_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING
                id, title, description, priority, department, submitted_by,
                submitted_date, status, assigned_to, resolved_by, resolved_date,
                resolution_description, agent_feedback
            "#,
        )
        .bind(id.into())
        .bind(title.into())
        .bind(description.into())
        .bind(priority.into())
        .bind(department.into())
        .bind(submitted_by.into())
        .bind(submitted_date)
        .bind(status.into())
        .bind(assigned_to.into())
        .bind(resolved_by.into())
        .bind(resolved_date)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_ticket<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        description: T,
        priority: T,
        department: T,
        status: T,
        assigned_to: T,
        resolved_by: T,
        resolved_date: Option<DateTime<Utc>>,
        resolution_description: Option<String>,
        agent_feedback: Option<String>,
    ) -> Result<Ticket, sqlx::Error> {
        sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET title = $2,
                description = $3,
                priority = $4,
                department = $5,
                status = $6,
                assigned_to = $7,
                resolved_by = $8,
                resolved_date = $9,
                resolution_description = $10,
                agent_feedback = $11
            WHERE id = $1
            RETURNING
                id, title, description, priority, department, submitted_by,
                submitted_date, status, assigned_to, resolved_by, resolved_date,
                resolution_description, agent_feedback
            "#,
        )
        .bind(id.into())
        .bind(title.into())
        .bind(description.into())
        .bind(priority.into())
        .bind(department.into())
        .bind(status.into())
        .bind(assigned_to.into())
        .bind(resolved_by.into())
        .bind(resolved_date)
        .bind(resolution_description)
        .bind(agent_feedback)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_ticket(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn get_attachments(
        &self,
        ticket_id: &str,
    ) -> Result<Vec<TicketAttachment>, sqlx::Error> {
        sqlx::query_as::<_, TicketAttachment>(
            r#"
            SELECT id, ticket_id, name, size, content_type, upload_date, url
            FROM ticket_attachments
            WHERE ticket_id = $1
            ORDER BY upload_date
            "#,
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_attachment(
        &self,
        id: &str,
    ) -> Result<Option<TicketAttachment>, sqlx::Error> {
        sqlx::query_as::<_, TicketAttachment>(
            r#"
            SELECT id, ticket_id, name, size, content_type, upload_date, url
            FROM ticket_attachments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn save_attachment<T: Into<String> + Send>(
        &self,
        id: T,
        ticket_id: T,
        name: T,
        size: i32,
        content_type: T,
        url: T,
    ) -> Result<TicketAttachment, sqlx::Error> {
        sqlx::query_as::<_, TicketAttachment>(
            r#"
            INSERT INTO ticket_attachments (id, ticket_id, name, size, content_type, upload_date, url)
            VALUES ($1, $2, $3, $4, $5, NOW(), $6)
            RETURNING id, ticket_id, name, size, content_type, upload_date, url
            "#,
        )
        .bind(id.into())
        .bind(ticket_id.into())
        .bind(name.into())
        .bind(size)
        .bind(content_type.into())
        .bind(url.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_attachment(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ticket_attachments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
