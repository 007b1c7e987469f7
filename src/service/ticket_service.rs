// services/ticket_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    db::{db::DBClient, ticketdb::TicketExt},
    dtos::ticketdtos::{CreateTicketAttachmentDto, CreateTicketDto, UpdateTicketDto},
    models::ticketmodel::{Ticket, TicketAttachment},
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct TicketService {
    db_client: Arc<DBClient>,
}

impl TicketService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn get_ticket(&self, id: &str) -> Result<Option<Ticket>, ServiceError> {
        Ok(self.db_client.get_ticket(id).await?)
    }

    pub async fn create_ticket(&self, body: CreateTicketDto) -> Result<Ticket, ServiceError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let assigned_to = body
            .assigned_to
            .filter(|assignee| !assignee.is_empty())
            .unwrap_or_else(|| "Unassigned".to_string());

        let ticket = self
            .db_client
            .save_ticket(
                id,
                body.title,
                body.description,
                body.priority,
                body.department,
                body.submitted_by,
                now,
                "Open".to_string(),
                assigned_to,
                "Unassigned".to_string(),
                now,
            )
            .await?;

        Ok(ticket)
    }

    // Field-merge update; id, submitter and submitted date never change.
    pub async fn update_ticket(
        &self,
        id: &str,
        body: UpdateTicketDto,
    ) -> Result<Option<Ticket>, ServiceError> {
        let existing = match self.db_client.get_ticket(id).await? {
            Some(ticket) => ticket,
            None => return Ok(None),
        };

        let updated = self
            .db_client
            .update_ticket(
                existing.id.clone(),
                body.title.unwrap_or(existing.title),
                body.description.unwrap_or(existing.description),
                body.priority.unwrap_or(existing.priority),
                body.department.unwrap_or(existing.department),
                body.status.unwrap_or(existing.status),
                body.assigned_to.unwrap_or(existing.assigned_to),
                body.resolved_by.unwrap_or(existing.resolved_by),
                body.resolved_date.or(existing.resolved_date),
                body.resolution_description.or(existing.resolution_description),
                body.agent_feedback.or(existing.agent_feedback),
            )
            .await?;

        Ok(Some(updated))
    }

    pub async fn delete_ticket(&self, id: &str) -> Result<bool, ServiceError> {
        let rows = self.db_client.delete_ticket(id).await?;
        Ok(rows > 0)
    }

    pub async fn get_attachments(
        &self,
        ticket_id: &str,
    ) -> Result<Vec<TicketAttachment>, ServiceError> {
        Ok(self.db_client.get_attachments(ticket_id).await?)
    }

    // Records metadata for a file already written to disk. Returns None when
    // the ticket does not exist.
    pub async fn add_attachment(
        &self,
        ticket_id: &str,
        meta: CreateTicketAttachmentDto,
    ) -> Result<Option<TicketAttachment>, ServiceError> {
        if self.db_client.get_ticket(ticket_id).await?.is_none() {
            return Ok(None);
        }

        let attachment = self
            .db_client
            .save_attachment(
                Uuid::new_v4().to_string(),
                ticket_id.to_string(),
                meta.name,
                meta.size,
                meta.content_type.unwrap_or_default(),
                meta.url,
            )
            .await?;

        Ok(Some(attachment))
    }

    // Returns the removed metadata so the caller can unlink the stored file.
    pub async fn delete_attachment(
        &self,
        id: &str,
    ) -> Result<Option<TicketAttachment>, ServiceError> {
        let attachment = match self.db_client.get_attachment(id).await? {
            Some(attachment) => attachment,
            None => return Ok(None),
        };

        self.db_client.delete_attachment(id).await?;
        Ok(Some(attachment))
    }
}
