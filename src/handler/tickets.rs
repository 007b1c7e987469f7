// handler/tickets.rs
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::ticketdb::TicketExt,
    dtos::ticketdtos::{CreateTicketAttachmentDto, CreateTicketDto, TicketQueryDto, UpdateTicketDto},
    error::HttpError,
    AppState,
};

pub fn tickets_handler() -> Router {
    Router::new()
        .route("/", get(get_tickets).post(create_ticket))
        .route("/with-attachments", post(create_ticket_with_attachments))
        .route("/:id", get(get_ticket).put(update_ticket).delete(delete_ticket))
        .route(
            "/:id/attachments",
            get(list_attachments).post(upload_attachment),
        )
        .route("/:id/attachments/batch", post(upload_attachments_batch))
        .route(
            "/:id/attachments/:attachment_id",
            delete(delete_attachment),
        )
}

pub async fn get_tickets(
    Query(query_params): Query<TicketQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    query_params
        .validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let page = query_params.page.unwrap_or(1);
    let limit = query_params.limit;
    let offset = limit.map(|limit| ((page - 1) * limit) as i64).unwrap_or(0);

    let tickets = app_state
        .db_client
        .get_tickets(
            query_params.status.as_deref(),
            query_params.priority.as_deref(),
            query_params.department.as_deref(),
            limit.map(|limit| limit as i64),
            offset,
        )
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving tickets: {}", e);
            HttpError::server_error("An error occurred while retrieving tickets.")
        })?;

    Ok(Json(tickets))
}

pub async fn get_ticket(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state
        .ticket_service
        .get_ticket(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error retrieving ticket {}: {}", id, e);
            HttpError::server_error("An error occurred while retrieving the ticket.")
        })?
        .ok_or(HttpError::not_found(format!(
            "Ticket with ID {} not found.",
            id
        )))?;

    Ok(Json(ticket))
}

pub async fn create_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ticket = app_state
        .ticket_service
        .create_ticket(body)
        .await
        .map_err(|e| {
            tracing::error!("Error creating ticket: {}", e);
            HttpError::server_error(format!("An error occurred while creating the ticket: {}", e))
        })?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

pub async fn update_ticket(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<UpdateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let updated = app_state
        .ticket_service
        .update_ticket(&id, body)
        .await
        .map_err(|e| {
            tracing::error!("Error updating ticket {}: {}", id, e);
            HttpError::server_error("An error occurred while updating the ticket.")
        })?;

    if updated.is_none() {
        return Err(HttpError::not_found(format!(
            "Ticket with ID {} not found.",
            id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_ticket(
    Path(id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .ticket_service
        .delete_ticket(&id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting ticket {}: {}", id, e);
            HttpError::server_error("An error occurred while deleting the ticket.")
        })?;

    if !deleted {
        return Err(HttpError::not_found(format!(
            "Ticket with ID {} not found.",
            id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_attachments(
    Path(ticket_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let attachments = app_state
        .ticket_service
        .get_attachments(&ticket_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(attachments))
}

// Accepts any multipart field name; the first non-empty file part is stored.
pub async fn upload_attachment(
    Path(ticket_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut saved = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field.content_type().map(|value| value.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;
        if data.is_empty() {
            continue;
        }

        let meta = store_upload(&app_state, &ticket_id, &file_name, content_type, &data).await?;
        saved = Some(
            app_state
                .ticket_service
                .add_attachment(&ticket_id, meta)
                .await
                .map_err(|e| HttpError::server_error(e.to_string()))?,
        );
        break;
    }

    let saved = match saved {
        Some(added) => added,
        None => return Err(HttpError::bad_request("Empty file")),
    };
    let saved = saved.ok_or(HttpError::not_found("Ticket not found"))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, saved.url.clone())],
        Json(saved),
    ))
}

pub async fn upload_attachments_batch(
    Path(ticket_id): Path<String>,
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut saved = Vec::new();
    let mut any_file = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        let file_name = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field.content_type().map(|value| value.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;
        if data.is_empty() {
            continue;
        }
        any_file = true;

        let meta = store_upload(&app_state, &ticket_id, &file_name, content_type, &data).await?;
        if let Some(attachment) = app_state
            .ticket_service
            .add_attachment(&ticket_id, meta)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            saved.push(attachment);
        }
    }

    if !any_file {
        return Err(HttpError::bad_request("No files provided"));
    }
    if saved.is_empty() {
        return Err(HttpError::not_found("Ticket not found or no files saved"));
    }

    Ok((
        StatusCode::CREATED,
        [(
            header::LOCATION,
            format!("/api/tickets/{}/attachments", ticket_id),
        )],
        Json(saved),
    ))
}

pub async fn delete_attachment(
    Path((_ticket_id, attachment_id)): Path<(String, String)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let removed = app_state
        .ticket_service
        .delete_attachment(&attachment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or(HttpError::not_found("Attachment not found"))?;

    // The url is /uploads/{ticket}/{file}; map it back onto the upload dir.
    if let Some(relative) = removed.url.strip_prefix("/uploads/") {
        let path = std::path::Path::new(&app_state.env.upload_dir).join(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Could not remove stored file {}: {}", path.display(), e);
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// Single-step creation: plain form fields describe the ticket, file parts
// become attachments of the new ticket.
pub async fn create_ticket_with_attachments(
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut dto = CreateTicketDto::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        if let Some(name) = field.file_name() {
            let file_name = name.to_string();
            let content_type = field.content_type().map(|value| value.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| HttpError::bad_request(e.to_string()))?;
            if !data.is_empty() {
                files.push((file_name, content_type, data));
            }
            continue;
        }

        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;
        match name.as_str() {
            "title" => dto.title = value,
            "description" => dto.description = value,
            "priority" => dto.priority = value,
            "department" => dto.department = value,
            "submittedBy" => dto.submitted_by = value,
            "assignedTo" => dto.assigned_to = Some(value),
            _ => {}
        }
    }

    dto.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ticket = app_state
        .ticket_service
        .create_ticket(dto)
        .await
        .map_err(|e| {
            tracing::error!("Error creating ticket with attachments: {}", e);
            HttpError::server_error(format!("Error creating ticket with attachments: {}", e))
        })?;

    let mut saved = Vec::new();
    for (file_name, content_type, data) in files {
        let meta = store_upload(&app_state, &ticket.id, &file_name, content_type, &data).await?;
        if let Some(attachment) = app_state
            .ticket_service
            .add_attachment(&ticket.id, meta)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            saved.push(attachment);
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "ticket": ticket,
            "attachments": saved,
        })),
    ))
}

// Writes one upload under {upload_dir}/{ticket_id}/ with a fresh GUID name,
// keeping the original extension, and returns the metadata row to record.
async fn store_upload(
    app_state: &AppState,
    ticket_id: &str,
    file_name: &str,
    content_type: Option<String>,
    data: &[u8],
) -> Result<CreateTicketAttachmentDto, HttpError> {
    let uploads_dir = std::path::Path::new(&app_state.env.upload_dir).join(ticket_id);
    tokio::fs::create_dir_all(&uploads_dir)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let extension = std::path::Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let new_name = format!("{}{}", Uuid::new_v4(), extension);

    tokio::fs::write(uploads_dir.join(&new_name), data)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(CreateTicketAttachmentDto {
        name: file_name.to_string(),
        size: data.len() as i32,
        content_type,
        url: format!("/uploads/{}/{}", ticket_id, new_name),
    })
}
