use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ticketmodel::Ticket;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardStatsDto {
    #[serde(rename = "totalTickets")]
    pub total_tickets: i64,
    #[serde(rename = "openTickets")]
    pub open_tickets: i64,
    #[serde(rename = "inProgressTickets")]
    pub in_progress_tickets: i64,
    #[serde(rename = "resolvedTickets")]
    pub resolved_tickets: i64,
    #[serde(rename = "closedTickets")]
    pub closed_tickets: i64,
    #[serde(rename = "totalUsers")]
    pub total_users: i64,
    #[serde(rename = "activeUsers")]
    pub active_users: i64,
    #[serde(rename = "totalAgents")]
    pub total_agents: i64,
    #[serde(rename = "averageResolutionTime")]
    pub average_resolution_time: f64,
    #[serde(rename = "customerSatisfactionScore")]
    pub customer_satisfaction_score: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TicketsByStatusDto {
    pub status: String,
    pub count: i64,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TicketsByPriorityDto {
    pub priority: String,
    pub count: i64,
    pub color: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TicketTrendDto {
    pub date: String,
    pub created: i64,
    pub resolved: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecentTicketDto {
    pub id: String,
    pub title: String,
    pub priority: String,
    pub status: String,
    #[serde(rename = "submittedBy")]
    pub submitted_by: String,
    #[serde(rename = "assignedTo")]
    pub assigned_to: String,
    #[serde(rename = "submittedDate")]
    pub submitted_date: DateTime<Utc>,
    pub department: String,
}

impl RecentTicketDto {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        RecentTicketDto {
            id: ticket.id.to_owned(),
            title: ticket.title.to_owned(),
            priority: ticket.priority.to_owned(),
            status: ticket.status.to_owned(),
            submitted_by: ticket.submitted_by.to_owned(),
            assigned_to: ticket.assigned_to.to_owned(),
            submitted_date: ticket.submitted_date,
            department: ticket.department.to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardDataDto {
    pub stats: DashboardStatsDto,
    #[serde(rename = "ticketsByStatus")]
    pub tickets_by_status: Vec<TicketsByStatusDto>,
    #[serde(rename = "ticketsByPriority")]
    pub tickets_by_priority: Vec<TicketsByPriorityDto>,
    #[serde(rename = "ticketTrends")]
    pub ticket_trends: Vec<TicketTrendDto>,
    #[serde(rename = "recentTickets")]
    pub recent_tickets: Vec<RecentTicketDto>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardScopeQueryDto {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "departmentId")]
    pub department_id: Option<String>,
}
