// services/dashboard_service.rs
use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};

use crate::{
    db::{db::DBClient, feedbackdb::FeedbackExt, ticketdb::TicketExt, userdb::UserExt},
    dtos::dashboarddtos::{
        DashboardDataDto, DashboardStatsDto, RecentTicketDto, TicketTrendDto,
        TicketsByPriorityDto, TicketsByStatusDto,
    },
    models::{
        feedbackmodel::Feedback,
        ticketmodel::Ticket,
        usermodel::{User, UserRole},
    },
    service::error::ServiceError,
};

// Everything is recomputed from the scoped rows on each request; there is no
// aggregate cache to invalidate.
#[derive(Debug, Clone)]
pub struct DashboardService {
    db_client: Arc<DBClient>,
}

impl DashboardService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn get_dashboard_data(
        &self,
        role: &str,
        user_id: &str,
        department: Option<&str>,
    ) -> Result<DashboardDataDto, ServiceError> {
        let tickets = self.scoped_tickets(role, user_id, department).await?;
        let users = self.scoped_users(role, department).await?;
        let feedbacks = self.db_client.get_feedbacks().await?;

        let stats = build_stats(&tickets, &users, &feedbacks);

        Ok(DashboardDataDto {
            stats,
            tickets_by_status: tickets_by_status(&tickets),
            tickets_by_priority: tickets_by_priority(&tickets),
            ticket_trends: ticket_trends(&tickets, Utc::now()),
            recent_tickets: recent_tickets(&tickets),
        })
    }

    pub async fn get_dashboard_stats(
        &self,
        role: &str,
        user_id: &str,
        department: Option<&str>,
    ) -> Result<DashboardStatsDto, ServiceError> {
        let tickets = self.scoped_tickets(role, user_id, department).await?;
        let users = self.scoped_users(role, department).await?;
        let feedbacks = self.db_client.get_feedbacks().await?;

        Ok(build_stats(&tickets, &users, &feedbacks))
    }

    async fn scoped_tickets(
        &self,
        role: &str,
        user_id: &str,
        department: Option<&str>,
    ) -> Result<Vec<Ticket>, ServiceError> {
        let tickets = self
            .db_client
            .get_tickets(None, None, None, None, 0)
            .await?;
        Ok(scope_tickets(tickets, role, user_id, department))
    }

    async fn scoped_users(
        &self,
        role: &str,
        department: Option<&str>,
    ) -> Result<Vec<User>, ServiceError> {
        let users = self.db_client.get_users().await?;
        Ok(scope_users(users, role, department))
    }
}

// Role-based visibility. Admins see everything, agents see their department
// plus their own assignments, everyone else sees only what they submitted.
fn scope_tickets(
    tickets: Vec<Ticket>,
    role: &str,
    user_id: &str,
    department: Option<&str>,
) -> Vec<Ticket> {
    match role.to_lowercase().as_str() {
        "superadmin" | "admin" => tickets,
        "agent" => match department {
            Some(dept) if !dept.is_empty() => tickets
                .into_iter()
                .filter(|t| t.department == dept || t.assigned_to == user_id)
                .collect(),
            _ => tickets
                .into_iter()
                .filter(|t| t.assigned_to == user_id)
                .collect(),
        },
        _ => tickets
            .into_iter()
            .filter(|t| t.submitted_by == user_id)
            .collect(),
    }
}

fn scope_users(users: Vec<User>, role: &str, department: Option<&str>) -> Vec<User> {
    match role.to_lowercase().as_str() {
        "superadmin" | "admin" => users,
        "agent" => match department {
            Some(dept) if !dept.is_empty() => users
                .into_iter()
                .filter(|u| u.department_id == dept)
                .collect(),
            _ => users,
        },
        _ => Vec::new(),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn experience_score(experience: &str) -> f64 {
    match experience.to_lowercase().as_str() {
        "excellent" => 5.0,
        "very good" => 4.5,
        "good" => 4.0,
        "satisfactory" => 3.5,
        "poor" => 2.0,
        "very poor" => 1.0,
        _ => 3.0,
    }
}

fn build_stats(tickets: &[Ticket], users: &[User], feedbacks: &[Feedback]) -> DashboardStatsDto {
    let count_status = |status: &str| {
        tickets
            .iter()
            .filter(|t| t.status.eq_ignore_ascii_case(status))
            .count() as i64
    };

    let resolved_with_dates: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.status.eq_ignore_ascii_case("Resolved") && t.resolved_date.is_some())
        .collect();

    let average_resolution_time = if resolved_with_dates.is_empty() {
        0.0
    } else {
        let total_hours: f64 = resolved_with_dates
            .iter()
            .filter_map(|t| t.resolved_date.map(|resolved| resolved - t.submitted_date))
            .map(|elapsed| elapsed.num_seconds() as f64 / 3600.0)
            .sum();
        total_hours / resolved_with_dates.len() as f64
    };

    // Only feedback tied to a visible ticket counts; 4.2 stands in when
    // nothing matches.
    let ticket_ids: Vec<&str> = tickets.iter().map(|t| t.id.as_str()).collect();
    let scores: Vec<f64> = feedbacks
        .iter()
        .filter(|f| {
            f.ticket_id
                .as_deref()
                .map(|tid| ticket_ids.contains(&tid))
                .unwrap_or(false)
        })
        .map(|f| experience_score(&f.experience))
        .collect();
    let customer_satisfaction_score = if scores.is_empty() {
        4.2
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    DashboardStatsDto {
        total_tickets: tickets.len() as i64,
        open_tickets: count_status("Open"),
        in_progress_tickets: count_status("In Progress"),
        resolved_tickets: count_status("Resolved"),
        closed_tickets: count_status("Closed"),
        total_users: users.len() as i64,
        active_users: users.iter().filter(|u| u.is_active).count() as i64,
        total_agents: users
            .iter()
            .filter(|u| matches!(u.role, UserRole::Agent | UserRole::Admin))
            .count() as i64,
        average_resolution_time: round1(average_resolution_time),
        customer_satisfaction_score: round1(customer_satisfaction_score),
    }
}

fn tickets_by_status(tickets: &[Ticket]) -> Vec<TicketsByStatusDto> {
    let mut groups: BTreeMap<String, i64> = BTreeMap::new();
    for ticket in tickets {
        *groups.entry(ticket.status.clone()).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(status, count)| {
            let color = match status.as_str() {
                "Open" => "#ef4444",
                "In Progress" => "#f59e0b",
                "Resolved" => "#10b981",
                "Closed" => "#6b7280",
                _ => "#6b7280",
            };
            TicketsByStatusDto {
                status,
                count,
                color: color.to_string(),
            }
        })
        .collect()
}

fn tickets_by_priority(tickets: &[Ticket]) -> Vec<TicketsByPriorityDto> {
    let mut groups: BTreeMap<String, i64> = BTreeMap::new();
    for ticket in tickets {
        *groups.entry(ticket.priority.clone()).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|(priority, count)| {
            let color = match priority.as_str() {
                "Low" => "#10b981",
                "Medium" => "#f59e0b",
                "High" => "#ef4444",
                "Critical" => "#dc2626",
                _ => "#6b7280",
            };
            TicketsByPriorityDto {
                priority,
                count,
                color: color.to_string(),
            }
        })
        .collect()
}

// One bucket per calendar day for the trailing 30 days, oldest first. The
// resolved counts only consider tickets submitted inside the window, matching
// the chart this feeds.
fn ticket_trends(tickets: &[Ticket], now: DateTime<Utc>) -> Vec<TicketTrendDto> {
    let window_start = now - Duration::days(30);
    let windowed: Vec<&Ticket> = tickets
        .iter()
        .filter(|t| t.submitted_date >= window_start)
        .collect();

    let mut trends = Vec::with_capacity(30);
    for offset in (0..30).rev() {
        let day = (now - Duration::days(offset)).date_naive();

        let created = windowed
            .iter()
            .filter(|t| t.submitted_date.date_naive() == day)
            .count() as i64;
        let resolved = windowed
            .iter()
            .filter(|t| t.resolved_date.map(|d| d.date_naive() == day).unwrap_or(false))
            .count() as i64;

        trends.push(TicketTrendDto {
            date: day.format("%m/%d").to_string(),
            created,
            resolved,
        });
    }

    trends
}

fn recent_tickets(tickets: &[Ticket]) -> Vec<RecentTicketDto> {
    let mut sorted: Vec<&Ticket> = tickets.iter().collect();
    sorted.sort_by(|a, b| b.submitted_date.cmp(&a.submitted_date));

    sorted
        .into_iter()
        .take(10)
        .map(RecentTicketDto::from_ticket)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ticket(id: &str, status: &str, priority: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            title: format!("Ticket {}", id),
            description: "description".to_string(),
            priority: priority.to_string(),
            department: "IT".to_string(),
            submitted_by: "staff".to_string(),
            submitted_date: Utc::now(),
            status: status.to_string(),
            assigned_to: "Unassigned".to_string(),
            resolved_by: "Unassigned".to_string(),
            resolved_date: None,
            resolution_description: None,
            agent_feedback: None,
        }
    }

    fn user(id: &str, role: UserRole, department_id: &str, is_active: bool) -> User {
        User {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{}@nexdesk.com", id),
            username: format!("user{}", id),
            password: "encrypted".to_string(),
            is_active,
            role,
            department_id: department_id.to_string(),
            user_id: format!("USR{:03}", 1),
            created_by: "System".to_string(),
            created_time: Utc::now(),
            updated_time: Utc::now(),
        }
    }

    fn feedback(ticket_id: Option<&str>, experience: &str) -> Feedback {
        Feedback {
            id: "FB000001".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            title: None,
            message: "message".to_string(),
            experience: experience.to_string(),
            date: Some(Utc::now()),
            ticket_id: ticket_id.map(|t| t.to_string()),
        }
    }

    #[test]
    fn admin_sees_all_tickets() {
        let tickets = vec![ticket("1", "Open", "Low"), ticket("2", "Closed", "High")];
        let scoped = scope_tickets(tickets, "Admin", "USR001", None);
        assert_eq!(scoped.len(), 2);
    }

    #[test]
    fn agent_sees_department_and_assigned_tickets() {
        let mut mine = ticket("1", "Open", "Low");
        mine.department = "HR".to_string();
        mine.assigned_to = "IT001".to_string();
        let mut dept = ticket("2", "Open", "Low");
        dept.department = "IT".to_string();
        let mut other = ticket("3", "Open", "Low");
        other.department = "HR".to_string();

        let scoped = scope_tickets(vec![mine, dept, other], "agent", "IT001", Some("IT"));
        let ids: Vec<&str> = scoped.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn agent_without_department_sees_only_assignments() {
        let mut mine = ticket("1", "Open", "Low");
        mine.assigned_to = "IT001".to_string();
        let other = ticket("2", "Open", "Low");

        let scoped = scope_tickets(vec![mine, other], "agent", "IT001", None);
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, "1");
    }

    #[test]
    fn staff_sees_only_submitted_tickets() {
        let mut mine = ticket("1", "Open", "Low");
        mine.submitted_by = "USR007".to_string();
        let other = ticket("2", "Open", "Low");

        let scoped = scope_tickets(vec![mine, other], "staff", "USR007", Some("IT"));
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].id, "1");
    }

    #[test]
    fn staff_sees_no_users() {
        let users = vec![user("1", UserRole::Staff, "1", true)];
        assert!(scope_users(users, "staff", Some("1")).is_empty());
    }

    #[test]
    fn agent_without_department_sees_all_users() {
        let users = vec![
            user("1", UserRole::Staff, "1", true),
            user("2", UserRole::Agent, "2", true),
        ];
        assert_eq!(scope_users(users, "agent", None).len(), 2);
    }

    #[test]
    fn stats_count_statuses_case_insensitively() {
        let tickets = vec![
            ticket("1", "open", "Low"),
            ticket("2", "OPEN", "Low"),
            ticket("3", "In Progress", "High"),
            ticket("4", "resolved", "High"),
        ];
        let stats = build_stats(&tickets, &[], &[]);

        assert_eq!(stats.total_tickets, 4);
        assert_eq!(stats.open_tickets, 2);
        assert_eq!(stats.in_progress_tickets, 1);
        assert_eq!(stats.resolved_tickets, 1);
        assert_eq!(stats.closed_tickets, 0);
    }

    #[test]
    fn stats_count_agents_and_admins_but_not_superadmins() {
        let users = vec![
            user("1", UserRole::Agent, "1", true),
            user("2", UserRole::Admin, "1", true),
            user("3", UserRole::SuperAdmin, "1", true),
            user("4", UserRole::Staff, "1", false),
        ];
        let stats = build_stats(&[], &users, &[]);

        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.active_users, 3);
        assert_eq!(stats.total_agents, 2);
    }

    #[test]
    fn average_resolution_time_uses_resolved_tickets_only() {
        let submitted = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();

        let mut fast = ticket("1", "Resolved", "Low");
        fast.submitted_date = submitted;
        fast.resolved_date = Some(submitted + Duration::hours(2));

        let mut slow = ticket("2", "Resolved", "Low");
        slow.submitted_date = submitted;
        slow.resolved_date = Some(submitted + Duration::hours(5));

        let mut open = ticket("3", "Open", "Low");
        open.submitted_date = submitted;

        let stats = build_stats(&[fast, slow, open], &[], &[]);
        assert_eq!(stats.average_resolution_time, 3.5);
    }

    #[test]
    fn satisfaction_defaults_when_no_feedback_matches() {
        let tickets = vec![ticket("1", "Open", "Low")];
        let feedbacks = vec![feedback(Some("other-ticket"), "Excellent"), feedback(None, "Poor")];

        let stats = build_stats(&tickets, &[], &feedbacks);
        assert_eq!(stats.customer_satisfaction_score, 4.2);
    }

    #[test]
    fn satisfaction_averages_matching_feedback() {
        let tickets = vec![ticket("1", "Open", "Low"), ticket("2", "Open", "Low")];
        let feedbacks = vec![
            feedback(Some("1"), "Excellent"),
            feedback(Some("2"), "Good"),
            feedback(Some("ignored"), "Very Poor"),
        ];

        let stats = build_stats(&tickets, &[], &feedbacks);
        assert_eq!(stats.customer_satisfaction_score, 4.5);
    }

    #[test]
    fn experience_scores_match_the_rating_scale() {
        assert_eq!(experience_score("Excellent"), 5.0);
        assert_eq!(experience_score("very good"), 4.5);
        assert_eq!(experience_score("Satisfactory"), 3.5);
        assert_eq!(experience_score("VERY POOR"), 1.0);
        assert_eq!(experience_score("unknown"), 3.0);
    }

    #[test]
    fn status_chart_keeps_fixed_colors_and_sorts_by_status() {
        let tickets = vec![
            ticket("1", "Resolved", "Low"),
            ticket("2", "Closed", "Low"),
            ticket("3", "Closed", "Low"),
            ticket("4", "Weird", "Low"),
        ];

        let chart = tickets_by_status(&tickets);

        assert_eq!(
            chart,
            vec![
                TicketsByStatusDto {
                    status: "Closed".to_string(),
                    count: 2,
                    color: "#6b7280".to_string(),
                },
                TicketsByStatusDto {
                    status: "Resolved".to_string(),
                    count: 1,
                    color: "#10b981".to_string(),
                },
                TicketsByStatusDto {
                    status: "Weird".to_string(),
                    count: 1,
                    color: "#6b7280".to_string(),
                },
            ]
        );
    }

    #[test]
    fn priority_chart_keeps_fixed_colors() {
        let tickets = vec![ticket("1", "Open", "Critical"), ticket("2", "Open", "Low")];

        let chart = tickets_by_priority(&tickets);

        assert_eq!(chart[0].priority, "Critical");
        assert_eq!(chart[0].color, "#dc2626");
        assert_eq!(chart[1].priority, "Low");
        assert_eq!(chart[1].color, "#10b981");
    }

    #[test]
    fn trends_cover_thirty_days_oldest_first() {
        let now = Utc.with_ymd_and_hms(2026, 3, 31, 12, 0, 0).unwrap();

        let mut yesterday = ticket("1", "Resolved", "Low");
        yesterday.submitted_date = now - Duration::days(1);
        yesterday.resolved_date = Some(now - Duration::days(1));

        let mut stale = ticket("2", "Open", "Low");
        stale.submitted_date = now - Duration::days(45);

        let trends = ticket_trends(&[yesterday, stale], now);

        assert_eq!(trends.len(), 30);
        assert_eq!(trends[0].date, "03/02");
        assert_eq!(trends[29].date, "03/31");
        assert_eq!(trends[28].created, 1);
        assert_eq!(trends[28].resolved, 1);
        assert_eq!(trends.iter().map(|t| t.created).sum::<i64>(), 1);
    }

    #[test]
    fn recent_tickets_take_ten_newest() {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let tickets: Vec<Ticket> = (0..12)
            .map(|i| {
                let mut t = ticket(&i.to_string(), "Open", "Low");
                t.submitted_date = base + Duration::days(i);
                t
            })
            .collect();

        let recent = recent_tickets(&tickets);

        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].id, "11");
        assert_eq!(recent[9].id, "2");
    }
}
