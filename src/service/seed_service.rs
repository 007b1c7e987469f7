// services/seed_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, departmentdb::DepartmentExt, userdb::UserExt},
    models::usermodel::UserRole,
    service::error::ServiceError,
    utils::password,
};

const SEED_DEPARTMENTS: [(&str, &str, &str); 5] = [
    ("1", "IT", "Information Technology Department"),
    ("2", "HR", "Human Resources Department"),
    ("3", "Finance", "Finance and Accounting Department"),
    ("4", "Marketing", "Marketing and Communications Department"),
    ("5", "Operations", "Operations and Management Department"),
];

const SEED_USERS: [(&str, &str, &str, &str, &str, UserRole, &str, &str); 4] = [
    ("1", "USR001", "admin", "admin123", "admin@nexdesk.com", UserRole::Admin, "1", "Admin User"),
    ("2", "USR002", "agent", "agent123", "agent@nexdesk.com", UserRole::Agent, "6", "Agent Smith"),
    ("3", "USR003", "staff", "staff123", "staff@nexdesk.com", UserRole::Staff, "5", "Staff Member"),
    (
        "4",
        "USR004",
        "superadmin",
        "super123",
        "superadmin@nexdesk.com",
        UserRole::SuperAdmin,
        "5",
        "Super Admin",
    ),
];

#[derive(Debug, Clone)]
pub struct SeedService {
    db_client: Arc<DBClient>,
    password_secret: String,
}

impl SeedService {
    pub fn new(db_client: Arc<DBClient>, password_secret: String) -> Self {
        Self {
            db_client,
            password_secret,
        }
    }

    // Seed failures are logged and skipped; a partially seeded database is
    // still usable.
    pub async fn run(&self) {
        if let Err(err) = self.seed_departments().await {
            tracing::error!("Error seeding departments: {}", err);
        }
        if let Err(err) = self.seed_users().await {
            tracing::error!("Error seeding users: {}", err);
        }
    }

    async fn seed_departments(&self) -> Result<(), ServiceError> {
        if self.db_client.get_department_count().await? > 0 {
            return Ok(());
        }

        for (id, name, description) in SEED_DEPARTMENTS {
            self.db_client
                .save_department(id, name, description, "System")
                .await?;
        }

        tracing::info!("Seeded {} departments", SEED_DEPARTMENTS.len());
        Ok(())
    }

    async fn seed_users(&self) -> Result<(), ServiceError> {
        if self.db_client.get_user_count().await? > 0 {
            return Ok(());
        }

        for (id, user_id, username, plain_password, email, role, department_id, full_name) in
            SEED_USERS
        {
            let (first_name, last_name) = full_name.split_once(' ').unwrap_or((full_name, ""));
            let encrypted_password = password::encrypt(plain_password, &self.password_secret)?;

            self.db_client
                .save_user(
                    id.to_string(),
                    first_name.to_string(),
                    last_name.to_string(),
                    email.to_string(),
                    username.to_string(),
                    encrypted_password,
                    role,
                    department_id.to_string(),
                    user_id.to_string(),
                    "System".to_string(),
                )
                .await?;
        }

        tracing::info!("Seeded {} users", SEED_USERS.len());
        Ok(())
    }
}
