// services/user_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, userdb::UserExt},
    dtos::userdtos::{RegisterUserDto, UpdateUserDto},
    models::usermodel::{User, UserRole},
    service::{department_service::DepartmentService, error::ServiceError},
    utils::password,
};

const FIRST_NAME_DIGITS: &str =
    "First name cannot contain numbers. Please use only letters, spaces, and common name characters.";
const LAST_NAME_DIGITS: &str =
    "Last name cannot contain numbers. Please use only letters, spaces, and common name characters.";

#[derive(Debug, Clone)]
pub struct UserService {
    db_client: Arc<DBClient>,
    department_service: Arc<DepartmentService>,
    password_secret: String,
}

impl UserService {
    pub fn new(
        db_client: Arc<DBClient>,
        department_service: Arc<DepartmentService>,
        password_secret: String,
    ) -> Self {
        Self {
            db_client,
            department_service,
            password_secret,
        }
    }

    pub async fn create_user(&self, body: RegisterUserDto) -> Result<User, ServiceError> {
        if contains_digit(&body.first_name) {
            return Err(ServiceError::Validation(FIRST_NAME_DIGITS.to_string()));
        }
        if contains_digit(&body.last_name) {
            return Err(ServiceError::Validation(LAST_NAME_DIGITS.to_string()));
        }

        let existing = self
            .db_client
            .get_user(None, None, Some(&body.username), None)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Validation(format!(
                "Username '{}' is already taken. Please choose a different username.",
                body.username
            )));
        }

        let failures = password::validate_password(&body.password, Some(&body.username));
        if !failures.is_empty() {
            return Err(ServiceError::Validation(format!(
                "Password validation failed: {}",
                failures.join(" ")
            )));
        }

        // Encryption is deterministic, so ciphertext equality doubles as a
        // password-reuse check across accounts.
        let encrypted_password = password::encrypt(body.password.as_str(), &self.password_secret)?;
        if self.db_client.password_in_use(&encrypted_password).await? {
            return Err(ServiceError::Validation(
                "This password is already in use by another account. Please choose a unique password."
                    .to_string(),
            ));
        }

        let users = self.db_client.get_users().await?;
        let id = next_user_pk(&users);

        let department_id = match body.department_id.as_deref() {
            None | Some("") => {
                let departments = self.department_service.get_active_departments().await?;
                departments
                    .first()
                    .map(|d| d.id.clone())
                    .unwrap_or_else(|| "1".to_string())
            }
            Some(provided) => self.resolve_department(provided).await?,
        };

        let user_id = match body.user_id.as_deref() {
            Some(provided) if !provided.is_empty() => provided.to_string(),
            _ => {
                let department_users =
                    self.db_client.get_users_by_department(&department_id).await?;
                next_department_user_id(&department_id, &department_users)
            }
        };

        let role = parse_role(body.role.as_deref())?.unwrap_or(UserRole::Staff);

        let user = self
            .db_client
            .save_user(
                id,
                body.first_name,
                body.last_name,
                body.email,
                body.username,
                encrypted_password,
                role,
                department_id,
                user_id,
                "System".to_string(),
            )
            .await?;

        Ok(user)
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        body: UpdateUserDto,
    ) -> Result<Option<User>, ServiceError> {
        if let Some(first_name) = body.first_name.as_deref() {
            if contains_digit(first_name) {
                return Err(ServiceError::Validation(FIRST_NAME_DIGITS.to_string()));
            }
        }
        if let Some(last_name) = body.last_name.as_deref() {
            if contains_digit(last_name) {
                return Err(ServiceError::Validation(LAST_NAME_DIGITS.to_string()));
            }
        }

        let existing = match self.db_client.get_user(None, Some(user_id), None, None).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let department_id = match body.department_id.as_deref() {
            None | Some("") => existing.department_id.clone(),
            Some(provided) => self.resolve_department(provided).await?,
        };

        let role = parse_role(body.role.as_deref())?.unwrap_or(existing.role);

        let encrypted_password = match body.password.as_deref() {
            Some(provided) if !provided.is_empty() => {
                password::encrypt(provided, &self.password_secret)?
            }
            _ => existing.password.clone(),
        };

        let updated = self
            .db_client
            .update_user(
                existing.id.clone(),
                body.first_name.unwrap_or(existing.first_name),
                body.last_name.unwrap_or(existing.last_name),
                body.email.unwrap_or(existing.email),
                body.username.unwrap_or(existing.username),
                encrypted_password,
                role,
                department_id,
                body.is_active.unwrap_or(existing.is_active),
            )
            .await?;

        Ok(Some(updated))
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<bool, ServiceError> {
        let rows = self.db_client.delete_user(user_id).await?;
        Ok(rows > 0)
    }

    pub async fn deactivate_user(&self, user_id: &str) -> Result<bool, ServiceError> {
        let updated = self.db_client.set_user_active(user_id, false).await?;
        Ok(updated.is_some())
    }

    pub async fn activate_user(&self, user_id: &str) -> Result<bool, ServiceError> {
        let updated = self.db_client.set_user_active(user_id, true).await?;
        Ok(updated.is_some())
    }

    // Matches on ciphertext equality, then drops inactive accounts.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ServiceError> {
        let encrypted_password = password::encrypt(password, &self.password_secret)?;
        let user = self
            .db_client
            .get_user_by_credentials(username, &encrypted_password)
            .await?;

        Ok(user.filter(|u| u.is_active))
    }

    pub async fn validate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, ServiceError> {
        Ok(self.authenticate(username, password).await?.is_some())
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool, ServiceError> {
        let user = self
            .db_client
            .get_user(None, None, Some(username), None)
            .await?;
        Ok(user.is_some())
    }

    // Clients send either the department id or its name; the stored value is
    // always the id of the matched active department.
    async fn resolve_department(&self, provided: &str) -> Result<String, ServiceError> {
        let departments = self.department_service.get_active_departments().await?;
        departments
            .iter()
            .find(|d| {
                d.id.eq_ignore_ascii_case(provided) || d.name.eq_ignore_ascii_case(provided)
            })
            .map(|d| d.id.clone())
            .ok_or_else(|| {
                ServiceError::Validation(format!(
                    "Invalid department ID: {}. Please select from available departments.",
                    provided
                ))
            })
    }
}

fn contains_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

fn parse_role(role: Option<&str>) -> Result<Option<UserRole>, ServiceError> {
    match role {
        None | Some("") => Ok(None),
        Some(value) => UserRole::from_str(value)
            .map(Some)
            .ok_or_else(|| ServiceError::Validation(format!("Invalid role: {}", value))),
    }
}

// The primary key is the highest numeric id across all users, plus one.
fn next_user_pk(users: &[User]) -> String {
    let max_id = users
        .iter()
        .filter_map(|u| u.id.parse::<i32>().ok())
        .max()
        .unwrap_or(0);
    (max_id + 1).to_string()
}

fn department_prefix(department_id: &str) -> &'static str {
    match department_id {
        "1" => "IT",
        "2" => "HR",
        "3" => "FIN",
        "4" => "MKT",
        "5" => "OPS",
        "6" => "CS",
        _ => "USR",
    }
}

// Scans the department's existing user ids for `{prefix}NNN` and hands out
// the next zero-padded sequence number.
fn next_department_user_id(department_id: &str, department_users: &[User]) -> String {
    let prefix = department_prefix(department_id);
    let pattern = regex::Regex::new(&format!(r"{}(\d{{3}})", prefix)).unwrap();

    let max_sequence = department_users
        .iter()
        .filter_map(|user| pattern.captures(&user.user_id))
        .filter_map(|captures| captures.get(1))
        .filter_map(|sequence| sequence.as_str().parse::<i32>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:03}", prefix, max_sequence + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, user_id: &str, department_id: &str) -> User {
        User {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("{}@nexdesk.com", id),
            username: format!("user{}", id),
            password: "encrypted".to_string(),
            is_active: true,
            role: UserRole::Staff,
            department_id: department_id.to_string(),
            user_id: user_id.to_string(),
            created_by: "System".to_string(),
            created_time: Utc::now(),
            updated_time: Utc::now(),
        }
    }

    #[test]
    fn detects_digits_in_names() {
        assert!(contains_digit("J0hn"));
        assert!(!contains_digit("O'Brien"));
        assert!(!contains_digit("Anne Marie"));
    }

    #[test]
    fn parses_roles_case_insensitively() {
        assert_eq!(parse_role(Some("Admin")).unwrap(), Some(UserRole::Admin));
        assert_eq!(parse_role(Some("SUPERADMIN")).unwrap(), Some(UserRole::SuperAdmin));
        assert_eq!(parse_role(None).unwrap(), None);
        assert_eq!(parse_role(Some("")).unwrap(), None);
    }

    #[test]
    fn rejects_unknown_roles() {
        let err = parse_role(Some("wizard")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid role: wizard");
    }

    #[test]
    fn first_user_pk_is_one() {
        assert_eq!(next_user_pk(&[]), "1");
    }

    #[test]
    fn user_pk_increments_past_max_numeric_id() {
        let users = vec![user("1", "IT001", "1"), user("9", "HR003", "2"), user("4", "IT002", "1")];
        assert_eq!(next_user_pk(&users), "10");
    }

    #[test]
    fn user_pk_ignores_non_numeric_ids() {
        let users = vec![user("abc", "USR001", "9"), user("2", "HR001", "2")];
        assert_eq!(next_user_pk(&users), "3");
    }

    #[test]
    fn known_departments_map_to_prefixes() {
        assert_eq!(department_prefix("1"), "IT");
        assert_eq!(department_prefix("3"), "FIN");
        assert_eq!(department_prefix("6"), "CS");
        assert_eq!(department_prefix("42"), "USR");
    }

    #[test]
    fn first_department_user_id_starts_at_001() {
        assert_eq!(next_department_user_id("1", &[]), "IT001");
    }

    #[test]
    fn department_user_id_continues_sequence() {
        let department_users = vec![
            user("1", "IT001", "1"),
            user("2", "IT007", "1"),
            user("3", "IT003", "1"),
        ];
        assert_eq!(next_department_user_id("1", &department_users), "IT008");
    }

    #[test]
    fn department_user_id_skips_malformed_ids() {
        let department_users = vec![user("1", "ITX", "1"), user("2", "IT02", "1")];
        assert_eq!(next_department_user_id("1", &department_users), "IT001");
    }

    #[test]
    fn department_user_id_rolls_into_four_digits() {
        let department_users = vec![user("1", "IT999", "1")];
        assert_eq!(next_department_user_id("1", &department_users), "IT1000");
    }
}
