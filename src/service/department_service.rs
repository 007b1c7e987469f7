// services/department_service.rs
use std::sync::Arc;

use crate::{
    db::{db::DBClient, departmentdb::DepartmentExt},
    dtos::departmentdtos::{CreateDepartmentDto, UpdateDepartmentDto},
    models::departmentmodel::Department,
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct DepartmentService {
    db_client: Arc<DBClient>,
}

impl DepartmentService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn get_all_departments(&self) -> Result<Vec<Department>, ServiceError> {
        let mut departments = self.db_client.get_departments().await?;
        sort_by_numeric_id(&mut departments);
        Ok(departments)
    }

    pub async fn get_active_departments(&self) -> Result<Vec<Department>, ServiceError> {
        let mut departments = self
            .db_client
            .get_departments()
            .await?
            .into_iter()
            .filter(|d| d.is_active)
            .collect::<Vec<_>>();
        sort_by_numeric_id(&mut departments);
        Ok(departments)
    }

    pub async fn get_department(&self, id: &str) -> Result<Option<Department>, ServiceError> {
        Ok(self.db_client.get_department(id).await?)
    }

    pub async fn department_exists(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.db_client.get_department_by_name(name).await?.is_some())
    }

    pub async fn create_department(
        &self,
        body: CreateDepartmentDto,
    ) -> Result<Department, ServiceError> {
        if self.department_exists(&body.name).await? {
            return Err(ServiceError::Validation(format!(
                "Department '{}' already exists.",
                body.name
            )));
        }

        let departments = self.db_client.get_departments().await?;
        let id = next_department_id(&departments);

        let department = self
            .db_client
            .save_department(
                id,
                body.name,
                body.description.unwrap_or_default(),
                "System".to_string(),
            )
            .await?;

        Ok(department)
    }

    pub async fn update_department(
        &self,
        id: &str,
        body: UpdateDepartmentDto,
    ) -> Result<Department, ServiceError> {
        let existing = self.db_client.get_department(id).await?.ok_or_else(|| {
            ServiceError::Validation(format!("Department with ID '{}' not found.", id))
        })?;

        let departments = self.db_client.get_departments().await?;
        let name_taken = departments
            .iter()
            .any(|d| d.id != existing.id && d.name.eq_ignore_ascii_case(&body.name));
        if name_taken {
            return Err(ServiceError::Validation(format!(
                "Department name '{}' is already in use.",
                body.name
            )));
        }

        let department = self
            .db_client
            .update_department(
                existing.id,
                body.name,
                body.description.unwrap_or(existing.description),
                body.is_active,
                "System".to_string(),
            )
            .await?;

        Ok(department)
    }

    // Soft delete, the row stays behind for historical user references.
    pub async fn delete_department(&self, id: &str) -> Result<bool, ServiceError> {
        let rows = self.db_client.deactivate_department(id, "System").await?;
        Ok(rows > 0)
    }
}

// IDs are numeric strings, so the listing order has to parse them.
fn sort_by_numeric_id(departments: &mut [Department]) {
    departments.sort_by_key(|d| d.id.parse::<i32>().unwrap_or(0));
}

fn next_department_id(departments: &[Department]) -> String {
    let max_id = departments
        .iter()
        .filter_map(|d| d.id.parse::<i32>().ok())
        .max()
        .unwrap_or(0);
    (max_id + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn department(id: &str, name: &str, is_active: bool) -> Department {
        Department {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            is_active,
            created_time: Utc::now(),
            created_by: "System".to_string(),
            updated_time: Utc::now(),
            updated_by: "System".to_string(),
        }
    }

    #[test]
    fn sorts_departments_by_numeric_id() {
        let mut departments = vec![
            department("10", "Operations", true),
            department("2", "HR", true),
            department("1", "IT", true),
        ];

        sort_by_numeric_id(&mut departments);

        let ids: Vec<&str> = departments.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10"]);
    }

    #[test]
    fn next_department_id_starts_at_one() {
        assert_eq!(next_department_id(&[]), "1");
    }

    #[test]
    fn next_department_id_increments_past_max() {
        let departments = vec![
            department("1", "IT", true),
            department("7", "Legal", false),
            department("3", "Finance", true),
        ];

        assert_eq!(next_department_id(&departments), "8");
    }

    #[test]
    fn next_department_id_skips_non_numeric_ids() {
        let departments = vec![department("abc", "Broken", true), department("2", "HR", true)];

        assert_eq!(next_department_id(&departments), "3");
    }
}
