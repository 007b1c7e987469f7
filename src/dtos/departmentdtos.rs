use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::departmentmodel::Department;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentDto {
    #[validate(
        length(min = 1, message = "Name is required"),
        length(max = 50, message = "Name must not exceed 50 characters")
    )]
    pub name: String,

    pub description: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateDepartmentDto {
    #[validate(
        length(min = 1, message = "Name is required"),
        length(max = 50, message = "Name must not exceed 50 characters")
    )]
    pub name: String,

    pub description: Option<String>,

    #[serde(rename = "isActive", default = "default_is_active")]
    pub is_active: bool,
}

fn default_is_active() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilterDepartmentDto {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    #[serde(rename = "updatedTime")]
    pub updated_time: DateTime<Utc>,
}

impl FilterDepartmentDto {
    pub fn filter_department(department: &Department) -> Self {
        FilterDepartmentDto {
            id: department.id.to_owned(),
            name: department.name.to_owned(),
            description: department.description.to_owned(),
            is_active: department.is_active,
            created_time: department.created_time,
            updated_time: department.updated_time,
        }
    }

    pub fn filter_departments(departments: &[Department]) -> Vec<FilterDepartmentDto> {
        departments
            .iter()
            .map(FilterDepartmentDto::filter_department)
            .collect()
    }
}

// Trimmed shape used by the active-departments list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveDepartmentDto {
    pub id: String,
    pub name: String,
    pub description: String,
}
