// db/departmentdb.rs
use async_trait::async_trait;

use super::db::DBClient;

use crate::models::departmentmodel::Department;

#[async_trait]
pub trait DepartmentExt {
    async fn get_department(&self, id: &str) -> Result<Option<Department>, sqlx::Error>;

    async fn get_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, sqlx::Error>;

    async fn get_departments(&self) -> Result<Vec<Department>, sqlx::Error>;

    async fn get_department_count(&self) -> Result<i64, sqlx::Error>;

    async fn save_department<T: Into<String> + Send>(
        &self,
        id: T,
        name: T,
        description: T,
        created_by: T,
    ) -> Result<Department, sqlx::Error>;

    async fn update_department<T: Into<String> + Send>(
        &self,
        id: T,
        name: T,
        description: T,
        is_active: bool,
        updated_by: T,
    ) -> Result<Department, sqlx::Error>;

    async fn deactivate_department(
        &self,
        id: &str,
        updated_by: &str,
    ) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl DepartmentExt for DBClient {
    async fn get_department(&self, id: &str) -> Result<Option<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, is_active, created_time, created_by, updated_time, updated_by
            FROM departments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, is_active, created_time, created_by, updated_time, updated_by
            FROM departments
            WHERE LOWER(name) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_departments(&self) -> Result<Vec<Department>, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"
            SELECT id, name, description, is_active, created_time, created_by, updated_time, updated_by
            FROM departments
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_department_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM departments")
            .fetch_one(&self.pool)
            .await
    }

    async fn save_department<T: Into<String> + Send>(
        &self,
        id: T,
        name: T,
        description: T,
        created_by: T,
    ) -> Result<Department, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"
            INSERT INTO departments (id, name, description, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, is_active, created_time, created_by, updated_time, updated_by
            "#,
        )
        .bind(id.into())
        .bind(name.into())
        .bind(description.into())
        .bind(created_by.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_department<T: Into<String> + Send>(
        &self,
        id: T,
        name: T,
        description: T,
        is_active: bool,
        updated_by: T,
    ) -> Result<Department, sqlx::Error> {
        sqlx::query_as::<_, Department>(
            r#"
            UPDATE departments
            SET name = $2,
                description = $3,
                is_active = $4,
                updated_by = $5,
                updated_time = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, name, description, is_active, created_time, created_by, updated_time, updated_by
            "#,
        )
        .bind(id.into())
        .bind(name.into())
        .bind(description.into())
        .bind(is_active)
        .bind(updated_by.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn deactivate_department(
        &self,
        id: &str,
        updated_by: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET is_active = FALSE,
                updated_by = $2,
                updated_time = CURRENT_TIMESTAMP
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(updated_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
