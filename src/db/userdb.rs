// db/userdb.rs
use async_trait::async_trait;

use super::db::DBClient;

use crate::models::usermodel::{User, UserRole};

#[async_trait]
pub trait UserExt {
    async fn get_user(
        &self,
        id: Option<&str>,
        user_id: Option<&str>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn get_users(&self) -> Result<Vec<User>, sqlx::Error>;

    async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>, sqlx::Error>;

    async fn get_users_by_department(
        &self,
        department_id: &str,
    ) -> Result<Vec<User>, sqlx::Error>;

    async fn get_user_count(&self) -> Result<i64, sqlx::Error>;

    async fn password_in_use(&self, password: &str) -> Result<bool, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn save_user<T: Into<String> + Send>(
        &self,
        id: T,
        first_name: T,
        last_name: T,
        email: T,
        username: T,
        password: T,
        role: UserRole,
        department_id: T,
        user_id: T,
        created_by: T,
    ) -> Result<User, sqlx::Error>;

    #[allow(clippy::too_many_arguments)]
    async fn update_user<T: Into<String> + Send>(
        &self,
        id: T,
        first_name: T,
        last_name: T,
        email: T,
        username: T,
        password: T,
        role: UserRole,
        department_id: T,
        is_active: bool,
    ) -> Result<User, sqlx::Error>;

    async fn set_user_active(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<Option<User>, sqlx::Error>;

    async fn delete_user(&self, user_id: &str) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(
        &self,
        id: Option<&str>,
        user_id: Option<&str>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<User>, sqlx::Error> {
        let mut user: Option<User> = None;

        if let Some(id) = id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, first_name, last_name, email, username, password,
                    is_active, role, department_id, user_id,
                    created_by, created_time, updated_time
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(user_id) = user_id {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, first_name, last_name, email, username, password,
                    is_active, role, department_id, user_id,
                    created_by, created_time, updated_time
                FROM users
                WHERE user_id = $1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(username) = username {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, first_name, last_name, email, username, password,
                    is_active, role, department_id, user_id,
                    created_by, created_time, updated_time
                FROM users
                WHERE username = $1
                "#,
            )
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        } else if let Some(email) = email {
            user = sqlx::query_as::<_, User>(
                r#"
                SELECT
                    id, first_name, last_name, email, username, password,
                    is_active, role, department_id, user_id,
                    created_by, created_time, updated_time
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        }

        Ok(user)
    }

    async fn get_user_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            FROM users
            WHERE username = $1 AND password = $2
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_users(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            FROM users
            ORDER BY first_name, last_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_users_by_role(&self, role: UserRole) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            FROM users
            WHERE role = $1
            ORDER BY first_name, last_name
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_users_by_department(
        &self,
        department_id: &str,
    ) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            FROM users
            WHERE department_id = $1
            ORDER BY first_name, last_name
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
    }

    async fn password_in_use(&self, password: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE password = $1)",
        )
        .bind(password)
        .fetch_one(&self.pool)
        .await
    }

    async fn save_user<T: Into<String> + Send>(
        &self,
        id: T,
        first_name: T,
        last_name: T,
        email: T,
        username: T,
        password: T,
        role: UserRole,
        department_id: T,
        user_id: T,
        created_by: T,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, first_name, last_name, email, username, password, role, department_id, user_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            "#,
        )
        .bind(id.into())
        .bind(first_name.into())
        .bind(last_name.into())
        .bind(email.into())
        .bind(username.into())
        .bind(password.into())
        .bind(role)
        .bind(department_id.into())
        .bind(user_id.into())
        .bind(created_by.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user<T: Into<String> + Send>(
        &self,
        id: T,
        first_name: T,
        last_name: T,
        email: T,
        username: T,
        password: T,
        role: UserRole,
        department_id: T,
        is_active: bool,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                email = $4,
                username = $5,
                password = $6,
                role = $7,
                department_id = $8,
                is_active = $9,
                updated_time = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            "#,
        )
        .bind(id.into())
        .bind(first_name.into())
        .bind(last_name.into())
        .bind(email.into())
        .bind(username.into())
        .bind(password.into())
        .bind(role)
        .bind(department_id.into())
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }

    async fn set_user_active(
        &self,
        user_id: &str,
        is_active: bool,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_active = $2,
                updated_time = CURRENT_TIMESTAMP
            WHERE user_id = $1
            RETURNING
                id, first_name, last_name, email, username, password,
                is_active, role, department_id, user_id,
                created_by, created_time, updated_time
            "#,
        )
        .bind(user_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_user(&self, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
