// db/articledb.rs
use async_trait::async_trait;

use super::db::DBClient;

use crate::models::articlemodel::Article;

#[async_trait]
pub trait ArticleExt {
    async fn get_article(&self, id: &str) -> Result<Option<Article>, sqlx::Error>;

    async fn get_article_by_title(
        &self,
        title: &str,
    ) -> Result<Option<Article>, sqlx::Error>;

    async fn get_articles(&self) -> Result<Vec<Article>, sqlx::Error>;

    async fn save_article<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        category: T,
        author: T,
        content: T,
    ) -> Result<Article, sqlx::Error>;

    async fn update_article<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        category: T,
        author: T,
        content: T,
    ) -> Result<Article, sqlx::Error>;

    async fn delete_article(&self, id: &str) -> Result<u64, sqlx::Error>;
}

#[async_trait]
impl ArticleExt for DBClient {
    async fn get_article(&self, id: &str) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, category, author, content
            FROM articles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_article_by_title(
        &self,
        title: &str,
    ) -> Result<Option<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, category, author, content
            FROM articles
            WHERE LOWER(title) = LOWER($1)
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_articles(&self) -> Result<Vec<Article>, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            SELECT id, title, category, author, content
            FROM articles
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn save_article<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        category: T,
        author: T,
        content: T,
    ) -> Result<Article, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (id, title, category, author, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, category, author, content
            "#,
        )
        .bind(id.into())
        .bind(title.into())
        .bind(category.into())
        .bind(author.into())
        .bind(content.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn update_article<T: Into<String> + Send>(
        &self,
        id: T,
        title: T,
        category: T,
        author: T,
        content: T,
    ) -> Result<Article, sqlx::Error> {
        sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET title = $2,
                category = $3,
                author = $4,
                content = $5
            WHERE id = $1
            RETURNING id, title, category, author, content
            "#,
        )
        .bind(id.into())
        .bind(title.into())
        .bind(category.into())
        .bind(author.into())
        .bind(content.into())
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_article(&self, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
