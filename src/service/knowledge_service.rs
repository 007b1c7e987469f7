// services/knowledge_service.rs
use std::{collections::BTreeMap, sync::Arc};

use uuid::Uuid;

use crate::{
    db::{articledb::ArticleExt, db::DBClient},
    dtos::articledtos::{ArticleSummaryDto, CategoryDto, SaveArticleDto},
    models::articlemodel::Article,
    service::error::ServiceError,
};

#[derive(Debug, Clone)]
pub struct KnowledgeService {
    db_client: Arc<DBClient>,
}

impl KnowledgeService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn get_categories(&self) -> Result<Vec<CategoryDto>, ServiceError> {
        let articles = self.db_client.get_articles().await?;
        Ok(group_articles_by_category(&articles))
    }

    pub async fn get_article(&self, id: &str) -> Result<Option<Article>, ServiceError> {
        Ok(self.db_client.get_article(id).await?)
    }

    pub async fn add_article(&self, body: SaveArticleDto) -> Result<Article, ServiceError> {
        let author = body
            .author
            .filter(|author| !author.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let article = self
            .db_client
            .save_article(
                new_article_id(),
                body.title.unwrap_or_default(),
                body.category.unwrap_or_default(),
                author,
                body.content.unwrap_or_default(),
            )
            .await?;

        Ok(article)
    }

    pub async fn update_article(
        &self,
        id: &str,
        body: SaveArticleDto,
    ) -> Result<Option<Article>, ServiceError> {
        let existing = match self.db_client.get_article(id).await? {
            Some(article) => article,
            None => return Ok(None),
        };

        // The author only changes when the client sends a non-blank value.
        let author = body
            .author
            .filter(|author| !author.trim().is_empty())
            .unwrap_or(existing.author);

        let article = self
            .db_client
            .update_article(
                existing.id,
                body.title.unwrap_or(existing.title),
                body.category.unwrap_or(existing.category),
                author,
                body.content.unwrap_or(existing.content),
            )
            .await?;

        Ok(Some(article))
    }

    pub async fn delete_article(&self, id: &str) -> Result<bool, ServiceError> {
        let rows = self.db_client.delete_article(id).await?;
        Ok(rows > 0)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// Collects every failure so the client can render the full list at once.
pub fn validate_article(body: &SaveArticleDto) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(body.category.as_deref()) {
        errors.push("Please select a category.".to_string());
    }

    if is_blank(body.title.as_deref()) {
        errors.push("Title is required.".to_string());
    } else if body.title.as_deref().unwrap_or_default().chars().count() > 100 {
        errors.push("Title must not exceed 100 characters.".to_string());
    }

    if is_blank(body.content.as_deref()) {
        errors.push("Content is required.".to_string());
    } else if body.content.as_deref().unwrap_or_default().chars().count() < 50 {
        errors.push("Content must be at least 50 characters.".to_string());
    }

    errors
}

// Articles keep the 8-character uppercase GUID-prefix ids of the legacy data.
pub fn new_article_id() -> String {
    Uuid::new_v4().to_string()[..8].to_uppercase()
}

fn group_articles_by_category(articles: &[Article]) -> Vec<CategoryDto> {
    let mut groups: BTreeMap<String, Vec<ArticleSummaryDto>> = BTreeMap::new();

    for article in articles {
        let category = if article.category.trim().is_empty() {
            "Uncategorized".to_string()
        } else {
            article.category.clone()
        };
        groups
            .entry(category)
            .or_default()
            .push(ArticleSummaryDto::from_article(article));
    }

    groups
        .into_iter()
        .map(|(category, articles)| CategoryDto {
            category_id: category.clone(),
            name: category,
            description: String::new(),
            display_order: 0,
            articles,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, title: &str, category: &str) -> Article {
        Article {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            author: "Jane".to_string(),
            content: "content".to_string(),
        }
    }

    #[test]
    fn empty_submission_collects_all_errors() {
        let errors = validate_article(&SaveArticleDto::default());

        assert_eq!(
            errors,
            vec![
                "Please select a category.".to_string(),
                "Title is required.".to_string(),
                "Content is required.".to_string(),
            ]
        );
    }

    #[test]
    fn long_title_and_short_content_are_rejected() {
        let body = SaveArticleDto {
            title: Some("t".repeat(101)),
            category: Some("Network".to_string()),
            author: None,
            content: Some("too short".to_string()),
        };

        let errors = validate_article(&body);

        assert_eq!(
            errors,
            vec![
                "Title must not exceed 100 characters.".to_string(),
                "Content must be at least 50 characters.".to_string(),
            ]
        );
    }

    #[test]
    fn valid_submission_passes() {
        let body = SaveArticleDto {
            title: Some("Resetting your VPN profile".to_string()),
            category: Some("Network".to_string()),
            author: Some("Jane".to_string()),
            content: Some("x".repeat(50)),
        };

        assert!(validate_article(&body).is_empty());
    }

    #[test]
    fn article_ids_are_eight_uppercase_characters() {
        let id = new_article_id();

        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn groups_articles_by_category_ordered_by_name() {
        let articles = vec![
            article("A1", "Printer jam", "Hardware"),
            article("A2", "VPN setup", "Network"),
            article("A3", "Monitor flicker", "Hardware"),
            article("A4", "Lost badge", ""),
        ];

        let categories = group_articles_by_category(&articles);

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Hardware", "Network", "Uncategorized"]);
        assert_eq!(categories[0].articles.len(), 2);
        assert_eq!(categories[0].articles[0].status, "ACTIVE");
        assert_eq!(categories[2].articles[0].id, "A4");
    }
}
