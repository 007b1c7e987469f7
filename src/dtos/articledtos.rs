use serde::{Deserialize, Serialize};

use crate::models::articlemodel::Article;

// Client payload for add/update; validation messages are collected by the
// knowledge-base service, not by `validator`, to keep the full error list.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SaveArticleDto {
    pub title: Option<String>,
    #[serde(rename = "categoryId")]
    pub category: Option<String>,
    pub author: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleSummaryDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: String,
}

impl ArticleSummaryDto {
    pub fn from_article(article: &Article) -> Self {
        ArticleSummaryDto {
            id: article.id.to_owned(),
            title: article.title.to_owned(),
            author: article.author.to_owned(),
            status: "ACTIVE".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryDto {
    #[serde(rename = "categoryId")]
    pub category_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "displayOrder")]
    pub display_order: i32,
    pub articles: Vec<ArticleSummaryDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleDetailDto {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(rename = "categoryId")]
    pub category_id: String,
    #[serde(rename = "categoryName")]
    pub category_name: String,
}

impl ArticleDetailDto {
    pub fn from_article(article: &Article) -> Self {
        ArticleDetailDto {
            id: article.id.to_owned(),
            title: article.title.to_owned(),
            content: article.content.to_owned(),
            author: article.author.to_owned(),
            category_id: article.category.to_owned(),
            category_name: article.category.to_owned(),
        }
    }
}
