use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, sqlx::FromRow, Clone)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub category: String,
    pub author: String,
    pub content: String,
}
