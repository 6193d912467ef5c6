use crate::error::AppError;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TagWithCount {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
}

#[derive(Serialize)]
pub struct ListTagsResponse {
    pub success: bool,
    pub tags: Vec<TagWithCount>,
}

pub async fn get_tags(State(pool): State<PgPool>) -> Result<Json<ListTagsResponse>, AppError> {
    let tags = sqlx::query_as::<_, TagWithCount>(
        "SELECT t.id, t.name, t.slug, t.created_at,
            (SELECT COUNT(*) FROM post_tags pt
             JOIN posts p ON p.id = pt.post_id
             WHERE pt.tag_id = t.id AND p.status = 'PUBLISHED') AS post_count
         FROM tags t
         ORDER BY t.name ASC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(ListTagsResponse {
        success: true,
        tags,
    }))
}
