use crate::error::AppError;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithCount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
}

#[derive(Serialize)]
pub struct ListAuthorsResponse {
    pub success: bool,
    pub authors: Vec<AuthorWithCount>,
}

pub async fn get_authors(
    State(pool): State<PgPool>,
) -> Result<Json<ListAuthorsResponse>, AppError> {
    let authors = sqlx::query_as::<_, AuthorWithCount>(
        "SELECT a.id, a.name, a.email, a.bio, a.avatar, a.website, a.twitter, a.linkedin,
            a.created_at,
            (SELECT COUNT(*) FROM posts p
             WHERE p.author_id = a.id AND p.status = 'PUBLISHED') AS post_count
         FROM authors a
         ORDER BY a.name ASC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(ListAuthorsResponse {
        success: true,
        authors,
    }))
}
