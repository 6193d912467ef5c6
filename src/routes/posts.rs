use crate::{
    error::AppError,
    models::{Author, Category, Post, Tag},
    params::{ListParams, Pagination},
    query::{POST_COLUMNS, PostFilter},
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub featured_image: Option<String>,
    pub reading_time: i32,
    pub status: String,
    pub featured: bool,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Author,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

impl PostResponse {
    fn new(post: Post, author: Author, categories: Vec<Category>, tags: Vec<Tag>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            featured_image: post.featured_image,
            reading_time: post.reading_time,
            status: post.status,
            featured: post.featured,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author,
            categories,
            tags,
        }
    }
}

// Pull the author and both association lists for one post row.
async fn hydrate_post(pool: &PgPool, post: Post) -> Result<PostResponse, AppError> {
    let author = sqlx::query_as::<_, Author>(
        "SELECT id, name, email, bio, avatar, website, twitter, linkedin, created_at
         FROM authors WHERE id = $1",
    )
    .bind(post.author_id)
    .fetch_one(pool)
    .await?;

    let categories = sqlx::query_as::<_, Category>(
        "SELECT c.id, c.name, c.slug, c.description, c.color, c.created_at
         FROM categories c
         JOIN post_categories pc ON pc.category_id = c.id
         WHERE pc.post_id = $1
         ORDER BY c.name ASC",
    )
    .bind(post.id)
    .fetch_all(pool)
    .await?;

    let tags = sqlx::query_as::<_, Tag>(
        "SELECT t.id, t.name, t.slug, t.created_at
         FROM tags t
         JOIN post_tags pt ON pt.tag_id = t.id
         WHERE pt.post_id = $1
         ORDER BY t.name ASC",
    )
    .bind(post.id)
    .fetch_all(pool)
    .await?;

    Ok(PostResponse::new(post, author, categories, tags))
}

#[derive(Serialize)]
pub struct ListPostsResponse {
    pub success: bool,
    pub posts: Vec<PostResponse>,
    pub pagination: Pagination,
}

pub async fn get_posts(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListPostsResponse>, AppError> {
    let filter = PostFilter::from_params(&params);
    let page = params.page();
    let limit = params.limit();

    let rows = sqlx::query_as::<_, Post>(&filter.page_sql())
        .bind(filter.search_pattern())
        .bind(&filter.category)
        .bind(&filter.tag)
        .bind(filter.sort.only_featured())
        .bind(limit)
        .bind(params.offset())
        .fetch_all(&pool)
        .await?;

    let total = sqlx::query_scalar::<_, i64>(&filter.count_sql())
        .bind(filter.search_pattern())
        .bind(&filter.category)
        .bind(&filter.tag)
        .bind(filter.sort.only_featured())
        .fetch_one(&pool)
        .await?;

    let mut posts = Vec::with_capacity(rows.len());
    for row in rows {
        posts.push(hydrate_post(&pool, row).await?);
    }

    Ok(Json(ListPostsResponse {
        success: true,
        posts,
        pagination: Pagination::new(page, limit, total),
    }))
}

#[derive(Serialize)]
pub struct PostDetailResponse {
    pub success: bool,
    pub post: PostResponse,
}

pub async fn get_one_post(
    State(pool): State<PgPool>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let query = format!(
        "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1 AND status = 'PUBLISHED'"
    );
    let post = sqlx::query_as::<_, Post>(&query)
        .bind(&slug)
        .fetch_optional(&pool)
        .await?
        .ok_or(AppError::NotFound)?;

    let post = hydrate_post(&pool, post).await?;

    Ok(Json(PostDetailResponse {
        success: true,
        post,
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub featured_image: Option<String>,
    pub author_id: Option<i64>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// max(1, ceil(words / 200)) minutes, 200 wpm.
pub fn reading_time(content: &str) -> i32 {
    let words = content.split_whitespace().count() as i32;
    ((words + 199) / 200).max(1)
}

pub async fn create_post(
    State(pool): State<PgPool>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let (Some(title), Some(slug), Some(content), Some(author_id)) = (
        required(&payload.title),
        required(&payload.slug),
        required(&payload.content),
        payload.author_id,
    ) else {
        return Err(AppError::validation("Missing required fields"));
    };

    let slug_taken =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&pool)
            .await?;
    if slug_taken {
        return Err(AppError::validation("Post with this slug already exists"));
    }

    // The post row and its join records succeed or fail as one unit; a
    // mid-sequence failure must not leave a partially associated post.
    let mut tx = pool.begin().await?;

    let insert = format!(
        "INSERT INTO posts (title, slug, excerpt, content, featured_image, reading_time, author_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {POST_COLUMNS}"
    );
    let post = sqlx::query_as::<_, Post>(&insert)
        .bind(title)
        .bind(slug)
        .bind(&payload.excerpt)
        .bind(content)
        .bind(&payload.featured_image)
        .bind(reading_time(content))
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::unique_violation(e, "Post with this slug already exists"))?;

    for category_id in &payload.category_ids {
        sqlx::query("INSERT INTO post_categories (post_id, category_id) VALUES ($1, $2)")
            .bind(post.id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
    }

    for tag_id in &payload.tag_ids {
        sqlx::query("INSERT INTO post_tags (post_id, tag_id) VALUES ($1, $2)")
            .bind(post.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let post = hydrate_post(&pool, post).await?;

    Ok(Json(PostDetailResponse {
        success: true,
        post,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_time_rounds_up() {
        let four_hundred = vec!["word"; 400].join(" ");
        assert_eq!(reading_time(&four_hundred), 2);

        let fifty = vec!["word"; 50].join(" ");
        assert_eq!(reading_time(&fifty), 1);
    }

    #[test]
    fn reading_time_never_below_one_minute() {
        assert_eq!(reading_time(""), 1);
        assert_eq!(reading_time("   "), 1);
    }

    #[test]
    fn blank_required_fields_count_as_missing() {
        assert_eq!(required(&Some("  ".into())), None);
        assert_eq!(required(&None), None);
        assert_eq!(required(&Some(" hello ".into())), Some("hello"));
    }
}
