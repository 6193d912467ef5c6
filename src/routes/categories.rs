use crate::{error::AppError, models::Category};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

const DEFAULT_COLOR: &str = "#3B82F6";

#[derive(Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub post_count: i64,
}

#[derive(Serialize)]
pub struct ListCategoriesResponse {
    pub success: bool,
    pub categories: Vec<CategoryWithCount>,
}

pub async fn get_categories(
    State(pool): State<PgPool>,
) -> Result<Json<ListCategoriesResponse>, AppError> {
    // Counts reflect only PUBLISHED posts, matching the public listing.
    let categories = sqlx::query_as::<_, CategoryWithCount>(
        "SELECT c.id, c.name, c.slug, c.description, c.color, c.created_at,
            (SELECT COUNT(*) FROM post_categories pc
             JOIN posts p ON p.id = pc.post_id
             WHERE pc.category_id = c.id AND p.status = 'PUBLISHED') AS post_count
         FROM categories c
         ORDER BY c.name ASC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(ListCategoriesResponse {
        success: true,
        categories,
    }))
}

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

#[derive(Serialize)]
pub struct CategoryDetailResponse {
    pub success: bool,
    pub category: Category,
}

pub async fn create_category(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryDetailResponse>, AppError> {
    let (Some(name), Some(slug)) = (
        payload.name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::validation("Name and slug are required"));
    };

    let slug_taken =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&pool)
            .await?;
    if slug_taken {
        return Err(AppError::validation(
            "Category with this slug already exists",
        ));
    }

    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, slug, description, color)
         VALUES ($1, $2, $3, $4)
         RETURNING id, name, slug, description, color, created_at",
    )
    .bind(name)
    .bind(slug)
    .bind(&payload.description)
    .bind(payload.color.as_deref().unwrap_or(DEFAULT_COLOR))
    .fetch_one(&pool)
    .await
    .map_err(|e| AppError::unique_violation(e, "Category with this slug already exists"))?;

    Ok(Json(CategoryDetailResponse {
        success: true,
        category,
    }))
}
