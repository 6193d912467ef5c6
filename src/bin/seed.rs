//! Populates fixture data for local development. Safe to re-run: every
//! insert upserts on its unique key.

use config::{Config, File};
use sqlx::PgPool;

async fn upsert_author(pool: &PgPool, name: &str, email: &str, bio: &str) -> anyhow::Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO authors (name, email, bio)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO UPDATE SET name = EXCLUDED.name, bio = EXCLUDED.bio
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(bio)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn upsert_category(
    pool: &PgPool,
    name: &str,
    slug: &str,
    description: &str,
    color: &str,
) -> anyhow::Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, slug, description, color)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .bind(slug)
    .bind(description)
    .bind(color)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn upsert_tag(pool: &PgPool, name: &str, slug: &str) -> anyhow::Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO tags (name, slug)
         VALUES ($1, $2)
         ON CONFLICT (slug) DO UPDATE SET name = EXCLUDED.name
         RETURNING id",
    )
    .bind(name)
    .bind(slug)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

struct PostFixture<'a> {
    title: &'a str,
    slug: &'a str,
    excerpt: &'a str,
    content: &'a str,
    featured: bool,
    author_id: i64,
    category_ids: &'a [i64],
    tag_ids: &'a [i64],
}

async fn upsert_post(pool: &PgPool, fixture: PostFixture<'_>) -> anyhow::Result<i64> {
    let words = fixture.content.split_whitespace().count() as i32;
    let reading_time = ((words + 199) / 200).max(1);

    let post_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO posts (title, slug, excerpt, content, reading_time, featured, author_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         ON CONFLICT (slug) DO UPDATE SET title = EXCLUDED.title
         RETURNING id",
    )
    .bind(fixture.title)
    .bind(fixture.slug)
    .bind(fixture.excerpt)
    .bind(fixture.content)
    .bind(reading_time)
    .bind(fixture.featured)
    .bind(fixture.author_id)
    .fetch_one(pool)
    .await?;

    for category_id in fixture.category_ids {
        sqlx::query(
            "INSERT INTO post_categories (post_id, category_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(category_id)
        .execute(pool)
        .await?;
    }
    for tag_id in fixture.tag_ids {
        sqlx::query(
            "INSERT INTO post_tags (post_id, tag_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_id)
        .bind(tag_id)
        .execute(pool)
        .await?;
    }

    Ok(post_id)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => Config::builder()
            .add_source(File::with_name("config"))
            .build()?
            .get_string("database_url")?,
    };

    let pool = PgPool::connect(&database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("Seeding fixture data...");

    let sarah = upsert_author(
        &pool,
        "Sarah Johnson",
        "sarah.johnson@example.com",
        "Tech writer covering software development and digital products.",
    )
    .await?;
    let michael = upsert_author(
        &pool,
        "Michael Chen",
        "michael.chen@example.com",
        "Full-stack developer and startup advisor.",
    )
    .await?;

    let technology = upsert_category(
        &pool,
        "Technology",
        "technology",
        "Latest trends in tech and software development.",
        "#3B82F6",
    )
    .await?;
    let design = upsert_category(
        &pool,
        "Design",
        "design",
        "UI/UX principles and creative inspiration.",
        "#8B5CF6",
    )
    .await?;
    let business = upsert_category(
        &pool,
        "Business",
        "business",
        "Entrepreneurship and growth insights.",
        "#10B981",
    )
    .await?;

    let rust_tag = upsert_tag(&pool, "Rust", "rust").await?;
    let web_tag = upsert_tag(&pool, "Web Development", "web-development").await?;
    let ux_tag = upsert_tag(&pool, "UX", "ux").await?;

    upsert_post(
        &pool,
        PostFixture {
            title: "Building Reliable Web Services",
            slug: "building-reliable-web-services",
            excerpt: "What reliability means for a small API tier.",
            content: "Reliability starts with boring choices. A connection pool sized for the \
                      workload, migrations that run before traffic arrives, and handlers that \
                      treat every failure as an expected branch rather than a surprise. This \
                      post walks through the small decisions that keep a service predictable.",
            featured: true,
            author_id: sarah,
            category_ids: &[technology],
            tag_ids: &[rust_tag, web_tag],
        },
    )
    .await?;

    upsert_post(
        &pool,
        PostFixture {
            title: "Designing for Readers, Not Dashboards",
            slug: "designing-for-readers",
            excerpt: "Editorial design lessons for content-heavy sites.",
            content: "A blog earns attention with typography and pacing long before any feature \
                      matters. We look at line length, contrast, and how reading time estimates \
                      help readers commit to longer pieces.",
            featured: false,
            author_id: michael,
            category_ids: &[design],
            tag_ids: &[ux_tag],
        },
    )
    .await?;

    upsert_post(
        &pool,
        PostFixture {
            title: "Pricing a Content Product",
            slug: "pricing-a-content-product",
            excerpt: "Notes on sustainable publishing economics.",
            content: "Most content businesses fail on unit economics, not on content quality. \
                      This piece covers the levers that actually move margins for a small \
                      editorial team.",
            featured: false,
            author_id: michael,
            category_ids: &[business],
            tag_ids: &[],
        },
    )
    .await?;

    println!("Seed complete");
    Ok(())
}
