use crate::config::AppConfig;
use sqlx::PgPool;

// Connect the pool and execute any pending migrations
pub async fn setup_database(config: &AppConfig) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(&config.database_url).await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations executed");
    }

    Ok(pool)
}
