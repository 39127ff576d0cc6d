/**
 * Server Configuration
 *
 * Loads the PostgreSQL connection from the environment and runs embedded
 * migrations. Unlike optional services, the store is load-bearing for
 * every competition operation, so a missing or unreachable `DATABASE_URL`
 * returns `None` and the binary refuses to start.
 */
use sqlx::PgPool;

/// Connect to the database and run migrations.
///
/// Returns `None` when `DATABASE_URL` is unset or the connection fails;
/// the caller decides whether that is fatal (the server binary treats it
/// as fatal).
pub async fn load_database() -> Option<PgPool> {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::error!("DATABASE_URL not set; the competition store is required");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            // Continue anyway - migrations might have already been run
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
