/**
 * Competition Server Entry Point
 *
 * Initializes tracing, connects to PostgreSQL, and serves the axum app.
 */

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!("[STARTUP] Server initialization started");

    // The store backs every competition operation; without it there is
    // nothing to serve.
    let Some(pool) = lingoduel::backend::server::config::load_database().await else {
        eprintln!("[STARTUP] DATABASE_URL must point at a reachable PostgreSQL instance");
        std::process::exit(1);
    };

    let app = lingoduel::backend::server::init::create_app(pool).await;

    let port = std::env::var("SERVER_PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse::<u16>()
        .unwrap_or(3000);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
