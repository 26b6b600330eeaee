use anyhow::Context;
use recipe_server::config::ServerConfig;
use recipe_server::{api, app, db, telemetry, AppState};
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    // A missing .env file is fine; real deployments set the environment directly.
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let _telemetry = telemetry::init_telemetry(&config.telemetry)?;

    let pool = db::create_pool(&config.database)?;
    let state = AppState::new(pool, &config.http);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("OpenAPI spec available at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
