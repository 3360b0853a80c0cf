use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use dt_api::{create_app, AppState};
use dt_core::services::{TokenCleanupService, TokenService, TokenServiceConfig};
use dt_infra::database::{DatabasePool, MySqlRefreshTokenStore};
use dt_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    dt_infra::init_tracing(&config.logging).context("failed to initialize tracing")?;

    tracing::info!(environment = %config.environment, "Starting session service");
    if config.auth.jwt.is_using_default_secret() {
        tracing::warn!("JWT_SECRET is not set, using the development secret");
    }

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let store = Arc::new(MySqlRefreshTokenStore::new(pool.get_pool().clone()));

    let service_config = TokenServiceConfig::from_jwt_config(&config.auth.jwt)
        .context("invalid token configuration")?;
    let token_service = Arc::new(TokenService::new(Arc::clone(&store), service_config));

    let cleanup = Arc::new(TokenCleanupService::new(
        Arc::clone(&store),
        (&config.auth.cleanup).into(),
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_state = web::Data::new(AppState::new(
        token_service,
        config.auth.session.clone(),
        config.pagination,
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Listening");

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone()).wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    pool.close().await;
    tracing::info!("Shut down");

    Ok(())
}
