use axum::Router;
use clap::Parser;
use common::{AppState, Config};
use database::Database;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Load Config from CLI args / environment
    let config = Config::parse();

    // 3. Initialize Database
    let db = Database::new(&config.database_url).await?;
    db.run_migrations().await?;

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
    });

    // 4. Routing: entity CRUD plus the read-only analytics projections.
    // The per-card balance projection lives under /cards with the CRUD routes.
    let cards_routes = cards::handler::cards_router(state.clone())
        .merge(analytics::handler::card_balance_router(state.clone()));

    let app = Router::<Arc<AppState>>::new()
        .nest("/cards", cards_routes)
        .nest("/budgets", budgets::handler::budgets_router(state.clone()))
        .nest("/transactions", transactions::handler::transactions_router(state.clone()))
        .nest("/analytics", analytics::handler::analytics_router(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // 5. Start Server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
