//! Cartera bot server
//!
//! Main entry point: receives Telegram updates over a webhook and answers
//! each command in the webhook response.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cartera_bot::{AppState, CommandService, Guard, TelegramClient, create_router};
use cartera_core::ledger::AccountBook;
use cartera_db::{BalanceStore, connect, migrate};
use cartera_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cartera=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database and bring the schema up to date
    let db = connect(&config.database.url()).await?;
    migrate(&db).await?;
    info!(database = %config.database.name, "Connected to database");

    let book = AccountBook::from_names(
        &config.ledger.cash_account,
        config.ledger.real_money_accounts.as_slice(),
    )?;
    info!(
        cash = %book.cash(),
        real_money = ?config.ledger.real_money_accounts,
        "Account classification loaded"
    );

    // Register the webhook when a public URL is configured
    if let Some(url) = &config.telegram.webhook_url {
        TelegramClient::new(&config.telegram.token)
            .set_webhook(url, config.telegram.webhook_secret.as_deref())
            .await?;
    } else {
        info!("No webhook URL configured, expecting it to be registered already");
    }

    // Create application state
    let service = CommandService::new(
        BalanceStore::new(db, book),
        Guard::new(config.auth.user_id),
    );
    let state = AppState::new(service, config.telegram.webhook_secret.as_deref());

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
