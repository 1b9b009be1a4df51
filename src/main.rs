use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use order_desk::adapters::locales::FilePhraseLoader;
use order_desk::adapters::sqlite::{self, SqliteCatalogStore, SqliteOrderLedger, SqliteUserRepository};
use order_desk::adapters::telegram::{InboundUpdate, TelegramConfig, TelegramGateway};
use order_desk::application::{CheckoutService, HandlerContext, NotificationFanout, SessionEngine};
use order_desk::config::AppConfig;
use order_desk::domain::i18n::PhraseResolver;
use order_desk::ports::MessagingGateway;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config);

    let admins = config.bot.admins()?;
    info!(admins = admins.len(), "Administrators configured");

    let loader = FilePhraseLoader::new(config.locale.directory());
    let catalog = loader.load(&config.locale.essential_languages()?).await?;
    let phrases = PhraseResolver::new(
        catalog,
        config.locale.default_language()?,
        config.locale.baseline_language()?,
    );
    info!(languages = phrases.languages().len(), "Phrase catalogs loaded");

    let db_path = config.database.resolve_path();
    let pool = sqlite::connect(&db_path, config.database.max_connections, config.database.acquire_timeout()).await?;
    sqlite::create_schema(&pool).await?;
    info!(path = %db_path.display(), "Database ready");

    let catalog_store = Arc::new(SqliteCatalogStore::new(pool.clone()));
    let ledger = Arc::new(SqliteOrderLedger::new(pool.clone()));
    let users = Arc::new(SqliteUserRepository::new(pool));

    let gateway = Arc::new(TelegramGateway::new(
        TelegramConfig::new(config.bot.token.clone())
            .with_api_url(config.bot.api_url.clone())
            .with_poll_timeout(config.bot.poll_timeout()),
    )?);

    let fanout = NotificationFanout::new(gateway.clone(), users.clone(), phrases.clone(), admins.clone());
    let checkout = CheckoutService::new(ledger.clone(), fanout);
    let ctx = HandlerContext::new(catalog_store, ledger, users, phrases, checkout, admins);
    let engine = Arc::new(SessionEngine::new(ctx, config.engine.handler_timeout()));

    info!("Order desk started, polling for updates");
    tokio::select! {
        _ = poll_loop(engine, gateway) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
        }
    }
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if config.json_logs() {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn poll_loop(engine: Arc<SessionEngine>, gateway: Arc<TelegramGateway>) {
    let mut offset = 0;
    loop {
        let updates = match gateway.poll(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "Polling failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            dispatch(engine.clone(), gateway.clone(), update).await;
        }
    }
}

/// Acknowledges a button press and hands the intent to its own task so one
/// slow user never holds up the poll loop.
async fn dispatch(engine: Arc<SessionEngine>, gateway: Arc<TelegramGateway>, update: InboundUpdate) {
    if let Some(query_id) = update.callback_query_id.as_deref() {
        if let Err(e) = gateway.answer_callback(query_id).await {
            warn!(update_id = update.update_id, error = %e, "Failed to answer button press");
        }
    }

    let Some(inbound) = update.inbound else {
        return;
    };

    tokio::spawn(async move {
        let user_id = inbound.profile.id;
        for reply in engine.handle(inbound).await {
            if let Err(e) = gateway.send(user_id, &reply).await {
                error!(%user_id, error = %e, "Reply delivery failed");
            }
        }
    });
}
