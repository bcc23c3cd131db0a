use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lotfolio_core::{
    accounts::{AccountService, AccountServiceTrait},
    inventory::{InventoryService, InventoryServiceTrait},
    market_data::QuoteProvider,
    portfolio::{HoldingsService, HoldingsServiceTrait},
    securities::{SecurityService, SecurityServiceTrait},
};
use lotfolio_market_data::{OfflineProvider, YahooProvider};
use lotfolio_storage_sqlite::{
    accounts::AccountRepository,
    db::{self, write_actor},
    inventory::InventoryRepository,
    securities::SecurityRepository,
};

use crate::config::{Config, MarketDataSource};

/// Services shared by every handler. Built once at startup.
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub security_service: Arc<dyn SecurityServiceTrait>,
    pub inventory_service: Arc<dyn InventoryServiceTrait>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("LF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `try_init` so tests can build several states in one process.
    let _ = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
}

fn build_quote_provider(source: MarketDataSource) -> anyhow::Result<Arc<dyn QuoteProvider>> {
    Ok(match source {
        MarketDataSource::Yahoo => Arc::new(YahooProvider::new()?),
        MarketDataSource::Off => {
            tracing::info!("Market data disabled; market fields will read as zero");
            Arc::new(OfflineProvider)
        }
    })
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let account_repo = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let security_repo = Arc::new(SecurityRepository::new(pool.clone(), writer.clone()));
    let inventory_repo = Arc::new(InventoryRepository::new(pool.clone(), writer.clone()));

    let account_service = Arc::new(AccountService::new(account_repo));
    let security_service = Arc::new(SecurityService::new(security_repo.clone()));
    let inventory_service = Arc::new(InventoryService::new(inventory_repo.clone()));
    let holdings_service = Arc::new(HoldingsService::new(
        inventory_repo,
        security_repo,
        build_quote_provider(config.market_data)?,
    ));

    Ok(Arc::new(AppState {
        account_service,
        security_service,
        inventory_service,
        holdings_service,
        db_path,
    }))
}
