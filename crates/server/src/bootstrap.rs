use std::sync::Arc;

use larder_core::config::{AppConfig, ConfigError, LoadOptions, StorageBackend};
use larder_core::{Calendar, SuggestionEngine};
use larder_db::repositories::{
    InMemoryFamilyMemberRepository, InMemoryIngredientRepository, InMemorySaleRepository,
    SqlFamilyMemberRepository, SqlIngredientRepository, SqlSaleRepository,
};
use larder_db::{connect_from_config, migrations, DbPool, DemoHousehold, RepositoryError};
use thiserror::Error;
use tracing::info;

use crate::api::AppState;

pub struct Application {
    pub config: AppConfig,
    pub db_pool: Option<DbPool>,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
    #[error("demo data seeding failed: {0}")]
    Seed(#[source] RepositoryError),
}

pub async fn bootstrap(
    options: LoadOptions,
    calendar: Arc<dyn Calendar>,
) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config, calendar).await
}

pub async fn bootstrap_with_config(
    config: AppConfig,
    calendar: Arc<dyn Calendar>,
) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        storage_backend = config.storage.backend.as_str(),
        "starting application bootstrap"
    );

    let engine = SuggestionEngine::new();

    let (db_pool, state) = match config.storage.backend {
        StorageBackend::Memory => {
            let ingredients = Arc::new(InMemoryIngredientRepository::default());
            let sales = Arc::new(InMemorySaleRepository::default());
            let family = Arc::new(InMemoryFamilyMemberRepository::default());

            if config.storage.seed_demo_data {
                let summary = DemoHousehold::for_date(calendar.today())
                    .seed_if_empty(ingredients.as_ref(), sales.as_ref(), family.as_ref())
                    .await
                    .map_err(BootstrapError::Seed)?;
                if let Some(summary) = summary {
                    info!(
                        event_name = "system.bootstrap.demo_seeded",
                        correlation_id = "bootstrap",
                        ingredients = summary.ingredients,
                        sales = summary.sales,
                        family_members = summary.family_members,
                        "demo household seeded"
                    );
                }
            }

            (None, AppState::new(ingredients, sales, family, engine, calendar))
        }
        StorageBackend::Sqlite => {
            let db_pool = connect_from_config(&config.database)
                .await
                .map_err(BootstrapError::DatabaseConnect)?;
            info!(
                event_name = "system.bootstrap.database_connected",
                correlation_id = "bootstrap",
                "database connection established"
            );

            migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
            info!(
                event_name = "system.bootstrap.migrations_applied",
                correlation_id = "bootstrap",
                "database migrations applied"
            );

            let state = AppState::new(
                Arc::new(SqlIngredientRepository::new(db_pool.clone())),
                Arc::new(SqlSaleRepository::new(db_pool.clone())),
                Arc::new(SqlFamilyMemberRepository::new(db_pool.clone())),
                engine,
                calendar,
            );
            (Some(db_pool), state)
        }
    };

    Ok(Application { config, db_pool, state })
}
