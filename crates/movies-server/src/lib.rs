pub mod config;
pub mod error;
pub mod run;

use config::ServerConfig;
pub use error::{Error, Result};
use movies_app::state::{AppConfig, AppState};
use movies_dal::{MemoryMovieRepository, MovieStore, SqlMovieRepository, TableName};
use movies_types::{StoreConfig, StoreKind};
use tracing::info;

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let app_config: AppConfig = config.into();
    let store = build_store(&config.store).await?;
    Ok(AppState::new(app_config, store))
}

async fn build_store(config: &StoreConfig) -> Result<MovieStore> {
    let store: MovieStore = match config.store {
        StoreKind::Memory => {
            info!("Using in-memory store");
            MemoryMovieRepository::new().into()
        }
        StoreKind::Sqlite => {
            if !config.has_explicit_database_url() {
                config.ensure_data_dir()?;
            }
            let table = TableName::new(&config.table)?;
            let database_url = config.database_url();
            let repository = SqlMovieRepository::connect(&database_url, table).await?;
            info!("Using sqlite store {database_url}, table {}", config.table);
            repository.into()
        }
    };
    Ok(store)
}
