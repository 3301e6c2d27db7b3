use std::sync::Arc;

use movies_dal::{MovieStore, DEFAULT_PAGE_SIZE};

use crate::service::MovieService;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(app_config: AppConfig, store: impl Into<MovieStore>) -> Self {
        AppState {
            state: Arc::new(AppStateInner {
                movies: MovieService::new(store.into()),
                app_config,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.state.app_config
    }

    pub fn movies(&self) -> &MovieService<MovieStore> {
        &self.state.movies
    }
}

struct AppStateInner {
    movies: MovieService<MovieStore>,
    app_config: AppConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub default_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
