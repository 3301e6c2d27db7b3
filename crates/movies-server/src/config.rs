use crate::error::Result;
pub use clap::Parser;
use movies_app::state::AppConfig;
use movies_types::StoreConfig;

#[derive(Debug, Clone, clap::Parser)]
#[command(version, about = "REST API for management of movies")]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 3000,
        env = "MOVIES_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "MOVIES_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "MOVIES_DEFAULT_PAGE_SIZE",
        default_value = "10",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Page size used when request does not specify one"
    )]
    pub default_page_size: u32,

    #[arg(long, env = "MOVIES_NO_CORS", help = "Disable CORS")]
    pub no_cors: bool,

    #[command(flatten)]
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }
}

impl From<&ServerConfig> for AppConfig {
    fn from(config: &ServerConfig) -> Self {
        AppConfig {
            default_page_size: config.default_page_size,
        }
    }
}
