pub mod rest;

use std::time::Duration;

use anyhow::{Result, anyhow};
use movies_server::config::{Parser, ServerConfig};
use movies_types::StoreKind;
use rand::Rng as _;
use reqwest::Url;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tracing::{debug, error};

fn random_port() -> Result<u16> {
    let mut rng = rand::rng();

    let mut retries = 3;
    while retries > 0 {
        let port: u16 = rng.random_range(3030..4030);
        let addr: std::net::SocketAddr = format!("127.0.0.1:{}", port).parse()?;
        match std::net::TcpStream::connect_timeout(&addr, Duration::from_millis(100)) {
            Err(e) if e.kind() == std::io::ErrorKind::ConnectionRefused => return Ok(port),
            Err(_) => retries -= 1,
            Ok(_) => retries -= 1,
        }
    }

    Err(anyhow!("Could not find a free port"))
}

pub struct ConfigGuard {
    #[allow(dead_code)]
    data_dir: TempDir,
}

pub fn test_config(test_name: &str, store: StoreKind) -> Result<(ServerConfig, ConfigGuard)> {
    let tmp_data_dir = TempDir::with_prefix(format!("{}_", test_name))?;
    let data_dir = tmp_data_dir.path().to_string_lossy().to_string();
    let port = random_port()?.to_string();
    let store = store.to_string();
    let args = &[
        "movies-e2e-tests",
        "--data-dir",
        &data_dir,
        "--port",
        &port,
        "--store",
        &store,
    ];
    let config = ServerConfig::try_parse_from(args)?;
    Ok((
        config,
        ConfigGuard {
            data_dir: tmp_data_dir,
        },
    ))
}

pub fn base_url(config: &ServerConfig) -> Url {
    let url = format!("http://{}:{}/", config.listen_address, config.port);
    Url::parse(&url).expect("listen address and port form valid URL")
}

pub fn extend_url(url: &Url, segment: impl ToString) -> Url {
    let mut url = url.clone();
    url.path_segments_mut()
        .expect("base URL can have path")
        .pop_if_empty()
        .push(&segment.to_string());
    url
}

/// Stops the server when dropped
pub struct ServerGuard {
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            sender.send(()).ok();
        }
    }
}

pub async fn prepare_env(test_name: &str, store: StoreKind) -> Result<(ServerConfig, ConfigGuard)> {
    test_config(test_name, store)
}

/// Starts server in background and waits until it answers health check
pub async fn spawn_server(args: ServerConfig) -> Result<ServerGuard> {
    let health_url = base_url(&args).join("health")?;
    let state = movies_server::build_state(&args).await?;
    let (sender, receiver) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let shutdown = async move {
            receiver.await.ok();
        };
        if let Err(e) = movies_server::run::run_graceful_with_state(args, state, shutdown).await {
            error!("Server failed: {e}");
        }
    });
    let guard = ServerGuard {
        shutdown: Some(sender),
    };

    let client = reqwest::Client::new();
    for _ in 0..50 {
        match client.get(health_url.clone()).send().await {
            Ok(response) if response.status().is_success() => return Ok(guard),
            Ok(response) => debug!("Server not ready yet: {}", response.status()),
            Err(e) => debug!("Server not ready yet: {e}"),
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    Err(anyhow!("Server did not start in time"))
}

pub async fn launch_env(
    test_name: &str,
    store: StoreKind,
) -> Result<(reqwest::Client, Url, ServerGuard, ConfigGuard)> {
    let (args, config_guard) = prepare_env(test_name, store).await?;
    let base_url = base_url(&args);
    let server_guard = spawn_server(args).await?;
    Ok((reqwest::Client::new(), base_url, server_guard, config_guard))
}
