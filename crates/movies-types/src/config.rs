use anyhow::{bail, Context as _, Result};
use clap::{Args, ValueEnum};
use std::{fmt::Display, fs, path::PathBuf};

pub const DEFAULT_TABLE: &str = "movie";
const DATA_DIR_NAME: &str = "movies";
const DB_FILE_NAME: &str = "movies.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreKind {
    /// Process-wide in-memory list, lost on restart
    #[default]
    Memory,
    /// SQLite database reached through sqlx
    Sqlite,
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Memory => write!(f, "memory"),
            StoreKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct StoreConfig {
    #[arg(
        long,
        value_enum,
        default_value_t = StoreKind::Memory,
        env = "MOVIES_STORE",
        help = "Storage backend for movies"
    )]
    pub store: StoreKind,

    #[arg(
        long,
        env = "MOVIES_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/movies.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "MOVIES_TABLE",
        default_value = DEFAULT_TABLE,
        help = "Name of the table holding movies"
    )]
    pub table: String,

    #[arg(
        long,
        env = "MOVIES_DATA_DIR",
        help = "Data directory for the database file, default is system default like ~/.local/share/movies"
    )]
    data_dir: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME))
}

impl StoreConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Makes sure data directory exists, only needed for file based databases
    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let dir = self.data_dir();
        if !fs::exists(&dir).context("Failed to check if data directory exists")? {
            fs::create_dir_all(&dir).context("Failed to create data directory")?;
        } else if !dir.is_dir() {
            bail!("Data directory {dir:?} is not a directory");
        }
        Ok(dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url.clone().unwrap_or_else(|| {
            format!(
                "sqlite://{}",
                self.data_dir().join(DB_FILE_NAME).to_string_lossy()
            )
        })
    }

    pub fn has_explicit_database_url(&self) -> bool {
        self.database_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        store: StoreConfig,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.store.store, StoreKind::Memory);
        assert_eq!(cli.store.table, DEFAULT_TABLE);
        assert!(!cli.store.has_explicit_database_url());
    }

    #[test]
    fn test_database_url_from_data_dir() {
        let cli =
            TestCli::try_parse_from(["test", "--store", "sqlite", "--data-dir", "/tmp/mv"])
                .unwrap();
        assert_eq!(cli.store.store, StoreKind::Sqlite);
        assert_eq!(cli.store.database_url(), "sqlite:///tmp/mv/movies.db");
    }

    #[test]
    fn test_explicit_database_url() {
        let cli = TestCli::try_parse_from([
            "test",
            "--database-url",
            "sqlite::memory:",
            "--table",
            "films",
        ])
        .unwrap();
        assert_eq!(cli.store.database_url(), "sqlite::memory:");
        assert_eq!(cli.store.table, "films");
    }

    #[test]
    fn test_store_kind_names() {
        for kind in StoreKind::value_variants() {
            let name = kind.to_string();
            assert_eq!(StoreKind::from_str(&name, false).unwrap(), *kind);
        }
    }

    #[test]
    fn test_invalid_store() {
        assert!(TestCli::try_parse_from(["test", "--store", "mongo"]).is_err());
    }
}
