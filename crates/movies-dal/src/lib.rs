pub mod error;
pub mod filter;
pub mod memory;
pub mod movie;
pub mod paging;
pub mod repository;
pub mod sql;

use std::str::FromStr as _;

pub use error::Error;
pub use filter::MovieFilter;
pub use memory::MemoryMovieRepository;
pub use movie::{Movie, MovieData, MovieId};
pub use paging::{Page, Pageable, DEFAULT_PAGE_SIZE};
pub use repository::{MovieRepository, MovieStore};
pub use sql::{SqlMovieRepository, TableName};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type ChosenRow = sqlx::sqlite::SqliteRow;
pub type Pool = sqlx::Pool<ChosenDB>;

pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect_with(options)
        .await?;
    Ok(pool)
}
