use std::fmt::Display;

use futures::TryStreamExt as _;
use sqlx::QueryBuilder;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    filter::{Condition, FilterValue, MovieFilter},
    movie::{Movie, MovieData, MovieId},
    repository::MovieRepository,
    ChosenDB, Pool,
};

const COLUMNS: &str = "id, title, genre, duration";
const MAX_TABLE_NAME_LEN: usize = 64;

/// Table name checked to be plain SQL identifier, so it can be formatted into statements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid_start && valid_rest && name.len() <= MAX_TABLE_NAME_LEN {
            Ok(TableName(name))
        } else {
            Err(Error::InvalidTableName(name))
        }
    }
}

impl Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movies kept in one SQL table, order of listings is order of insertion
#[derive(Clone)]
pub struct SqlMovieRepository {
    pool: Pool,
    table: TableName,
}

impl SqlMovieRepository {
    pub fn new(pool: Pool, table: TableName) -> Self {
        Self { pool, table }
    }

    /// Opens the database and makes sure the movie table exists
    pub async fn connect(database_url: &str, table: TableName) -> Result<Self> {
        let pool = crate::new_pool(database_url).await?;
        let repo = Self::new(pool, table);
        repo.ensure_table().await?;
        Ok(repo)
    }

    pub async fn ensure_table(&self) -> Result<()> {
        let table = &self.table;
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                genre TEXT NOT NULL,
                duration INTEGER NOT NULL
            )"
        ))
        .execute(&self.pool)
        .await?;
        info!("Table {table} is ready");
        Ok(())
    }

    fn select<'args>(&self) -> QueryBuilder<'args, ChosenDB> {
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM {}", self.table))
    }
}

fn push_conditions<'args>(
    query: &mut QueryBuilder<'args, ChosenDB>,
    conditions: &[Condition<'args>],
) {
    if conditions.is_empty() {
        return;
    }
    query.push(" WHERE ");
    let mut separated = query.separated(" AND ");
    for condition in conditions {
        separated.push(condition.field.column());
        separated.push_unseparated(" = ");
        match condition.value {
            FilterValue::Text(value) => separated.push_bind_unseparated(value),
            FilterValue::Integer(value) => separated.push_bind_unseparated(value),
        };
    }
}

impl MovieRepository for SqlMovieRepository {
    async fn get_all(&self) -> Result<Vec<Movie>> {
        let mut query = self.select();
        query.push(" ORDER BY rowid");
        let records = query
            .build_query_as::<Movie>()
            .fetch(&self.pool)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    async fn get_by_id(&self, id: MovieId) -> Result<Option<Movie>> {
        let record = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {COLUMNS} FROM {} WHERE id = ?",
            self.table
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn add(&self, data: MovieData) -> Result<Movie> {
        let id = MovieId::new_v4();
        sqlx::query(&format!(
            "INSERT INTO {} ({COLUMNS}) VALUES (?, ?, ?, ?)",
            self.table
        ))
        .bind(id.to_string())
        .bind(&data.title)
        .bind(&data.genre)
        .bind(data.duration)
        .execute(&self.pool)
        .await?;
        debug!("Inserted movie {id}");
        Ok(Movie::new(id, data))
    }

    async fn update(&self, id: MovieId, data: MovieData) -> Result<Option<Movie>> {
        let record = sqlx::query_as::<_, Movie>(&format!(
            "UPDATE {} SET title = ?, genre = ?, duration = ? WHERE id = ? RETURNING {COLUMNS}",
            self.table
        ))
        .bind(&data.title)
        .bind(&data.genre)
        .bind(data.duration)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete(&self, id: MovieId) -> Result<Option<Movie>> {
        let record = sqlx::query_as::<_, Movie>(&format!(
            "DELETE FROM {} WHERE id = ? RETURNING {COLUMNS}",
            self.table
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn search(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        if filter.is_empty() {
            return self.get_all().await;
        }
        let conditions = filter.conditions();
        let mut query = self.select();
        push_conditions(&mut query, &conditions);
        query.push(" ORDER BY rowid");
        debug!("Search query: {}", query.sql());
        let records = query
            .build_query_as::<Movie>()
            .fetch(&self.pool)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }
}
