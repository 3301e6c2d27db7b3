use std::future::Future;

use crate::{
    error::Result,
    filter::MovieFilter,
    memory::MemoryMovieRepository,
    movie::{Movie, MovieData, MovieId},
    sql::SqlMovieRepository,
};

/// Storage of movies, independent of backend.
///
/// Missing records are reported as `Ok(None)`, errors are reserved for backend
/// failures. Listings keep insertion order.
pub trait MovieRepository: Send + Sync {
    fn get_all(&self) -> impl Future<Output = Result<Vec<Movie>>> + Send;

    fn get_by_id(&self, id: MovieId) -> impl Future<Output = Result<Option<Movie>>> + Send;

    /// Stores new movie under freshly generated id
    fn add(&self, data: MovieData) -> impl Future<Output = Result<Movie>> + Send;

    /// Overwrites all fields of existing movie, `None` if there is no such movie
    fn update(
        &self,
        id: MovieId,
        data: MovieData,
    ) -> impl Future<Output = Result<Option<Movie>>> + Send;

    /// Returns removed movie, `None` if there was nothing to remove
    fn delete(&self, id: MovieId) -> impl Future<Output = Result<Option<Movie>>> + Send;

    /// Full set of movies matching all fields present in filter
    fn search(&self, filter: &MovieFilter) -> impl Future<Output = Result<Vec<Movie>>> + Send;
}

/// Backend chosen at startup
#[derive(Clone)]
pub enum MovieStore {
    Memory(MemoryMovieRepository),
    Sql(SqlMovieRepository),
}

impl From<MemoryMovieRepository> for MovieStore {
    fn from(repo: MemoryMovieRepository) -> Self {
        MovieStore::Memory(repo)
    }
}

impl From<SqlMovieRepository> for MovieStore {
    fn from(repo: SqlMovieRepository) -> Self {
        MovieStore::Sql(repo)
    }
}

impl MovieRepository for MovieStore {
    async fn get_all(&self) -> Result<Vec<Movie>> {
        match self {
            MovieStore::Memory(repo) => repo.get_all().await,
            MovieStore::Sql(repo) => repo.get_all().await,
        }
    }

    async fn get_by_id(&self, id: MovieId) -> Result<Option<Movie>> {
        match self {
            MovieStore::Memory(repo) => repo.get_by_id(id).await,
            MovieStore::Sql(repo) => repo.get_by_id(id).await,
        }
    }

    async fn add(&self, data: MovieData) -> Result<Movie> {
        match self {
            MovieStore::Memory(repo) => repo.add(data).await,
            MovieStore::Sql(repo) => repo.add(data).await,
        }
    }

    async fn update(&self, id: MovieId, data: MovieData) -> Result<Option<Movie>> {
        match self {
            MovieStore::Memory(repo) => repo.update(id, data).await,
            MovieStore::Sql(repo) => repo.update(id, data).await,
        }
    }

    async fn delete(&self, id: MovieId) -> Result<Option<Movie>> {
        match self {
            MovieStore::Memory(repo) => repo.delete(id).await,
            MovieStore::Sql(repo) => repo.delete(id).await,
        }
    }

    async fn search(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        match self {
            MovieStore::Memory(repo) => repo.search(filter).await,
            MovieStore::Sql(repo) => repo.search(filter).await,
        }
    }
}
