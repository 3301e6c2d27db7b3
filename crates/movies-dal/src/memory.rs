use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::Result,
    filter::MovieFilter,
    movie::{Movie, MovieData, MovieId},
    repository::MovieRepository,
};

/// Ordered in-process list of movies, lives as long as the process.
/// Clones share the same list.
#[derive(Clone, Default)]
pub struct MemoryMovieRepository {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovieRepository for MemoryMovieRepository {
    async fn get_all(&self) -> Result<Vec<Movie>> {
        Ok(self.movies.read().await.clone())
    }

    async fn get_by_id(&self, id: MovieId) -> Result<Option<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.id == id).cloned())
    }

    async fn add(&self, data: MovieData) -> Result<Movie> {
        let mut movies = self.movies.write().await;
        let mut id = MovieId::new_v4();
        // ids must stay unique among stored movies
        while movies.iter().any(|m| m.id == id) {
            id = MovieId::new_v4();
        }
        let movie = Movie::new(id, data);
        movies.push(movie.clone());
        debug!("Added movie {id}, store has {} movies", movies.len());
        Ok(movie)
    }

    async fn update(&self, id: MovieId, data: MovieData) -> Result<Option<Movie>> {
        let mut movies = self.movies.write().await;
        Ok(movies.iter_mut().find(|m| m.id == id).map(|movie| {
            movie.apply(data);
            movie.clone()
        }))
    }

    async fn delete(&self, id: MovieId) -> Result<Option<Movie>> {
        let mut movies = self.movies.write().await;
        Ok(movies
            .iter()
            .position(|m| m.id == id)
            .map(|idx| movies.remove(idx)))
    }

    async fn search(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().filter(|m| filter.matches(m)).cloned().collect())
    }
}
