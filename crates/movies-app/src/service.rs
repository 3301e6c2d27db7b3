use movies_dal::{
    error::Result, Movie, MovieData, MovieFilter, MovieId, MovieRepository, MovieStore, Page,
    Pageable,
};
use tracing::{debug, info};

use crate::state::AppState;

/// Thin layer between REST handlers and repository, absence is forwarded as `None`
#[derive(Clone)]
pub struct MovieService<R> {
    repository: R,
}

impl<R> MovieService<R>
where
    R: MovieRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub async fn list(&self, filter: &MovieFilter, pageable: &Pageable) -> Result<Page<Movie>> {
        let matching = self.repository.search(filter).await?;
        debug!(
            "Found {} movies for filter {filter:?}, returning page {}",
            matching.len(),
            pageable.page()
        );
        Ok(Page::paginate(matching, pageable))
    }

    pub async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
        self.repository.get_by_id(id).await
    }

    pub async fn create(&self, data: MovieData) -> Result<Movie> {
        let movie = self.repository.add(data).await?;
        info!("Created movie {} ({})", movie.id, movie.title);
        Ok(movie)
    }

    pub async fn update(&self, id: MovieId, data: MovieData) -> Result<Option<Movie>> {
        let updated = self.repository.update(id, data).await?;
        match &updated {
            Some(movie) => info!("Updated movie {id} ({})", movie.title),
            None => debug!("Movie {id} for update not found"),
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: MovieId) -> Result<Option<Movie>> {
        let deleted = self.repository.delete(id).await?;
        match &deleted {
            Some(movie) => info!("Deleted movie {id} ({})", movie.title),
            None => debug!("Movie {id} for delete not found"),
        }
        Ok(deleted)
    }
}

impl axum::extract::FromRequestParts<AppState> for MovieService<MovieStore> {
    type Rejection = http::StatusCode;

    fn from_request_parts(
        _parts: &mut http::request::Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = std::result::Result<Self, Self::Rejection>>
           + core::marker::Send {
        futures::future::ready(std::result::Result::Ok(state.movies().clone()))
    }
}
