use axum::{
    extract::{rejection::PathRejection, FromRequestParts, Path},
    routing::get,
};
use http::request::Parts;
use movies_dal::MovieId;

use crate::{error::ApiError, state::AppState};

/// Collection path, `Location` of created movie is `{MOVIE_PATH}/{id}`
pub const MOVIE_PATH: &str = "/movie";

/// Movie id taken from path, unparsable id is a bad request
#[derive(Debug, Clone, Copy)]
pub struct MovieIdPath(pub MovieId);

impl<S> FromRequestParts<S> for MovieIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<MovieId>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| ApiError::InvalidRequest(e.body_text()))?;
        Ok(MovieIdPath(id))
    }
}

#[cfg(feature = "openapi")]
pub fn api_docs() -> utoipa::openapi::OpenApi {
    use utoipa::OpenApi as _;

    #[derive(utoipa::OpenApi)]
    #[openapi(
        paths(crud_api::create, crud_api::list, crud_api::get, crud_api::update, crud_api::delete),
        components(schemas(crate::error::Problem))
    )]
    struct ModuleDocs;

    ModuleDocs::openapi()
}

pub mod crud_api {
    use axum::{
        extract::{Query, State},
        response::IntoResponse,
        Json,
    };
    use http::{header, StatusCode};
    #[cfg_attr(not(feature = "openapi"), allow(unused_imports))]
    use movies_dal::{Movie, MovieData, MovieFilter, MovieStore, Page};
    use tracing::debug;

    use super::{MovieIdPath, MOVIE_PATH};
    use crate::{
        error::{ApiError, ApiResult},
        rest_api::Paging,
        service::MovieService,
        state::AppState,
        validate::Garde,
    };

    type Service = MovieService<MovieStore>;

    fn not_found(id: movies_dal::MovieId) -> ApiError {
        ApiError::ResourceNotFound(format!("Movie {id}"))
    }

    #[cfg_attr(feature = "openapi", utoipa::path(post, path = "", tag = "Movie", operation_id = "createMovie",
        request_body = MovieData,
        responses((status = StatusCode::CREATED, description = "Created Movie", body = Movie,
            headers(("location" = String, description = "Path of created movie"))),
            (status = StatusCode::BAD_REQUEST, description = "Invalid movie", body = crate::error::Problem))))]
    pub async fn create(
        service: Service,
        Garde(Json(payload)): Garde<Json<MovieData>>,
    ) -> ApiResult<impl IntoResponse> {
        let record = service.create(payload).await?;
        let location = format!("{MOVIE_PATH}/{}", record.id);

        Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(record)))
    }

    #[cfg_attr(feature = "openapi", utoipa::path(get, path = "", tag = "Movie", operation_id = "listMovies",
        params(MovieFilter, Paging),
        responses((status = StatusCode::OK, description = "Page of matching movies", body = Page<Movie>),
            (status = StatusCode::BAD_REQUEST, description = "Invalid query", body = crate::error::Problem))))]
    pub async fn list(
        service: Service,
        State(state): State<AppState>,
        Garde(Query(filter)): Garde<Query<MovieFilter>>,
        Garde(Query(paging)): Garde<Query<Paging>>,
    ) -> ApiResult<impl IntoResponse> {
        let pageable = paging.into_pageable(state.config().default_page_size)?;
        let page = service.list(&filter, &pageable).await?;

        Ok((StatusCode::OK, Json(page)))
    }

    #[cfg_attr(feature = "openapi", utoipa::path(get, path = "/{id}", tag = "Movie", operation_id = "getMovie",
        params(("id" = String, Path, description = "Movie id (UUID)")),
        responses((status = StatusCode::OK, description = "Movie", body = Movie),
            (status = StatusCode::NOT_FOUND, description = "No such movie", body = crate::error::Problem))))]
    pub async fn get(MovieIdPath(id): MovieIdPath, service: Service) -> ApiResult<impl IntoResponse> {
        debug!("Getting movie {id}");
        let record = service.get(id).await?.ok_or_else(|| not_found(id))?;

        Ok((StatusCode::OK, Json(record)))
    }

    #[cfg_attr(feature = "openapi", utoipa::path(put, path = "/{id}", tag = "Movie", operation_id = "updateMovie",
        params(("id" = String, Path, description = "Movie id (UUID)")),
        request_body = MovieData,
        responses((status = StatusCode::OK, description = "Updated Movie", body = Movie),
            (status = StatusCode::NOT_FOUND, description = "No such movie", body = crate::error::Problem))))]
    pub async fn update(
        MovieIdPath(id): MovieIdPath,
        service: Service,
        Garde(Json(payload)): Garde<Json<MovieData>>,
    ) -> ApiResult<impl IntoResponse> {
        let record = service
            .update(id, payload)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok((StatusCode::OK, Json(record)))
    }

    #[cfg_attr(feature = "openapi", utoipa::path(delete, path = "/{id}", tag = "Movie", operation_id = "deleteMovie",
        params(("id" = String, Path, description = "Movie id (UUID)")),
        responses((status = StatusCode::NO_CONTENT, description = "Movie deleted"),
            (status = StatusCode::NOT_FOUND, description = "No such movie", body = crate::error::Problem))))]
    pub async fn delete(
        MovieIdPath(id): MovieIdPath,
        service: Service,
    ) -> ApiResult<impl IntoResponse> {
        service.delete(id).await?.ok_or_else(|| not_found(id))?;

        Ok((StatusCode::NO_CONTENT, ()))
    }
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", get(crud_api::list).post(crud_api::create))
        .route(
            "/{id}",
            get(crud_api::get)
                .put(crud_api::update)
                .delete(crud_api::delete),
        )
}
