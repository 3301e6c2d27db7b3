use anyhow::{Result, anyhow};
use movies_dal::{Movie, Page};
use reqwest::{StatusCode, Url};
use serde_json::json;
use tracing::info;

pub fn movie_url(base_url: &Url) -> Url {
    base_url.join("movie").unwrap()
}

pub async fn create_movie(
    client: &reqwest::Client,
    base_url: &Url,
    title: &str,
    genre: &str,
    duration: u32,
) -> Result<Movie> {
    let payload = json!({"title": title, "genre": genre, "duration": duration});

    let response = client.post(movie_url(base_url)).json(&payload).send().await?;
    info!("Create response: {:#?}", response);
    if response.status() != StatusCode::CREATED {
        return Err(anyhow!("Unexpected status {}", response.status()));
    }

    let new_movie: Movie = response.json().await?;
    Ok(new_movie)
}

pub async fn list_movies(
    client: &reqwest::Client,
    base_url: &Url,
    query: &[(&str, &str)],
) -> Result<Page<Movie>> {
    let response = client
        .get(movie_url(base_url))
        .query(query)
        .send()
        .await?;
    info!("List response: {:#?}", response);
    if !response.status().is_success() {
        return Err(anyhow!("Unexpected status {}", response.status()));
    }
    Ok(response.json().await?)
}
