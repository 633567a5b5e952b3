use super::{
    leading_score, split_genres, LookupResponse, MovieLookup, MovieRecord, RatingEntry,
    SearchQuery,
};
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Client for the OMDb API (https://www.omdbapi.com). Free-tier keys are
/// rate limited to 1000 requests per day.
pub struct OmdbClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OmdbPayload {
    /// "True" when a record was found, "False" otherwise.
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title", default = "na")]
    title: String,
    #[serde(rename = "Plot", default = "na")]
    plot: String,
    #[serde(rename = "Director", default = "na")]
    director: String,
    #[serde(rename = "Writer", default = "na")]
    writer: String,
    #[serde(rename = "Actors", default = "na")]
    actors: String,
    #[serde(rename = "BoxOffice", default = "na")]
    box_office: String,
    #[serde(rename = "Released", default = "na")]
    released: String,
    #[serde(rename = "Runtime", default = "na")]
    runtime: String,
    #[serde(rename = "Poster", default = "na")]
    poster: String,
    #[serde(rename = "Genre", default = "na")]
    genre: String,
    #[serde(rename = "imdbRating", default = "na")]
    imdb_rating: String,
    #[serde(rename = "imdbVotes", default = "na")]
    imdb_votes: String,
    #[serde(rename = "Ratings", default)]
    ratings: Vec<OmdbRating>,
}

#[derive(Debug, Deserialize)]
struct OmdbRating {
    #[serde(rename = "Source")]
    source: String,
    #[serde(rename = "Value")]
    value: String,
}

// OMDb reports absent fields as the literal string "N/A"; mirror that for
// fields it omits entirely.
fn na() -> String {
    "N/A".to_string()
}

impl OmdbClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("flicktui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }
}

/// Classifies a decoded payload: the provider signals "no match" in-band
/// via `Response: "False"` rather than with an HTTP error status.
fn classify_payload(payload: OmdbPayload) -> LookupResponse {
    if payload.response != "True" {
        let message = payload
            .error
            .unwrap_or_else(|| "Movie not found!".to_string());
        return LookupResponse::NotFound(message);
    }

    LookupResponse::Found(MovieRecord {
        title: payload.title,
        plot: payload.plot,
        director: payload.director,
        writers: payload.writer,
        actors: payload.actors,
        box_office: payload.box_office,
        released: payload.released,
        runtime: payload.runtime,
        poster_url: payload.poster,
        genres: split_genres(&payload.genre),
        ratings: payload
            .ratings
            .into_iter()
            .map(|r| RatingEntry {
                score: leading_score(&r.value).to_string(),
                source: r.source,
            })
            .collect(),
        imdb_rating: payload.imdb_rating,
        imdb_votes: payload.imdb_votes,
    })
}

#[async_trait]
impl MovieLookup for OmdbClient {
    async fn resolve(&self, query: &SearchQuery) -> Result<LookupResponse> {
        let url = format!(
            "{}?t={}&apikey={}",
            self.base_url,
            urlencoding::encode(query.as_str()),
            self.api_key
        );

        debug!("OMDb lookup: title='{}'", query.as_str());

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("OMDb request failed: {}", status);
            return Ok(LookupResponse::TransportError {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            });
        }

        let payload: OmdbPayload = response.json().await?;
        Ok(classify_payload(payload))
    }
}
