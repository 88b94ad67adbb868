//! YTS catalog API client

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Movie;

pub const DEFAULT_BASE_URL: &str = "https://yts.mx/api/v2";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Failures a catalog call can surface. Callers decide whether to retry;
/// the client itself never does.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Server(u16),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("movie not found")]
    NotFound,
}

/// One page of listing results, in the order the catalog returned them.
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total_count: u64,
    pub page_size: u32,
    pub page_number: u32,
}

/// Stateless client for the YTS JSON API.
pub struct YtsClient {
    base_url: String,
    user_agent: String,
}

impl YtsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .timeout_connect(Some(Duration::from_secs(10)))
            .build()
            .new_agent()
    }

    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<String, ApiError> {
        let agent = self.agent();

        let mut request = agent.get(url).header("User-Agent", &self.user_agent);
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let mut response = request.call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => ApiError::Server(code),
            other => ApiError::Network(other.to_string()),
        })?;

        if response.status() != 200 {
            return Err(ApiError::Server(response.status().as_u16()));
        }

        response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// List movies with paging and optional search/genre filters.
    /// `page` is 1-based; empty `search` and `None` genre mean unfiltered.
    pub fn list_movies(
        &self,
        page: u32,
        page_size: u32,
        search: &str,
        genre: Option<&str>,
    ) -> Result<MoviePage, ApiError> {
        let mut params = vec![
            ("page", page.to_string()),
            ("limit", page_size.to_string()),
        ];
        let search = search.trim();
        if !search.is_empty() {
            params.push(("query_term", search.to_string()));
        }
        if let Some(genre) = genre {
            params.push(("genre", genre.to_string()));
        }

        let body = self.get(&self.endpoint("list_movies.json"), &params)?;
        parse_list_body(&body)
    }

    /// Fetch the full record for one movie id.
    pub fn movie_details(&self, movie_id: i64) -> Result<Movie, ApiError> {
        let params = [
            ("movie_id", movie_id.to_string()),
            ("with_images", "true".to_string()),
        ];
        let body = self.get(&self.endpoint("movie_details.json"), &params)?;
        parse_detail_body(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    status: String,
    #[serde(default)]
    status_message: String,
    data: Option<ListData>,
}

#[derive(Debug, Default, Deserialize)]
struct ListData {
    #[serde(default)]
    movie_count: u64,
    #[serde(default)]
    limit: u32,
    #[serde(default)]
    page_number: u32,
    // YTS omits the array entirely past the last page
    #[serde(default)]
    movies: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    status: String,
    data: Option<DetailData>,
}

#[derive(Debug, Default, Deserialize)]
struct DetailData {
    #[serde(default)]
    movie: Option<Movie>,
}

fn parse_list_body(body: &str) -> Result<MoviePage, ApiError> {
    let envelope: ListEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if envelope.status != "ok" {
        return Err(ApiError::Decode(format!(
            "API status '{}': {}",
            envelope.status, envelope.status_message
        )));
    }

    let data = envelope
        .data
        .ok_or_else(|| ApiError::Decode("missing data object".to_string()))?;

    Ok(MoviePage {
        movies: data.movies,
        total_count: data.movie_count,
        page_size: data.limit,
        page_number: data.page_number,
    })
}

fn parse_detail_body(body: &str) -> Result<Movie, ApiError> {
    let envelope: DetailEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    // Unknown ids come back as a non-ok status or as a placeholder record
    // with id 0, depending on the server version.
    if envelope.status != "ok" {
        return Err(ApiError::NotFound);
    }

    match envelope.data.and_then(|d| d.movie) {
        Some(movie) if movie.id > 0 => Ok(movie),
        _ => Err(ApiError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = YtsClient::new("https://yts.mx/api/v2/");
        assert_eq!(
            client.endpoint("list_movies.json"),
            "https://yts.mx/api/v2/list_movies.json"
        );
    }

    #[test]
    fn test_parse_list_body() {
        let body = r#"{
            "status": "ok",
            "status_message": "Query was successful",
            "data": {
                "movie_count": 68142,
                "limit": 20,
                "page_number": 3,
                "movies": [
                    {
                        "id": 69354,
                        "title": "Ariel",
                        "title_long": "Ariel (1988)",
                        "year": 1988,
                        "rating": 7.4,
                        "runtime": 72,
                        "genres": ["Comedy", "Crime"],
                        "torrents": [
                            {"quality": "720p", "type": "bluray", "seeds": 12, "size": "665.87 MB"}
                        ]
                    },
                    {"id": 7, "title": "Bare"}
                ]
            }
        }"#;

        let page = parse_list_body(body).unwrap();
        assert_eq!(page.total_count, 68142);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.page_number, 3);
        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].title_long, "Ariel (1988)");
        assert_eq!(page.movies[0].torrents[0].kind, "bluray");
        // Optional fields default when absent
        assert_eq!(page.movies[1].year, 0);
        assert!(page.movies[1].genres.is_empty());
        assert!(page.movies[1].summary.is_empty());
    }

    #[test]
    fn test_parse_list_body_past_last_page() {
        let body = r#"{
            "status": "ok",
            "status_message": "Query was successful",
            "data": {"movie_count": 5, "limit": 20, "page_number": 2}
        }"#;

        let page = parse_list_body(body).unwrap();
        assert!(page.movies.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn test_parse_list_body_error_status() {
        let body = r#"{"status": "error", "status_message": "Invalid parameter", "data": null}"#;
        assert!(matches!(parse_list_body(body), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_parse_list_body_garbage() {
        assert!(matches!(
            parse_list_body("<html>502 Bad Gateway</html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_detail_body() {
        let body = r#"{
            "status": "ok",
            "status_message": "Query was successful",
            "data": {"movie": {"id": 10, "title": "Foo", "year": 2001, "rating": 6.1}}
        }"#;

        let movie = parse_detail_body(body).unwrap();
        assert_eq!(movie.id, 10);
        assert_eq!(movie.title, "Foo");
    }

    #[test]
    fn test_parse_detail_body_unknown_id() {
        // Placeholder record variant
        let body = r#"{"status": "ok", "status_message": "ok", "data": {"movie": {"id": 0}}}"#;
        assert!(matches!(parse_detail_body(body), Err(ApiError::NotFound)));

        // Non-ok status variant
        let body = r#"{"status": "error", "status_message": "Movie not found", "data": null}"#;
        assert!(matches!(parse_detail_body(body), Err(ApiError::NotFound)));
    }
}
