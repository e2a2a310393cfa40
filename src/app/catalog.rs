// src/app/catalog.rs — one-shot fetch of the remote film catalog
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use super::data::Film;

/// Fixed public endpoint; `config.json` can point elsewhere for development.
pub const CATALOG_URL: &str = "https://ghibliapi.vercel.app/films";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Network(String),
    #[error("catalog response unreadable: {0}")]
    Parse(String),
}

/// Raw record exactly as the endpoint ships it (all strings, no auth,
/// no pagination).
#[derive(Debug, Deserialize)]
struct RawFilm {
    id: String,
    title: String,
    #[serde(default)]
    original_title: Option<String>,
    image: String,
    release_date: String,
    running_time: String,
    rt_score: String,
    description: String,
    director: String,
    producer: String,
}

impl From<RawFilm> for Film {
    fn from(raw: RawFilm) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            original_title: raw.original_title,
            poster_url: raw.image,
            release_date: raw.release_date,
            running_time: format!("{} min", raw.running_time),
            rt_score: raw.rt_score,
            synopsis: raw.description,
            director: raw.director,
            producer: raw.producer,
            watched: false,
            favorite: false,
            notes: String::new(),
            user_rating: 0,
            has_notes: false,
        }
    }
}

/// GET the catalog and map it into `Film`s with annotation defaults.
pub fn fetch_catalog(url: &str) -> Result<Vec<Film>, CatalogError> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("filmshelf/catalog")
        .timeout(Duration::from_secs(20))
        .build()
        .map_err(|e| CatalogError::Network(format!("http client: {e}")))?;

    let resp = client
        .get(url)
        .send()
        .map_err(|e| CatalogError::Network(format!("GET {url}: {e}")))?;
    if !resp.status().is_success() {
        return Err(CatalogError::Network(format!(
            "HTTP {} for {url}",
            resp.status()
        )));
    }
    let body = resp
        .text()
        .map_err(|e| CatalogError::Network(format!("read body: {e}")))?;

    parse_catalog(&body)
}

/// Parse the endpoint's JSON array. Split out of `fetch_catalog` so the
/// mapping is testable without a network.
pub fn parse_catalog(body: &str) -> Result<Vec<Film>, CatalogError> {
    let raw: Vec<RawFilm> =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(raw.into_iter().map(Film::from).collect())
}

#[cfg(test)]
mod tests {
    use super::{parse_catalog, CatalogError};

    const SAMPLE: &str = r#"[
        {
            "id": "2baf70d1-42bb-4437-b551-e5fed5a87abe",
            "title": "Castle in the Sky",
            "original_title": "天空の城ラピュタ",
            "image": "https://example.com/castle.jpg",
            "release_date": "1986",
            "running_time": "124",
            "rt_score": "95",
            "description": "The orphan Sheeta inherited a mysterious crystal.",
            "director": "Hayao Miyazaki",
            "producer": "Isao Takahata"
        }
    ]"#;

    #[test]
    fn maps_raw_records_with_annotation_defaults() {
        let films = parse_catalog(SAMPLE).unwrap();
        assert_eq!(films.len(), 1);
        let f = &films[0];
        assert_eq!(f.id, "2baf70d1-42bb-4437-b551-e5fed5a87abe");
        assert_eq!(f.title, "Castle in the Sky");
        assert_eq!(f.poster_url, "https://example.com/castle.jpg");
        assert_eq!(f.running_time, "124 min");
        assert_eq!(f.rt_score, "95");
        assert!(!f.watched);
        assert!(!f.favorite);
        assert_eq!(f.notes, "");
        assert_eq!(f.user_rating, 0);
        assert!(!f.has_notes);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_catalog("not json"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            parse_catalog(r#"{"id": "x"}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        // no "title"
        let body = r#"[{"id": "x", "image": "u", "release_date": "1986",
            "running_time": "124", "rt_score": "95", "description": "d",
            "director": "m", "producer": "t"}]"#;
        assert!(matches!(parse_catalog(body), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn original_title_is_optional() {
        let body = r#"[{"id": "x", "title": "T", "image": "u",
            "release_date": "1986", "running_time": "86", "rt_score": "87",
            "description": "d", "director": "m", "producer": "t"}]"#;
        let films = parse_catalog(body).unwrap();
        assert_eq!(films[0].original_title, None);
        assert_eq!(films[0].running_time, "86 min");
    }
}
