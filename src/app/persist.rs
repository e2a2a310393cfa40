// src/app/persist.rs — the whole collection as one JSON blob under a fixed key
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::cache::cache_dir;
use super::data::Film;

/// Fixed key the annotated collection lives under.
pub const COLLECTION_KEY: &str = "ghibli-films";

pub fn collection_path() -> PathBuf {
    cache_dir().join(format!("{COLLECTION_KEY}.json"))
}

/// Read the saved collection. An absent file and unreadable or undecodable
/// content all come back as `None`; the caller falls back to a fresh fetch
/// which overwrites the blob.
pub fn load(path: &Path) -> Option<Vec<Film>> {
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!("failed to read {}: {err}", path.display());
            return None;
        }
    };
    match serde_json::from_slice::<Vec<Film>>(&bytes) {
        Ok(films) => Some(films),
        Err(err) => {
            warn!(
                "failed to parse {}: {err}. Treating as a cache miss.",
                path.display()
            );
            None
        }
    }
}

/// Serialize the whole collection. Writes a `.tmp` sibling first and
/// renames, so a reader never sees a partial blob.
pub fn save(path: &Path, films: &[Film]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(films).map_err(io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)
}

#[cfg(test)]
mod tests {
    use super::{load, save};
    use crate::app::data::Film;

    fn film(id: &str) -> Film {
        Film {
            id: id.to_string(),
            title: "Whisper of the Heart".to_string(),
            original_title: Some("耳をすませば".to_string()),
            poster_url: "https://example.com/whisper.jpg".to_string(),
            release_date: "1995".to_string(),
            running_time: "111 min".to_string(),
            rt_score: "91".to_string(),
            synopsis: "Shizuku lives a simple life.".to_string(),
            director: "Yoshifumi Kondō".to_string(),
            producer: "Toshio Suzuki".to_string(),
            watched: true,
            favorite: false,
            notes: "rewatch with subtitles".to_string(),
            user_rating: 4,
            has_notes: true,
        }
    }

    #[test]
    fn round_trips_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghibli-films.json");
        let films = vec![film("a"), film("b")];

        save(&path, &films).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, films);
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.json")).is_none());
    }

    #[test]
    fn malformed_blob_is_a_cache_miss_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghibli-films.json");
        std::fs::write(&path, b"{ definitely not a film list").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn save_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("ghibli-films.json");
        save(&path, &[film("a")]).unwrap();
        assert_eq!(load(&path).unwrap().len(), 1);
    }
}
