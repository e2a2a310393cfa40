// src/app/collection.rs — single owner of the annotated film list
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use super::data::{self, Film};
use super::persist;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rating {0} is out of range (0-5)")]
    RatingOutOfRange(u8),
}

/// What `initialize` did, or what it still needs from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    AlreadyInitialized,
    /// Adopted the saved collection verbatim (count of films).
    Restored(usize),
    /// Nothing saved; the caller should run the catalog fetch and hand the
    /// result to `adopt_fetched`.
    NeedsFetch,
}

/// Holds the authoritative film list and mirrors it to one file. Every
/// mutation writes the whole collection back before returning, so the
/// in-memory list and the blob never disagree across an operation boundary.
pub struct CollectionStore {
    films: Vec<Film>,
    initialized: bool,
    load_error: Option<String>,
    path: PathBuf,
}

impl CollectionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            films: Vec::new(),
            initialized: false,
            load_error: None,
            path,
        }
    }

    pub fn at_default_path() -> Self {
        Self::new(persist::collection_path())
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Adopt the saved collection verbatim when one exists (annotations
    /// included, never re-merged with the remote); otherwise ask the caller
    /// to fetch. Calling again after a restore is a no-op.
    pub fn initialize(&mut self) -> InitOutcome {
        if self.initialized {
            return InitOutcome::AlreadyInitialized;
        }
        match persist::load(&self.path) {
            Some(films) => {
                info!(
                    "restored {} films from {}",
                    films.len(),
                    self.path.display()
                );
                self.films = films;
                self.initialized = true;
                InitOutcome::Restored(self.films.len())
            }
            None => InitOutcome::NeedsFetch,
        }
    }

    /// Install a fresh catalog result and persist it immediately. A result
    /// that lands after the store already initialized is stale (the view
    /// restarted, or a saved collection won the race) and is dropped.
    pub fn adopt_fetched(&mut self, films: Vec<Film>) {
        if self.initialized {
            warn!("discarding stale catalog result ({} films)", films.len());
            return;
        }
        info!("adopting {} freshly fetched films", films.len());
        self.films = films;
        self.initialized = true;
        self.load_error = None;
        self.persist();
    }

    /// Record a failed fetch for the UI. The collection stays empty and the
    /// store stays uninitialized so a user-triggered reload can retry.
    pub fn mark_fetch_failed(&mut self, err: String) {
        warn!("catalog fetch failed: {err}");
        self.load_error = Some(err);
    }

    /// Unknown ids are a silent no-op: ids never leave the collection
    /// mid-session, so a miss means a stale click, not a bug worth a panic.
    pub fn toggle_watched(&mut self, id: &str) {
        if let Some(film) = self.films.iter_mut().find(|f| f.id == id) {
            film.watched = !film.watched;
            self.persist();
        }
    }

    pub fn toggle_favorite(&mut self, id: &str) {
        if let Some(film) = self.films.iter_mut().find(|f| f.id == id) {
            film.favorite = !film.favorite;
            self.persist();
        }
    }

    /// Set notes and rating together; the derived `has_notes` flag is
    /// recomputed here and nowhere else. Out-of-range ratings are rejected
    /// before anything changes.
    pub fn save_notes(&mut self, id: &str, notes: &str, rating: u8) -> Result<(), ValidationError> {
        if rating > 5 {
            return Err(ValidationError::RatingOutOfRange(rating));
        }
        if let Some(film) = self.films.iter_mut().find(|f| f.id == id) {
            film.notes = notes.to_string();
            film.user_rating = rating;
            film.has_notes = data::has_notes_for(notes, rating);
            self.persist();
        }
        Ok(())
    }

    fn persist(&self) {
        if let Err(err) = persist::save(&self.path, &self.films) {
            warn!(
                "failed to persist collection to {}: {err}",
                self.path.display()
            );
        }
    }
}
