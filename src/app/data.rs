// src/app/data.rs
use serde::{Deserialize, Serialize};

/// One catalog entry plus the user's annotations.
///
/// Identity is `id` (stable per catalog record). The catalog fields never
/// change after the fetch that produced them; only the annotation block is
/// writable, and only through `CollectionStore`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    pub poster_url: String,
    pub release_date: String,
    /// Display string, e.g. "124 min".
    pub running_time: String,
    /// Critic score as the API ships it, e.g. "95".
    pub rt_score: String,
    pub synopsis: String,
    pub director: String,
    pub producer: String,

    // ---- user annotations ----
    #[serde(default)]
    pub watched: bool,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub notes: String,
    /// 0 = unrated, otherwise 1..=5.
    #[serde(default)]
    pub user_rating: u8,
    /// Derived: `!notes.trim().is_empty() || user_rating > 0`.
    /// Only `CollectionStore::save_notes` writes it.
    #[serde(default)]
    pub has_notes: bool,
}

/// The one rule for the derived flag.
pub(crate) fn has_notes_for(notes: &str, rating: u8) -> bool {
    !notes.trim().is_empty() || rating > 0
}

#[cfg(test)]
mod tests {
    use super::has_notes_for;

    #[test]
    fn empty_notes_and_zero_rating_mean_no_notes() {
        assert!(!has_notes_for("", 0));
    }

    #[test]
    fn whitespace_only_notes_count_as_empty() {
        assert!(!has_notes_for("  ", 0));
        assert!(!has_notes_for("\n\t", 0));
    }

    #[test]
    fn either_text_or_rating_sets_the_flag() {
        assert!(has_notes_for("great", 0));
        assert!(has_notes_for("", 3));
        assert!(has_notes_for("great", 3));
    }
}
