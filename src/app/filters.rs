// src/app/filters.rs — pure view transforms; nothing here mutates the collection
use itertools::Itertools;

use super::data::Film;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Default,
    TitleAsc,
    TitleDesc,
    DurationAsc,
    DurationDesc,
    ScoreAsc,
    ScoreDesc,
}

impl SortKey {
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::TitleAsc,
        Self::TitleDesc,
        Self::DurationAsc,
        Self::DurationDesc,
        Self::ScoreAsc,
        Self::ScoreDesc,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::TitleAsc => "Title (A-Z)",
            Self::TitleDesc => "Title (Z-A)",
            Self::DurationAsc => "Duration (Shortest)",
            Self::DurationDesc => "Duration (Longest)",
            Self::ScoreAsc => "Score (Lowest)",
            Self::ScoreDesc => "Score (Highest)",
        }
    }
}

/// Buckets compare the user's own rating, never the critic score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RatingBucket {
    AllMovies,
    AnyRating,
    Unrated,
    One,
    Two,
    Three,
    Four,
    Five,
}

impl RatingBucket {
    pub const ALL: [Self; 8] = [
        Self::AllMovies,
        Self::AnyRating,
        Self::Unrated,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::AllMovies => "All movies",
            Self::AnyRating => "Any rating",
            Self::Unrated => "Unrated",
            Self::One => "1 star",
            Self::Two => "2 stars",
            Self::Three => "3 stars",
            Self::Four => "4 stars",
            Self::Five => "5 stars",
        }
    }

    const fn keeps(self, rating: u8) -> bool {
        match self {
            Self::AllMovies => true,
            Self::AnyRating => rating > 0,
            Self::Unrated => rating == 0,
            Self::One => rating == 1,
            Self::Two => rating == 2,
            Self::Three => rating == 3,
            Self::Four => rating == 4,
            Self::Five => rating == 5,
        }
    }
}

/// Independent annotation filters, AND-combined when active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub watched: bool,
    pub favorites: bool,
    pub with_notes: bool,
    pub rating: bool,
}

/// Ephemeral UI query state. Recreated per session, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub search: String,
    pub include_synopsis: bool,
    pub filters: FilterSet,
    pub rating_bucket: RatingBucket,
    pub sort_key: SortKey,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            include_synopsis: false,
            filters: FilterSet::default(),
            rating_bucket: RatingBucket::AllMovies,
            sort_key: SortKey::Default,
        }
    }
}

impl Query {
    /// "Clear filters" — back to defaults. The collection is untouched.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn matches(film: &Film, q: &Query) -> bool {
    if !q.search.is_empty() {
        let needle = q.search.to_lowercase();
        let in_title = film.title.to_lowercase().contains(&needle);
        let in_synopsis = q.include_synopsis && film.synopsis.to_lowercase().contains(&needle);
        if !in_title && !in_synopsis {
            return false;
        }
    }
    if q.filters.watched && !film.watched {
        return false;
    }
    if q.filters.favorites && !film.favorite {
        return false;
    }
    if q.filters.with_notes && !film.has_notes {
        return false;
    }
    if q.filters.rating && !q.rating_bucket.keeps(film.user_rating) {
        return false;
    }
    true
}

/// Leading digits of a display string like "124 min" or "95".
pub(crate) fn leading_number(s: &str) -> u32 {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// The ordered indices a render pass should show. Pure: `films` is never
/// mutated, and `Default` keeps the stored order (all sorts are stable, so
/// ties preserve it too).
pub fn visible_indices(films: &[Film], q: &Query) -> Vec<usize> {
    let kept = films
        .iter()
        .enumerate()
        .filter(|(_, f)| matches(f, q))
        .map(|(i, _)| i);

    match q.sort_key {
        SortKey::Default => kept.collect(),
        SortKey::TitleAsc => kept
            .sorted_by_key(|&i| films[i].title.to_lowercase())
            .collect(),
        SortKey::TitleDesc => kept
            .sorted_by(|&a, &b| {
                films[b]
                    .title
                    .to_lowercase()
                    .cmp(&films[a].title.to_lowercase())
            })
            .collect(),
        SortKey::DurationAsc => kept
            .sorted_by_key(|&i| leading_number(&films[i].running_time))
            .collect(),
        SortKey::DurationDesc => kept
            .sorted_by(|&a, &b| {
                leading_number(&films[b].running_time)
                    .cmp(&leading_number(&films[a].running_time))
            })
            .collect(),
        SortKey::ScoreAsc => kept
            .sorted_by_key(|&i| leading_number(&films[i].rt_score))
            .collect(),
        SortKey::ScoreDesc => kept
            .sorted_by(|&a, &b| {
                leading_number(&films[b].rt_score).cmp(&leading_number(&films[a].rt_score))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(id: &str, title: &str, running: &str, score: &str, rating: u8) -> Film {
        Film {
            id: id.to_string(),
            title: title.to_string(),
            original_title: None,
            poster_url: String::new(),
            release_date: "1986".to_string(),
            running_time: running.to_string(),
            rt_score: score.to_string(),
            synopsis: "A castle floats in the sky.".to_string(),
            director: "Hayao Miyazaki".to_string(),
            producer: "Isao Takahata".to_string(),
            watched: false,
            favorite: false,
            notes: String::new(),
            user_rating: rating,
            has_notes: rating > 0,
        }
    }

    fn sample_pair() -> Vec<Film> {
        vec![
            film("a", "Castle in the Sky", "124 min", "95", 0),
            film("b", "Arrietty", "94 min", "95", 4),
        ]
    }

    fn titles<'a>(films: &'a [Film], idxs: &[usize]) -> Vec<&'a str> {
        idxs.iter().map(|&i| films[i].title.as_str()).collect()
    }

    #[test]
    fn is_pure_and_never_mutates_the_input() {
        let films = sample_pair();
        let snapshot = films.clone();
        let q = Query {
            sort_key: SortKey::TitleAsc,
            ..Query::default()
        };

        let first = visible_indices(&films, &q);
        let second = visible_indices(&films, &q);
        assert_eq!(first, second);
        assert_eq!(films, snapshot);
    }

    #[test]
    fn empty_search_keeps_everything() {
        let films = sample_pair();
        let q = Query::default();
        assert_eq!(visible_indices(&films, &q), vec![0, 1]);
    }

    #[test]
    fn search_matches_title_case_insensitively() {
        let films = sample_pair();
        let q = Query {
            search: "castle".to_string(),
            ..Query::default()
        };
        assert_eq!(titles(&films, &visible_indices(&films, &q)), ["Castle in the Sky"]);
    }

    #[test]
    fn synopsis_only_matches_when_the_flag_is_on() {
        let films = sample_pair();
        let mut q = Query {
            search: "floats".to_string(),
            ..Query::default()
        };
        assert!(visible_indices(&films, &q).is_empty());

        q.include_synopsis = true;
        assert_eq!(visible_indices(&films, &q).len(), 2);
    }

    #[test]
    fn boolean_filters_are_and_combined() {
        let mut films = sample_pair();
        films[0].watched = true;
        films[1].watched = true;
        films[1].favorite = true;

        let q = Query {
            filters: FilterSet {
                watched: true,
                favorites: true,
                ..FilterSet::default()
            },
            ..Query::default()
        };
        assert_eq!(titles(&films, &visible_indices(&films, &q)), ["Arrietty"]);
    }

    #[test]
    fn with_notes_filter_uses_the_derived_flag() {
        let mut films = sample_pair();
        films[0].notes = "soundtrack!".to_string();
        films[0].has_notes = true;
        films[1].has_notes = false;
        films[1].user_rating = 0;

        let q = Query {
            filters: FilterSet {
                with_notes: true,
                ..FilterSet::default()
            },
            ..Query::default()
        };
        assert_eq!(
            titles(&films, &visible_indices(&films, &q)),
            ["Castle in the Sky"]
        );
    }

    #[test]
    fn rating_buckets_compare_the_user_rating_not_the_critic_score() {
        // Both films carry critic score "95"; only the user rating differs.
        let films = sample_pair();
        let mut q = Query {
            filters: FilterSet {
                rating: true,
                ..FilterSet::default()
            },
            rating_bucket: RatingBucket::Four,
            ..Query::default()
        };
        assert_eq!(titles(&films, &visible_indices(&films, &q)), ["Arrietty"]);

        q.rating_bucket = RatingBucket::Unrated;
        assert_eq!(
            titles(&films, &visible_indices(&films, &q)),
            ["Castle in the Sky"]
        );

        q.rating_bucket = RatingBucket::AnyRating;
        assert_eq!(titles(&films, &visible_indices(&films, &q)), ["Arrietty"]);

        q.rating_bucket = RatingBucket::AllMovies;
        assert_eq!(visible_indices(&films, &q).len(), 2);
    }

    #[test]
    fn rating_bucket_is_inert_while_its_toggle_is_off() {
        let films = sample_pair();
        let q = Query {
            rating_bucket: RatingBucket::Five,
            ..Query::default()
        };
        assert_eq!(visible_indices(&films, &q).len(), 2);
    }

    #[test]
    fn sorts_by_title_both_ways() {
        let films = sample_pair();
        let mut q = Query {
            sort_key: SortKey::TitleAsc,
            ..Query::default()
        };
        assert_eq!(
            titles(&films, &visible_indices(&films, &q)),
            ["Arrietty", "Castle in the Sky"]
        );

        q.sort_key = SortKey::TitleDesc;
        assert_eq!(
            titles(&films, &visible_indices(&films, &q)),
            ["Castle in the Sky", "Arrietty"]
        );
    }

    #[test]
    fn sorts_by_parsed_duration() {
        let films = sample_pair();
        let mut q = Query {
            sort_key: SortKey::DurationDesc,
            ..Query::default()
        };
        assert_eq!(
            titles(&films, &visible_indices(&films, &q)),
            ["Castle in the Sky", "Arrietty"]
        );

        q.sort_key = SortKey::DurationAsc;
        assert_eq!(
            titles(&films, &visible_indices(&films, &q)),
            ["Arrietty", "Castle in the Sky"]
        );
    }

    #[test]
    fn score_sort_is_stable_on_ties() {
        // Equal scores: both directions must keep the stored order.
        let films = sample_pair();
        let mut q = Query {
            sort_key: SortKey::ScoreDesc,
            ..Query::default()
        };
        assert_eq!(visible_indices(&films, &q), vec![0, 1]);
        q.sort_key = SortKey::ScoreAsc;
        assert_eq!(visible_indices(&films, &q), vec![0, 1]);
    }

    #[test]
    fn default_sort_never_reorders_even_after_filtering() {
        let mut films = sample_pair();
        films.push(film("c", "Ponyo", "101 min", "92", 4));
        films[0].watched = true;
        films[2].watched = true;

        let q = Query {
            filters: FilterSet {
                watched: true,
                ..FilterSet::default()
            },
            ..Query::default()
        };
        assert_eq!(visible_indices(&films, &q), vec![0, 2]);
    }

    #[test]
    fn parses_leading_digits_and_ignores_the_unit() {
        assert_eq!(leading_number("124 min"), 124);
        assert_eq!(leading_number("95"), 95);
        assert_eq!(leading_number(" 86 min "), 86);
        assert_eq!(leading_number("min"), 0);
        assert_eq!(leading_number(""), 0);
    }

    #[test]
    fn clear_resets_the_descriptor_to_defaults() {
        let mut q = Query {
            search: "totoro".to_string(),
            include_synopsis: true,
            filters: FilterSet {
                watched: true,
                favorites: true,
                with_notes: true,
                rating: true,
            },
            rating_bucket: RatingBucket::Three,
            sort_key: SortKey::ScoreDesc,
        };
        q.clear();
        assert_eq!(q, Query::default());
    }
}
