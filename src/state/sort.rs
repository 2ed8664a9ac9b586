//! Gallery ordering
//!
//! Sorting is a pure function of the sequence and the key. The controller
//! re-applies it every time the user picks another order.

use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::data::Media;

/// The orders offered by the sort picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Most liked first; equal counts keep their current relative order
    #[default]
    Popularity,
    /// Most recent first
    Date,
    /// Alphabetical, ignoring case and accents
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Popularity, SortKey::Date, SortKey::Title];

    /// Parse a picker label. Unknown labels give `None`, which sorts as identity.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "popularity" | "popularite" | "popularité" => Some(SortKey::Popularity),
            "date" => Some(SortKey::Date),
            "title" | "titre" => Some(SortKey::Title),
            _ => None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Popularity => "Popularity",
            SortKey::Date => "Date",
            SortKey::Title => "Title",
        };
        f.write_str(label)
    }
}

/// Return a reordered copy of `media`. `None` keeps the order unchanged.
pub fn sort_media(media: &[Media], key: Option<SortKey>) -> Vec<Media> {
    let mut sorted = media.to_vec();
    match key {
        // `sort_by` is stable, which is the popularity tie-break
        Some(SortKey::Popularity) => sorted.sort_by(|a, b| b.likes.cmp(&a.likes)),
        Some(SortKey::Date) => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        Some(SortKey::Title) => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        None => {}
    }
    sorted
}

/// Compare on the folded collation key first, then on the raw text so the result is total
fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Canonical decomposition with the combining marks dropped, lowercased.
/// "Étude" and "etude" share a key, as do "Čapek" and "capek".
fn collation_key(title: &str) -> String {
    let mut key = String::with_capacity(title.len());
    let letters = title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase);

    for c in letters {
        // Latin letters that have no canonical decomposition
        match c {
            'œ' => key.push_str("oe"),
            'æ' => key.push_str("ae"),
            'ß' => key.push_str("ss"),
            'ø' => key.push('o'),
            'ł' => key.push('l'),
            'đ' => key.push('d'),
            other => key.push(other),
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::MediaKind;
    use chrono::NaiveDate;

    fn media(id: u32, title: &str, likes: u32, date: (i32, u32, u32)) -> Media {
        Media {
            id,
            photographer_id: 1,
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            price: 50,
            likes,
            kind: MediaKind::Image(format!("{}.jpg", id)),
            is_liked: false,
        }
    }

    fn ids(media: &[Media]) -> Vec<u32> {
        media.iter().map(|m| m.id).collect()
    }

    fn sample() -> Vec<Media> {
        vec![
            media(1, "zebra", 10, (2019, 1, 1)),
            media(2, "Étude", 30, (2021, 6, 1)),
            media(3, "apple", 10, (2020, 3, 15)),
            media(4, "Eagle", 5, (2018, 12, 31)),
        ]
    }

    #[test]
    fn test_popularity_is_descending_and_stable() {
        let sorted = sort_media(&sample(), Some(SortKey::Popularity));
        // 1 and 3 tie on 10 likes and keep their input order
        assert_eq!(ids(&sorted), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_date_is_most_recent_first() {
        let sorted = sort_media(&sample(), Some(SortKey::Date));
        assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_title_ignores_case_and_accents() {
        let sorted = sort_media(&sample(), Some(SortKey::Title));
        assert_eq!(ids(&sorted), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_title_folds_letters_beyond_western_europe() {
        let titles = ["Zebra", "Čapek", "Œuvre", "Dog", "Łódź", "Śląsk"];
        let input: Vec<Media> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| media(i as u32, title, 0, (2020, 1, 1)))
            .collect();

        let sorted = sort_media(&input, Some(SortKey::Title));
        let sorted: Vec<&str> = sorted.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(sorted, vec!["Čapek", "Dog", "Łódź", "Œuvre", "Śląsk", "Zebra"]);
    }

    #[test]
    fn test_collation_key() {
        assert_eq!(collation_key("Étude de Lumière"), "etude de lumiere");
        assert_eq!(collation_key("Œuvre"), "oeuvre");
        assert_eq!(collation_key("ÇA"), collation_key("ca"));
    }

    #[test]
    fn test_title_sort_is_idempotent() {
        let once = sort_media(&sample(), Some(SortKey::Title));
        let twice = sort_media(&once, Some(SortKey::Title));
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_unknown_label_keeps_order() {
        let key = SortKey::from_label("by-colour");
        assert_eq!(key, None);
        assert_eq!(ids(&sort_media(&sample(), key)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_labels_accept_original_aliases() {
        assert_eq!(SortKey::from_label("popularite"), Some(SortKey::Popularity));
        assert_eq!(SortKey::from_label("Titre"), Some(SortKey::Title));
        assert_eq!(SortKey::from_label(&SortKey::Date.to_string()), Some(SortKey::Date));
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let input = sample();
        let _ = sort_media(&input, Some(SortKey::Popularity));
        assert_eq!(ids(&input), vec![1, 2, 3, 4]);
    }
}
