//! Discipline + free-text filtering for catalog views.

use crate::model::book::{Book, Discipline};
use crate::query::ParseSelectorError;
use std::str::FromStr;

/// Discipline selector for catalog views; `All` is the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisciplineFilter {
    #[default]
    All,
    Only(Discipline),
}

impl DisciplineFilter {
    pub fn matches(self, discipline: Discipline) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == discipline,
        }
    }
}

impl FromStr for DisciplineFilter {
    type Err = ParseSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value
            .parse::<Discipline>()
            .map(Self::Only)
            .map_err(|_| ParseSelectorError {
                kind: "discipline",
                value: value.to_string(),
            })
    }
}

/// Catalog filter: discipline selector AND case-insensitive substring match
/// on title, author, or discipline label.
pub fn filter_books(books: &[Book], selector: DisciplineFilter, text: &str) -> Vec<Book> {
    let needle = text.to_lowercase();
    books
        .iter()
        .filter(|book| selector.matches(book.discipline))
        .filter(|book| {
            needle.is_empty()
                || contains_folded(&book.title, &needle)
                || contains_folded(&book.author, &needle)
                || contains_folded(book.discipline.label(), &needle)
        })
        .cloned()
        .collect()
}

/// Admin-panel search: case-insensitive substring match on title or author.
pub fn search_admin(books: &[Book], text: &str) -> Vec<Book> {
    let needle = text.to_lowercase();
    books
        .iter()
        .filter(|book| {
            needle.is_empty()
                || contains_folded(&book.title, &needle)
                || contains_folded(&book.author, &needle)
        })
        .cloned()
        .collect()
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::{filter_books, search_admin, DisciplineFilter};
    use crate::model::book::{Book, Discipline};

    fn book(id: &str, title: &str, author: &str, discipline: Discipline) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            discipline,
            category: String::new(),
            description: String::new(),
            cover_url: String::new(),
            file_url: "#".to_string(),
            created_at: 0,
        }
    }

    #[test]
    fn text_matches_discipline_label_in_catalog_but_not_admin() {
        let books = vec![book("1", "Fragments", "Anon", Discipline::LostKnowledge)];
        assert_eq!(filter_books(&books, DisciplineFilter::All, "lost know").len(), 1);
        assert!(search_admin(&books, "lost know").is_empty());
    }

    #[test]
    fn substring_is_not_token_match() {
        let books = vec![book("1", "Meditations", "Marcus Aurelius", Discipline::Philosophy)];
        assert_eq!(filter_books(&books, DisciplineFilter::All, "ditat").len(), 1);
        assert!(filter_books(&books, DisciplineFilter::All, "marcus meditations").is_empty());
    }

    #[test]
    fn selector_parses_wildcard_and_labels() {
        assert_eq!("ALL".parse::<DisciplineFilter>(), Ok(DisciplineFilter::All));
        assert_eq!(
            "esoteric".parse::<DisciplineFilter>(),
            Ok(DisciplineFilter::Only(Discipline::Esoteric))
        );
        assert!("cooking".parse::<DisciplineFilter>().is_err());
    }
}
