//! Field/direction sorting for books and ledger entries.

use crate::model::book::Book;
use crate::model::epiphany::Epiphany;
use crate::query::ParseSelectorError;
use std::cmp::Ordering;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSelectorError {
                kind: "sort order",
                value: value.to_string(),
            }),
        }
    }
}

/// A field books can be ordered by.
pub trait BookSortField: Copy {
    fn compare(self, a: &Book, b: &Book) -> Ordering;
}

/// Sort fields offered by the public catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSortField {
    Title,
    Author,
    CreatedAt,
}

/// Sort fields offered by the admin panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminSortField {
    Title,
    Author,
    #[default]
    CreatedAt,
    Category,
}

impl BookSortField for CatalogSortField {
    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => AdminSortField::Title.compare(a, b),
            Self::Author => AdminSortField::Author.compare(a, b),
            Self::CreatedAt => AdminSortField::CreatedAt.compare(a, b),
        }
    }
}

impl BookSortField for AdminSortField {
    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => collate(&a.title, &b.title),
            Self::Author => collate(&a.author, &b.author),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Category => collate(&a.category, &b.category),
        }
    }
}

impl FromStr for CatalogSortField {
    type Err = ParseSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.parse::<AdminSortField>() {
            Ok(AdminSortField::Title) => Ok(Self::Title),
            Ok(AdminSortField::Author) => Ok(Self::Author),
            Ok(AdminSortField::CreatedAt) => Ok(Self::CreatedAt),
            Ok(AdminSortField::Category) | Err(_) => Err(ParseSelectorError {
                kind: "catalog sort field",
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for AdminSortField {
    type Err = ParseSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "createdat" | "created_at" | "created-at" | "date" => Ok(Self::CreatedAt),
            "category" => Ok(Self::Category),
            _ => Err(ParseSelectorError {
                kind: "sort field",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpiphanySortField {
    #[default]
    Timestamp,
    Resonance,
    Seeker,
}

impl EpiphanySortField {
    fn compare(self, a: &Epiphany, b: &Epiphany) -> Ordering {
        match self {
            Self::Timestamp => a.timestamp.cmp(&b.timestamp),
            Self::Resonance => a.resonance.cmp(&b.resonance),
            Self::Seeker => collate(&a.seeker, &b.seeker),
        }
    }
}

impl FromStr for EpiphanySortField {
    type Err = ParseSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "timestamp" | "date" => Ok(Self::Timestamp),
            "resonance" => Ok(Self::Resonance),
            "seeker" => Ok(Self::Seeker),
            _ => Err(ParseSelectorError {
                kind: "ledger sort field",
                value: value.to_string(),
            }),
        }
    }
}

/// Returns a stably sorted copy of `books`.
pub fn sort_books<F: BookSortField>(books: &[Book], field: F, order: SortOrder) -> Vec<Book> {
    let mut sorted = books.to_vec();
    sorted.sort_by(|a, b| order.apply(field.compare(a, b)));
    sorted
}

/// Returns a stably sorted copy of `entries`.
pub fn sort_epiphanies(
    entries: &[Epiphany],
    field: EpiphanySortField,
    order: SortOrder,
) -> Vec<Epiphany> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| order.apply(field.compare(a, b)));
    sorted
}

/// Locale-style string collation.
///
/// Compared level by level: base characters with accents and case removed
/// (spaces, then punctuation and symbols, then digits, then letters), then
/// accents (unaccented first), then case (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| b.cmp(a))
}

fn primary_key(value: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn accent_key(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_lowercase).nfd()
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}
