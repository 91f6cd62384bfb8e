//! Book catalog record and discipline tags.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Opaque book identifier assigned by the archive store.
pub type BookId = String;

/// Fixed subject-area tag classifying every book.
///
/// Serialized as the human-readable label (`"Lost Knowledge"`), which is
/// also what free-text search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    History,
    Science,
    Esoteric,
    Philosophy,
    Psychology,
    Political,
    #[serde(rename = "Lost Knowledge")]
    LostKnowledge,
}

impl Discipline {
    /// Every discipline in display order.
    pub const ALL: [Discipline; 7] = [
        Discipline::History,
        Discipline::Science,
        Discipline::Esoteric,
        Discipline::Philosophy,
        Discipline::Psychology,
        Discipline::Political,
        Discipline::LostKnowledge,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::History => "History",
            Self::Science => "Science",
            Self::Esoteric => "Esoteric",
            Self::Philosophy => "Philosophy",
            Self::Psychology => "Psychology",
            Self::Political => "Political",
            Self::LostKnowledge => "Lost Knowledge",
        }
    }
}

impl Display for Discipline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string names no known discipline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDiscipline(pub String);

impl Display for UnknownDiscipline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown discipline `{}`", self.0)
    }
}

impl Error for UnknownDiscipline {}

impl FromStr for Discipline {
    type Err = UnknownDiscipline;

    /// Accepts labels case-insensitively, with `-`/`_` standing in for spaces.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().replace(['-', '_'], " ").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|discipline| discipline.label().to_lowercase() == normalized)
            .ok_or_else(|| UnknownDiscipline(value.to_string()))
    }
}

/// Catalog entry for one archived text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub discipline: Discipline,
    /// Free-text sub-category, e.g. `Stoicism`.
    pub category: String,
    pub description: String,
    /// Remote URL or embedded `data:` image.
    pub cover_url: String,
    /// Remote URL, embedded `data:` document, or `#` for "no document".
    pub file_url: String,
    /// Unix epoch milliseconds, assigned at insertion.
    pub created_at: i64,
}

/// Caller-supplied book fields; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub discipline: Discipline,
    pub category: String,
    pub description: String,
    pub cover_url: String,
    pub file_url: String,
}

impl BookDraft {
    /// Creates a draft with empty optional fields and no attached document.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        discipline: Discipline,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            discipline,
            category: String::new(),
            description: String::new(),
            cover_url: String::new(),
            file_url: crate::model::document::NO_DOCUMENT.to_string(),
        }
    }

    /// Materializes the draft into a stored record.
    pub(crate) fn into_book(self, id: BookId, created_at: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            discipline: self.discipline,
            category: self.category,
            description: self.description,
            cover_url: self.cover_url,
            file_url: self.file_url,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, Discipline};

    #[test]
    fn discipline_parses_labels_loosely() {
        assert_eq!("lost-knowledge".parse::<Discipline>(), Ok(Discipline::LostKnowledge));
        assert_eq!(" Science ".parse::<Discipline>(), Ok(Discipline::Science));
        assert!("alchemy".parse::<Discipline>().is_err());
    }

    #[test]
    fn book_serializes_with_camel_case_fields_and_labels() {
        let book = Book {
            id: "x1".to_string(),
            title: "Lost Scrolls".to_string(),
            author: "Unknown".to_string(),
            discipline: Discipline::LostKnowledge,
            category: "Fragments".to_string(),
            description: String::new(),
            cover_url: String::new(),
            file_url: "#".to_string(),
            created_at: 42,
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["discipline"], "Lost Knowledge");
        assert_eq!(json["createdAt"], 42);
        assert_eq!(json["fileUrl"], "#");
        assert!(json.get("cover_url").is_none());
    }
}
