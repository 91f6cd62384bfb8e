//! Built-in catalog written on first access to an empty archive.

use crate::model::book::{Book, Discipline};
use crate::model::document::NO_DOCUMENT;

struct SeedBook {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    discipline: Discipline,
    category: &'static str,
    description: &'static str,
    cover_seed: &'static str,
}

const SEED_BOOKS: &[SeedBook] = &[
    SeedBook {
        id: "1",
        title: "The Kybalion",
        author: "Three Initiates",
        discipline: Discipline::Philosophy,
        category: "Hermeticism",
        description: "A study of the Hermetic Philosophy of Ancient Egypt and Greece. It explores the seven principles that govern reality.",
        cover_seed: "kybalion",
    },
    SeedBook {
        id: "2",
        title: "Meditations",
        author: "Marcus Aurelius",
        discipline: Discipline::Philosophy,
        category: "Stoicism",
        description: "A series of personal writings by the Roman Emperor, recording his private notes to himself and ideas on Stoic philosophy.",
        cover_seed: "meditations",
    },
    SeedBook {
        id: "3",
        title: "The Hero with a Thousand Faces",
        author: "Joseph Campbell",
        discipline: Discipline::Psychology,
        category: "Mythology",
        description: "Work of comparative mythology that outlines the Hero's Journey, a universal motif of adventure and transformation.",
        cover_seed: "hero",
    },
    SeedBook {
        id: "4",
        title: "The Origins of Totalitarianism",
        author: "Hannah Arendt",
        discipline: Discipline::Political,
        category: "History",
        description: "A deep analysis of the historical conditions that led to the rise of totalitarian regimes in the 20th century.",
        cover_seed: "arendt",
    },
];

/// Builds the seed catalog stamped with `created_at`.
pub fn seed_books(created_at: i64) -> Vec<Book> {
    SEED_BOOKS
        .iter()
        .map(|seed| Book {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            author: seed.author.to_string(),
            discipline: seed.discipline,
            category: seed.category.to_string(),
            description: seed.description.to_string(),
            cover_url: format!("https://picsum.photos/seed/{}/400/600", seed.cover_seed),
            file_url: NO_DOCUMENT.to_string(),
            created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::seed_books;
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_and_documents_absent() {
        let books = seed_books(7);
        assert_eq!(books.len(), 4);
        let ids: HashSet<_> = books.iter().map(|book| book.id.as_str()).collect();
        assert_eq!(ids.len(), books.len());
        assert!(books.iter().all(|book| book.file_url == "#"));
        assert!(books.iter().all(|book| book.created_at == 7));
    }
}
