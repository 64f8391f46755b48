//! Genre → book lookup used for reading suggestions.

use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genre {
    Romance,
    #[serde(rename = "Self-Help")]
    SelfHelp,
    Fiction,
    Thriller,
    Fantasy,
    Business,
}

impl Default for Genre {
    fn default() -> Self {
        Genre::Romance
    }
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Romance,
        Genre::SelfHelp,
        Genre::Fiction,
        Genre::Thriller,
        Genre::Fantasy,
        Genre::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Romance => "Romance",
            Genre::SelfHelp => "Self-Help",
            Genre::Fiction => "Fiction",
            Genre::Thriller => "Thriller",
            Genre::Fantasy => "Fantasy",
            Genre::Business => "Business",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| anyhow!("unknown genre '{value}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub genre: Genre,
}

/// Fixed, read-only list of books in shelf order.
#[derive(Debug, Clone)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_entries(&[
            ("Love & Coffee", Genre::Romance),
            ("Atomic Habits", Genre::SelfHelp),
            ("The Silent Patient", Genre::Thriller),
            ("Rich Dad Poor Dad", Genre::Business),
            ("The Hobbit", Genre::Fantasy),
            ("The Great Gatsby", Genre::Fiction),
        ])
    }
}

impl Catalog {
    pub fn from_entries(entries: &[(&str, Genre)]) -> Self {
        Self {
            books: entries
                .iter()
                .map(|(title, genre)| Book {
                    title: (*title).to_string(),
                    genre: *genre,
                })
                .collect(),
        }
    }

    pub fn recommendations_for(&self, genre: Genre) -> Vec<&str> {
        self.books
            .iter()
            .filter(|book| book.genre == genre)
            .map(|book| book.title.as_str())
            .collect()
    }

    /// Lookup by genre name; a name outside the known genres yields nothing.
    pub fn recommendations_for_name(&self, genre: &str) -> Vec<&str> {
        match genre.parse::<Genre>() {
            Ok(genre) => self.recommendations_for(genre),
            Err(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_by_genre() {
        let catalog = Catalog::default();
        assert_eq!(catalog.recommendations_for_name("Romance"), vec!["Love & Coffee"]);
        assert_eq!(catalog.recommendations_for(Genre::SelfHelp), vec!["Atomic Habits"]);
        assert_eq!(catalog.recommendations_for_name("self-help"), vec!["Atomic Habits"]);
        for genre in Genre::ALL {
            assert_eq!(catalog.recommendations_for(genre).len(), 1);
        }
    }

    #[test]
    fn test_unknown_genre_is_empty() {
        let catalog = Catalog::default();
        assert!(catalog.recommendations_for_name("Unknown").is_empty());
        assert!(catalog.recommendations_for_name("").is_empty());
    }

    #[test]
    fn test_catalog_order_is_preserved() {
        let catalog = Catalog::from_entries(&[
            ("Persuasion", Genre::Romance),
            ("Dune", Genre::Fantasy),
            ("Emma", Genre::Romance),
            ("Beach Read", Genre::Romance),
        ]);
        assert_eq!(
            catalog.recommendations_for(Genre::Romance),
            vec!["Persuasion", "Emma", "Beach Read"]
        );
    }

    #[test]
    fn test_genre_serializes_with_display_name() {
        let json = serde_json::to_string(&Genre::SelfHelp).unwrap();
        assert_eq!(json, "\"Self-Help\"");
        assert_eq!("Self-Help".parse::<Genre>().unwrap(), Genre::SelfHelp);
    }
}
