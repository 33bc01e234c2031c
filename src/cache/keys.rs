//! Cache key definitions.
//!
//! Every cached query lives in one flat string namespace of the form
//! `<namespace>-<discriminator>`.

use std::fmt;

/// A read-through query whose result may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey<'a> {
    BookById(i32),
    ReadBookById(i32),
    BooksByGenre(&'a str),
    BooksByAuthor(&'a str),
    BooksByTitle(&'a str),
    ReadBooksByUser(i32),
    ToBeReadBooksByUser(i32),
}

impl QueryKey<'_> {
    pub fn namespace(&self) -> &'static str {
        match self {
            QueryKey::BookById(_) => "book-id",
            QueryKey::ReadBookById(_) => "read-book-id",
            QueryKey::BooksByGenre(_) => "books-genre",
            QueryKey::BooksByAuthor(_) => "books-author",
            QueryKey::BooksByTitle(_) => "books-title",
            QueryKey::ReadBooksByUser(_) => "read-books-user-id",
            QueryKey::ToBeReadBooksByUser(_) => "to-be-read-books-user-id",
        }
    }
}

impl fmt::Display for QueryKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let namespace = self.namespace();
        match self {
            QueryKey::BookById(id)
            | QueryKey::ReadBookById(id)
            | QueryKey::ReadBooksByUser(id)
            | QueryKey::ToBeReadBooksByUser(id) => write!(f, "{namespace}-{id}"),
            QueryKey::BooksByGenre(value)
            | QueryKey::BooksByAuthor(value)
            | QueryKey::BooksByTitle(value) => write!(f, "{namespace}-{value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_flat_string_keys() {
        assert_eq!(QueryKey::BookById(7).to_string(), "book-id-7");
        assert_eq!(QueryKey::ReadBookById(3).to_string(), "read-book-id-3");
        assert_eq!(
            QueryKey::BooksByGenre("fantasy").to_string(),
            "books-genre-fantasy"
        );
        assert_eq!(
            QueryKey::BooksByAuthor("Tolkien").to_string(),
            "books-author-Tolkien"
        );
        assert_eq!(
            QueryKey::BooksByTitle("Dune").to_string(),
            "books-title-Dune"
        );
        assert_eq!(
            QueryKey::ReadBooksByUser(12).to_string(),
            "read-books-user-id-12"
        );
        assert_eq!(
            QueryKey::ToBeReadBooksByUser(12).to_string(),
            "to-be-read-books-user-id-12"
        );
    }

    #[test]
    fn same_argument_in_different_namespaces_does_not_collide() {
        let by_genre = QueryKey::BooksByGenre("horror").to_string();
        let by_author = QueryKey::BooksByAuthor("horror").to_string();
        let by_title = QueryKey::BooksByTitle("horror").to_string();
        assert_ne!(by_genre, by_author);
        assert_ne!(by_author, by_title);
        assert_ne!(
            QueryKey::BookById(1).to_string(),
            QueryKey::ReadBookById(1).to_string()
        );
    }
}
