//! Referential integrity checks backing delete operations

use crate::{error::AppResult, repository::Repository};

/// Which side of the association graph still points at a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookReferrer {
    Library,
    Author,
    Lender,
}

impl BookReferrer {
    pub fn conflict_message(&self) -> &'static str {
        match self {
            BookReferrer::Library => "The book is referenced by a library",
            BookReferrer::Author => "The book is referenced by an author",
            BookReferrer::Lender => "The book is referenced by a lender",
        }
    }
}

/// Decides whether a delete is permitted given the current association
/// graph. Checks use store-level existence queries, never full scans.
#[derive(Clone)]
pub struct ReferentialGuard {
    repository: Repository,
}

impl ReferentialGuard {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// First entity kind still holding a reference to the book, if any.
    /// Order matches the precedence of the conflict messages: library,
    /// then author, then lender.
    pub async fn book_referrer(&self, book_id: i64) -> AppResult<Option<BookReferrer>> {
        if self.repository.libraries.references_book(book_id).await? {
            return Ok(Some(BookReferrer::Library));
        }
        if self.repository.authors.references_book(book_id).await? {
            return Ok(Some(BookReferrer::Author));
        }
        if self.repository.lenders.references_book(book_id).await? {
            return Ok(Some(BookReferrer::Lender));
        }
        Ok(None)
    }

    pub async fn can_delete_book(&self, book_id: i64) -> AppResult<bool> {
        Ok(self.book_referrer(book_id).await?.is_none())
    }

    /// A genre may only be soft-deleted once no live book lists it.
    pub async fn can_delete_genre(&self, genre_id: i64) -> AppResult<bool> {
        Ok(!self.repository.books.references_genre(genre_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referrer_messages_name_the_owning_kind() {
        assert_eq!(
            BookReferrer::Library.conflict_message(),
            "The book is referenced by a library"
        );
        assert_eq!(
            BookReferrer::Author.conflict_message(),
            "The book is referenced by an author"
        );
        assert_eq!(
            BookReferrer::Lender.conflict_message(),
            "The book is referenced by a lender"
        );
    }
}
