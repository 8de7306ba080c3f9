//! Book management service

use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookRow, UpdateBook},
    models::genre::Genre,
    models::query::ListQuery,
    repository::Repository,
    services::guard::ReferentialGuard,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    guard: ReferentialGuard,
}

impl BooksService {
    pub fn new(repository: Repository, guard: ReferentialGuard) -> Self {
        Self { repository, guard }
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<Book>> {
        let query = ListQuery::from_params("title", params)?;
        let rows = self.repository.books.list(&query).await?;

        let mut books = Vec::with_capacity(rows.len());
        for row in &rows {
            books.push(self.load(row).await?);
        }
        Ok(books)
    }

    pub async fn create(&self, book: Book) -> AppResult<Book> {
        book.validate()?;

        if self.repository.books.exists_by_title(&book.title).await? {
            return Err(AppError::Conflict(format!(
                "A Book with the title already exists: {}",
                book.title
            )));
        }

        let genre_ids = self.resolve_genres(&book.genres).await?;
        let row = self.repository.books.create(&book.title, &genre_ids).await?;
        self.load(&row).await
    }

    pub async fn get(&self, title: &str) -> AppResult<Book> {
        let row = self.find(title).await?;
        self.load(&row).await
    }

    pub async fn update(&self, title: &str, update: UpdateBook) -> AppResult<Book> {
        update.validate()?;
        let row = self.find(title).await?;

        if let Some(new_title) = update.title.as_deref() {
            if new_title != row.title
                && self.repository.books.exists_by_title(new_title).await?
            {
                return Err(AppError::Conflict(format!(
                    "A Book with the title already exists: {}",
                    new_title
                )));
            }
        }

        // An absent or empty genre list leaves the association untouched;
        // only a non-empty list replaces it wholesale.
        let genre_ids = match update.genres.as_deref() {
            Some(genres) if !genres.is_empty() => Some(self.resolve_genres(genres).await?),
            _ => None,
        };

        let row = self
            .repository
            .books
            .update(row.id, update.title.as_deref(), genre_ids.as_deref())
            .await?;

        self.load(&row).await
    }

    /// Hard-delete a book. Refused while any library, author or lender
    /// still references it, with the referencing records left untouched.
    pub async fn remove(&self, title: &str) -> AppResult<Book> {
        let row = self.find(title).await?;

        if let Some(referrer) = self.guard.book_referrer(row.id).await? {
            return Err(AppError::Conflict(referrer.conflict_message().to_string()));
        }

        // The genre links cascade away with the row; snapshot them first
        // so the response still carries the full representation.
        let book = self.load(&row).await?;
        self.repository.books.remove(row.id).await?;
        Ok(book)
    }

    /// Genres on a book are the one resolve-or-create association in the
    /// model; an unknown name becomes a new genre instead of an error.
    async fn resolve_genres(&self, genres: &[Genre]) -> AppResult<Vec<i64>> {
        let mut ids = Vec::with_capacity(genres.len());
        for genre in genres {
            genre.validate()?;
            let row = self.repository.genres.resolve_or_create(&genre.name).await?;
            ids.push(row.id);
        }
        Ok(ids)
    }

    async fn load(&self, row: &BookRow) -> AppResult<Book> {
        let genres = self.repository.books.genres_of(row.id).await?;
        Book::from_row(row, &genres)
    }

    async fn find(&self, title: &str) -> AppResult<BookRow> {
        self.repository.books.find_by_title(title).await?.ok_or_else(|| {
            AppError::NotFound(format!("Couldn't find a book with the title: {}", title))
        })
    }
}
