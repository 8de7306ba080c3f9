//! Author management service

use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorRow, UpdateAuthor},
    models::query::ListQuery,
    repository::Repository,
};

/// Authors expose no delete operation; the rest of the surface matches
/// the other catalog kinds.
#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<Author>> {
        let query = ListQuery::from_params("name", params)?;
        let rows = self.repository.authors.list(&query).await?;

        let mut authors = Vec::with_capacity(rows.len());
        for row in &rows {
            authors.push(self.load(row).await?);
        }
        Ok(authors)
    }

    pub async fn create(&self, author: Author) -> AppResult<Author> {
        author.validate()?;

        if self.repository.authors.exists_by_name(&author.name).await? {
            return Err(AppError::Conflict(format!(
                "An author with the name already exists: {}",
                author.name
            )));
        }

        let book_ids = self.resolve_books(&author.authored_books).await?;
        let row = self.repository.authors.create(&author.name, &book_ids).await?;
        self.load(&row).await
    }

    pub async fn get(&self, name: &str) -> AppResult<Author> {
        let row = self.find(name).await?;
        self.load(&row).await
    }

    pub async fn update(&self, name: &str, update: UpdateAuthor) -> AppResult<Author> {
        update.validate()?;
        let row = self.find(name).await?;

        if let Some(new_name) = update.name.as_deref() {
            if new_name != row.name
                && self.repository.authors.exists_by_name(new_name).await?
            {
                return Err(AppError::Conflict(format!(
                    "An author with the name already exists: {}",
                    new_name
                )));
            }
        }

        // Absent or empty book list means no change to the association.
        let book_ids = match update.authored_books.as_deref() {
            Some(titles) if !titles.is_empty() => Some(self.resolve_books(titles).await?),
            _ => None,
        };

        let row = self
            .repository
            .authors
            .update(row.id, update.name.as_deref(), book_ids.as_deref())
            .await?;

        self.load(&row).await
    }

    /// Authored books are references, never implicitly created; an
    /// unknown title is an error.
    async fn resolve_books(&self, titles: &[String]) -> AppResult<Vec<i64>> {
        let mut ids = Vec::with_capacity(titles.len());
        for title in titles {
            let row = self
                .repository
                .books
                .find_by_title(title)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("A Book with the title doesn't exist: {}", title))
                })?;
            ids.push(row.id);
        }
        Ok(ids)
    }

    async fn load(&self, row: &AuthorRow) -> AppResult<Author> {
        let books = self.repository.authors.books_of(row.id).await?;
        Author::from_row(row, &books)
    }

    async fn find(&self, name: &str) -> AppResult<AuthorRow> {
        self.repository.authors.find_by_name(name).await?.ok_or_else(|| {
            AppError::NotFound(format!("Couldn't find an author with the name: {}", name))
        })
    }
}
