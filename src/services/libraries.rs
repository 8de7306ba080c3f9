//! Library management service

use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::library::{Library, LibraryRow, UpdateLibrary},
    models::query::ListQuery,
    repository::Repository,
};

#[derive(Clone)]
pub struct LibrariesService {
    repository: Repository,
}

impl LibrariesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<Library>> {
        let query = ListQuery::from_params("name", params)?;
        let rows = self.repository.libraries.list(&query).await?;

        let mut libraries = Vec::with_capacity(rows.len());
        for row in &rows {
            libraries.push(self.load(row).await?);
        }
        Ok(libraries)
    }

    pub async fn create(&self, library: Library) -> AppResult<Library> {
        library.validate()?;

        if self
            .repository
            .libraries
            .exists_by_name(&library.name)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A library with the name already exists: {}",
                library.name
            )));
        }

        let book_ids = self.resolve_books(&library.books).await?;
        let lender_ids = self.resolve_lenders(&library.lenders).await?;
        let row = self
            .repository
            .libraries
            .create(&library.name, &book_ids, &lender_ids)
            .await?;

        self.load(&row).await
    }

    pub async fn get(&self, name: &str) -> AppResult<Library> {
        let row = self.find(name).await?;
        self.load(&row).await
    }

    pub async fn update(&self, name: &str, update: UpdateLibrary) -> AppResult<Library> {
        update.validate()?;
        let row = self.find(name).await?;

        if let Some(new_name) = update.name.as_deref() {
            if new_name != row.name
                && self.repository.libraries.exists_by_name(new_name).await?
            {
                return Err(AppError::Conflict(format!(
                    "A library with the name already exists: {}",
                    new_name
                )));
            }
        }

        // Absent or empty lists mean no change to the associations.
        let book_ids = match update.books.as_deref() {
            Some(titles) if !titles.is_empty() => Some(self.resolve_books(titles).await?),
            _ => None,
        };
        let lender_ids = match update.lenders.as_deref() {
            Some(names) if !names.is_empty() => Some(self.resolve_lenders(names).await?),
            _ => None,
        };

        let row = self
            .repository
            .libraries
            .update(
                row.id,
                update.name.as_deref(),
                book_ids.as_deref(),
                lender_ids.as_deref(),
            )
            .await?;

        self.load(&row).await
    }

    /// Soft-delete a library. Unconditional: its book and lender
    /// references are library-owned and die with it.
    pub async fn remove(&self, name: &str) -> AppResult<Library> {
        let row = self.find(name).await?;
        let row = self.repository.libraries.remove(row.id).await?;
        self.load(&row).await
    }

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

    async fn resolve_lenders(&self, names: &[String]) -> AppResult<Vec<i64>> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            let row = self
                .repository
                .lenders
                .find_by_name(name)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("A lender with the name doesn't exist: {}", name))
                })?;
            ids.push(row.id);
        }
        Ok(ids)
    }

    async fn load(&self, row: &LibraryRow) -> AppResult<Library> {
        let books = self.repository.libraries.books_of(row.id).await?;
        let lenders = self.repository.libraries.lenders_of(row.id).await?;
        Library::from_row(row, &books, &lenders)
    }

    async fn find(&self, name: &str) -> AppResult<LibraryRow> {
        self.repository
            .libraries
            .find_by_name(name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Couldn't find a library with the name: {}", name))
            })
    }
}
