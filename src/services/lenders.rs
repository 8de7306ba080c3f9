//! Lender management service

use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::lender::{Lender, LenderRow, UpdateLender},
    models::query::ListQuery,
    repository::Repository,
};

#[derive(Clone)]
pub struct LendersService {
    repository: Repository,
}

impl LendersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<Lender>> {
        let query = ListQuery::from_params("name", params)?;
        let rows = self.repository.lenders.list(&query).await?;

        let mut lenders = Vec::with_capacity(rows.len());
        for row in &rows {
            lenders.push(self.load(row).await?);
        }
        Ok(lenders)
    }

    pub async fn create(&self, lender: Lender) -> AppResult<Lender> {
        lender.validate()?;

        if self.repository.lenders.exists_by_name(&lender.name).await? {
            return Err(AppError::Conflict(format!(
                "A lender with the name already exists: {}",
                lender.name
            )));
        }

        let book_ids = self.resolve_books(&lender.lended_books).await?;
        let row = self.repository.lenders.create(&lender.name, &book_ids).await?;
        self.load(&row).await
    }

    pub async fn get(&self, name: &str) -> AppResult<Lender> {
        let row = self.find(name).await?;
        self.load(&row).await
    }

    pub async fn update(&self, name: &str, update: UpdateLender) -> AppResult<Lender> {
        update.validate()?;
        let row = self.find(name).await?;

        if let Some(new_name) = update.name.as_deref() {
            if new_name != row.name
                && self.repository.lenders.exists_by_name(new_name).await?
            {
                return Err(AppError::Conflict(format!(
                    "A lender with the name already exists: {}",
                    new_name
                )));
            }
        }

        // Absent or empty book list means no change to the association.
        let book_ids = match update.lended_books.as_deref() {
            Some(titles) if !titles.is_empty() => Some(self.resolve_books(titles).await?),
            _ => None,
        };

        let row = self
            .repository
            .lenders
            .update(row.id, update.name.as_deref(), book_ids.as_deref())
            .await?;

        self.load(&row).await
    }

    /// Soft-delete a lender. Unconditional: its book references are
    /// lender-owned and die with it.
    pub async fn remove(&self, name: &str) -> AppResult<Lender> {
        let row = self.find(name).await?;
        let row = self.repository.lenders.remove(row.id).await?;
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

    async fn load(&self, row: &LenderRow) -> AppResult<Lender> {
        let books = self.repository.lenders.books_of(row.id).await?;
        Lender::from_row(row, &books)
    }

    async fn find(&self, name: &str) -> AppResult<LenderRow> {
        self.repository.lenders.find_by_name(name).await?.ok_or_else(|| {
            AppError::NotFound(format!("Couldn't find a lender with the name: {}", name))
        })
    }
}
