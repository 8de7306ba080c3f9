//! Genre management service

use std::collections::HashMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::genre::{Genre, GenreRow, UpdateGenre},
    models::query::ListQuery,
    repository::Repository,
    services::guard::ReferentialGuard,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
    guard: ReferentialGuard,
}

impl GenresService {
    pub fn new(repository: Repository, guard: ReferentialGuard) -> Self {
        Self { repository, guard }
    }

    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<Vec<Genre>> {
        let query = ListQuery::from_params("name", params)?;
        let rows = self.repository.genres.list(&query).await?;
        rows.iter().map(Genre::from_row).collect()
    }

    pub async fn create(&self, genre: Genre) -> AppResult<Genre> {
        genre.validate()?;

        if self.repository.genres.exists_by_name(&genre.name).await? {
            return Err(AppError::Conflict(format!(
                "A genre with the name already exists: {}",
                genre.name
            )));
        }

        let row = self.repository.genres.create(&genre.name).await?;
        Genre::from_row(&row)
    }

    pub async fn get(&self, name: &str) -> AppResult<Genre> {
        let row = self.find(name).await?;
        Genre::from_row(&row)
    }

    pub async fn update(&self, name: &str, update: UpdateGenre) -> AppResult<Genre> {
        update.validate()?;
        let row = self.find(name).await?;

        let row = match update.name.as_deref() {
            Some(new_name) => {
                if new_name != row.name
                    && self.repository.genres.exists_by_name(new_name).await?
                {
                    return Err(AppError::Conflict(format!(
                        "A genre with the name already exists: {}",
                        new_name
                    )));
                }
                self.repository.genres.update_name(row.id, new_name).await?
            }
            None => row,
        };

        Genre::from_row(&row)
    }

    /// Soft-delete a genre, refused while any live book still lists it.
    pub async fn remove(&self, name: &str) -> AppResult<Genre> {
        let row = self.find(name).await?;

        if !self.guard.can_delete_genre(row.id).await? {
            return Err(AppError::Conflict(
                "The genre is referenced by a book".to_string(),
            ));
        }

        let row = self.repository.genres.remove(row.id).await?;
        Genre::from_row(&row)
    }

    async fn find(&self, name: &str) -> AppResult<GenreRow> {
        self.repository.genres.find_by_name(name).await?.ok_or_else(|| {
            AppError::NotFound(format!("Couldn't find a genre with the name: {}", name))
        })
    }
}
