//! Business logic services

pub mod authors;
pub mod books;
pub mod genres;
pub mod guard;
pub mod lenders;
pub mod libraries;
pub mod seed;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub genres: genres::GenresService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub lenders: lenders::LendersService,
    pub libraries: libraries::LibrariesService,
}

impl Services {
    pub fn new(repository: Repository, auth: AuthConfig) -> Self {
        let guard = guard::ReferentialGuard::new(repository.clone());

        Self {
            users: users::UsersService::new(repository.clone(), auth),
            genres: genres::GenresService::new(repository.clone(), guard.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone(), guard),
            lenders: lenders::LendersService::new(repository.clone()),
            libraries: libraries::LibrariesService::new(repository),
        }
    }
}
