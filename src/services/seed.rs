//! Optional bootstrap fixtures: an admin account and a small sample
//! catalog. Idempotent: skipped entirely when the admin already exists.

use tracing::info;

use crate::{
    config::SeedConfig,
    error::AppResult,
    models::author::Author,
    models::book::Book,
    models::genre::Genre,
    models::lender::Lender,
    models::library::Library,
    models::user::User,
    services::Services,
};

pub async fn load(services: &Services, config: &SeedConfig) -> AppResult<()> {
    if services
        .users
        .get(&config.admin_username)
        .await
        .is_ok()
    {
        info!("seed data already present, skipping");
        return Ok(());
    }

    info!("loading seed data");

    services
        .users
        .register(
            User {
                username: config.admin_username.clone(),
                password: Some(config.admin_password.clone()),
                deleted: false,
            },
            "ADMIN",
        )
        .await?;
    services
        .users
        .register(
            User {
                username: "user".to_string(),
                password: Some("pass".to_string()),
                deleted: false,
            },
            "USER",
        )
        .await?;

    let book = |title: &str, genres: &[&str]| Book {
        title: title.to_string(),
        deleted: false,
        genres: genres
            .iter()
            .map(|name| Genre {
                name: name.to_string(),
                deleted: false,
            })
            .collect(),
    };

    services
        .books
        .create(book("1984", &["Dystopian Fiction", "Political Fiction"]))
        .await?;
    services
        .books
        .create(book(
            "To Kill a Mockingbird",
            &["Southern Gothic", "Legal Drama"],
        ))
        .await?;
    services
        .books
        .create(book("The Great Gatsby", &["Tragedy", "Classic"]))
        .await?;

    let author = |name: &str, titles: &[&str]| Author {
        name: name.to_string(),
        deleted: false,
        authored_books: titles.iter().map(|t| t.to_string()).collect(),
    };

    services.authors.create(author("George Orwell", &["1984"])).await?;
    services
        .authors
        .create(author(
            "Harper Lee",
            &["To Kill a Mockingbird", "The Great Gatsby"],
        ))
        .await?;
    services
        .authors
        .create(author("F. Scott Fitzgerald", &[]))
        .await?;

    let lender = |name: &str, titles: &[&str]| Lender {
        name: name.to_string(),
        deleted: false,
        lended_books: titles.iter().map(|t| t.to_string()).collect(),
    };

    services.lenders.create(lender("Smith", &[])).await?;
    services.lenders.create(lender("Mike", &["1984"])).await?;
    services
        .lenders
        .create(lender("Jake", &["To Kill a Mockingbird", "The Great Gatsby"]))
        .await?;

    let library = |name: &str, titles: &[&str], lenders: &[&str]| Library {
        name: name.to_string(),
        deleted: false,
        books: titles.iter().map(|t| t.to_string()).collect(),
        lenders: lenders.iter().map(|n| n.to_string()).collect(),
    };

    services
        .libraries
        .create(library("Library of Congress", &["1984"], &["Smith"]))
        .await?;
    services
        .libraries
        .create(library(
            "Bodleian Library",
            &["To Kill a Mockingbird", "The Great Gatsby"],
            &["Mike", "Jake"],
        ))
        .await?;
    services
        .libraries
        .create(library("Vatican Library", &[], &[]))
        .await?;

    info!("seed data loaded");
    Ok(())
}
