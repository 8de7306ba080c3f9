//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, authors, books, genres, health, lenders, libraries, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lighthouse API",
        version = "1.0.0",
        description = "Library catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Genres
        genres::list_genres,
        genres::create_genre,
        genres::get_genre,
        genres::update_genre,
        genres::delete_genre,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::update_book,
        books::delete_book,
        // Authors
        authors::list_authors,
        authors::create_author,
        authors::get_author,
        authors::update_author,
        // Lenders
        lenders::list_lenders,
        lenders::create_lender,
        lenders::get_lender,
        lenders::update_lender,
        lenders::delete_lender,
        // Libraries
        libraries::list_libraries,
        libraries::create_library,
        libraries::get_library,
        libraries::update_library,
        libraries::delete_library,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Entities
            crate::models::user::User,
            crate::models::user::UpdateUser,
            crate::models::genre::Genre,
            crate::models::genre::UpdateGenre,
            crate::models::book::Book,
            crate::models::book::UpdateBook,
            crate::models::author::Author,
            crate::models::author::UpdateAuthor,
            crate::models::lender::Lender,
            crate::models::lender::UpdateLender,
            crate::models::library::Library,
            crate::models::library::UpdateLibrary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "genres", description = "Genre management"),
        (name = "books", description = "Book management"),
        (name = "authors", description = "Author management"),
        (name = "lenders", description = "Lender management"),
        (name = "libraries", description = "Library management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
