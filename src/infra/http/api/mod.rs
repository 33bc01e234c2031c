pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{
    Router,
    routing::{delete, get, post},
};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/books/{id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route("/books/genre/{genre}", get(handlers::books_by_genre))
        .route("/books/author/{author}", get(handlers::books_by_author))
        .route("/books/title/{title}", get(handlers::books_by_title))
        .route(
            "/books/recommendations/{user_id}",
            get(handlers::recommendations),
        )
        .route(
            "/books/read",
            get(handlers::list_read_books).post(handlers::create_read_book),
        )
        .route(
            "/books/read/{id}",
            get(handlers::get_read_book)
                .put(handlers::update_read_book)
                .delete(handlers::delete_read_book),
        )
        .route(
            "/books/read/user/{user_id}",
            get(handlers::read_books_for_user),
        )
        .route(
            "/books/toberead",
            get(handlers::list_to_be_read).post(handlers::create_to_be_read),
        )
        .route("/books/toberead/{id}", delete(handlers::delete_to_be_read))
        .route(
            "/books/toberead/user/{user_id}",
            get(handlers::to_be_read_for_user),
        )
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/users/bulk", post(handlers::create_users))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .route(
            "/users/username/{username}",
            get(handlers::get_user_by_username),
        )
        .route("/_health/db", get(handlers::db_health))
        .with_state(state)
}
