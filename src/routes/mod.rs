pub mod authors;
pub mod categories;
pub mod contact;
pub mod posts;
pub mod tags;

use crate::AppState;
use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router(state: AppState) -> Router {
    // Every route answers with permissive CORS; one layer covers preflight
    // and responses alike.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .nest("/api/posts", post_routes())
        .nest("/api/categories", category_routes())
        .nest("/api/authors", author_routes())
        .nest("/api/tags", tag_routes())
        .nest("/api/contact", contact_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::get_posts).post(posts::create_post))
        .route("/{slug}", get(posts::get_one_post))
}

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", get(categories::get_categories).post(categories::create_category))
}

pub fn author_routes() -> Router<AppState> {
    Router::new().route("/", get(authors::get_authors))
}

pub fn tag_routes() -> Router<AppState> {
    Router::new().route("/", get(tags::get_tags))
}

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/", get(contact::get_contacts).post(contact::submit_contact))
}
