//! Route definitions for the training platform API.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod admin;
pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod progress;
pub mod settings;
pub mod users;
pub mod videos;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list).post(users::create))
        .route("/users/{id}", axum::routing::delete(users::delete))
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
        .route("/videos", get(videos::list).post(videos::create))
        .route("/videos/{id}", put(videos::update).delete(videos::delete))
        .route("/videos/{id}/detailed", get(videos::detailed))
        .route("/videos/{id}/stats", get(videos::stats))
        .route("/video-progress", post(progress::report))
        .route(
            "/video-progress/{email}/{video_id}",
            get(progress::get_for_pair),
        )
        .route("/dashboard/{email}", get(dashboard::user_dashboard))
        .route("/admin/stats", get(admin::stats))
        .route("/settings", get(settings::get).put(settings::update))
        .route(
            "/banner-video",
            get(settings::get_banner)
                .post(settings::set_banner)
                .delete(settings::clear_banner),
        );

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
