use axum::{routing::get, Router};

use crate::handlers::{exercises, fallback, health};

pub fn create_router(exercises_state: exercises::ExercisesState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Exercise routes
        .route(
            "/api/exercises",
            get(exercises::list).post(exercises::create),
        )
        .route(
            "/api/exercises/{id}",
            get(exercises::show).delete(exercises::delete),
        )
        .with_state(exercises_state)
        .fallback(fallback::unknown_endpoint)
}
