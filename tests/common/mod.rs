#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;

use exercise_api::db::{create_memory_pool, DbPool};
use exercise_api::handlers::exercises::ExercisesState;
use exercise_api::migrations::run_migrations_for_tests;
use exercise_api::models::{CreateExercise, Exercise};
use exercise_api::repositories::ExerciseRepository;

/// (movement, class, type)
pub const INITIAL_EXERCISES: &[(&str, &str, &str)] = &[
    ("bench press", "chest", "barbell"),
    ("deadlift", "back", "barbell"),
];

pub const MALFORMED_ID: &str = "52389u5v928ut1nv9809v";

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let exercises_state = ExercisesState {
        exercise_repo: ExerciseRepository::new(pool),
    };
    exercise_api::routes::create_router(exercises_state)
}

pub async fn create_test_exercise(
    pool: &DbPool,
    movement: &str,
    class: &str,
    equipment: &str,
) -> Exercise {
    let new_exercise = CreateExercise {
        movement: Some(movement.to_string()),
        class: Some(class.to_string()),
        equipment: Some(equipment.to_string()),
    }
    .validate()
    .unwrap();

    ExerciseRepository::new(pool.clone())
        .create(new_exercise)
        .await
        .unwrap()
}

pub async fn seed_exercises(pool: &DbPool) -> Vec<Exercise> {
    let mut exercises = Vec::new();
    for (movement, class, equipment) in INITIAL_EXERCISES {
        exercises.push(create_test_exercise(pool, movement, class, equipment).await);
    }
    exercises
}

/// A well-formed id whose record has already been removed.
pub async fn non_existing_id(pool: &DbPool) -> String {
    let exercise = create_test_exercise(pool, "test", "legs", "barbell").await;
    ExerciseRepository::new(pool.clone())
        .delete(exercise.id)
        .await
        .unwrap();
    exercise.id.to_string()
}

pub async fn exercises_in_db(pool: &DbPool) -> Vec<Exercise> {
    ExerciseRepository::new(pool.clone())
        .find_all()
        .await
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
