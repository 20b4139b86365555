use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{CreateExercise, Exercise, ExerciseId};
use crate::repositories::ExerciseRepository;

#[derive(Clone)]
pub struct ExercisesState {
    pub exercise_repo: ExerciseRepository,
}

pub async fn list(State(state): State<ExercisesState>) -> Result<Json<Vec<Exercise>>> {
    let exercises = state.exercise_repo.find_all().await?;
    Ok(Json(exercises))
}

pub async fn show(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<Json<Exercise>> {
    let id: ExerciseId = id.parse()?;

    let exercise = state.exercise_repo.find_by_id(id).await?.ok_or_else(|| {
        tracing::debug!("Exercise not found: {}", id);
        AppError::NotFound
    })?;

    Ok(Json(exercise))
}

pub async fn create(
    State(state): State<ExercisesState>,
    payload: std::result::Result<Json<CreateExercise>, JsonRejection>,
) -> Result<(StatusCode, Json<Exercise>)> {
    let Json(payload) = payload?;

    let new_exercise = payload.validate().inspect_err(|e| {
        tracing::debug!("Rejected exercise on field {}: {}", e.field(), e);
    })?;

    let exercise = state.exercise_repo.create(new_exercise).await?;
    tracing::info!("Created exercise {} ({})", exercise.id, exercise.movement);

    Ok((StatusCode::CREATED, Json(exercise)))
}

/// Deleting an id that does not exist still succeeds.
pub async fn delete(
    State(state): State<ExercisesState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id: ExerciseId = id.parse()?;

    if state.exercise_repo.delete(id).await? {
        tracing::info!("Deleted exercise {}", id);
    } else {
        tracing::debug!("Nothing to delete for exercise {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}
