pub mod exercise;
pub mod from_row;

pub use exercise::{
    CreateExercise, Equipment, Exercise, ExerciseId, MalformedId, MuscleClass, NewExercise,
    ValidationError,
};
pub use from_row::FromSqliteRow;
