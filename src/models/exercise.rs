use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use super::FromSqliteRow;

pub const MAX_MOVEMENT_LEN: usize = 20;

/// Storage-assigned identifier of an exercise.
///
/// Parsing checks only the format; whether a record exists is up to the
/// repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformatted id: {0}")]
pub struct MalformedId(pub String);

impl FromStr for ExerciseId {
    type Err = MalformedId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| MalformedId(s.to_string()))
    }
}

impl ToSql for ExerciseId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for ExerciseId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleClass {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
}

impl MuscleClass {
    pub const ALL: &'static [MuscleClass] = &[
        MuscleClass::Chest,
        MuscleClass::Back,
        MuscleClass::Legs,
        MuscleClass::Arms,
        MuscleClass::Shoulders,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleClass::Chest => "chest",
            MuscleClass::Back => "back",
            MuscleClass::Legs => "legs",
            MuscleClass::Arms => "arms",
            MuscleClass::Shoulders => "shoulders",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|class| class.as_str() == s)
    }
}

impl ToSql for MuscleClass {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for MuscleClass {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown class: {s}").into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Bodyweight,
    Kettlebell,
}

impl Equipment {
    pub const ALL: &'static [Equipment] = &[
        Equipment::Barbell,
        Equipment::Dumbbell,
        Equipment::Machine,
        Equipment::Bodyweight,
        Equipment::Kettlebell,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Barbell => "barbell",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Machine => "machine",
            Equipment::Bodyweight => "bodyweight",
            Equipment::Kettlebell => "kettlebell",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|equipment| equipment.as_str() == s)
    }
}

impl ToSql for Equipment {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Equipment {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or_else(|| FromSqlError::Other(format!("unknown type: {s}").into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub movement: String,
    pub class: MuscleClass,
    #[serde(rename = "type")]
    pub equipment: Equipment,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            movement: row.get("movement")?,
            class: row.get("class")?,
            equipment: row.get("type")?,
        })
    }
}

/// Deserialize a loosely typed text field.
/// Numbers and booleans become their string form; arrays and objects fail.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, got {other}"
        ))),
    }
}

/// Request body for creating an exercise. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateExercise {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub movement: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub class: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_text")]
    pub equipment: Option<String>,
}

/// A validated exercise, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub movement: String,
    pub class: MuscleClass,
    pub equipment: Equipment,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: is required")]
    Missing { field: &'static str },

    #[error("{field}: is longer than the maximum allowed length ({max})")]
    TooLong { field: &'static str, max: usize },

    #[error("{field}: `{value}` is not one of {allowed}")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: String,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Missing { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NotAllowed { field, .. } => *field,
        }
    }
}

fn allowed_values<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    values.into_iter().collect::<Vec<_>>().join(", ")
}

impl CreateExercise {
    /// Checks the payload against the exercise schema. The first violated
    /// rule is reported.
    pub fn validate(self) -> Result<NewExercise, ValidationError> {
        let movement = match self.movement {
            Some(movement) if !movement.is_empty() => movement,
            _ => return Err(ValidationError::Missing { field: "movement" }),
        };
        // Measured in UTF-16 code units, like the stored schema's maxlength.
        if movement.encode_utf16().count() > MAX_MOVEMENT_LEN {
            return Err(ValidationError::TooLong {
                field: "movement",
                max: MAX_MOVEMENT_LEN,
            });
        }

        let class = self
            .class
            .ok_or(ValidationError::Missing { field: "class" })?;
        let class = MuscleClass::parse(&class).ok_or_else(|| ValidationError::NotAllowed {
            field: "class",
            value: class.clone(),
            allowed: allowed_values(MuscleClass::ALL.iter().map(MuscleClass::as_str)),
        })?;

        let equipment = self
            .equipment
            .ok_or(ValidationError::Missing { field: "type" })?;
        let equipment = Equipment::parse(&equipment).ok_or_else(|| ValidationError::NotAllowed {
            field: "type",
            value: equipment.clone(),
            allowed: allowed_values(Equipment::ALL.iter().map(Equipment::as_str)),
        })?;

        Ok(NewExercise {
            movement,
            class,
            equipment,
        })
    }
}
