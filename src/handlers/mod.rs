pub mod exercises;
pub mod fallback;
pub mod health;
