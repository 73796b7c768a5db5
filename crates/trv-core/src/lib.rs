pub mod config;
pub mod entity_id;
pub mod error;
pub mod evaluator;
pub mod schedule;
