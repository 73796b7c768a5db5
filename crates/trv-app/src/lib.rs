pub mod card;
pub mod config_editor;
pub mod dialog;
pub mod error;
pub mod schedule_service;
pub mod status;
pub mod write_target;
