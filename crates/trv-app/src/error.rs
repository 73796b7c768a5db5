use thiserror::Error;
use trv_core::error::DomainError;
use trv_ports::error::PortError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("{0}")]
    Resolve(#[from] ResolveError),
    #[error("no schedule edit in progress")]
    NotEditing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("entity {0} not found")]
    EntityNotFound(String),
    #[error("cannot update schedule for {0}: no writable text entity found for schedule attribute")]
    NoWritableSibling(String),
    #[error("cannot update schedule attribute for {0}: attributes are read-only")]
    ReadOnly(String),
}
