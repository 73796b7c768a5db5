use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortError {
    #[error("not found")]
    NotFound,
    #[error("service call failed: {0}")]
    Dispatch(String),
    #[error("invalid state snapshot: {0}")]
    Snapshot(String),
}
