use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("please define a TRV schedule entity")]
    MissingEntity,
    #[error("invalid entity id: {0}")]
    InvalidEntityId(String),
    #[error("invalid time: {0}")]
    InvalidTime(String),
    #[error("temperature must be a finite number")]
    InvalidTemperature,
    #[error("period index {0} out of range")]
    PeriodIndexOutOfRange(usize),
    #[error("TRVs require exactly 4 periods per schedule group")]
    FixedPeriodCount,
}
