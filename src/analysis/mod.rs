pub mod buckets;
pub mod runner;
pub mod statistics;
pub mod summary;

use thiserror::Error;

use crate::data::DataError;
use statistics::StatsError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),
    #[error("Group {0} has no observations")]
    EmptyGroup(String),
    #[error("Invalid runtime buckets: {0}")]
    InvalidBuckets(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
