use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistError {
    #[error("invalid {kind} distribution: {reason}")]
    InvalidParameter { kind: &'static str, reason: String },
}

pub type DistResult<T> = Result<T, DistError>;
