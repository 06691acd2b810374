use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown delimiter '{0}'")]
    UnknownDelimiter(String),
    #[error("unknown data kind '{0}'")]
    UnknownDataKind(String),
    #[error("covariance matrix has {actual} values, expected {expected}")]
    CovarianceShape { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;
