use thiserror::Error;

#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Baselines are progress denominators and must stay positive
    #[error("debt baseline must be a positive amount, got {0}")]
    InvalidBaseline(f64),

    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, BudgetError>;
