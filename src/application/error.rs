use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Account with ID '{0}' does not exist")]
    AccountNotFound(String),

    #[error("Balance cannot be negative: {0}")]
    InvalidBalance(f64),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
}
