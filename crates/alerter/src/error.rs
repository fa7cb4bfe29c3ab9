use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlerterError {
    #[error("Invalid alert thresholds: {0}")]
    InvalidThresholds(String),
}
