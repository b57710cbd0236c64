use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("Change hub closed")]
    Closed,

    #[error("Timed out waiting for a change")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, BusError>;
