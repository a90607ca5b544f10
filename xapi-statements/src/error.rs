#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),
    // Froms
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
