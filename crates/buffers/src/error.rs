use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("transport write failed: {0}")]
    Transport(#[from] std::io::Error),
}
