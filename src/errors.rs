use thiserror::Error;

/// A result type for GP regression operations
pub type Result<T> = std::result::Result<T, GpError>;

/// An error raised by [posterior](crate::posterior) or [sample_path](crate::sample_path)
#[derive(Error, Debug)]
pub enum GpError {
    /// When a parameter value violates its contract
    #[error("InvalidValue error: {0}")]
    InvalidValue(String),
}
