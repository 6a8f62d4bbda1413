use std::fmt;

/// Error types for terrain generation
#[derive(Debug)]
pub enum Error {
    /// Grid dimensions are invalid
    InvalidDimensions { width: usize, height: usize },
    /// `size` passed to a generator was outside `[4, 500]`.
    InvalidSize { generator: &'static str, size: usize },
    /// Algorithm failed to generate valid output
    GenerationFailed(String),
    /// Constraint validation failed
    ConstraintViolation(String),
    /// JSON or CSV import could not be parsed.
    ParseError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions: {}x{}", width, height)
            }
            Error::InvalidSize { generator, size } => {
                write!(f, "{generator}: size {size} is outside the valid range [4, 500]")
            }
            Error::GenerationFailed(msg) => write!(f, "Generation failed: {}", msg),
            Error::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
            Error::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for terrain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Validates a generator's `size` parameter per §4.4 (`[4, 500]`).
pub fn validate_size(generator: &'static str, size: usize) -> Result<()> {
    if (4..=500).contains(&size) {
        Ok(())
    } else {
        Err(Error::InvalidSize { generator, size })
    }
}
