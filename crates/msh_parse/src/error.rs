use thiserror::Error;

/// Parse errors are returned by a parser when input cannot be parsed.
///
/// The default parser configuration never fails; errors are only returned by
/// stricter configurations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Error indicating that a pipeline has more stages than the parser accepts.
    #[error("too many pipeline stages: found {found}, the maximum is {max}")]
    TooManyStages { max: usize, found: usize },
}

impl ParseError {
    /// Returns a help text associated with the error.
    pub fn help(&self) -> &str {
        match self {
            ParseError::TooManyStages { .. } => "split the pipeline into smaller pipelines",
        }
    }
}
