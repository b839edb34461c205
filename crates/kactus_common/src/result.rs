//! Common result and error types for the generation pipeline.

/// The standard result type for fallible internal operations.
///
/// `Ok` contains the result value (which may be partial or degraded after
/// error recovery). `Err` indicates an unrecoverable internal error, not a
/// problem in the supplied IP-XACT model. Model problems are reported through
/// the diagnostic sink and the operation still returns `Ok`.
pub type KactusResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in the generator, not a model problem.
#[derive(Debug, thiserror::Error)]
#[error("internal generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("wire table out of sync");
        assert_eq!(
            format!("{err}"),
            "internal generator error: wire table out of sync"
        );
    }

    #[test]
    fn ok_path() {
        let r: KactusResult<i32> = Ok(42);
        assert_eq!(r.ok(), Some(42));
    }

    #[test]
    fn err_path() {
        let r: KactusResult<i32> = Err(InternalError::new("test error"));
        let err = r.err().unwrap();
        assert_eq!(err.message, "test error");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
