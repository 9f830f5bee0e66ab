use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LzssError {
    /// Input ended inside a token, or before the terminator in strict mode.
    #[error("unexpected end of stream at byte {offset}")]
    UnexpectedEnd { offset: usize },

    /// Decoded output would grow past the configured limit.
    #[error("decoded output exceeds limit of {limit} bytes")]
    LimitExceeded { limit: usize },
}
