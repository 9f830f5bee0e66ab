/// How the decoder treats a stream that ends early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Return whatever was decoded before the stream ran out.
    #[default]
    Lenient,
    /// Fail with [`crate::LzssError::UnexpectedEnd`] on truncation or a
    /// missing terminator.
    Strict,
}

/// Runtime options for the decoder.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: DecodeMode,
    /// Maximum number of output bytes.
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: DecodeMode::Lenient,
            limit: usize::MAX,
        }
    }
}

impl Config {
    pub fn strict() -> Self {
        Self {
            mode: DecodeMode::Strict,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
