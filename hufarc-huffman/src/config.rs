//! Codec configuration.

/// Options for compression and decompression sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Accept zero-length input and emit an empty container.
    /// When `false`, compressing empty input fails with `EmptyInput`.
    pub allow_empty_input: bool,
    /// Upper bound on decompressed output, in bytes.
    pub max_output_size: Option<usize>,
}

impl HuffmanConfig {
    /// Default configuration: empty input allowed, no output limit.
    pub const DEFAULT: Self = Self {
        allow_empty_input: true,
        max_output_size: None,
    };

    /// Strict configuration: empty input rejected.
    pub const STRICT: Self = Self {
        allow_empty_input: false,
        max_output_size: None,
    };

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set whether empty input is accepted.
    pub fn with_allow_empty_input(mut self, allow: bool) -> Self {
        self.allow_empty_input = allow;
        self
    }

    /// Set the decompressed output limit.
    pub fn with_max_output_size(mut self, limit: Option<usize>) -> Self {
        self.max_output_size = limit;
        self
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
