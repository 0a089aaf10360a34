//! Text extraction options.

/// Options for extracting page text.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Apply Unicode NFC normalization to every line
    pub normalize_unicode: bool,

    /// Remove control characters that WordprocessingML cannot store
    pub strip_control_chars: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (a failing page contributes no text).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable control character stripping.
    pub fn with_control_char_stripping(mut self, strip: bool) -> Self {
        self.strip_control_chars = strip;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            normalize_unicode: false,
            strip_control_chars: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip pages whose text cannot be extracted
    Lenient,
}
