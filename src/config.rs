//! Parser configuration

/// Default prefix prepended to attribute keys
pub const DEFAULT_ATTR_PREFIX: &str = "@";
/// Default key holding an element's text content
pub const DEFAULT_TEXT_KEY: &str = "#text";
/// Nesting depth allowed by [`Config::limited`]
pub const RECOMMENDED_MAX_DEPTH: u16 = 128;
/// Input size in bytes allowed by [`Config::limited`]
pub const RECOMMENDED_MAX_SIZE: usize = 10 * 1024 * 1024;

/// How several text runs inside one element are combined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextMode {
    /// The last text run wins
    #[default]
    Replace,
    /// Text runs are joined without a separator
    Concat,
}

/// Configuration for parsing
///
/// The default accepts documents of any size and depth. Use
/// [`Config::limited`] or [`Config::new`] when the input is untrusted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Prefix for attribute keys
    pub attr_prefix: String,
    /// Key for text content
    pub text_key: String,
    /// Policy for repeated text runs
    pub text_mode: TextMode,
    /// Reject elements left open at end of input
    pub strict: bool,
    /// Emit `<![CDATA[...]]>` bodies as text instead of skipping them
    pub cdata_as_text: bool,
    /// Maximum nesting depth (0 means unlimited)
    pub max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    pub max_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attr_prefix: DEFAULT_ATTR_PREFIX.to_string(),
            text_key: DEFAULT_TEXT_KEY.to_string(),
            text_mode: TextMode::Replace,
            strict: true,
            cdata_as_text: false,
            max_depth: 0,
            max_size: 0,
        }
    }
}

impl Config {
    /// Create a config with specific limits
    pub fn new(max_depth: u16, max_size: usize) -> Self {
        Self {
            max_depth,
            max_size,
            ..Self::default()
        }
    }

    /// Create a config bounded by the recommended depth and size limits
    pub fn limited() -> Self {
        Self::new(RECOMMENDED_MAX_DEPTH, RECOMMENDED_MAX_SIZE)
    }

    pub fn with_attr_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attr_prefix = prefix.into();
        self
    }

    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    pub const fn with_text_mode(mut self, mode: TextMode) -> Self {
        self.text_mode = mode;
        self
    }

    /// Tolerate elements left open at end of input
    pub const fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    pub const fn with_cdata_as_text(mut self, enabled: bool) -> Self {
        self.cdata_as_text = enabled;
        self
    }
}
