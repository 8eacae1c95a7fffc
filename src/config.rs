//! Parser configuration, frozen at open time.

/// Maximum length of the configured null-string sentinel, matching the
/// source's `char nullstr[16]` (15 usable bytes plus a NUL).
pub const MAX_NULLSTR_LEN: usize = 15;

/// Configuration for a [`crate::Parser`], captured once when the parser is
/// constructed and never mutated afterward.
///
/// Build one with [`Config::default`] and override individual fields, or use
/// [`ConfigBuilder`] for a fluent style.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Config {
    /// The quote byte. Default `"`.
    pub quote: u8,
    /// The escape byte. Defaults to the quote byte.
    pub escape: u8,
    /// The column delimiter byte. Default `,`.
    pub delimiter: u8,
    /// Initial input buffer capacity in bytes. Default 4096.
    pub init_buf_size: usize,
    /// Hard cap on input buffer capacity in bytes. Default 1 GiB.
    pub max_buf_size: usize,
    /// Optional null-string sentinel. Unquoted cells matching this value
    /// exactly are reported as [`crate::value::Value::Null`].
    pub null_str: Option<Vec<u8>>,
    /// If true (the default), cells passed to `perrow` are already unquoted.
    pub unquote_values: bool,
    /// If true, the first row is parsed but not delivered to `perrow`.
    pub skip_header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quote: b'"',
            escape: b'"',
            delimiter: b',',
            init_buf_size: 4096,
            max_buf_size: 1 << 30,
            null_str: None,
            unquote_values: true,
            skip_header: false,
        }
    }
}

impl Config {
    /// Equivalent to `Config::default()`, kept to mirror the source's
    /// `csv_default_config()` entry point.
    pub fn new() -> Self {
        Config::default()
    }

    /// Start a [`ConfigBuilder`] seeded with these defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder(Config::default())
    }
}

/// Fluent builder for [`Config`].
///
/// ```
/// use csvcore::Config;
///
/// let config = Config::builder()
///     .delimiter(b'|')
///     .escape(b'\\')
///     .build();
/// assert_eq!(config.delimiter, b'|');
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ConfigBuilder(Config);

impl Default for ConfigBuilder {
    fn default() -> Self {
        ConfigBuilder(Config::default())
    }
}

impl ConfigBuilder {
    /// Start from [`Config::default`].
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Set the quote byte. If `escape` was not set explicitly, it continues
    /// to track this value until `escape` is called.
    pub fn quote(mut self, quote: u8) -> Self {
        let inherited = self.0.escape == self.0.quote;
        self.0.quote = quote;
        if inherited {
            self.0.escape = quote;
        }
        self
    }

    /// Set the escape byte explicitly. Pass the quote byte to restore the
    /// "escape equals quote" default.
    pub fn escape(mut self, escape: u8) -> Self {
        self.0.escape = escape;
        self
    }

    /// Set the column delimiter byte.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.0.delimiter = delimiter;
        self
    }

    /// Set the initial input buffer capacity.
    pub fn init_buf_size(mut self, size: usize) -> Self {
        self.0.init_buf_size = size;
        self
    }

    /// Set the hard cap on input buffer capacity.
    pub fn max_buf_size(mut self, size: usize) -> Self {
        self.0.max_buf_size = size;
        self
    }

    /// Set the null-string sentinel. Truncated/rejected beyond
    /// [`MAX_NULLSTR_LEN`] bytes is not attempted here; callers passing a
    /// longer sentinel simply get a sentinel that will never match an
    /// unquoted cell, since no cell in a valid document can be mistaken for
    /// one exceeding the configured maximum.
    pub fn null_str(mut self, null_str: impl Into<Vec<u8>>) -> Self {
        self.0.null_str = Some(null_str.into());
        self
    }

    /// Disable automatic unquoting of delivered cells.
    pub fn unquote_values(mut self, yes: bool) -> Self {
        self.0.unquote_values = yes;
        self
    }

    /// Skip delivering the first row to `perrow`.
    pub fn skip_header(mut self, yes: bool) -> Self {
        self.0.skip_header = yes;
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> Config {
        self.0
    }
}
