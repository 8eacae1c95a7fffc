//! Cell values delivered to a per-row callback.

use std::fmt;

/// A single cell's contents, borrowed from the parser's internal value
/// buffer for the duration of one `perrow` invocation.
///
/// `Null` is reported only for unquoted cells whose bytes exactly match the
/// configured null-string sentinel; a quoted cell is never treated as null
/// even if its unquoted content happens to match.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Value<'a> {
    /// Cell bytes, already unquoted unless [`crate::Config::unquote_values`]
    /// is disabled.
    Bytes(&'a [u8]),
    /// The unquoted cell matched the configured null-string sentinel.
    Null,
}

impl<'a> Value<'a> {
    /// Returns the cell's bytes, or `None` for [`Value::Null`].
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            Value::Null => None,
        }
    }

    /// Returns the cell's bytes interpreted as UTF-8, or `None` for
    /// [`Value::Null`]. Propagates the `Utf8Error` for invalid UTF-8 rather
    /// than silently substituting a replacement character.
    pub fn as_str(&self) -> Option<Result<&'a str, std::str::Utf8Error>> {
        self.as_bytes().map(std::str::from_utf8)
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => write!(f, "Value::Bytes({s:?})"),
                Err(_) => write!(f, "Value::Bytes({b:?})"),
            },
            Value::Null => write!(f, "Value::Null"),
        }
    }
}

/// Position metadata for a completed row, passed to `perrow` alongside its
/// cells.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct RowInfo {
    /// 1-based physical line number the row started on.
    pub lineno: i64,
    /// 1-based logical row number (rows span multiple lines only when a
    /// quoted cell embeds a newline).
    pub rowno: i64,
}
