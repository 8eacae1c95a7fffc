//! Error types for the parser.
//!
//! Every failure the core can produce is represented here. [`ParserError`]
//! is what a caller sees out of [`crate::Parser::parse`]; its `Display` impl
//! reproduces the `(line L, row R, col C) <cause>` prefix used throughout
//! the source this crate is modeled on.

use std::fmt;

/// A location in the input at the moment a failure occurred.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Location {
    /// 1-based physical line number.
    pub lineno: i64,
    /// 1-based logical row number.
    pub rowno: i64,
    /// 1-based column (cell index) within the current row.
    pub col: i64,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(line {}, row {}, col {})", self.lineno, self.rowno, self.col)
    }
}

/// The cause of a parse failure, independent of where it occurred.
#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
pub enum ErrorKind {
    /// Reached EOF while a row was still open.
    #[error("unterminated row")]
    UnterminatedRow,
    /// Reached EOF while a quoted cell was still open.
    #[error("unterminated quote")]
    UnterminatedQuote,
    /// A single row exceeded the configured maximum buffer size.
    #[error("row too large (exceeds {max_bytes} bytes)")]
    RowTooLarge {
        /// The configured cap that was exceeded.
        max_bytes: usize,
    },
    /// Allocation of the input or value buffer failed.
    #[error("out of memory")]
    OutOfMemory,
    /// The `feed` callback reported an error.
    #[error("feed failed: {0}")]
    Feed(String),
    /// The `perrow` callback reported an error.
    #[error("perrow callback failed: {0}")]
    PerRow(String),
}

/// The error type returned by [`crate::Parser::parse`].
///
/// Combines a [`Location`] (line/row/col at the time of failure) with an
/// [`ErrorKind`] describing the cause, matching the source's convention of
/// prepending a location to every error message.
#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
#[error("{location} {kind}")]
pub struct ParserError {
    location: Location,
    kind: ErrorKind,
}

impl ParserError {
    pub(crate) fn new(location: Location, kind: ErrorKind) -> Self {
        ParserError { location, kind }
    }

    /// The location (line, row, col) at which the error was raised.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The underlying cause, independent of location.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

/// Error reported by a [`crate::Feed`] implementation.
///
/// Analogous to the source's convention of a negative return from `feed`
/// plus a message written into `errbuf`.
#[derive(Eq, PartialEq, Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct FeedError(pub String);

impl From<std::io::Error> for FeedError {
    fn from(err: std::io::Error) -> Self {
        FeedError(err.to_string())
    }
}

/// Error reported by a per-row callback.
///
/// An absent message causes the core to substitute a generic one, mirroring
/// the source's fallback when `perrow` leaves `errbuf` empty.
#[derive(Eq, PartialEq, Debug, Clone, Default, thiserror::Error)]
#[error("{}", .0.as_deref().unwrap_or("perrow callback failed"))]
pub struct PerRowError(pub Option<String>);

impl PerRowError {
    /// Construct a callback error carrying a specific message.
    pub fn new(message: impl Into<String>) -> Self {
        PerRowError(Some(message.into()))
    }

    /// Construct a callback error with no message; the core substitutes a
    /// generic one when formatting.
    pub fn generic() -> Self {
        PerRowError(None)
    }
}

/// Error produced by the fixed-pattern date/time helpers in [`crate::datetime`].
#[derive(Eq, PartialEq, Debug, Clone, Copy, thiserror::Error)]
#[error("input does not match the expected pattern")]
pub struct DateTimeError;
