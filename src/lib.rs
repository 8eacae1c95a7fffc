//! `csvcore` is a streaming, pull-based CSV parser core.
//!
//! Rather than handing the caller an iterator over an in-memory slice, a
//! [`Parser`] is driven by a [`Feed`] that supplies bytes on demand (or, via
//! [`parse_reader`], by anything implementing [`std::io::Read`]) and
//! reports each completed row through a [`PerRow`] callback. This shape —
//! feed bytes in, rows out, one value table reused per row — favors
//! bulk-ingestion pipelines over documents that fit comfortably in memory:
//! the parser never buffers more than one row's worth of structure ahead of
//! what's already been delivered.
//!
//! # Primary focuses
//!
//! - **Streaming**: input arrives in arbitrary-sized chunks; a row split
//!   across chunk boundaries parses identically to one delivered whole.
//! - **Zero-copy cells**: [`Value`]s borrow directly from the parser's
//!   internal buffer; quoted cells are unquoted in place rather than
//!   copied out.
//! - **Typed errors**: every failure mode is a [`ParserError`] variant with
//!   a `(line L, row R, col C)` location prefix, not an opaque string.
//!
//! # Example
//!
//! ```
//! use csvcore::{Config, Parser, PerRowError, RowInfo, Value};
//!
//! let input = b"name,age\nalice,30\nbob,25\n";
//! let mut rows: Vec<Vec<String>> = Vec::new();
//! let mut collect = |cells: &[Value<'_>], _: RowInfo| -> Result<(), PerRowError> {
//!     rows.push(
//!         cells
//!             .iter()
//!             .map(|c| c.as_bytes().map(|b| String::from_utf8_lossy(b).into_owned()).unwrap_or_default())
//!             .collect(),
//!     );
//!     Ok(())
//! };
//!
//! let mut parser = Parser::new(Config::default());
//! let mut offset = 0usize;
//! let mut feed = move |dst: &mut [u8]| -> Result<usize, csvcore::FeedError> {
//!     let n = (input.len() - offset).min(dst.len());
//!     dst[..n].copy_from_slice(&input[offset..offset + n]);
//!     offset += n;
//!     Ok(n)
//! };
//! parser.parse(&mut feed, &mut collect).unwrap();
//! assert_eq!(rows, vec![vec!["name".into(), "age".into()], vec!["alice".into(), "30".into()], vec!["bob".into(), "25".into()]]);
//! ```

mod buffer;
pub mod datetime;
mod config;
mod error;
mod parser;
mod row;
mod scanner;
mod unquote;
mod value;

pub use buffer::{Feed, ReadFeed};
pub use config::{Config, ConfigBuilder, MAX_NULLSTR_LEN};
pub use error::{DateTimeError, ErrorKind, FeedError, Location, ParserError, PerRowError};
pub use parser::{parse_reader, PerRow, Parser};
pub use value::{RowInfo, Value};
