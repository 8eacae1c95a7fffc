//! The parser driver: owns the input buffer, drives the row state machine,
//! unquotes cells, and dispatches completed rows to a per-row callback.

use tracing::debug;

use crate::buffer::{Feed, InputBuffer, ReadFeed};
use crate::config::Config;
use crate::error::{ErrorKind, Location, ParserError, PerRowError};
use crate::row::{self, CellSpan, RowOutcome};
use crate::unquote;
use crate::value::{RowInfo, Value};

/// Receives one completed row at a time.
///
/// A blanket impl covers any `FnMut(&[Value<'_>], RowInfo) -> Result<(),
/// PerRowError>` closure.
pub trait PerRow {
    /// Called once per completed (and, if configured, non-header) row.
    /// Returning `Err` aborts parsing; the error is surfaced from
    /// [`Parser::parse`].
    fn perrow(&mut self, cells: &[Value<'_>], row: RowInfo) -> Result<(), PerRowError>;
}

impl<F> PerRow for F
where
    F: FnMut(&[Value<'_>], RowInfo) -> Result<(), PerRowError>,
{
    fn perrow(&mut self, cells: &[Value<'_>], row: RowInfo) -> Result<(), PerRowError> {
        self(cells, row)
    }
}

/// A streaming, pull-based CSV parser.
///
/// Construct with [`Parser::new`], then drive it with [`Parser::parse`]
/// against a [`Feed`] implementation (or use [`parse_reader`] for anything
/// implementing [`std::io::Read`]). The parser owns its input buffer for
/// its entire lifetime; there is no separate `close` step beyond dropping
/// it, though [`Parser::close`] is provided for symmetry with the
/// open/parse/close shape this crate is modeled on.
pub struct Parser {
    config: Config,
    buffer: InputBuffer,
    lineno: i64,
    rowno: i64,
}

impl Parser {
    /// Open a parser with the given configuration.
    pub fn new(config: Config) -> Self {
        debug!(
            quote = %(config.quote as char),
            escape = %(config.escape as char),
            delimiter = %(config.delimiter as char),
            init_buf_size = config.init_buf_size,
            max_buf_size = config.max_buf_size,
            "opening parser"
        );
        let buffer = InputBuffer::new(config.init_buf_size, config.max_buf_size);
        Parser { config, buffer, lineno: 0, rowno: 0 }
    }

    /// Parse every row available from `feed`, invoking `perrow` for each.
    ///
    /// Returns as soon as `feed` reports EOF and every buffered row has
    /// been delivered, or as soon as a hard parse error or a callback
    /// failure occurs.
    pub fn parse<F: Feed, P: PerRow>(&mut self, feed: &mut F, perrow: &mut P) -> Result<(), ParserError> {
        loop {
            if self.buffer.is_exhausted() {
                return Ok(());
            }

            let eof = self.buffer.eof_observed();
            let outcome = {
                let data = self.buffer.readable();
                row::parse_row(data, self.config.quote, self.config.escape, self.config.delimiter, eof)
                    .map_err(|kind| self.error_at(kind))?
            };

            match outcome {
                RowOutcome::Suspend => {
                    self.buffer.refill(feed).map_err(|kind| self.error_at(kind))?;
                }
                RowOutcome::Complete { consumed, cells, lines } => {
                    self.rowno += 1;
                    self.lineno += lines;
                    let row_info = RowInfo { lineno: self.lineno, rowno: self.rowno };
                    let deliver = !(self.config.skip_header && self.rowno == 1);

                    if deliver {
                        let values = self.resolve_values(&cells);
                        perrow
                            .perrow(&values, row_info)
                            .map_err(|e| self.error_at(ErrorKind::PerRow(
                                e.0.unwrap_or_else(|| "perrow callback failed".to_string()),
                            )))?;
                    }

                    self.buffer.consume(consumed);
                }
            }
        }
    }

    /// Unquote every cell (if enabled) and build the `Value` views the
    /// callback sees, borrowing from the input buffer for the duration of
    /// one `perrow` call.
    fn resolve_values(&mut self, spans: &[CellSpan]) -> Vec<Value<'_>> {
        let quote = self.config.quote;
        let escape = self.config.escape;
        let unquote_values = self.config.unquote_values;
        let null_str = self.config.null_str.clone();

        let mut bounds: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
        if unquote_values {
            let data = self.buffer.readable_mut();
            for span in spans {
                let len = unquote::unquote(&mut data[span.start..span.end], quote, escape);
                bounds.push((span.start, span.start + len));
            }
        } else {
            for span in spans {
                bounds.push((span.start, span.end));
            }
        }

        let data = self.buffer.readable();
        bounds
            .into_iter()
            .zip(spans)
            .map(|((start, end), span)| {
                let bytes = &data[start..end];
                if !span.quoted {
                    if let Some(n) = &null_str {
                        if bytes == n.as_slice() {
                            return Value::Null;
                        }
                    }
                }
                Value::Bytes(bytes)
            })
            .collect()
    }

    fn error_at(&self, kind: ErrorKind) -> ParserError {
        ParserError::new(
            Location { lineno: self.lineno, rowno: self.rowno, col: 0 },
            kind,
        )
    }

    /// Consume the parser, releasing its buffers. Equivalent to dropping
    /// it; provided for symmetry with the three-phase open/parse/close
    /// shape this crate is modeled on.
    pub fn close(self) {}
}

/// Parse everything available from `source`, invoking `perrow` for each
/// row. A convenience over [`Parser`] for callers who already have a
/// [`std::io::Read`] rather than a hand-written [`Feed`].
pub fn parse_reader<R: std::io::Read, P: PerRow>(
    source: R,
    config: Config,
    perrow: &mut P,
) -> Result<(), ParserError> {
    let mut parser = Parser::new(config);
    let mut feed = ReadFeed(source);
    parser.parse(&mut feed, perrow)
}
