//! The row state machine.
//!
//! Consumes one row at a time from a byte range via the [`Scanner`],
//! producing a sequence of [`CellSpan`]s relative to the start of the range.
//! Stateless across calls: each invocation starts fresh in `Startval` and
//! either completes a row, asks for more data, or reports a hard parse
//! error, never retaining partial state of its own — the caller re-scans
//! from the row's start on the next attempt, which is why a `Suspend`
//! result must leave the caller's own counters untouched.

use crate::error::ErrorKind;
use crate::scanner::{AcceptSet, Scanner};

/// One cell's byte range within the row, relative to the start of the
/// range passed to [`parse_row`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CellSpan {
    pub start: usize,
    pub end: usize,
    pub quoted: bool,
}

/// The result of attempting to parse one row out of `[0, data.len())`.
#[derive(Debug)]
pub enum RowOutcome {
    /// A full row was parsed. `consumed` bytes (including the terminating
    /// newline) should be dropped from the front of the buffer; `lines`
    /// counts embedded newlines inside quoted cells plus the row's own
    /// terminator, to advance the caller's `lineno`.
    Complete { consumed: usize, cells: Vec<CellSpan>, lines: i64 },
    /// Not enough data buffered to finish the row; ask for a refill and
    /// retry from scratch.
    Suspend,
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum State {
    Startval,
    Unquoted,
    Quoted,
}

/// Attempt to parse one row from the start of `data`.
///
/// `eof` tells the machine whether more bytes could still arrive: if the
/// range is exhausted mid-row and `eof` is true, that's a hard error
/// ([`ErrorKind::UnterminatedRow`] / [`ErrorKind::UnterminatedQuote`]);
/// otherwise it's a [`RowOutcome::Suspend`].
pub fn parse_row(data: &[u8], quote: u8, escape: u8, delim: u8, eof: bool) -> Result<RowOutcome, ErrorKind> {
    let accept = AcceptSet::new(&[quote, escape, delim, b'\n']);
    let mut scanner = Scanner::new(data, accept);
    let mut cells = Vec::new();
    let mut lines = 0i64;
    let mut state = State::Startval;
    let mut cell_start = 0usize;
    let mut cell_quoted = false;

    loop {
        match state {
            State::Startval => {
                cell_start = scanner.position();
                cell_quoted = false;
                state = State::Unquoted;
            }
            State::Unquoted => {
                let Some(pos) = scanner.next() else {
                    return if eof {
                        Err(ErrorKind::UnterminatedRow)
                    } else {
                        Ok(RowOutcome::Suspend)
                    };
                };
                let ch = data[pos];
                if ch == quote {
                    cell_quoted = true;
                    state = State::Quoted;
                } else if ch == delim {
                    cells.push(CellSpan { start: cell_start, end: pos, quoted: cell_quoted });
                    state = State::Startval;
                } else if ch == b'\n' {
                    lines += 1;
                    let end = strip_trailing_cr(data, cell_start, pos);
                    cells.push(CellSpan { start: cell_start, end, quoted: cell_quoted });
                    return Ok(RowOutcome::Complete { consumed: pos + 1, cells, lines });
                } else {
                    debug_assert_eq!(ch, escape);
                    // Escape byte outside quotes is a literal, no-op.
                }
            }
            State::Quoted => {
                let Some(pos) = scanner.next() else {
                    return if eof {
                        Err(ErrorKind::UnterminatedQuote)
                    } else {
                        Ok(RowOutcome::Suspend)
                    };
                };
                let ch = data[pos];
                if ch == quote {
                    if escape == quote && scanner.matches(quote) {
                        scanner.next(); // consume the doubled quote byte
                    } else {
                        state = State::Unquoted;
                    }
                } else if ch == b'\n' {
                    lines += 1;
                } else if ch == delim {
                    // literal inside quotes
                } else {
                    debug_assert_eq!(ch, escape);
                    if escape != quote && (scanner.matches(quote) || scanner.matches(escape)) {
                        scanner.next(); // consume the escaped byte
                    }
                    // otherwise the escape is verbatim, no-op
                }
            }
        }
    }
}

/// Drop exactly one trailing `'\r'` immediately before the newline, if
/// present, from the span `[start, end)`.
fn strip_trailing_cr(data: &[u8], start: usize, end: usize) -> usize {
    if end > start && data[end - 1] == b'\r' {
        end - 1
    } else {
        end
    }
}
