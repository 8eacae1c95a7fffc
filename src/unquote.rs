//! In-place cell unquoting.
//!
//! Turns a raw cell (which may weave in and out of one or more quoted
//! regions, and carry escape sequences inside them) into its logical value,
//! written back into the same byte range it started in. The write cursor
//! never runs ahead of the read cursor, so no extra allocation is needed.

/// Unquote `cell` in place using `quote` and `escape`. Returns the length of
/// the unquoted content; the caller should use `&cell[..len]`.
///
/// A cell with no `quote` bytes at all is returned unchanged. Otherwise the
/// cell is walked with a two-state automaton mirroring the row state
/// machine's UNQUOTED/QUOTED transitions: `quote` toggles in/out of a
/// quoted region and is dropped from the output; inside a quoted region,
/// `escape` followed by `quote` or `escape` collapses to the single escaped
/// byte (when `escape == quote`, the only such sequence is a doubled
/// quote).
pub fn unquote(cell: &mut [u8], quote: u8, escape: u8) -> usize {
    // Fast path: a single quoted span with no interior quote or escape byte
    // at all — drop the two bracketing quotes and stop.
    if cell.len() >= 2
        && cell[0] == quote
        && cell[cell.len() - 1] == quote
        && memchr::memchr2(quote, escape, &cell[1..cell.len() - 1]).is_none()
    {
        cell.copy_within(1..cell.len() - 1, 0);
        return cell.len() - 2;
    }

    if memchr::memchr(quote, cell).is_none() {
        return cell.len();
    }

    let len = cell.len();
    let mut read = 0usize;
    let mut write = 0usize;
    let mut in_quotes = false;

    while read < len {
        let ch = cell[read];
        if ch == quote {
            if escape == quote && in_quotes && read + 1 < len && cell[read + 1] == quote {
                cell[write] = quote;
                write += 1;
                read += 2;
            } else {
                in_quotes = !in_quotes;
                read += 1;
            }
        } else if in_quotes
            && escape != quote
            && ch == escape
            && read + 1 < len
            && matches!(cell[read + 1], b if b == quote || b == escape)
        {
            cell[write] = cell[read + 1];
            write += 1;
            read += 2;
        } else {
            cell[write] = ch;
            write += 1;
            read += 1;
        }
    }
    write
}
