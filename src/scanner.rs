//! The structural byte scanner.
//!
//! Finds the next occurrence of one of up to four "accept" bytes (quote,
//! escape, delimiter, newline) within a byte range. One, two, or three
//! distinct accept bytes are dispatched straight to `memchr`'s
//! runtime-vectorized search, which is already accelerated with SSE2/AVX2
//! on `x86_64` and NEON on `aarch64` when the `std` CPU-feature detection is
//! available. Four distinct accept bytes (a delimiter, newline, quote, and
//! an escape byte different from the quote) fall back to the hand-rolled
//! 128-bit compare-and-bitscan loop in [`simd`], with a scalar tail on every
//! target and a pure-scalar whole-buffer path on architectures the loop
//! doesn't cover.

mod simd;

/// Up to four distinct bytes the scanner should stop on.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct AcceptSet {
    bytes: [u8; 4],
    len: u8,
}

impl AcceptSet {
    /// Build an accept set from up to four bytes, de-duplicating repeats
    /// (e.g. when the escape byte equals the quote byte).
    pub fn new(candidates: &[u8]) -> Self {
        assert!(candidates.len() <= 4, "accept set supports at most 4 bytes");
        let mut bytes = [0u8; 4];
        let mut len = 0usize;
        for &b in candidates {
            if !bytes[..len].contains(&b) {
                bytes[len] = b;
                len += 1;
            }
        }
        AcceptSet { bytes, len: len as u8 }
    }

    fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    fn contains(&self, b: u8) -> bool {
        self.as_slice().contains(&b)
    }
}

/// Scans a byte slice for the next structural byte in an [`AcceptSet`].
///
/// `next()` finds the next match and advances one byte past it; `peek_byte`
/// inspects the byte currently sitting at the cursor without consuming
/// anything. `reset` rebinds the scanner to a new range.
pub struct Scanner<'a> {
    buf: &'a [u8],
    cursor: usize,
    accept: AcceptSet,
}

impl<'a> Scanner<'a> {
    /// Create a scanner over `buf` for the given accept set.
    pub fn new(buf: &'a [u8], accept: AcceptSet) -> Self {
        Scanner { buf, cursor: 0, accept }
    }

    /// Rebind this scanner to a new range, resetting the cursor to its
    /// start.
    pub fn reset(&mut self, buf: &'a [u8]) {
        self.buf = buf;
        self.cursor = 0;
    }

    /// Current cursor position, relative to the start of the scanned range.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// True once the cursor has reached the end of the range.
    pub fn at_end(&self) -> bool {
        self.cursor >= self.buf.len()
    }

    /// Returns the position of the next accept-set byte at or after the
    /// cursor, and advances the cursor to one past it. Returns `None` and
    /// leaves the cursor at the end of the range if no match remains;
    /// repeated calls after that keep returning `None` until `reset`.
    pub fn next(&mut self) -> Option<usize> {
        if self.cursor >= self.buf.len() {
            return None;
        }
        let found = find(&self.buf[self.cursor..], self.accept);
        match found {
            Some(rel) => {
                let abs = self.cursor + rel;
                self.cursor = abs + 1;
                Some(abs)
            }
            None => {
                self.cursor = self.buf.len();
                None
            }
        }
    }

    /// Returns whether the byte currently at the cursor equals `ch`,
    /// without advancing. Returns `false` past the end of the range.
    pub fn peek_byte(&self) -> Option<u8> {
        self.buf.get(self.cursor).copied()
    }

    /// Convenience wrapper over [`Scanner::peek_byte`].
    pub fn matches(&self, ch: u8) -> bool {
        self.peek_byte() == Some(ch)
    }
}

/// Dispatches to `memchr`'s vectorized search for one to three needles, and
/// to the hand-rolled [`simd`] loop for four. A scalar scan that checks
/// [`AcceptSet::contains`] byte by byte must agree with this function on
/// every input; that equivalence is exercised in the scanner's test suite.
fn find(haystack: &[u8], accept: AcceptSet) -> Option<usize> {
    match accept.as_slice() {
        [] => None,
        [a] => memchr::memchr(*a, haystack),
        [a, b] => memchr::memchr2(*a, *b, haystack),
        [a, b, c] => memchr::memchr3(*a, *b, *c, haystack),
        [a, b, c, d] => simd::find4(haystack, [*a, *b, *c, *d]),
        _ => unreachable!("accept set caps at 4 bytes"),
    }
}
