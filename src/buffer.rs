//! The ring-style input buffer: refill, compaction, and capacity growth.

use tracing::{debug, trace};

use crate::error::{ErrorKind, FeedError};

/// Bytes reserved for the buffer manager's own alignment padding ahead of
/// any feed call, matching the source's 16-byte-aligned allocation.
const ALIGNMENT: usize = 16;

/// Anything that can supply more input bytes to a [`InputBuffer`].
///
/// `feed(dst)` should write as many bytes as it has available into `dst`
/// (up to `dst.len()`) and return how many it wrote. Returning `Ok(0)`
/// signals EOF; no further calls are made after that. A blanket impl covers
/// any `FnMut(&mut [u8]) -> Result<usize, FeedError>` closure.
pub trait Feed {
    /// Write up to `dst.len()` bytes into `dst`, returning the count
    /// written, or `Ok(0)` at EOF.
    fn feed(&mut self, dst: &mut [u8]) -> Result<usize, FeedError>;
}

impl<F> Feed for F
where
    F: FnMut(&mut [u8]) -> Result<usize, FeedError>,
{
    fn feed(&mut self, dst: &mut [u8]) -> Result<usize, FeedError> {
        self(dst)
    }
}

/// Adapts any [`std::io::Read`] into a [`Feed`].
pub struct ReadFeed<R>(pub R);

impl<R: std::io::Read> Feed for ReadFeed<R> {
    fn feed(&mut self, dst: &mut [u8]) -> Result<usize, FeedError> {
        self.0.read(dst).map_err(FeedError::from)
    }
}

/// A growable, compactable byte buffer holding `[bot, top)` unread data in
/// `[0, max)` allocated capacity.
pub struct InputBuffer {
    data: Vec<u8>,
    bot: usize,
    top: usize,
    max_configured: usize,
    eof: bool,
}

impl InputBuffer {
    /// Create an empty buffer that starts at `init_size` and never grows
    /// past `max_configured`.
    pub fn new(init_size: usize, max_configured: usize) -> Self {
        InputBuffer {
            data: Vec::new(),
            bot: 0,
            top: 0,
            max_configured: max_configured.max(init_size).max(ALIGNMENT),
            eof: false,
        }
    }

    /// The unread bytes, `[bot, top)`.
    pub fn readable(&self) -> &[u8] {
        &self.data[self.bot..self.top]
    }

    /// The unread bytes, `[bot, top)`, mutably — used to unquote cells in
    /// place before they're handed to the per-row callback.
    pub fn readable_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.bot..self.top]
    }

    /// Advance `bot` by `n` bytes, marking them consumed.
    pub fn consume(&mut self, n: usize) {
        assert!(self.bot + n <= self.top, "consume past top");
        self.bot += n;
    }

    /// True once `feed` has reported EOF and every buffered byte has been
    /// consumed.
    pub fn is_exhausted(&self) -> bool {
        self.eof && self.bot == self.top
    }

    /// True once EOF has been observed, regardless of remaining buffered
    /// bytes.
    pub fn eof_observed(&self) -> bool {
        self.eof
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn free(&self) -> usize {
        self.capacity() - self.top
    }

    /// Make room for at least one more byte: compact if there's consumed
    /// space to reclaim, otherwise grow by 1.5x up to the configured cap.
    ///
    /// Returns an error if the buffer is already at the configured maximum
    /// and fully packed with unread data.
    pub fn ensure_space(&mut self) -> Result<(), ErrorKind> {
        if self.free() > 1 {
            return Ok(());
        }
        if self.bot > 0 {
            let unread = self.top - self.bot;
            self.data.copy_within(self.bot..self.top, 0);
            trace!(reclaimed = self.bot, unread, "compacted input buffer");
            self.bot = 0;
            self.top = unread;
            return Ok(());
        }
        if self.capacity() >= self.max_configured {
            return Err(ErrorKind::RowTooLarge { max_bytes: self.max_configured });
        }
        let old_cap = self.capacity();
        let desired = ((old_cap.max(ALIGNMENT) as f64 * 1.5) as usize).max(old_cap + ALIGNMENT);
        let aligned = desired.div_ceil(ALIGNMENT) * ALIGNMENT;
        // Clamp after alignment-rounding: rounding up first and clamping
        // second would let capacity exceed a `max_configured` that isn't
        // itself a multiple of ALIGNMENT.
        let new_cap = aligned.min(self.max_configured);
        self.data.resize(new_cap, 0);
        debug!(old_cap, new_cap, "grew input buffer");
        Ok(())
    }

    /// Pull more bytes from `feed`, reserving one byte of headroom for a
    /// synthesized trailing newline. Precondition: EOF not yet observed.
    pub fn refill(&mut self, feed: &mut dyn Feed) -> Result<(), ErrorKind> {
        debug_assert!(!self.eof, "refill called after EOF");
        self.ensure_space()?;
        let dst_end = self.capacity() - 1; // reserve 1 byte for a synthetic '\n'
        let n = feed
            .feed(&mut self.data[self.top..dst_end])
            .map_err(|e| ErrorKind::Feed(e.0))?;
        if n == 0 {
            self.eof = true;
            if self.top > self.bot && self.data[self.top - 1] != b'\n' {
                self.data[self.top] = b'\n';
                self.top += 1;
            }
            trace!(bot = self.bot, top = self.top, "reached EOF");
        } else {
            self.top += n;
            trace!(read = n, bot = self.bot, top = self.top, "refilled input buffer");
        }
        Ok(())
    }
}
