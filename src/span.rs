//! Match spans: half-open `[begin, end)` ranges of cursor positions.

use std::ops::AddAssign;

use crate::cursor::{Cursor, Sink};

/// The extent of a successful match.
///
/// Positions are the cursor's own offsets, so a `Match` is only meaningful
/// against the cursor that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Match {
    begin: usize,
    end: usize,
}

impl Match {
    /// Create a span. `end` must not precede `begin`.
    pub fn new(begin: usize, end: usize) -> Self {
        debug_assert!(end >= begin, "match end {end} precedes begin {begin}");
        Self { begin, end }
    }

    /// An empty span at `pos`.
    pub fn empty(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Read the matched bytes back from `cursor`.
    ///
    /// Stops early, without failing, if the input runs out. The cursor is
    /// left where it was found.
    pub fn bytes(&self, cursor: &mut dyn Cursor) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        self.replay(cursor, |b| out.push(b));
        out
    }

    /// The matched bytes as text. Invalid UTF-8 is replaced, not rejected.
    pub fn text(&self, cursor: &mut dyn Cursor) -> String {
        String::from_utf8_lossy(&self.bytes(cursor)).into_owned()
    }

    /// Copy the matched bytes into `sink`, returning how many were copied.
    ///
    /// The count is less than [`len`](Self::len) when the input is
    /// exhausted first.
    pub fn forward(&self, cursor: &mut dyn Cursor, sink: &mut dyn Sink) -> usize {
        self.replay(cursor, |b| sink.write(b))
    }

    fn replay(&self, cursor: &mut dyn Cursor, mut each: impl FnMut(u8)) -> usize {
        let saved = cursor.position();
        cursor.seek(self.begin);
        let mut count = 0;
        while count != self.len() {
            let Some(b) = cursor.read() else {
                break;
            };
            each(b);
            count += 1;
        }
        cursor.seek(saved);
        count
    }
}

/// Extend this span to the end of a later one.
///
/// The operand is assumed to start at or after `self.begin`; nothing checks
/// it.
impl AddAssign for Match {
    fn add_assign(&mut self, rhs: Match) {
        self.end = rhs.end;
    }
}
