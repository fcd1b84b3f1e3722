//! Positioned byte input and output collaborators.
//!
//! Patterns never own their input: evaluation borrows a [`Cursor`] for the
//! length of one call and moves it back and forth as alternatives are tried.

use std::sync::Arc;

use parking_lot::Mutex;
use ropey::Rope;

/// A seekable, byte-at-a-time input.
///
/// Positions must round-trip: `seek(position())` is a no-op, and seeking to
/// any previously observed position resumes reading from the same byte.
pub trait Cursor {
    fn position(&self) -> usize;

    fn seek(&mut self, pos: usize);

    /// Read one byte and advance, or `None` at end of input.
    fn read(&mut self) -> Option<u8>;
}

/// A byte-at-a-time output.
pub trait Sink {
    fn write(&mut self, byte: u8);
}

impl Sink for Vec<u8> {
    fn write(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// True once every byte has been read.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

impl Cursor for SliceCursor<'_> {
    fn position(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn read(&mut self) -> Option<u8> {
        let b = *self.input.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// Cursor over the bytes of a [`Rope`].
///
/// Positions are byte offsets, so a match may split a multi-byte character.
#[derive(Debug, Clone)]
pub struct RopeCursor<'a> {
    rope: &'a Rope,
    pos: usize,
}

impl<'a> RopeCursor<'a> {
    pub fn new(rope: &'a Rope) -> Self {
        Self { rope, pos: 0 }
    }
}

impl Cursor for RopeCursor<'_> {
    fn position(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn read(&mut self) -> Option<u8> {
        if self.pos >= self.rope.len_bytes() {
            return None;
        }
        let b = self.rope.byte(self.pos);
        self.pos += 1;
        Some(b)
    }
}

/// A sink shared between a pattern and whoever reads the output.
///
/// Forwarding nodes outlive any single evaluation, so they hold the sink by
/// handle rather than by borrow.
#[derive(Clone)]
pub struct SharedSink(Arc<Mutex<dyn Sink + Send>>);

impl SharedSink {
    pub fn new(sink: impl Sink + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(sink)))
    }

    /// Wrap a sink the caller keeps a handle to, e.g. to read a buffer back.
    pub fn from_arc<S: Sink + Send + 'static>(sink: Arc<Mutex<S>>) -> Self {
        Self(sink)
    }

    pub fn lock(&self) -> parking_lot::MutexGuard<'_, dyn Sink + Send + 'static> {
        self.0.lock()
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SharedSink")
    }
}
