//! Evaluation contexts.
//!
//! The context is whatever value the caller hands to [`eval`](crate::eval).
//! It is threaded unchanged through every node; only capture and handler
//! nodes ever look at it.

use crate::span::Match;

/// Flat, append-only list of captured spans in evaluation order.
pub type CaptureList = Vec<Match>;

/// A value that can travel through an evaluation.
pub trait Context {
    /// Record a captured span. The default drops it.
    fn capture(&mut self, _m: Match) {}
}

impl Context for () {}

impl Context for CaptureList {
    fn capture(&mut self, m: Match) {
        self.push(m);
    }
}
