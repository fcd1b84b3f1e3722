//! Parsing-expression-grammar combinators.
//!
//! Patterns are built from a handful of leaves and operators, optionally tied
//! together into recursive rules with a [`Grammar`], and evaluated against a
//! byte [`Cursor`]. A successful evaluation yields a [`Match`] span; captures
//! and handler callbacks report on sub-matches along the way.
//!
//! # Example
//!
//! ```rust
//! use pegcomb::{CaptureList, Pattern, SliceCursor, alnum, alpha, capt, eval, lit, none};
//!
//! let ident: Pattern = (alpha() | lit("_")) >> (alnum() | lit("_")) % 0;
//! let path = capt(ident.clone()) >> (lit(".") >> capt(ident)) % 0 >> none();
//!
//! let mut cursor = SliceCursor::new(b"std.io");
//! let mut captures = CaptureList::new();
//! let m = eval(&path, &mut cursor, &mut captures).unwrap().unwrap();
//!
//! assert_eq!((m.begin(), m.end()), (0, 6));
//! let parts: Vec<String> = captures.iter().map(|c| c.text(&mut cursor)).collect();
//! assert_eq!(parts, ["std", "io"]);
//! ```

mod context;
pub mod cursor;
pub mod demos;
mod error;
mod grammar;
pub mod pattern;
mod span;

pub use context::{CaptureList, Context};
pub use cursor::{Cursor, RopeCursor, SharedSink, Sink, SliceCursor};
pub use error::{EvalError, GrammarError};
pub use grammar::{Grammar, GrammarId, RuleId};
pub use pattern::{
    ByteSet, Callback, Class, EvalResult, Pattern, ahead, alnum, alpha, any, blank, byte_set,
    capt, class, digit, empty, eval, hex_digit, lit, lower, none, set, space, space_or_newline,
    upper,
};
pub use span::Match;
