//! Pattern graphs.
//!
//! A [`Pattern`] is a cheap handle to an immutable node. Combinators build
//! new nodes over existing handles, so a sub-expression can be shared by any
//! number of parents (and rules) without being rebuilt.
//!
//! # Operators
//!
//! | Expression    | Meaning                                             |
//! |---------------|-----------------------------------------------------|
//! | `a >> b`      | `a` then `b`                                        |
//! | `a \| b`      | ordered choice: `a`, else `b` from the same start   |
//! | `-p`          | succeeds, consuming nothing, where `p` fails        |
//! | `a - b`       | `a`, but not where `b` matches (`-b >> a`)          |
//! | `p * k`       | exactly `k` occurrences                             |
//! | `p % n`       | `n >= 0`: at least `n`, greedy                      |
//! | `p % -n`      | at most `n`, never fails                            |
//!
//! Negation does not always wrap: `-(-p)` is `p` again, and negating an
//! "at least" repetition gives the "at most" repetition with the same count.

pub mod char_class;
mod display;
pub(crate) mod eval;
mod ops;

use std::sync::Arc;

use crate::cursor::{Cursor, SharedSink};
use crate::grammar::{GrammarId, RuleId};
use crate::span::Match;

pub use char_class::{ByteSet, Class};
pub use eval::{EvalResult, eval};

/// Callback attached with [`Pattern::on_eval`].
pub type Callback<C> =
    Arc<dyn Fn(&mut dyn Cursor, Option<Match>, &mut C) -> anyhow::Result<()> + Send + Sync>;

/// A shared, immutable pattern node evaluated with a context of type `C`.
pub struct Pattern<C = crate::CaptureList>(Arc<Node<C>>);

pub(crate) enum Node<C> {
    Literal(Box<[u8]>),
    Set(ByteSet),
    Class(Class),
    Any,
    Seq(Pattern<C>, Pattern<C>),
    Choice(Pattern<C>, Pattern<C>),
    Not(Pattern<C>),
    Lookahead(Pattern<C>),
    Exactly(Pattern<C>, usize),
    AtLeast(Pattern<C>, usize),
    AtMost(Pattern<C>, usize),
    Rule(RuleRef),
    Handler(Pattern<C>, Callback<C>),
    Forward(Pattern<C>, SharedSink),
    Capture(Pattern<C>),
}

/// A reference to a grammar slot, resolved each time it is evaluated.
#[derive(Debug, Clone)]
pub(crate) struct RuleRef {
    pub grammar: GrammarId,
    pub id: RuleId,
    pub name: Arc<str>,
}

impl<C> Clone for Pattern<C> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<C> Pattern<C> {
    pub(crate) fn new(node: Node<C>) -> Self {
        Self(Arc::new(node))
    }

    pub(crate) fn node(&self) -> &Node<C> {
        &self.0
    }

    /// True if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// `self` followed by `next`.
    pub fn then(self, next: Pattern<C>) -> Pattern<C> {
        Pattern::new(Node::Seq(self, next))
    }

    /// Ordered choice: `self`, else `alt` from the same starting point.
    pub fn or(self, alt: Pattern<C>) -> Pattern<C> {
        Pattern::new(Node::Choice(self, alt))
    }

    /// Logical negation, or the bespoke negated form where the node has one.
    pub fn negate(self) -> Pattern<C> {
        match self.node() {
            Node::Not(inner) => inner.clone(),
            Node::AtLeast(p, n) => Pattern::new(Node::AtMost(p.clone(), *n)),
            Node::AtMost(p, n) => Pattern::new(Node::AtLeast(p.clone(), *n)),
            _ => Pattern::new(Node::Not(self)),
        }
    }

    /// Match `self` without consuming any input.
    pub fn lookahead(self) -> Pattern<C> {
        Pattern::new(Node::Lookahead(self))
    }

    /// Exactly `count` occurrences.
    pub fn repeat(self, count: usize) -> Pattern<C> {
        Pattern::new(Node::Exactly(self, count))
    }

    /// At least `min` occurrences, then as many more as match.
    pub fn at_least(self, min: usize) -> Pattern<C> {
        Pattern::new(Node::AtLeast(self, min))
    }

    /// Between zero and `max` occurrences; never fails.
    pub fn at_most(self, max: usize) -> Pattern<C> {
        Pattern::new(Node::AtMost(self, max))
    }

    /// Call `callback` after every evaluation of `self`, matched or not.
    ///
    /// The result of `self` passes through unchanged. An error from the
    /// callback aborts the evaluation.
    pub fn on_eval<F>(self, callback: F) -> Pattern<C>
    where
        F: Fn(&mut dyn Cursor, Option<Match>, &mut C) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Pattern::new(Node::Handler(self, Arc::new(callback)))
    }

    /// Copy the bytes of every successful match of `self` into `sink`.
    pub fn forward_to(self, sink: SharedSink) -> Pattern<C> {
        Pattern::new(Node::Forward(self, sink))
    }

    /// Record every successful match of `self` in the context.
    pub fn capture(self) -> Pattern<C> {
        Pattern::new(Node::Capture(self))
    }
}

/// Match the byte sequence `text` exactly.
pub fn lit<C>(text: impl AsRef<[u8]>) -> Pattern<C> {
    Pattern::new(Node::Literal(text.as_ref().into()))
}

/// Match one byte from `members`.
pub fn set<C>(members: impl AsRef<[u8]>) -> Pattern<C> {
    Pattern::new(Node::Set(members.as_ref().into()))
}

/// Match one byte from a prebuilt set.
pub fn byte_set<C>(members: ByteSet) -> Pattern<C> {
    Pattern::new(Node::Set(members))
}

/// Match one byte of the given class.
pub fn class<C>(class: Class) -> Pattern<C> {
    Pattern::new(Node::Class(class))
}

pub fn alpha<C>() -> Pattern<C> {
    class(Class::Alpha)
}

pub fn alnum<C>() -> Pattern<C> {
    class(Class::Alnum)
}

pub fn digit<C>() -> Pattern<C> {
    class(Class::Digit)
}

pub fn hex_digit<C>() -> Pattern<C> {
    class(Class::HexDigit)
}

pub fn lower<C>() -> Pattern<C> {
    class(Class::Lower)
}

pub fn upper<C>() -> Pattern<C> {
    class(Class::Upper)
}

/// Space, tab, newline, vertical tab, form feed or carriage return.
pub fn space_or_newline<C>() -> Pattern<C> {
    class(Class::SpaceOrNewline)
}

/// Space or tab.
pub fn blank<C>() -> Pattern<C> {
    class(Class::Blank)
}

/// Space, tab or vertical tab.
pub fn space<C>() -> Pattern<C> {
    set(" \t\x0b")
}

/// Succeed without consuming anything.
pub fn empty<C>() -> Pattern<C> {
    lit("")
}

/// Match any single byte.
pub fn any<C>() -> Pattern<C> {
    Pattern::new(Node::Any)
}

/// Succeed, consuming nothing, only at end of input.
pub fn none<C>() -> Pattern<C> {
    -any()
}

/// Free-function form of [`Pattern::lookahead`].
pub fn ahead<C>(pattern: Pattern<C>) -> Pattern<C> {
    pattern.lookahead()
}

/// Free-function form of [`Pattern::capture`].
pub fn capt<C>(pattern: Pattern<C>) -> Pattern<C> {
    pattern.capture()
}
