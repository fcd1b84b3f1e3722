//! Pattern evaluator: run a [`Pattern`] against a [`Cursor`].
//!
//! Evaluation is plain recursive descent over the node graph. Only three
//! nodes ever move the cursor back after an abandoned attempt: ordered
//! choice, negation and lookahead. Every other node that fails leaves the
//! cursor wherever its failing child left it; it is the enclosing choice (or
//! negation, or lookahead) that puts it back.

use tracing::debug;

use crate::context::Context;
use crate::cursor::Cursor;
use crate::error::EvalError;
use crate::grammar::Grammar;
use crate::span::Match;

use super::{Node, Pattern, RuleRef};

/// `Ok(None)` is an ordinary non-match. `Err` means evaluation was aborted.
pub type EvalResult = Result<Option<Match>, EvalError>;

/// Evaluate `pattern` at the cursor's current position.
///
/// Grammar rule references cannot be resolved here and fail as non-matches;
/// use [`Grammar::eval`] for patterns that contain rules.
#[tracing::instrument(level = "debug", skip_all, fields(pos = cursor.position()))]
pub fn eval<C: Context>(pattern: &Pattern<C>, cursor: &mut dyn Cursor, ctx: &mut C) -> EvalResult {
    Machine {
        cursor,
        ctx,
        grammar: None,
    }
    .run(pattern)
}

/// State for one evaluation call.
pub(crate) struct Machine<'a, C> {
    pub cursor: &'a mut dyn Cursor,
    pub ctx: &'a mut C,
    pub grammar: Option<&'a Grammar<C>>,
}

impl<C: Context> Machine<'_, C> {
    pub fn run(&mut self, pattern: &Pattern<C>) -> EvalResult {
        match pattern.node() {
            Node::Literal(bytes) => Ok(self.literal(bytes)),
            Node::Set(members) => Ok(self.one_byte(|b| members.contains(b))),
            Node::Class(class) => Ok(self.one_byte(|b| class.matches(b))),
            Node::Any => Ok(self.one_byte(|_| true)),
            Node::Seq(lhs, rhs) => self.sequence(lhs, rhs),
            Node::Choice(lhs, rhs) => self.choice(lhs, rhs),
            Node::Not(inner) => self.not(inner),
            Node::Lookahead(inner) => self.lookahead(inner),
            Node::Exactly(inner, count) => self.exactly(inner, *count),
            Node::AtLeast(inner, min) => self.at_least(inner, *min),
            Node::AtMost(inner, max) => self.at_most(inner, *max),
            Node::Rule(rule) => self.rule(rule),
            Node::Handler(inner, callback) => {
                let result = self.run(inner)?;
                callback(&mut *self.cursor, result, &mut *self.ctx).map_err(EvalError::Handler)?;
                Ok(result)
            }
            Node::Forward(inner, sink) => {
                let result = self.run(inner)?;
                if let Some(m) = result {
                    m.forward(&mut *self.cursor, &mut *sink.lock());
                }
                Ok(result)
            }
            Node::Capture(inner) => {
                let result = self.run(inner)?;
                if let Some(m) = result {
                    self.ctx.capture(m);
                }
                Ok(result)
            }
        }
    }

    // --- Leaves ---

    fn literal(&mut self, bytes: &[u8]) -> Option<Match> {
        let begin = self.cursor.position();
        for expected in bytes {
            if self.cursor.read() != Some(*expected) {
                return None;
            }
        }
        Some(Match::new(begin, self.cursor.position()))
    }

    fn one_byte(&mut self, accept: impl Fn(u8) -> bool) -> Option<Match> {
        let begin = self.cursor.position();
        let b = self.cursor.read()?;
        accept(b).then(|| Match::new(begin, self.cursor.position()))
    }

    // --- Structure ---

    fn sequence(&mut self, lhs: &Pattern<C>, rhs: &Pattern<C>) -> EvalResult {
        let Some(mut m) = self.run(lhs)? else {
            return Ok(None);
        };
        let Some(rest) = self.run(rhs)? else {
            return Ok(None);
        };
        m += rest;
        Ok(Some(m))
    }

    fn choice(&mut self, lhs: &Pattern<C>, rhs: &Pattern<C>) -> EvalResult {
        let begin = self.cursor.position();
        for alt in [lhs, rhs] {
            if self.run(alt)?.is_some() {
                return Ok(Some(Match::new(begin, self.cursor.position())));
            }
            self.cursor.seek(begin);
        }
        Ok(None)
    }

    /// And-not: never consumes, succeeds exactly when `inner` fails.
    fn not(&mut self, inner: &Pattern<C>) -> EvalResult {
        let begin = self.cursor.position();
        let result = self.run(inner)?;
        self.cursor.seek(begin);
        Ok(match result {
            Some(_) => None,
            None => Some(Match::empty(begin)),
        })
    }

    /// Never consumes; keeps `inner`'s result, span included.
    fn lookahead(&mut self, inner: &Pattern<C>) -> EvalResult {
        let begin = self.cursor.position();
        let result = self.run(inner)?;
        self.cursor.seek(begin);
        Ok(result)
    }

    // --- Repetition ---

    fn exactly(&mut self, inner: &Pattern<C>, count: usize) -> EvalResult {
        let begin = self.cursor.position();
        for _ in 0..count {
            if self.run(inner)?.is_none() {
                return Ok(None);
            }
        }
        Ok(Some(Match::new(begin, self.cursor.position())))
    }

    /// `min` required matches, then greedy: stop before the first failure.
    ///
    /// A match that consumes nothing also ends the greedy part, since every
    /// further attempt would succeed the same way.
    fn at_least(&mut self, inner: &Pattern<C>, min: usize) -> EvalResult {
        let begin = self.cursor.position();
        for _ in 0..min {
            if self.run(inner)?.is_none() {
                return Ok(None);
            }
        }
        let mut end = self.cursor.position();
        while self.run(inner)?.is_some() {
            let pos = self.cursor.position();
            if pos == end {
                break;
            }
            end = pos;
        }
        self.cursor.seek(end);
        Ok(Some(Match::new(begin, end)))
    }

    /// Up to `max` matches; stops before the first failure and never fails.
    fn at_most(&mut self, inner: &Pattern<C>, max: usize) -> EvalResult {
        let begin = self.cursor.position();
        for _ in 0..max {
            let before = self.cursor.position();
            if self.run(inner)?.is_none() {
                self.cursor.seek(before);
                return Ok(Some(Match::new(begin, before)));
            }
        }
        Ok(Some(Match::new(begin, self.cursor.position())))
    }

    // --- Grammar ---

    fn rule(&mut self, rule: &RuleRef) -> EvalResult {
        let Some(grammar) = self.grammar else {
            debug!(rule = %rule.name, "rule evaluated outside its grammar");
            return Ok(None);
        };
        match grammar.resolve(rule) {
            Some(body) => self.run(body),
            None => {
                debug!(rule = %rule.name, "unresolved rule");
                Ok(None)
            }
        }
    }
}
