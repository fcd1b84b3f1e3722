//! Named, mutually recursive rules.
//!
//! A [`Grammar`] is an arena of named slots. Mentioning a name allocates its
//! slot; the pattern returned by [`Grammar::rule`] remembers only the slot's
//! index, and the slot's content is looked up every time that pattern is
//! evaluated. Rules can therefore be referenced before they are defined,
//! refer to themselves, and be redefined later.
//!
//! ```
//! use pegcomb::{Grammar, SliceCursor, empty, lit};
//!
//! let mut g: Grammar<()> = Grammar::new();
//! let parens = g.rule("parens");
//! g.define("parens", lit("(") >> (parens.clone() | empty()) >> lit(")"));
//!
//! let mut cur = SliceCursor::new(b"(())");
//! let m = g.eval(&parens, &mut cur, &mut ()).unwrap().unwrap();
//! assert_eq!((m.begin(), m.end()), (0, 4));
//! ```
//!
//! # Left recursion
//!
//! A rule that can reach itself again without consuming input (`r := r >> x`,
//! or `r := s`, `s := r | ...`) recurses until the stack overflows. Nothing
//! detects this; grammars must be written so every recursive path consumes.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, trace};

use crate::context::{CaptureList, Context};
use crate::cursor::Cursor;
use crate::error::GrammarError;
use crate::pattern::{EvalResult, Node, Pattern, RuleRef, eval::Machine};

static NEXT_GRAMMAR_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a grammar, so rules are never resolved against the wrong one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrammarId(u32);

/// Index of a rule slot within its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(usize);

impl RuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

struct Slot<C> {
    name: Arc<str>,
    body: Option<Pattern<C>>,
}

/// A set of named rule slots.
pub struct Grammar<C = CaptureList> {
    id: GrammarId,
    slots: Vec<Slot<C>>,
    by_name: HashMap<Arc<str>, RuleId>,
}

impl<C> Default for Grammar<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Grammar<C> {
    pub fn new() -> Self {
        Self {
            id: GrammarId(NEXT_GRAMMAR_ID.fetch_add(1, Ordering::Relaxed)),
            slots: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn id(&self) -> GrammarId {
        self.id
    }

    /// The slot for `name`, allocating an empty one on first mention.
    pub fn slot(&mut self, name: &str) -> RuleId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = RuleId(self.slots.len());
        let name: Arc<str> = name.into();
        self.slots.push(Slot {
            name: name.clone(),
            body: None,
        });
        self.by_name.insert(name, id);
        id
    }

    /// A pattern that evaluates whatever `name` holds at evaluation time.
    pub fn rule(&mut self, name: &str) -> Pattern<C> {
        let id = self.slot(name);
        Pattern::new(Node::Rule(RuleRef {
            grammar: self.id,
            id,
            name: self.slots[id.0].name.clone(),
        }))
    }

    /// Set (or replace) the body of `name`.
    ///
    /// Every reference to the rule, including ones built earlier, sees the
    /// new body from its next evaluation on.
    pub fn define(&mut self, name: &str, body: Pattern<C>) -> RuleId {
        let id = self.slot(name);
        let slot = &mut self.slots[id.0];
        trace!(rule = %slot.name, %body, redefined = slot.body.is_some(), "define rule");
        slot.body = Some(body);
        id
    }

    /// The current body of `name`, if it has one.
    pub fn get(&self, name: &str) -> Option<&Pattern<C>> {
        let id = self.by_name.get(name)?;
        self.slots[id.0].body.as_ref()
    }

    pub fn name(&self, id: RuleId) -> Option<&str> {
        self.slots.get(id.0).map(|s| &*s.name)
    }

    /// Number of slots, defined or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All rule names in slot order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.iter().map(|s| &*s.name)
    }

    /// Report rules that were referenced but never defined.
    ///
    /// Evaluating such a rule is indistinguishable from a non-match, so
    /// this is the place to catch a misspelt rule name.
    pub fn check(&self) -> Result<(), GrammarError> {
        let missing: Vec<String> = self
            .slots
            .iter()
            .filter(|s| s.body.is_none())
            .map(|s| s.name.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            debug!(?missing, "grammar has undefined rules");
            Err(GrammarError::Unresolved(missing))
        }
    }

    pub(crate) fn resolve(&self, rule: &RuleRef) -> Option<&Pattern<C>> {
        if rule.grammar != self.id {
            return None;
        }
        self.slots.get(rule.id.0)?.body.as_ref()
    }
}

impl<C: Context> Grammar<C> {
    /// Evaluate `pattern`, resolving this grammar's rules.
    #[tracing::instrument(level = "debug", skip_all, fields(pos = cursor.position()))]
    pub fn eval(&self, pattern: &Pattern<C>, cursor: &mut dyn Cursor, ctx: &mut C) -> EvalResult {
        Machine {
            cursor,
            ctx,
            grammar: Some(self),
        }
        .run(pattern)
    }
}
