//! Render patterns back in operator notation, for logs and `--explain`.

use std::fmt;

use super::{Node, Pattern};

// Binding strength, loosest first. Mirrors Rust's own operator precedence so
// the output reads like the expression that built the pattern.
const CHOICE: u8 = 1;
const SEQ: u8 = 2;
const REPEAT: u8 = 3;
const PREFIX: u8 = 4;
const ATOM: u8 = 5;

impl<C> Pattern<C> {
    fn precedence(&self) -> u8 {
        match self.node() {
            Node::Choice(..) => CHOICE,
            Node::Seq(..) => SEQ,
            Node::Exactly(..) | Node::AtLeast(..) | Node::AtMost(..) => REPEAT,
            Node::Not(inner) if matches!(inner.node(), Node::Any) => ATOM,
            Node::Not(_) | Node::Lookahead(_) => PREFIX,
            _ => ATOM,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "(")?;
            self.fmt_node(f)?;
            write!(f, ")")
        } else {
            self.fmt_node(f)
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Literal(bytes) => write!(f, "\"{}\"", bytes.escape_ascii()),
            Node::Set(members) => write!(f, "{members}"),
            Node::Class(class) => write!(f, "{class}"),
            Node::Any => write!(f, "any"),
            Node::Seq(lhs, rhs) => {
                lhs.fmt_at(f, SEQ)?;
                write!(f, " >> ")?;
                rhs.fmt_at(f, SEQ + 1)
            }
            Node::Choice(lhs, rhs) => {
                lhs.fmt_at(f, CHOICE)?;
                write!(f, " | ")?;
                rhs.fmt_at(f, CHOICE + 1)
            }
            Node::Not(inner) if matches!(inner.node(), Node::Any) => write!(f, "none"),
            Node::Not(inner) => {
                write!(f, "-")?;
                inner.fmt_at(f, PREFIX)
            }
            Node::Lookahead(inner) => {
                write!(f, "&")?;
                inner.fmt_at(f, PREFIX)
            }
            Node::Exactly(inner, n) => {
                inner.fmt_at(f, PREFIX)?;
                write!(f, " * {n}")
            }
            Node::AtLeast(inner, n) => {
                inner.fmt_at(f, PREFIX)?;
                write!(f, " % {n}")
            }
            // `% -0` would read back as "at least 0"
            Node::AtMost(inner, 0) => {
                inner.fmt_at(f, ATOM)?;
                write!(f, ".at_most(0)")
            }
            Node::AtMost(inner, n) => {
                inner.fmt_at(f, PREFIX)?;
                write!(f, " % -{n}")
            }
            Node::Rule(rule) => write!(f, "<{}>", rule.name),
            Node::Handler(inner, _) => write!(f, "on_eval({inner})"),
            Node::Forward(inner, _) => write!(f, "forward({inner})"),
            Node::Capture(inner) => write!(f, "capt({inner})"),
        }
    }
}

impl<C> fmt::Display for Pattern<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f)
    }
}

impl<C> fmt::Debug for Pattern<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({self})")
    }
}
