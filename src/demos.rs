//! Small ready-made grammars, used by the command-line driver.
//!
//! Each demo captures the interesting parts of its input and forwards one
//! part of it to a sink, so the driver can show both mechanisms at work.

use itertools::Itertools;
use phf::{Map, phf_map};

use crate::cursor::SharedSink;
use crate::grammar::Grammar;
use crate::pattern::{Pattern, alnum, alpha, blank, capt, digit, hex_digit, lit, set};

/// A grammar plus the pattern to start evaluation from.
pub struct Demo {
    pub grammar: Grammar,
    pub start: Pattern,
}

pub type DemoBuilder = fn(SharedSink) -> Demo;

/// Please keep names sorted alphabetically.
const NAME_TO_DEMO_MAP: Map<&'static str, DemoBuilder> = phf_map! {
    "ident" => identifiers as DemoBuilder,
    "macro" => macro_name as DemoBuilder,
    "number" => number as DemoBuilder,
    "parens" => parens as DemoBuilder,
};

/// Build the demo called `name`, wiring its forwarding node to `sink`.
pub fn build(name: &str, sink: SharedSink) -> Option<Demo> {
    NAME_TO_DEMO_MAP.get(name).map(|builder| builder(sink))
}

/// All demo names, comma separated.
pub fn names() -> String {
    NAME_TO_DEMO_MAP.keys().sorted().join(", ")
}

fn ident() -> Pattern {
    (alpha() | lit("_")) >> (alnum() | lit("_")) % 0
}

/// `$outer.inner.leaf`: captures each part, then the whole dotted name.
/// Forwards the whole name.
fn macro_name(sink: SharedSink) -> Demo {
    let name = capt(capt(ident()) >> (lit(".") >> capt(ident())) % 0);
    Demo {
        grammar: Grammar::new(),
        start: lit("$") >> name.forward_to(sink),
    }
}

/// Blank-separated identifiers. Captures and forwards each one.
fn identifiers(sink: SharedSink) -> Demo {
    let word = capt(ident()).forward_to(sink);
    Demo {
        grammar: Grammar::new(),
        start: blank() % 0 >> word.clone() >> (blank() % 1 >> word) % 0 >> blank() % 0,
    }
}

/// Optionally signed decimal, or `0x` hexadecimal. Captures the sign (possibly
/// empty) and the digits; forwards only the digits.
fn number(sink: SharedSink) -> Demo {
    let sign = capt(set("+-") % -1);
    let hex = (lit("0x") | lit("0X")) >> capt(hex_digit() % 1).forward_to(sink.clone());
    let dec = capt(digit() % 1).forward_to(sink);
    Demo {
        grammar: Grammar::new(),
        start: sign >> (hex | dec),
    }
}

/// Balanced, possibly adjacent, parenthesised groups: `(()())()`.
/// Captures every group; forwards the whole match.
fn parens(sink: SharedSink) -> Demo {
    let mut grammar = Grammar::new();
    let group = grammar.rule("group");
    let groups = grammar.rule("groups");
    grammar.define("group", capt(lit("(") >> groups.clone() >> lit(")")));
    grammar.define("groups", group.clone() % 0);
    Demo {
        grammar,
        start: (group % 1).forward_to(sink),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::CaptureList;
    use crate::cursor::SliceCursor;

    /// Run a demo over `input`: (matched text, captures, forwarded bytes).
    fn run(name: &str, input: &str) -> Option<(String, Vec<String>, String)> {
        let buf = Arc::new(Mutex::new(Vec::<u8>::new()));
        let demo = build(name, SharedSink::from_arc(buf.clone())).unwrap();
        demo.grammar.check().unwrap();
        let mut cur = SliceCursor::new(input.as_bytes());
        let mut caps = CaptureList::new();
        let m = demo.grammar.eval(&demo.start, &mut cur, &mut caps).unwrap()?;
        let texts = caps.iter().map(|c| c.text(&mut cur)).collect();
        let forwarded = String::from_utf8(buf.lock().clone()).unwrap();
        Some((m.text(&mut cur), texts, forwarded))
    }

    #[test]
    fn macro_name_captures_parts_then_whole() {
        let (text, caps, fwd) = run("macro", "$foo.bar").unwrap();
        assert_eq!(text, "$foo.bar");
        assert_eq!(caps, ["foo", "bar", "foo.bar"]);
        assert_eq!(fwd, "foo.bar");
    }

    #[test]
    fn macro_name_requires_dollar() {
        assert_eq!(run("macro", "foo"), None);
    }

    #[test]
    fn identifiers_skip_blanks() {
        let (_, caps, fwd) = run("ident", "  alpha\tbeta _g1 ").unwrap();
        assert_eq!(caps, ["alpha", "beta", "_g1"]);
        assert_eq!(fwd, "alphabeta_g1");
    }

    #[test]
    fn number_forms() {
        let (_, caps, fwd) = run("number", "-42").unwrap();
        assert_eq!(caps, ["-", "42"]);
        assert_eq!(fwd, "42");

        let (_, caps, fwd) = run("number", "0x1F").unwrap();
        assert_eq!(caps, ["", "1F"]);
        assert_eq!(fwd, "1F");

        assert_eq!(run("number", "x"), None);
    }

    #[test]
    fn hex_prefix_without_digits_falls_back_to_decimal() {
        let (text, caps, _) = run("number", "0x").unwrap();
        assert_eq!(text, "0");
        assert_eq!(caps, ["", "0"]);
    }

    #[test]
    fn parens_capture_each_group() {
        let (text, caps, fwd) = run("parens", "(()())()x").unwrap();
        assert_eq!(text, "(()())()");
        assert_eq!(caps, ["()", "()", "(()())", "()"]);
        assert_eq!(fwd, "(()())()");
    }

    #[test]
    fn unknown_demo() {
        assert!(build("nope", SharedSink::new(Vec::<u8>::new())).is_none());
        assert_eq!(names(), "ident, macro, number, parens");
    }
}
