//! Single-byte character classes and byte sets.
//!
//! Classification is ASCII only; every byte at or above 0x80 is outside every
//! class.

use std::fmt;

use itertools::Itertools;
use phf::{Map, phf_map};

/// A predicate class matching one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Alpha,          // A-Z a-z
    Alnum,          // Alpha or Digit
    Digit,          // 0-9
    HexDigit,       // 0-9 A-F a-f
    Lower,          // a-z
    Upper,          // A-Z
    SpaceOrNewline, // space \t \n \v \f \r
    Blank,          // space \t
}

/// Class names as accepted by [`Class::from_name`].
/// Please keep names sorted alphabetically.
const NAME_TO_CLASS_MAP: Map<&'static str, Class> = phf_map! {
    "alnum" => Class::Alnum,
    "alpha" => Class::Alpha,
    "blank" => Class::Blank,
    "digit" => Class::Digit,
    "lower" => Class::Lower,
    "space_or_newline" => Class::SpaceOrNewline,
    "upper" => Class::Upper,
    "xdigit" => Class::HexDigit,
};

impl Class {
    /// Test whether `b` belongs to this class.
    pub fn matches(self, b: u8) -> bool {
        match self {
            Class::Alpha => b.is_ascii_alphabetic(),
            Class::Alnum => b.is_ascii_alphanumeric(),
            Class::Digit => b.is_ascii_digit(),
            Class::HexDigit => b.is_ascii_hexdigit(),
            Class::Lower => b.is_ascii_lowercase(),
            Class::Upper => b.is_ascii_uppercase(),
            // is_ascii_whitespace leaves out \v
            Class::SpaceOrNewline => b.is_ascii_whitespace() || b == 0x0b,
            Class::Blank => b == b' ' || b == b'\t',
        }
    }

    /// Look up a class by its short name (`alpha`, `xdigit`, ...).
    pub fn from_name(name: &str) -> Option<Class> {
        NAME_TO_CLASS_MAP.get(name).copied()
    }

    pub fn name(self) -> &'static str {
        NAME_TO_CLASS_MAP
            .entries()
            .find(|(_, class)| **class == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of bytes, one bit per value.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteSet {
    bits: [u64; 4],
}

impl ByteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, b: u8) {
        self.bits[usize::from(b >> 6)] |= 1u64 << (b & 63);
    }

    /// Insert every byte in `lo..=hi`. Nothing is inserted if `lo > hi`.
    pub fn insert_range(&mut self, lo: u8, hi: u8) {
        for b in lo..=hi {
            self.insert(b);
        }
    }

    pub fn contains(&self, b: u8) -> bool {
        self.bits[usize::from(b >> 6)] & (1u64 << (b & 63)) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|w| *w == 0)
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|b| self.contains(*b))
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = ByteSet::new();
        for b in iter {
            set.insert(b);
        }
        set
    }
}

impl From<&[u8]> for ByteSet {
    fn from(bytes: &[u8]) -> Self {
        bytes.iter().copied().collect()
    }
}

impl From<&str> for ByteSet {
    fn from(s: &str) -> Self {
        s.as_bytes().into()
    }
}

/// Renders as `[abc]`, with non-printable members escaped.
impl fmt::Display for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.iter().map(|b| b.escape_ascii().to_string()).join("")
        )
    }
}

impl fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteSet{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_matches_letters() {
        assert!(Class::Alpha.matches(b'a'));
        assert!(Class::Alpha.matches(b'Z'));
        assert!(!Class::Alpha.matches(b'5'));
        assert!(!Class::Alpha.matches(0xe9));
    }

    #[test]
    fn alnum_and_hex() {
        assert!(Class::Alnum.matches(b'7'));
        assert!(Class::Alnum.matches(b'q'));
        assert!(!Class::Alnum.matches(b'_'));
        assert!(Class::HexDigit.matches(b'F'));
        assert!(Class::HexDigit.matches(b'c'));
        assert!(!Class::HexDigit.matches(b'g'));
    }

    #[test]
    fn case_classes() {
        assert!(Class::Lower.matches(b'm'));
        assert!(!Class::Lower.matches(b'M'));
        assert!(Class::Upper.matches(b'M'));
        assert!(!Class::Upper.matches(b'm'));
    }

    #[test]
    fn whitespace_classes() {
        for b in [b' ', b'\t', b'\n', 0x0b, 0x0c, b'\r'] {
            assert!(Class::SpaceOrNewline.matches(b), "expected space: {b:#x}");
        }
        assert!(Class::Blank.matches(b' '));
        assert!(Class::Blank.matches(b'\t'));
        assert!(!Class::Blank.matches(b'\n'));
    }

    #[test]
    fn names_round_trip() {
        for class in [
            Class::Alpha,
            Class::Alnum,
            Class::Digit,
            Class::HexDigit,
            Class::Lower,
            Class::Upper,
            Class::SpaceOrNewline,
            Class::Blank,
        ] {
            assert_eq!(Class::from_name(class.name()), Some(class));
        }
        assert_eq!(Class::from_name("punct"), None);
        assert_eq!(Class::SpaceOrNewline.to_string(), "space_or_newline");
        assert_eq!(Class::from_name("space"), None);
    }

    #[test]
    fn byte_set_membership() {
        let set = ByteSet::from("ab");
        assert!(set.contains(b'a'));
        assert!(set.contains(b'b'));
        assert!(!set.contains(b'c'));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn byte_set_high_bytes_and_ranges() {
        let mut set = ByteSet::new();
        assert!(set.is_empty());
        set.insert(0xff);
        set.insert_range(b'0', b'9');
        assert!(set.contains(0xff));
        assert!(set.contains(b'5'));
        assert!(!set.contains(b'a'));
        assert_eq!(set.len(), 11);
    }

    #[test]
    fn byte_set_display_escapes() {
        let set = ByteSet::from(&b"\tba"[..]);
        assert_eq!(set.to_string(), "[\\tab]");
    }
}
