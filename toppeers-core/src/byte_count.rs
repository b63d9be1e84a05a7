//! Parse-or-default for the monitor `Bytes` field.

use std::num::ParseIntError;

/// A monitor byte count. Unparsable input counts as zero but keeps the parse error
/// so callers can see that the value was defaulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteCount {
    Parsed(i64),
    Defaulted(ParseIntError),
}

impl ByteCount {
    /// Parse a base-10 signed 64-bit integer; anything else becomes `Defaulted`.
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => ByteCount::Parsed(n),
            Err(e) => ByteCount::Defaulted(e),
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            ByteCount::Parsed(n) => *n,
            ByteCount::Defaulted(_) => 0,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ByteCount::Defaulted(_))
    }
}
