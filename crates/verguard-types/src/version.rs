//! Version parsing and total-order comparison.
//!
//! Parsing never fails: a string that does not look like
//! `major.minor.incremental[-suffix]` degrades to a qualifier-only value
//! compared lexically, so any two inputs stay comparable.

use std::cmp::Ordering;
use std::fmt;

/// An immutable, ordered version value.
///
/// The comparison key is `(major, minor, incremental)`, then the qualifier
/// (a version without a qualifier outranks one with; two qualifiers compare
/// lexically), then the numeric build suffix. Equality is defined on that
/// key, not on the raw string: `1.0` and `1.0.0` compare equal.
#[derive(Clone, Debug)]
pub struct Version {
    raw: String,
    major: u64,
    minor: u64,
    incremental: u64,
    build: u64,
    qualifier: Option<String>,
}

impl Version {
    /// Parse a version string. Total: never fails.
    ///
    /// The part before the first `-` is read as up to three dot-separated
    /// numeric components (missing components default to 0). The part after
    /// it is a numeric build suffix if all digits, a qualifier otherwise.
    /// If the numeric section does not parse, the whole string becomes the
    /// qualifier and the numeric components are all zero.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        let (numeric, suffix) = match trimmed.split_once('-') {
            Some((n, s)) => (n, Some(s)),
            None => (trimmed, None),
        };

        let Some((major, minor, incremental)) = parse_numeric(numeric) else {
            return Self::qualifier_only(raw, trimmed);
        };

        let (build, qualifier) = match suffix {
            None | Some("") => (0, None),
            Some(s) if s.bytes().all(|b| b.is_ascii_digit()) => match s.parse::<u64>() {
                Ok(b) => (b, None),
                Err(_) => (0, Some(s.to_string())),
            },
            Some(s) => (0, Some(s.to_string())),
        };

        Self {
            raw: raw.to_string(),
            major,
            minor,
            incremental,
            build,
            qualifier,
        }
    }

    fn qualifier_only(raw: &str, trimmed: &str) -> Self {
        Self {
            raw: raw.to_string(),
            major: 0,
            minor: 0,
            incremental: 0,
            build: 0,
            qualifier: Some(trimmed.to_string()),
        }
    }

    /// The original string this value was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_numeric(s: &str) -> Option<(u64, u64, u64)> {
    if s.is_empty() {
        return None;
    }
    let mut parts = [0u64; 3];
    let mut count = 0;
    for piece in s.split('.') {
        if count == 3 {
            return None;
        }
        if piece.is_empty() || !piece.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parts[count] = piece.parse().ok()?;
        count += 1;
    }
    Some((parts[0], parts[1], parts[2]))
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.incremental.cmp(&other.incremental))
            .then_with(|| match (&self.qualifier, &other.qualifier) {
                (None, None) => Ordering::Equal,
                // A release outranks any qualified build of the same triple.
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
            .then(self.build.cmp(&other.build))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
