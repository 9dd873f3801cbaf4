//! The `major.minor.patch` version triple.

use crate::error::{ReleaseError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A release version.
///
/// Ordering is numeric and component-wise, so `1.2.3 < 1.2.10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Two-component form used in documentation snippets (`X.Y`).
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    /// Parses exactly `X.Y.Z` where each component is one or more ASCII digits.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ReleaseError::InvalidVersion(s.to_string());

        let mut parts = s.split('.');
        let mut next = || -> Result<u64> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };

        let version = Version::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How the current and target versions are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Comparison {
    /// Component-wise integer comparison.
    #[default]
    Numeric,
    /// Plain string comparison of the textual forms.
    ///
    /// Only correct when every component has the same digit width:
    /// `"1.2.3" > "1.2.10"` under this mode.
    Lexical,
}

impl Comparison {
    pub fn compare(self, current: &str, target: &str) -> Result<Ordering> {
        match self {
            Comparison::Lexical => Ok(current.cmp(target)),
            Comparison::Numeric => {
                let current: Version = current.parse()?;
                let target: Version = target.parse()?;
                Ok(current.cmp(&target))
            }
        }
    }
}
