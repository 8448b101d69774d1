use std::fmt;

use regex::RegexBuilder;

/// The four match operators allowed between a keyword and a quoted value.
///
/// `Contains` and `NotContains` fold case on both sides; `Equal` compares
/// bytes exactly; `RegexpMatch` searches the value for the pattern anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparator {
    /// `=`
    Contains,
    /// `==`
    Equal,
    /// `!=`
    NotContains,
    /// `~=`
    RegexpMatch,
}

impl Comparator {
    /// Every comparator, ordered so that longer symbols come first.
    pub const ALL: [Comparator; 4] = [
        Comparator::Equal,
        Comparator::RegexpMatch,
        Comparator::NotContains,
        Comparator::Contains,
    ];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Comparator::Contains => "=",
            Comparator::Equal => "==",
            Comparator::NotContains => "!=",
            Comparator::RegexpMatch => "~=",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }

    /// Apply the comparator to an observed value (`left`) and a rule literal
    /// (`right`).
    ///
    /// The regex pattern is compiled on every call; compiled rules cache it
    /// instead unless deferred validation is configured.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error when `right` is not a valid
    /// pattern for [`Comparator::RegexpMatch`]. The other comparators never fail.
    pub fn apply(self, left: &str, right: &str, size_limit: usize) -> Result<bool, regex::Error> {
        match self {
            Comparator::Contains => Ok(contains_folded(left, &right.to_lowercase())),
            Comparator::Equal => Ok(left == right),
            Comparator::NotContains => Ok(!contains_folded(left, &right.to_lowercase())),
            Comparator::RegexpMatch => {
                let re = RegexBuilder::new(right).size_limit(size_limit).build()?;
                Ok(re.is_match(left))
            }
        }
    }
}

/// Case-insensitive substring test. `needle` must already be lower-cased.
pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(needle)
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
