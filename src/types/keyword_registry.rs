use regex::{Regex, RegexBuilder};
use tracing::warn;

/// The vocabulary of field names accepted on the left of a predicate.
///
/// Keywords are stored lower-cased, in registration order, without
/// duplicates. Every change rebuilds the anchored, case-insensitive
/// alternation the lexer uses to recognise keywords. Longer keywords come
/// first in the alternation so `icon_hash` wins over `icon`.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    keywords: Vec<String>,
    pattern: Option<Regex>,
}

impl KeywordRegistry {
    /// Create a registry holding `keywords`.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        registry.configure(keywords);
        registry
    }

    /// Replace the vocabulary.
    pub fn configure<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.clear();
        self.push_all(keywords);
        self.rebuild();
    }

    /// Append keywords, skipping ones already registered.
    pub fn extend<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push_all(keywords);
        self.rebuild();
    }

    /// Whether `keyword` (any casing) is registered.
    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        let lowered = keyword.to_lowercase();
        self.keywords.iter().any(|k| *k == lowered)
    }

    /// The number of registered keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the registry is empty. No predicate can be parsed against an
    /// empty vocabulary.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Iterate over the keywords in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Match a registered keyword at the very start of `input`, returning the
    /// length in bytes of the matched text.
    pub(crate) fn match_prefix(&self, input: &str) -> Option<usize> {
        self.pattern
            .as_ref()
            .and_then(|re| re.find(input))
            .map(|m| m.end())
    }

    fn push_all<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            let lowered = keyword.as_ref().to_lowercase();
            if !lowered.is_empty() && !self.keywords.contains(&lowered) {
                self.keywords.push(lowered);
            }
        }
    }

    fn rebuild(&mut self) {
        if self.keywords.is_empty() {
            self.pattern = None;
            return;
        }

        let mut by_length: Vec<&str> = self.keywords.iter().map(String::as_str).collect();
        by_length.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = by_length
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        self.pattern = match RegexBuilder::new(&format!(r"\A(?:{alternation})"))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(keywords = self.keywords.len(), error = %e, "failed to build keyword pattern");
                None
            }
        };
    }
}
