use std::collections::HashMap;

/// Observed field values a rule is evaluated against, keyed by keyword.
///
/// Keys are lower-cased on insertion so they line up with the canonical
/// keyword names in compiled rules. Values are kept as given. A keyword with
/// no value reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: HashMap<String, String>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a keyword.
    #[must_use]
    pub fn set(mut self, keyword: &str, value: impl Into<String>) -> Self {
        self.insert(keyword, value);
        self
    }

    /// Set the value for a keyword (mutable reference version).
    pub fn insert(&mut self, keyword: &str, value: impl Into<String>) {
        self.values.insert(keyword.to_lowercase(), value.into());
    }

    /// Look up the value for a keyword, any casing.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&str> {
        match self.values.get(keyword) {
            Some(v) => Some(v.as_str()),
            None => self.values.get(&keyword.to_lowercase()).map(String::as_str),
        }
    }

    /// The value for an already lower-cased keyword, or `""` when absent.
    pub(crate) fn value_of(&self, keyword: &str) -> &str {
        self.values.get(keyword).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut ctx = Context::new();
        for (k, v) in iter {
            ctx.insert(k.as_ref(), v);
        }
        ctx
    }
}
