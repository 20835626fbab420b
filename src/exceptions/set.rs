//! Ordered set of compiled exception matchers.

use crate::exceptions::pattern::{CompiledMatcher, Dialect, PatternError};

/// Matchers in configuration order.
///
/// The set is built once and then only read, so it is shared behind an
/// `Arc` without locking.
#[derive(Debug, Clone, Default)]
pub struct MatcherSet {
    matchers: Vec<CompiledMatcher>,
}

impl MatcherSet {
    /// Compile every template under `dialect`.
    ///
    /// Templates that fail to compile are returned alongside the set; the
    /// rest keep their relative order.
    pub fn compile<I, T>(dialect: Dialect, templates: I) -> (Self, Vec<PatternError>)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut matchers = Vec::new();
        let mut errors = Vec::new();

        for template in templates {
            match CompiledMatcher::compile(template.as_ref(), dialect) {
                Ok(m) => matchers.push(m),
                Err(e) => errors.push(e),
            }
        }

        (Self { matchers }, errors)
    }

    /// First matcher, in order, that matches the whole path.
    pub fn first_match(&self, path: &str) -> Option<&CompiledMatcher> {
        self.matchers.iter().find(|m| m.is_match(path))
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledMatcher> {
        self.matchers.iter()
    }

    /// Compiled expressions, for logging.
    pub fn expressions(&self) -> Vec<&str> {
        self.matchers.iter().map(CompiledMatcher::expression).collect()
    }
}

impl<'a> IntoIterator for &'a MatcherSet {
    type Item = &'a CompiledMatcher;
    type IntoIter = std::slice::Iter<'a, CompiledMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
