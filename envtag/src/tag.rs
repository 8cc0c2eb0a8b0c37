//! Tag string parsing
//!
//! A tag is a space-separated list of directives, each either a bare name
//! (`required`) or `name=value` (`default=8080`). Values cannot contain spaces
//! and are not quoted; only the first `=` separates name from value.

/// Directives of one tag, in first-appearance order.
///
/// A directive repeated later in the tag overwrites the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Directives<'a> {
    /// Split `tag` into directives.
    ///
    /// An empty tag, or one made only of spaces, has no directives.
    pub fn parse(tag: &'a str) -> Self {
        let mut directives = Self::default();
        for token in tag.split(' ').filter(|token| !token.is_empty()) {
            let (name, value) = token.split_once('=').unwrap_or((token, ""));
            directives.insert(name, value);
        }
        directives
    }

    fn insert(&mut self, name: &'a str, value: &'a str) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of directive `name`, if present (`""` for bare directives).
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == name)
            .map(|(_, value)| *value)
    }

    /// Remove directive `name` and return its value.
    pub fn take(&mut self, name: &str) -> Option<&'a str> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| *existing == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether the tag declared no directives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for Directives<'a> {
    type Item = (&'a str, &'a str);
    type IntoIter = std::vec::IntoIter<(&'a str, &'a str)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
