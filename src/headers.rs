use crate::response::CorsResponse;
use indexmap::IndexMap;

/// Response headers accumulated while a request is evaluated.
///
/// Nothing reaches the response until [`HeaderSet::apply_to`] runs, so a
/// rejection part way through evaluation never leaks partial headers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    headers: IndexMap<String, String>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::with_capacity(6)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(capacity),
        }
    }

    /// Sets `name`, replacing any value stored under a case-insensitive match.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if let Some(existing) = self
            .headers
            .keys()
            .find(|existing| existing.eq_ignore_ascii_case(&name))
            .cloned()
        {
            self.headers.shift_remove(&existing);
        }
        self.headers.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Writes every header onto `response`, overwriting existing values.
    pub fn apply_to<R: CorsResponse + ?Sized>(&self, response: &mut R) {
        for (name, value) in &self.headers {
            response.set_header(name, value);
        }
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
