//! Marker attribute list: the ordered component names upgraded on an element.
use std::fmt;

/// Comma-separated, order-preserving list of component names.
///
/// Parsing trims every token and drops empty ones, so `"Clock, ,Timer"`
/// reads as `["Clock", "Timer"]`. Membership is an exact token match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerList(Vec<String>);

impl MarkerList {
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn push(&mut self, name: &str) {
        self.0.push(name.to_string());
    }

    /// Remove the first occurrence of `name`; false if it was not listed
    pub fn remove(&mut self, name: &str) -> bool {
        match self.0.iter().position(|n| n == name) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for MarkerList {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for MarkerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}
