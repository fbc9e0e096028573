//! DOMTokenList (classList)
//!
//! Ordered set of class tokens. The list itself does not validate tokens
//! beyond rejecting empty strings and whitespace; grammar checks belong to
//! whoever feeds it.

/// DOMTokenList for managing space-separated tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMTokenList {
    tokens: Vec<String>,
}

impl DOMTokenList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_whitespace() {
            list.add(token);
        }
        list
    }

    /// Get number of tokens
    pub fn length(&self) -> usize {
        self.tokens.len()
    }

    /// Get token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Returns `true` if it was not present before.
    pub fn add(&mut self, token: &str) -> bool {
        if token.is_empty() || token.contains(char::is_whitespace) || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_string());
        true
    }

    /// Remove a token. Returns `true` if it was present.
    pub fn remove(&mut self, token: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != token);
        self.tokens.len() != before
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Set from string
    pub fn set_value(&mut self, value: &str) {
        *self = Self::from_string(value);
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for DOMTokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
