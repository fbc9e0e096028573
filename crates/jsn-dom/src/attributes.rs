//! Element Attributes
//!
//! Insertion-ordered attribute map. Names are stored lowercase; elements
//! rarely carry more than a handful, so lookups are linear.

/// Single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
}

impl Attr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// Event handler content attribute (`onclick`, `onload`, ...)
    pub fn is_event_handler(&self) -> bool {
        self.name.starts_with("on")
    }
}

/// Named node map (attribute collection)
#[derive(Debug, Clone, Default)]
pub struct NamedNodeMap {
    attributes: Vec<Attr>,
}

impl NamedNodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of attributes
    pub fn length(&self) -> usize {
        self.attributes.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.position(name).map(|i| self.attributes[i].value.as_str())
    }

    /// Set attribute, keeping the original position when it already exists
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.position(name) {
            Some(i) => self.attributes[i].value = value.to_string(),
            None => self.attributes.push(Attr::new(name, value)),
        }
    }

    /// Remove attribute by name
    pub fn remove_attribute(&mut self, name: &str) -> Option<Attr> {
        self.position(name).map(|i| self.attributes.remove(i))
    }

    /// Check if attribute exists
    pub fn has_attribute(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterate over attributes
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attributes.iter()
    }
}
