//! Element Query
//!
//! querySelector, getElementsByClassName, closest, matches.
//!
//! Supported selector grammar: compound selectors made of a tag or `*`
//! followed by any number of `#id` / `.class` parts, joined by the
//! descendant combinator (whitespace). Anything else fails to parse and
//! matches nothing.

use crate::{DomTree, NodeId};

/// Element query trait
pub trait ElementQuery {
    /// Get connected element by id
    fn get_element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Query single element by CSS selector
    fn query_selector(&self, selector: &str) -> Option<NodeId>;

    /// Query all elements by CSS selector
    fn query_selector_all(&self, selector: &str) -> Vec<NodeId>;

    /// Get elements by class name
    fn get_elements_by_class_name(&self, class: &str) -> Vec<NodeId>;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> Option<NodeId>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> bool;
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Class(String),
    Id(String),
    Universal,
}

impl SimpleSelector {
    /// Check one element against this selector
    fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.get(node).and_then(|n| n.as_element()) else {
            return false;
        };
        match self {
            Self::Universal => true,
            Self::Tag(tag) => elem.tag.eq_ignore_ascii_case(tag),
            Self::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => elem.has_class(class),
        }
    }
}

/// Parsed selector: compounds from outermost to the subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Vec<SimpleSelector>>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(s: &str) -> Option<Self> {
        let compounds = s
            .split_whitespace()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        if compounds.is_empty() {
            return None;
        }
        Some(Self { compounds })
    }

    /// Check whether `node` is matched by this selector
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        if !compound_matches(subject, tree, node) {
            return false;
        }

        // Greedy right-to-left walk is exact for descendant-only chains.
        let mut remaining = ancestors.iter().rev().peekable();
        let mut current = tree.parent(node);
        while let Some(compound) = remaining.peek() {
            let Some(id) = current else {
                return false;
            };
            if compound_matches(compound, tree, id) {
                remaining.next();
            }
            current = tree.parent(id);
        }
        true
    }
}

fn compound_matches(compound: &[SimpleSelector], tree: &DomTree, node: NodeId) -> bool {
    compound.iter().all(|s| s.matches(tree, node))
}

fn parse_compound(s: &str) -> Option<Vec<SimpleSelector>> {
    let mut parts = Vec::new();
    let mut rest = s;

    let tag_end = rest.find(['#', '.']).unwrap_or(rest.len());
    let (tag, tail) = rest.split_at(tag_end);
    match tag {
        "" => {}
        "*" => parts.push(SimpleSelector::Universal),
        t if is_ident(t) => parts.push(SimpleSelector::Tag(t.to_ascii_lowercase())),
        _ => return None,
    }
    rest = tail;

    while let Some(marker) = rest.chars().next() {
        let body = &rest[1..];
        let end = body.find(['#', '.']).unwrap_or(body.len());
        let (name, tail) = body.split_at(end);
        if !is_ident(name) {
            return None;
        }
        parts.push(match marker {
            '#' => SimpleSelector::Id(name.to_string()),
            _ => SimpleSelector::Class(name.to_string()),
        });
        rest = tail;
    }

    if parts.is_empty() { None } else { Some(parts) }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_selector_parse() {
        let sel = Selector::parse("div").unwrap();
        assert_eq!(sel.compounds, vec![vec![SimpleSelector::Tag("div".into())]]);

        let sel = Selector::parse("div#main.active").unwrap();
        assert_eq!(
            sel.compounds[0],
            vec![
                SimpleSelector::Tag("div".into()),
                SimpleSelector::Id("main".into()),
                SimpleSelector::Class("active".into()),
            ]
        );

        assert!(Selector::parse("*").is_some());
        assert!(Selector::parse("body .jsn-container").is_some());
    }

    #[test]
    fn test_unsupported_selectors() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("   ").is_none());
        assert!(Selector::parse("div > p").is_none());
        assert!(Selector::parse("[data-x]").is_none());
        assert!(Selector::parse("a:hover").is_none());
        assert!(Selector::parse("#").is_none());
    }

    #[test]
    fn test_descendant_match() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let wrap = tree.create_element("div");
        let leaf = tree.create_element("span");
        tree.append_child(tree.root(), body).unwrap();
        tree.append_child(body, wrap).unwrap();
        tree.append_child(wrap, leaf).unwrap();

        assert!(Selector::parse("body span").unwrap().matches(&tree, leaf));
        assert!(Selector::parse("body div span").unwrap().matches(&tree, leaf));
        assert!(!Selector::parse("span div").unwrap().matches(&tree, leaf));
        assert!(!Selector::parse("p span").unwrap().matches(&tree, leaf));
    }
}
