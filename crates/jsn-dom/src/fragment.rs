//! Markup fragments (innerHTML)
//!
//! Uses html5ever's RcDom and converts the parsed `<body>` contents into our
//! arena. html5ever wraps fragments in html/head/body, so only the body's
//! children are taken.

use crate::{DomResult, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse `html` and append the resulting nodes to `parent`.
///
/// Returns the ids of the top-level nodes that were inserted.
pub(crate) fn append_fragment(tree: &mut DomTree, parent: NodeId, html: &str) -> DomResult<Vec<NodeId>> {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    let Some(body) = find_element(&dom.document, "body") else {
        tracing::debug!("Fragment produced no body, nothing inserted");
        return Ok(Vec::new());
    };

    let mut inserted = Vec::new();
    for child in body.children.borrow().iter() {
        if let Some(id) = convert_node(child, tree, parent)? {
            inserted.push(id);
        }
    }
    tracing::trace!("Inserted {} fragment nodes", inserted.len());
    Ok(inserted)
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let RcNodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

/// Convert an RcDom node (and its subtree) under `parent`
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) -> DomResult<Option<NodeId>> {
    match &handle.data {
        RcNodeData::Text { contents } => {
            let id = tree.create_text(&contents.borrow());
            tree.append_child(parent, id)?;
            Ok(Some(id))
        }
        RcNodeData::Comment { contents } => {
            let id = tree.create_comment(contents);
            tree.append_child(parent, id)?;
            Ok(Some(id))
        }
        RcNodeData::Element { name, attrs, .. } => {
            // Inert host: scripts are never materialized.
            if &*name.local == "script" {
                return Ok(None);
            }

            let id = tree.create_element(&name.local);
            if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                for attr in attrs.borrow().iter() {
                    elem.set_attr(&attr.name.local, &attr.value);
                }
            }
            tree.append_child(parent, id)?;

            for child in handle.children.borrow().iter() {
                convert_node(child, tree, id)?;
            }
            Ok(Some(id))
        }
        RcNodeData::Document | RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_decodes_entities() {
        let mut tree = DomTree::new();
        let host = tree.create_element("div");

        let inserted = append_fragment(&mut tree, host, r#"<button type="button">&times;</button>"#).unwrap();
        assert_eq!(inserted.len(), 1);

        let button = tree.get(inserted[0]).unwrap().as_element().unwrap();
        assert_eq!(button.tag, "button");
        assert_eq!(button.get_attr("type").as_deref(), Some("button"));
        assert_eq!(tree.text_content(inserted[0]), "\u{d7}");
    }

    #[test]
    fn test_fragment_skips_scripts() {
        let mut tree = DomTree::new();
        let host = tree.create_element("div");

        let inserted = append_fragment(&mut tree, host, "<script>alert(1)</script><i>x</i>").unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(tree.text_content(host), "x");
    }

    #[test]
    fn test_whitespace_between_elements_is_kept() {
        let mut tree = DomTree::new();
        let host = tree.create_element("div");

        let inserted = append_fragment(&mut tree, host, "<b>a</b> <b>b</b>").unwrap();
        assert_eq!(inserted.len(), 3);
        assert_eq!(tree.text_content(host), "a b");
    }

    #[test]
    fn test_plain_text_fragment() {
        let mut tree = DomTree::new();
        let host = tree.create_element("div");

        append_fragment(&mut tree, host, "close").unwrap();
        assert_eq!(tree.text_content(host), "close");
    }
}
