//! HTML serialization (outerHTML / innerHTML)

use crate::{DomTree, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Serialize a node and its subtree
pub(crate) fn outer_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, &mut out);
    out
}

/// Serialize only the children of a node
pub(crate) fn inner_html(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    for (child, _) in tree.children(id) {
        write_node(tree, child, &mut out);
    }
    out
}

fn write_node(tree: &DomTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.data {
        NodeData::Document => {
            for (child, _) in tree.children(id) {
                write_node(tree, child, out);
            }
        }
        NodeData::Text(text) => escape_into(text, false, out),
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::Element(elem) => {
            out.push('<');
            out.push_str(&elem.tag);
            for (name, value) in reflected_attrs(elem) {
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                escape_into(&value, true, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&elem.tag.as_str()) {
                return;
            }
            for (child, _) in tree.children(id) {
                write_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&elem.tag);
            out.push('>');
        }
    }
}

fn reflected_attrs(elem: &crate::ElementData) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    for name in ["id", "class", "style"] {
        if let Some(value) = elem.get_attr(name) {
            attrs.push((name.to_string(), value));
        }
    }
    attrs.extend(elem.attrs.iter().map(|a| (a.name.clone(), a.value.clone())));
    attrs
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_escapes() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("<b>&</b>");
        tree.append_child(div, text).unwrap();
        if let Some(elem) = tree.get_mut(div).and_then(|n| n.as_element_mut()) {
            elem.set_attr("title", "say \"hi\"");
            elem.set_attr("class", "a b");
        }

        assert_eq!(
            outer_html(&tree, div),
            r#"<div class="a b" title="say &quot;hi&quot;">&lt;b&gt;&amp;&lt;/b&gt;</div>"#
        );
        assert_eq!(inner_html(&tree, div), "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_void_elements() {
        let mut tree = DomTree::new();
        let br = tree.create_element("br");
        assert_eq!(outer_html(&tree, br), "<br>");
    }
}
