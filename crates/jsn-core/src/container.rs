//! Notice container
//!
//! The container is found by its id on every call and never cached, so a
//! host that removes it simply gets a fresh one on the next notice. The
//! first container created for an id wins: later configuration changes do
//! not restyle it.

use jsn_dom::{Document, ElementQuery, NodeId};

use crate::builder::{self, ElementSpec, Target};
use crate::class_name;
use crate::options::Options;

/// Fixed-position style block of every container
fn container_spec(options: &Options) -> ElementSpec {
    let classes = format!("{} {}", options.container_class, options.position_class);
    ElementSpec::div()
        .classes(class_name::split_tokens(&classes))
        .style("top", 0)
        .style("left", 0)
        .style("right", 0)
        .style("zIndex", 1000)
        .style("padding", "10px")
        .style("position", "fixed")
}

/// Look up the container for `options.container_id`, creating it under
/// `options.target_element` when missing and `create` is set.
pub fn get_container(doc: &mut Document, options: &Options, create: bool) -> Option<NodeId> {
    if let Some(existing) = doc.get_element_by_id(&options.container_id) {
        return Some(existing);
    }
    if !create {
        return None;
    }
    Some(create_container(doc, options))
}

/// Build a new container. The result may be detached when the target
/// selector matches nothing.
pub(crate) fn create_container(doc: &mut Document, options: &Options) -> NodeId {
    let built = builder::build(
        doc,
        &container_spec(options),
        Some(&options.container_id),
        Some(Target::Selector(&options.target_element)),
    );
    if built.attached {
        tracing::debug!(
            "Created container #{} under {:?}",
            options.container_id,
            options.target_element
        );
    } else {
        tracing::warn!(
            "Container #{} has no target: {:?} matched nothing",
            options.container_id,
            options.target_element
        );
    }
    built.node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_never_creates() {
        let mut doc = Document::default();
        let options = Options::default();
        let before = doc.tree().len();

        assert_eq!(get_container(&mut doc, &options, false), None);
        assert_eq!(doc.tree().len(), before);
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut doc = Document::default();
        let options = Options::default();

        let first = get_container(&mut doc, &options, true).unwrap();
        let second = get_container(&mut doc, &options, true).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.query_selector_all(".jsn-container").len(), 1);
        assert_eq!(get_container(&mut doc, &options, false), Some(first));
    }

    #[test]
    fn test_container_shape() {
        let mut doc = Document::default();
        let node = get_container(&mut doc, &Options::default(), true).unwrap();

        assert_eq!(doc.parent(node), Some(doc.body()));
        assert_eq!(doc.class_names(node), vec!["jsn-container", "jsn-top-center"]);
        assert_eq!(
            doc.get_attribute(node, "style").as_deref(),
            Some("top: 0; left: 0; right: 0; z-index: 1000; padding: 10px; position: fixed;")
        );
    }

    #[test]
    fn test_first_created_wins() {
        let mut doc = Document::default();
        let node = get_container(&mut doc, &Options::default(), true).unwrap();

        let restyled = Options {
            position_class: "jsn-bottom-left".into(),
            ..Options::default()
        };
        assert_eq!(get_container(&mut doc, &restyled, true), Some(node));
        assert!(!doc.class_names(node).contains(&"jsn-bottom-left".to_string()));
    }

    #[test]
    fn test_distinct_ids_get_distinct_containers() {
        let mut doc = Document::default();
        let a = get_container(&mut doc, &Options::default(), true).unwrap();
        let other = Options {
            container_id: "side".into(),
            ..Options::default()
        };
        let b = get_container(&mut doc, &other, true).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_self_heals_after_external_removal() {
        let mut doc = Document::default();
        let options = Options::default();
        let first = get_container(&mut doc, &options, true).unwrap();

        doc.tree_mut().detach(first).unwrap();
        let second = get_container(&mut doc, &options, true).unwrap();
        assert_ne!(first, second);
        assert!(doc.is_connected(second));
    }
}
