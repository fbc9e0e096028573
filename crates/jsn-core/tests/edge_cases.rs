//! Edge case tests for jsn-core
//!
//! Hostile markup, missing anchors and repeated removal.

use std::cell::RefCell;
use std::rc::Rc;

use jsn_core::jsn_dom::{Document, ElementQuery, NodeOperations};
use jsn_core::{NoticeEvent, NoticeId, Notifier, NotifyOutcome, PartialOptions};

// ============================================================================
// HOSTILE CONFIGURATION
// ============================================================================

#[test]
fn test_script_in_close_markup_is_neutralized() {
    let mut doc = Document::default();
    let mut notifier = Notifier::with_options(PartialOptions {
        close_html: Some(r#"<button onclick="steal()">x</button><script>alert(1)</script><img src=x onerror=alert(2)>"#.into()),
        ..Default::default()
    });

    notifier.info(&mut doc, None, "c", None).unwrap();

    assert!(doc.query_selector("script").is_none());
    assert!(doc.query_selector("img").is_none());
    let button = doc.query_selector(".toast-close-button button").unwrap();
    assert_eq!(doc.get_attribute(button, "onclick"), None);
    assert_eq!(doc.text_content(button), "x");
}

#[test]
fn test_close_markup_attribute_references_decode_once() {
    let mut doc = Document::default();
    let mut notifier = Notifier::with_options(PartialOptions {
        close_html: Some(r#"<button type="button" title="a &amp; b">x</button>"#.into()),
        ..Default::default()
    });

    notifier.info(&mut doc, None, "c", None).unwrap();

    let button = doc.query_selector(".toast-close-button button").unwrap();
    assert_eq!(doc.get_attribute(button, "title").as_deref(), Some("a & b"));
}

#[test]
fn test_invalid_class_tokens_are_dropped() {
    let mut doc = Document::default();
    let overrides = PartialOptions {
        notification_class: Some("ok \"><script> also-ok".into()),
        ..Default::default()
    };
    let mut notifier = Notifier::new();

    notifier.info(&mut doc, None, "c", Some(&overrides)).unwrap();

    let notice = doc.get_element_by_id("jsn-notice-1").unwrap();
    assert_eq!(doc.class_names(notice), vec!["ok", "also-ok", "jsn-info"]);
}

#[test]
fn test_empty_close_markup() {
    let mut doc = Document::default();
    let overrides = PartialOptions {
        close_html: Some(String::new()),
        ..Default::default()
    };
    let mut notifier = Notifier::new();

    assert!(notifier.info(&mut doc, None, "c", Some(&overrides)).unwrap().is_visible());
    let close = doc.query_selector(".toast-close-button").unwrap();
    assert_eq!(doc.first_element_child(close), None);
}

// ============================================================================
// MISSING ANCHORS
// ============================================================================

#[test]
fn test_missing_target_leaves_notice_detached() {
    let mut doc = Document::default();
    let overrides = PartialOptions {
        target_element: Some("#app".into()),
        ..Default::default()
    };
    let mut notifier = Notifier::new();

    let outcome = notifier.info(&mut doc, None, "lost", Some(&overrides)).unwrap();
    assert_eq!(outcome, NotifyOutcome::Detached(NoticeId(1)));
    assert!(doc.get_element_by_id("jsn-container").is_none());
    assert_eq!(notifier.current_id(), 1);
    assert_eq!(notifier.last_content(), Some("lost"));
}

#[test]
fn test_invalid_target_selector() {
    let mut doc = Document::default();
    let overrides = PartialOptions {
        target_element: Some("div > p".into()),
        ..Default::default()
    };
    let mut notifier = Notifier::new();

    let outcome = notifier.info(&mut doc, None, "x", Some(&overrides)).unwrap();
    assert!(!outcome.is_visible());
}

#[test]
fn test_container_recreated_after_host_removes_it() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    notifier.info(&mut doc, None, "a", None).unwrap();

    let container = doc.get_element_by_id("jsn-container").unwrap();
    doc.remove(container).unwrap();
    notifier.info(&mut doc, None, "b", None).unwrap();

    let fresh = doc.get_element_by_id("jsn-container").unwrap();
    assert_ne!(fresh, container);
    assert_eq!(doc.element_children(fresh).len(), 1);
}

#[test]
fn test_notices_removed_by_host_are_forgotten() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    let dismissed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&dismissed);
    notifier.subscribe(move |event| {
        if let NoticeEvent::Dismissed { id, .. } = event {
            sink.borrow_mut().push(*id);
        }
    });

    notifier.standard(&mut doc, None, "a", None).unwrap();
    notifier.standard(&mut doc, None, "b", None).unwrap();
    let container = doc.get_element_by_id("jsn-container").unwrap();
    doc.remove(container).unwrap();
    assert!(notifier.visible(&doc).is_empty());
    assert_eq!(notifier.notice_node(&doc, NoticeId(1)), None);

    let outcome = notifier.standard(&mut doc, None, "c", None).unwrap();
    assert_eq!(outcome, NotifyOutcome::Displayed(NoticeId(3)));
    assert_eq!(notifier.visible(&doc), vec![NoticeId(3)]);
    assert_eq!(doc.query_selector_all(".jsn-notification").len(), 1);

    assert!(!notifier.remove(&mut doc, Some(NoticeId(1))));
    assert_eq!(notifier.clear(&mut doc), 1);
    assert_eq!(*dismissed.borrow(), vec![NoticeId(3)]);
}

#[test]
fn test_notice_replaced_by_host_markup_is_forgotten() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    notifier.info(&mut doc, None, "a", None).unwrap();

    let container = doc.get_element_by_id("jsn-container").unwrap();
    doc.set_inner_html(container, "<span>host content</span>").unwrap();

    assert!(notifier.visible(&doc).is_empty());
    assert!(!notifier.remove(&mut doc, None));
    assert_eq!(doc.text_content(container), "host content");
}

// ============================================================================
// RESOURCES
// ============================================================================

#[test]
fn test_arena_is_bounded_across_notify_and_remove() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();

    notifier.info(&mut doc, Some("t"), "0", None).unwrap();
    notifier.remove(&mut doc, None);
    let slots = doc.tree().slots();
    let live = doc.tree().len();

    for n in 1..50 {
        notifier.info(&mut doc, Some("t"), &n.to_string(), None).unwrap();
        notifier.remove(&mut doc, None);
    }
    assert_eq!(doc.tree().slots(), slots);
    assert_eq!(doc.tree().len(), live);
}

#[test]
fn test_arena_is_bounded_across_clicks_and_clear() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    let mut slots = Vec::new();

    for round in 0..10 {
        notifier.info(&mut doc, None, &format!("a{round}"), None).unwrap();
        notifier.info(&mut doc, None, &format!("b{round}"), None).unwrap();
        let button = doc.query_selector(".toast-close-button button").unwrap();
        assert_eq!(notifier.handle_click(&mut doc, button).len(), 1);
        assert_eq!(notifier.clear(&mut doc), 1);
        slots.push(doc.tree().slots());
    }
    assert!(slots.iter().all(|n| *n == slots[0]));
}

#[test]
fn test_missing_target_does_not_accumulate_containers() {
    let mut doc = Document::default();
    let overrides = PartialOptions {
        target_element: Some("#app".into()),
        ..Default::default()
    };
    let mut notifier = Notifier::new();
    let slots = doc.tree().slots();

    for n in 0..20 {
        let outcome = notifier.info(&mut doc, None, &n.to_string(), Some(&overrides)).unwrap();
        assert!(!outcome.is_visible());
    }
    assert_eq!(doc.tree().slots(), slots + 1);
    assert_eq!(doc.tree().len(), slots);
}

// ============================================================================
// REMOVAL
// ============================================================================

#[test]
fn test_remove_is_idempotent() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    notifier.info(&mut doc, None, "a", None).unwrap();

    assert!(notifier.remove(&mut doc, Some(NoticeId(1))));
    assert!(!notifier.remove(&mut doc, Some(NoticeId(1))));
    assert!(!notifier.remove(&mut doc, Some(NoticeId(42))));
    assert_eq!(notifier.clear(&mut doc), 0);
}

#[test]
fn test_remove_keeps_dedup_state() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    notifier.info(&mut doc, None, "a", None).unwrap();
    notifier.remove(&mut doc, None);

    assert_eq!(notifier.info(&mut doc, None, "a", None).unwrap(), NotifyOutcome::Suppressed);
}

#[test]
fn test_removed_notice_listeners_are_gone() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();
    notifier.info(&mut doc, None, "a", None).unwrap();
    let button = doc.query_selector(".toast-close-button button").unwrap();

    notifier.remove(&mut doc, None);
    assert!(doc.dispatch_event(button, jsn_core::jsn_dom::DomEventType::Click).is_empty());
}

#[test]
fn test_empty_content_still_builds_body() {
    let mut doc = Document::default();
    let mut notifier = Notifier::new();

    let outcome = notifier.info(&mut doc, None, "", None).unwrap();
    assert_eq!(outcome, NotifyOutcome::Displayed(NoticeId(1)));
    let body = doc.query_selector(".jsn-message").unwrap();
    assert_eq!(doc.text_content(body), "");

    // empty again is a duplicate
    assert_eq!(notifier.info(&mut doc, None, "", None).unwrap(), NotifyOutcome::Suppressed);
}

#[test]
fn test_bad_override_json() {
    assert!(PartialOptions::from_json(r#"{"containerId": 5}"#).is_err());
}
