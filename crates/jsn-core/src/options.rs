//! Notice configuration
//!
//! [`Options`] is a fully populated configuration; [`PartialOptions`] is a
//! sparse override layer (the instance-level bag or a per-call override).
//! [`resolve`] merges them shallowly: a key set in a later layer replaces
//! the earlier value outright, nested values included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::NotifyError;

/// Markup of the default dismiss control
pub const DEFAULT_CLOSE_HTML: &str = r#"<button type="button">&times;</button>"#;

/// Theme color variables the notice style block is derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#323330".to_string(),
        }
    }
}

/// Effective configuration for one notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Fallback body text
    pub content: String,
    /// Fallback title text
    pub title: String,
    pub title_class: String,
    pub content_class: String,
    pub icon_class: String,
    /// Selector of the node the container is attached under
    pub target_element: String,
    /// Identity token of the container node
    pub container_id: String,
    pub container_class: String,
    pub notification_class: String,
    pub position_class: String,
    /// Raw markup of the dismiss control
    pub close_html: String,
    pub close_class: String,
    /// Reserved for layout mirroring; carried but not applied
    pub rtl: bool,
    pub theme: Theme,
    /// Keys nobody here understands, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            content: String::new(),
            title: String::new(),
            title_class: "jsn-title".to_string(),
            content_class: "jsn-message".to_string(),
            icon_class: "jsn-info".to_string(),
            target_element: "body".to_string(),
            container_id: "jsn-container".to_string(),
            container_class: "jsn-container".to_string(),
            notification_class: "jsn-notification".to_string(),
            position_class: "jsn-top-center".to_string(),
            close_html: DEFAULT_CLOSE_HTML.to_string(),
            close_class: "toast-close-button".to_string(),
            rtl: false,
            theme: Theme::default(),
            extra: BTreeMap::new(),
        }
    }
}

/// Sparse override layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PartialOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an override layer from a JSON object
    pub fn from_json(json: &str) -> Result<Self, NotifyError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether this layer overrides nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

macro_rules! overlay {
    ($target:expr, $layer:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$layer.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

impl Options {
    /// Apply one override layer on top of this configuration
    pub fn apply(&mut self, layer: &PartialOptions) {
        overlay!(self, layer;
            content,
            title,
            title_class,
            content_class,
            icon_class,
            target_element,
            container_id,
            container_class,
            notification_class,
            position_class,
            close_html,
            close_class,
            rtl,
            theme,
        );
        for (key, value) in &layer.extra {
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Merge base → instance → call into one effective configuration.
pub fn resolve(base: &Options, instance: &PartialOptions, call: Option<&PartialOptions>) -> Options {
    let mut effective = base.clone();
    effective.apply(instance);
    if let Some(call) = call {
        effective.apply(call);
    }
    effective
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.title_class, "jsn-title");
        assert_eq!(options.content_class, "jsn-message");
        assert_eq!(options.icon_class, "jsn-info");
        assert_eq!(options.target_element, "body");
        assert_eq!(options.container_id, "jsn-container");
        assert_eq!(options.position_class, "jsn-top-center");
        assert!(!options.rtl);
    }

    #[test]
    fn test_merge_order() {
        let base = Options::default();
        let instance = PartialOptions {
            container_id: Some("instance".into()),
            position_class: Some("jsn-bottom-right".into()),
            ..Default::default()
        };
        let call = PartialOptions {
            container_id: Some("call".into()),
            ..Default::default()
        };

        let effective = resolve(&base, &instance, Some(&call));
        assert_eq!(effective.container_id, "call");
        assert_eq!(effective.position_class, "jsn-bottom-right");
        assert_eq!(effective.title_class, "jsn-title");

        let effective = resolve(&base, &instance, None);
        assert_eq!(effective.container_id, "instance");
    }

    #[test]
    fn test_nested_values_replaced_wholesale() {
        let base = Options::default();
        let call = PartialOptions::from_json(r##"{"theme": {"text": "#000000"}}"##).unwrap();

        let effective = resolve(&base, &PartialOptions::new(), Some(&call));
        // `background` comes from Theme's own default, not from the base layer
        assert_eq!(effective.theme.text, "#000000");
        assert_eq!(effective.theme.background, "#ffffff");

        let call = PartialOptions::from_json(r##"{"theme": {"background": "#111111", "text": "#222222"}}"##).unwrap();
        let effective = resolve(&base, &PartialOptions::new(), Some(&call));
        assert_eq!(effective.theme, Theme { background: "#111111".into(), text: "#222222".into() });
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let instance = PartialOptions::from_json(r#"{"timeOut": 5000, "closeClass": "x"}"#).unwrap();
        let call = PartialOptions::from_json(r#"{"timeOut": 100}"#).unwrap();

        let effective = resolve(&Options::default(), &instance, Some(&call));
        assert_eq!(effective.close_class, "x");
        assert_eq!(effective.extra.get("timeOut"), Some(&serde_json::json!(100)));
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        assert!(PartialOptions::from_json(r#"{"rtl": "yes"}"#).is_err());
        assert!(PartialOptions::from_json("not json").is_err());
        assert!(PartialOptions::from_json("{}").unwrap().is_empty());
    }
}
