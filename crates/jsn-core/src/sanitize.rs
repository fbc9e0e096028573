//! Text escaping & markup sanitization
//!
//! Notice titles and bodies are inserted as text nodes and never parsed.
//! The dismiss control is the one place raw markup reaches the document,
//! so that markup always goes through [`MarkupSanitizer`] first.

use std::collections::HashSet;

use crate::class_name;

/// Escape characters that could open markup or break out of an attribute.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '(' => out.push_str("&#40;"),
            ')' => out.push_str("&#41;"),
            '/' => out.push_str("&#47;"),
            '\\' => out.push_str("&#92;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape an attribute value taken from markup. Character references are
/// already in their encoded form, so `&` is left alone.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Sanitizer configuration
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    /// Elements kept with their (filtered) attributes
    pub allowed_elements: HashSet<String>,
    /// Elements removed together with everything inside them
    pub drop_elements: HashSet<String>,
    /// Attributes kept on allowed elements
    pub allowed_attributes: HashSet<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        let set = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<HashSet<_>>();
        Self {
            allowed_elements: set(&["button", "span", "i", "b", "em", "strong", "small", "abbr"]),
            drop_elements: set(&[
                "script", "style", "iframe", "frame", "frameset", "object", "embed", "applet", "form", "input",
                "select", "textarea", "base", "meta", "link", "template", "noscript", "svg", "math",
            ]),
            allowed_attributes: set(&["type", "class", "title", "role", "aria-label", "aria-hidden"]),
        }
    }
}

/// Allowlist sanitizer for small inline fragments
#[derive(Debug, Clone)]
pub struct MarkupSanitizer {
    config: SanitizerConfig,
}

impl MarkupSanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    pub fn default_safe() -> Self {
        Self::new(SanitizerConfig::default())
    }

    /// Sanitize a markup fragment.
    ///
    /// Allowed tags are re-emitted with filtered attributes, dropped tags
    /// lose their whole content, anything else is unwrapped to its text.
    /// Character references in text are left as written.
    pub fn sanitize(&self, html: &str) -> String {
        let mut output = String::with_capacity(html.len());
        let mut dropped_depth: u32 = 0;
        let mut chars = html.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '<' {
                if dropped_depth == 0 {
                    match c {
                        '>' => output.push_str("&gt;"),
                        c => output.push(c),
                    }
                }
                continue;
            }

            match chars.peek() {
                Some(next) if next.is_ascii_alphabetic() || *next == '/' || *next == '!' => {}
                _ => {
                    if dropped_depth == 0 {
                        output.push_str("&lt;");
                    }
                    continue;
                }
            }

            let Some(tag) = read_tag(&mut chars) else {
                // Unterminated tag: nothing after it can be trusted.
                break;
            };
            if tag.starts_with('!') {
                continue;
            }

            let is_closing = tag.starts_with('/');
            let body = tag.trim_start_matches('/');
            let name_end = body
                .find(|c: char| c.is_whitespace() || c == '/')
                .unwrap_or(body.len());
            let tag_name = body[..name_end].to_ascii_lowercase();
            let self_closing = tag.trim_end().ends_with('/') || VOID_ELEMENTS.contains(&tag_name.as_str());

            if self.config.drop_elements.contains(&tag_name) {
                if is_closing {
                    dropped_depth = dropped_depth.saturating_sub(1);
                } else if !self_closing {
                    dropped_depth += 1;
                }
                tracing::trace!("Dropped <{}> from markup", tag_name);
                continue;
            }
            if dropped_depth > 0 || !self.config.allowed_elements.contains(&tag_name) {
                continue;
            }

            output.push('<');
            if is_closing {
                output.push('/');
                output.push_str(&tag_name);
            } else {
                output.push_str(&tag_name);
                for (name, value) in parse_attributes(&body[name_end..]) {
                    if let Some(value) = self.filter_attribute(&name, &value) {
                        output.push_str(&format!(" {}=\"{}\"", name, value));
                    }
                }
            }
            output.push('>');
        }
        output
    }

    fn filter_attribute(&self, name: &str, value: &str) -> Option<String> {
        if name.starts_with("on") || !self.config.allowed_attributes.contains(name) {
            return None;
        }
        if name == "class" {
            let tokens = class_name::valid_tokens(class_name::split_tokens(value));
            return Some(tokens.join(" "));
        }
        Some(escape_attribute(value))
    }
}

impl Default for MarkupSanitizer {
    fn default() -> Self {
        Self::default_safe()
    }
}

/// Elements that never have content, closed or not
const VOID_ELEMENTS: &[&str] = &["base", "embed", "input", "link", "meta"];

/// Read up to the closing `>` of a tag, honoring quoted attribute values.
fn read_tag(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut tag = String::new();
    let mut quote: Option<char> = None;
    for c in chars.by_ref() {
        match (quote, c) {
            (None, '>') => return Some(tag),
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            _ => {}
        }
        tag.push(c);
    }
    None
}

fn parse_attributes(attrs: &str) -> Vec<(String, String)> {
    let mut result = Vec::new();
    let mut chars = attrs.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace() || *c == '/').is_some() {}
        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=' && *c != '/') {
            name.push(c);
        }
        if name.is_empty() {
            break;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            match chars.next_if(|c| *c == '"' || *c == '\'') {
                Some(q) => {
                    for c in chars.by_ref() {
                        if c == q {
                            break;
                        }
                        value.push(c);
                    }
                }
                None => {
                    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                        value.push(c);
                    }
                }
            }
        }
        result.push((name.to_ascii_lowercase(), value));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(
            escape_text(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert&#40;&quot;x&quot;&#41;&lt;&#47;script&gt;"
        );
        assert_eq!(escape_text("a & b 'c' \\"), "a &amp; b &#39;c&#39; &#92;");
        assert_eq!(escape_text("plain"), "plain");
    }

    #[test]
    fn test_default_close_markup_survives() {
        let sanitizer = MarkupSanitizer::default_safe();
        let html = r#"<button type="button">&times;</button>"#;
        assert_eq!(sanitizer.sanitize(html), html);
    }

    #[test]
    fn test_drops_scripts_and_handlers() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(
            sanitizer.sanitize(r#"<button onclick="steal()" type="button">x<script>alert(1)</script></button>"#),
            r#"<button type="button">x</button>"#
        );
    }

    #[test]
    fn test_unwraps_unknown_elements() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(sanitizer.sanitize(r#"<a href="javascript:x()">close</a>"#), "close");
        assert_eq!(sanitizer.sanitize("<div><span>x</span></div>"), "<span>x</span>");
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(
            sanitizer.sanitize(r#"<span title="a>b">x</span>"#),
            r#"<span title="a&gt;b">x</span>"#
        );
    }

    #[test]
    fn test_attribute_references_are_not_escaped_twice() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(
            sanitizer.sanitize(r#"<span title="a &amp; b" aria-label='say "hi"'>x</span>"#),
            r#"<span title="a &amp; b" aria-label="say &quot;hi&quot;">x</span>"#
        );
    }

    #[test]
    fn test_class_tokens_are_filtered() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(
            sanitizer.sanitize(r#"<i class="icon <x> icon-close">x</i>"#),
            r#"<i class="icon icon-close">x</i>"#
        );
    }

    #[test]
    fn test_stray_angle_brackets() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(sanitizer.sanitize("1 < 2 > 0"), "1 &lt; 2 &gt; 0");
        assert_eq!(sanitizer.sanitize("x<span"), "x");
        assert_eq!(sanitizer.sanitize("<!-- c -->y"), "y");
    }

    #[test]
    fn test_void_dropped_elements() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(sanitizer.sanitize("<input type=text><b>after</b>"), "<b>after</b>");
    }

    #[test]
    fn test_nested_dropped_elements() {
        let sanitizer = MarkupSanitizer::default_safe();
        assert_eq!(
            sanitizer.sanitize("<svg><script>1</script><b>in</b></svg><b>out</b>"),
            "<b>out</b>"
        );
    }
}
