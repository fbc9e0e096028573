//! Inline Style Declarations
//!
//! The set of CSS properties an element's `style` recognizes, and the
//! ordered declaration block behind the `style` attribute. Values are kept
//! as raw CSS text; nothing here parses them.

/// Property identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PropertyId {
    // Display & Layout
    Display,
    Position,
    Float,
    Clear,

    // Flexbox
    FlexDirection,
    FlexWrap,
    JustifyContent,
    AlignItems,
    AlignContent,
    FlexGrow,
    FlexShrink,
    FlexBasis,

    // Box Model
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    Margin,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Padding,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BoxSizing,

    // Border
    Border,
    BorderWidth,
    BorderStyle,
    BorderColor,
    BorderRadius,
    BoxShadow,

    // Colors & Background
    Color,
    BackgroundColor,
    Background,
    Opacity,

    // Text
    FontFamily,
    FontSize,
    FontWeight,
    FontStyle,
    TextAlign,
    TextDecoration,
    LineHeight,
    LetterSpacing,
    WhiteSpace,
    Direction,

    // Visual
    Overflow,
    OverflowX,
    OverflowY,
    Visibility,
    ZIndex,
    Cursor,
    PointerEvents,

    // Positioning
    Top,
    Right,
    Bottom,
    Left,

    // Transform
    Transform,
    TransformOrigin,

    // Transition & Animation
    Transition,
    Animation,
}

const PROPERTY_NAMES: &[(PropertyId, &str)] = &[
    (PropertyId::Display, "display"),
    (PropertyId::Position, "position"),
    (PropertyId::Float, "float"),
    (PropertyId::Clear, "clear"),
    (PropertyId::FlexDirection, "flex-direction"),
    (PropertyId::FlexWrap, "flex-wrap"),
    (PropertyId::JustifyContent, "justify-content"),
    (PropertyId::AlignItems, "align-items"),
    (PropertyId::AlignContent, "align-content"),
    (PropertyId::FlexGrow, "flex-grow"),
    (PropertyId::FlexShrink, "flex-shrink"),
    (PropertyId::FlexBasis, "flex-basis"),
    (PropertyId::Width, "width"),
    (PropertyId::Height, "height"),
    (PropertyId::MinWidth, "min-width"),
    (PropertyId::MinHeight, "min-height"),
    (PropertyId::MaxWidth, "max-width"),
    (PropertyId::MaxHeight, "max-height"),
    (PropertyId::Margin, "margin"),
    (PropertyId::MarginTop, "margin-top"),
    (PropertyId::MarginRight, "margin-right"),
    (PropertyId::MarginBottom, "margin-bottom"),
    (PropertyId::MarginLeft, "margin-left"),
    (PropertyId::Padding, "padding"),
    (PropertyId::PaddingTop, "padding-top"),
    (PropertyId::PaddingRight, "padding-right"),
    (PropertyId::PaddingBottom, "padding-bottom"),
    (PropertyId::PaddingLeft, "padding-left"),
    (PropertyId::BoxSizing, "box-sizing"),
    (PropertyId::Border, "border"),
    (PropertyId::BorderWidth, "border-width"),
    (PropertyId::BorderStyle, "border-style"),
    (PropertyId::BorderColor, "border-color"),
    (PropertyId::BorderRadius, "border-radius"),
    (PropertyId::BoxShadow, "box-shadow"),
    (PropertyId::Color, "color"),
    (PropertyId::BackgroundColor, "background-color"),
    (PropertyId::Background, "background"),
    (PropertyId::Opacity, "opacity"),
    (PropertyId::FontFamily, "font-family"),
    (PropertyId::FontSize, "font-size"),
    (PropertyId::FontWeight, "font-weight"),
    (PropertyId::FontStyle, "font-style"),
    (PropertyId::TextAlign, "text-align"),
    (PropertyId::TextDecoration, "text-decoration"),
    (PropertyId::LineHeight, "line-height"),
    (PropertyId::LetterSpacing, "letter-spacing"),
    (PropertyId::WhiteSpace, "white-space"),
    (PropertyId::Direction, "direction"),
    (PropertyId::Overflow, "overflow"),
    (PropertyId::OverflowX, "overflow-x"),
    (PropertyId::OverflowY, "overflow-y"),
    (PropertyId::Visibility, "visibility"),
    (PropertyId::ZIndex, "z-index"),
    (PropertyId::Cursor, "cursor"),
    (PropertyId::PointerEvents, "pointer-events"),
    (PropertyId::Top, "top"),
    (PropertyId::Right, "right"),
    (PropertyId::Bottom, "bottom"),
    (PropertyId::Left, "left"),
    (PropertyId::Transform, "transform"),
    (PropertyId::TransformOrigin, "transform-origin"),
    (PropertyId::Transition, "transition"),
    (PropertyId::Animation, "animation"),
];

impl PropertyId {
    /// Parse a CSS (kebab-case) property name
    pub fn from_name(name: &str) -> Option<Self> {
        PROPERTY_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(id, _)| *id)
    }

    /// Parse a script-style (camelCase) property name such as `zIndex`
    pub fn from_camel(name: &str) -> Option<Self> {
        if name.contains('-') {
            return None;
        }
        let mut kebab = String::with_capacity(name.len() + 4);
        for c in name.chars() {
            if c.is_ascii_uppercase() {
                kebab.push('-');
                kebab.push(c.to_ascii_lowercase());
            } else {
                kebab.push(c);
            }
        }
        Self::from_name(&kebab)
    }

    /// Accept either spelling
    pub fn lookup(name: &str) -> Option<Self> {
        Self::from_name(name).or_else(|| Self::from_camel(name))
    }

    /// CSS property name
    pub fn name(self) -> &'static str {
        PROPERTY_NAMES
            .iter()
            .find(|(id, _)| *id == self)
            .map_or("", |(_, n)| n)
    }
}

/// Inline style block of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleDeclaration {
    declarations: Vec<(PropertyId, String)>,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property by camelCase or kebab-case name.
    ///
    /// Returns `false` and leaves the block untouched when the property is
    /// not recognized.
    pub fn set_property(&mut self, name: &str, value: &str) -> bool {
        let Some(id) = PropertyId::lookup(name) else {
            return false;
        };
        let value = value.trim();
        if value.is_empty() {
            self.declarations.retain(|(p, _)| *p != id);
            return true;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == id) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.declarations.push((id, value.to_string())),
        }
        true
    }

    /// Value of a property, if set
    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        let id = PropertyId::lookup(name)?;
        self.declarations
            .iter()
            .find(|(p, _)| *p == id)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property, returning its old value
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let id = PropertyId::lookup(name)?;
        let pos = self.declarations.iter().position(|(p, _)| *p == id)?;
        Some(self.declarations.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PropertyId, &str)> {
        self.declarations.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Serialize as `name: value; name: value;`
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{}: {};", p.name(), v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Replace the block from `style` attribute text; unknown properties
    /// are skipped.
    pub fn set_css_text(&mut self, text: &str) {
        self.declarations.clear();
        for decl in text.split(';') {
            if let Some((name, value)) = decl.split_once(':') {
                self.set_property(name.trim(), value);
            }
        }
    }
}
