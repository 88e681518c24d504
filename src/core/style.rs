//! Layer style options and the per-kind settings schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::render::Color;

/// One style option value handed to the rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Color(Color),
    Colormap(String),
}

impl StyleValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn colormap(name: impl Into<String>) -> Self {
        Self::Colormap(name.into())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Color> for StyleValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// Ordered style option mapping; insertion order is preserved for display.
pub type StyleOptions = IndexMap<String, StyleValue>;

/// Builds [`StyleOptions`] from `(key, value)` pairs.
pub fn style_options<K, V, I>(pairs: I) -> StyleOptions
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Left-biased merge: the result holds the union of keys, `overrides` win.
///
/// Keys present in `defaults` keep their default position; keys only found
/// in `overrides` are appended in override order.
#[must_use]
pub fn merge_over_defaults(overrides: &StyleOptions, defaults: &StyleOptions) -> StyleOptions {
    let mut merged = defaults.clone();
    merge_into(&mut merged, overrides);
    merged
}

/// Writes every entry of `updates` into `target`, replacing existing values.
pub fn merge_into(target: &mut StyleOptions, updates: &StyleOptions) {
    for (key, value) in updates {
        target.insert(key.clone(), value.clone());
    }
}

/// Input widget category for one style option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFieldKind {
    Float,
    Color,
    Colormap,
    Choice(&'static [&'static str]),
    OptionalText,
}

/// Settings-schema entry describing one editable style option of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: StyleFieldKind,
}

impl StyleField {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str, kind: StyleFieldKind) -> Self {
        Self { key, label, kind }
    }

    /// Whether `value` can be shown and edited through this field.
    #[must_use]
    pub fn accepts(&self, value: &StyleValue) -> bool {
        match (self.kind, value) {
            (StyleFieldKind::Float, StyleValue::Number(number)) => number.is_finite(),
            (StyleFieldKind::Color, StyleValue::Color(color)) => color.validate().is_ok(),
            (StyleFieldKind::Color, StyleValue::Text(text)) => text.parse::<Color>().is_ok(),
            (StyleFieldKind::Colormap, StyleValue::Colormap(_)) => true,
            (StyleFieldKind::Choice(options), StyleValue::Text(text)) => {
                options.contains(&text.as_str())
            }
            (StyleFieldKind::OptionalText, StyleValue::Text(_)) => true,
            _ => false,
        }
    }
}

pub const MARKERS: &[&str] = &[
    ".", ",", "o", "*", "+", "x", "d", "D", "v", "^", "<", ">", "s", "p", "|", "_",
];

pub const LINE_STYLES: &[&str] = &["-", "--", "-.", ":"];

pub(crate) const TIMESERIES_FIELDS: &[StyleField] = &[
    StyleField::new("alpha", "alpha", StyleFieldKind::Float),
    StyleField::new("color", "color", StyleFieldKind::Color),
    StyleField::new("linewidth", "linewidth", StyleFieldKind::Float),
    StyleField::new("linestyle", "linestyle", StyleFieldKind::Choice(LINE_STYLES)),
    StyleField::new("label", "label", StyleFieldKind::OptionalText),
    StyleField::new("marker", "marker", StyleFieldKind::Choice(MARKERS)),
];

pub(crate) const POINTS_FIELDS: &[StyleField] = &[
    StyleField::new("color", "color", StyleFieldKind::Color),
    StyleField::new("s", "pointsize", StyleFieldKind::Float),
    StyleField::new("alpha", "alpha", StyleFieldKind::Float),
];

pub(crate) const VALUE_POINTS_FIELDS: &[StyleField] = &[
    StyleField::new("cmap", "colormap", StyleFieldKind::Colormap),
    StyleField::new("s", "pointsize", StyleFieldKind::Float),
    StyleField::new("alpha", "alpha", StyleFieldKind::Float),
];

pub(crate) const MESH_FIELDS: &[StyleField] =
    &[StyleField::new("cmap", "colormap", StyleFieldKind::Colormap)];

pub(crate) const VECTOR_FIELDS: &[StyleField] = &[
    StyleField::new("width", "width", StyleFieldKind::Float),
    StyleField::new("color", "color", StyleFieldKind::Color),
];
