//! Typed axes settings (labels, limits, ticks, aspect, scales) and their validation.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::limits::AxisRange;
use crate::error::{PlotError, PlotResult};

/// Axes property with a matching setter on every rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxesProperty {
    Title,
    XLabel,
    YLabel,
    XLim,
    YLim,
    XTicks,
    YTicks,
    Aspect,
    XScale,
    YScale,
}

impl AxesProperty {
    pub const ALL: [Self; 10] = [
        Self::Title,
        Self::XLabel,
        Self::YLabel,
        Self::XLim,
        Self::YLim,
        Self::XTicks,
        Self::YTicks,
        Self::Aspect,
        Self::XScale,
        Self::YScale,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::XLabel => "xlabel",
            Self::YLabel => "ylabel",
            Self::XLim => "xlim",
            Self::YLim => "ylim",
            Self::XTicks => "xticks",
            Self::YTicks => "yticks",
            Self::Aspect => "aspect",
            Self::XScale => "xscale",
            Self::YScale => "yscale",
        }
    }

    /// Checks that `value` is the variant this property takes and is finite.
    pub fn validate(self, value: &SettingValue) -> PlotResult<()> {
        let invalid = |reason: String| PlotError::InvalidSetting {
            key: self.key().to_owned(),
            reason,
        };
        match (self, value) {
            (Self::Title | Self::XLabel | Self::YLabel, SettingValue::Text(_)) => Ok(()),
            (Self::XLim | Self::YLim, SettingValue::Range(range)) => {
                if range.is_finite() {
                    Ok(())
                } else {
                    Err(invalid(format!("limits must be finite, got {range:?}")))
                }
            }
            (Self::XTicks | Self::YTicks, SettingValue::Ticks(ticks)) => {
                if ticks.iter().all(|tick| tick.is_finite()) {
                    Ok(())
                } else {
                    Err(invalid("tick positions must be finite".to_owned()))
                }
            }
            (Self::Aspect, SettingValue::Aspect(AspectMode::Ratio(ratio))) => {
                if ratio.is_finite() && *ratio > 0.0 {
                    Ok(())
                } else {
                    Err(invalid(format!("aspect ratio must be finite and > 0, got {ratio}")))
                }
            }
            (Self::Aspect, SettingValue::Aspect(_)) => Ok(()),
            (Self::XScale | Self::YScale, SettingValue::Scale(_)) => Ok(()),
            (_, other) => Err(invalid(format!("unexpected {} value", other.variant_name()))),
        }
    }
}

impl FromStr for AxesProperty {
    type Err = PlotError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|property| property.key() == key)
            .ok_or_else(|| PlotError::UnknownSetting(key.to_owned()))
    }
}

impl fmt::Display for AxesProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectMode {
    Auto,
    Equal,
    Ratio(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    Linear,
    Log,
    Symlog,
}

/// Value stored for one [`AxesProperty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingValue {
    Text(String),
    Range(AxisRange),
    Ticks(Vec<f64>),
    Aspect(AspectMode),
    Scale(AxisScale),
}

impl SettingValue {
    fn variant_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Range(_) => "range",
            Self::Ticks(_) => "ticks",
            Self::Aspect(_) => "aspect",
            Self::Scale(_) => "scale",
        }
    }

    #[must_use]
    pub fn as_range(&self) -> Option<AxisRange> {
        match self {
            Self::Range(range) => Some(*range),
            _ => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<AxisRange> for SettingValue {
    fn from(value: AxisRange) -> Self {
        Self::Range(value)
    }
}

impl From<(f64, f64)> for SettingValue {
    fn from(value: (f64, f64)) -> Self {
        Self::Range(value.into())
    }
}

impl From<Vec<f64>> for SettingValue {
    fn from(value: Vec<f64>) -> Self {
        Self::Ticks(value)
    }
}

impl From<AspectMode> for SettingValue {
    fn from(value: AspectMode) -> Self {
        Self::Aspect(value)
    }
}

impl From<AxisScale> for SettingValue {
    fn from(value: AxisScale) -> Self {
        Self::Scale(value)
    }
}

/// Persistent, ordered axes settings. Every stored value is valid for its key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxesSettings {
    entries: IndexMap<AxesProperty, SettingValue>,
}

impl AxesSettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `(key, value)` pairs; the first unknown key or invalid value
    /// fails the whole batch.
    pub fn parse<K, V, I>(pairs: I) -> PlotResult<Self>
    where
        K: AsRef<str>,
        V: Into<SettingValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut settings = Self::new();
        for (key, value) in pairs {
            let property: AxesProperty = key.as_ref().parse()?;
            settings.insert(property, value.into())?;
        }
        Ok(settings)
    }

    /// Builder form of [`AxesSettings::insert`].
    pub fn with(mut self, property: AxesProperty, value: impl Into<SettingValue>) -> PlotResult<Self> {
        self.insert(property, value.into())?;
        Ok(self)
    }

    pub fn insert(&mut self, property: AxesProperty, value: SettingValue) -> PlotResult<()> {
        property.validate(&value)?;
        self.entries.insert(property, value);
        Ok(())
    }

    pub fn remove(&mut self, property: AxesProperty) -> Option<SettingValue> {
        self.entries.shift_remove(&property)
    }

    /// Writes every entry of `other` over `self`.
    pub fn merge(&mut self, other: &Self) {
        for (property, value) in &other.entries {
            self.entries.insert(*property, value.clone());
        }
    }

    #[must_use]
    pub fn get(&self, property: AxesProperty) -> Option<&SettingValue> {
        self.entries.get(&property)
    }

    #[must_use]
    pub fn range(&self, property: AxesProperty) -> Option<AxisRange> {
        self.get(property).and_then(SettingValue::as_range)
    }

    #[must_use]
    pub fn contains(&self, property: AxesProperty) -> bool {
        self.entries.contains_key(&property)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxesProperty, &SettingValue)> {
        self.entries.iter().map(|(property, value)| (*property, value))
    }

    /// Re-checks every stored value.
    pub fn validate(&self) -> PlotResult<()> {
        self.iter()
            .try_for_each(|(property, value)| property.validate(value))
    }
}
