use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Builds a color from 0..=255 channels, clamping out-of-range input.
    #[must_use]
    pub fn from_rgb8(red: f64, green: f64, blue: f64) -> Self {
        let scale = |value: f64| (value / 255.0).clamp(0.0, 1.0);
        Self::rgb(scale(red), scale(green), scale(blue))
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "k" | "black" => Self::BLACK,
            "w" | "white" => Self::WHITE,
            "r" | "red" => Self::rgb(1.0, 0.0, 0.0),
            "g" | "green" => Self::rgb(0.0, 0.5, 0.0),
            "b" | "blue" => Self::rgb(0.0, 0.0, 1.0),
            "c" | "cyan" => Self::rgb(0.0, 0.75, 0.75),
            "m" | "magenta" => Self::rgb(0.75, 0.0, 0.75),
            "y" | "yellow" => Self::rgb(0.75, 0.75, 0.0),
            "gray" | "grey" => Self::rgb(0.5, 0.5, 0.5),
            _ => return None,
        };
        Some(color)
    }

    fn from_hex(digits: &str) -> Option<Self> {
        if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
            return None;
        }
        let channel = |index: usize| {
            u8::from_str_radix(&digits[index..index + 2], 16)
                .ok()
                .map(|value| f64::from(value) / 255.0)
        };
        let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    fn from_tuple(body: &str, input: &str) -> PlotResult<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid_color(input));
        }

        if parts.iter().all(|part| part.parse::<u32>().is_ok()) {
            let mut channels = [0.0; 3];
            for (slot, part) in channels.iter_mut().zip(&parts) {
                *slot = part.parse::<f64>().map_err(|_| invalid_color(input))?;
            }
            return Ok(Self::from_rgb8(channels[0], channels[1], channels[2]));
        }

        let mut channels = [0.0; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let value: f64 = part.parse().map_err(|_| invalid_color(input))?;
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_color(input));
            }
            *slot = value;
        }
        Ok(Self::rgb(channels[0], channels[1], channels[2]))
    }
}

fn invalid_color(input: &str) -> PlotError {
    PlotError::InvalidData(format!("invalid color value: `{input}`"))
}

impl FromStr for Color {
    type Err = PlotError;

    /// Accepts `(r, g, b)` triples (integers 0..=255 or floats 0..=1),
    /// `#rrggbb`/`#rrggbbaa` and the single-letter or plain color names.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(|| invalid_color(input));
        }
        if let Some(named) = Self::named(&trimmed.to_ascii_lowercase()) {
            return Ok(named);
        }
        let body = trimmed
            .strip_prefix('(')
            .map_or(trimmed, |rest| rest.strip_suffix(')').unwrap_or(rest));
        Self::from_tuple(body, input)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.red, self.green, self.blue)
    }
}
