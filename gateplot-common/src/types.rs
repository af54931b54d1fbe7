use css_color_parser::Color;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::VariantNames;

/// Plot axis. Also names the axis a point radius is measured along and the
/// axis a divider line sits on.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// An RGBA color with components in [0, 1], written in configuration as any CSS color string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssColor(pub [f32; 4]);

impl CssColor {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b, 1.0])
    }

    pub fn rgba(&self) -> [f32; 4] {
        self.0
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha])
    }

    /// `#rrggbb`, rounding each channel to 8 bits
    pub fn to_hex(&self) -> String {
        let [r, g, b, _] = self.0;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel_to_u8(r),
            channel_to_u8(g),
            channel_to_u8(b)
        )
    }
}

fn channel_to_u8(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<[f32; 4]> for CssColor {
    fn from(value: [f32; 4]) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCssColor(pub String);

impl fmt::Display for InvalidCssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid CSS color: `{}`", self.0)
    }
}

impl std::error::Error for InvalidCssColor {}

impl FromStr for CssColor {
    type Err = InvalidCssColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = s
            .parse::<Color>()
            .map_err(|_| InvalidCssColor(s.to_string()))?;
        Ok(Self([
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
            color.a,
        ]))
    }
}

impl Serialize for CssColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let alpha = self.0[3];
        if alpha >= 1.0 {
            serializer.serialize_str(&self.to_hex())
        } else {
            let [r, g, b, _] = self.0;
            serializer.serialize_str(&format!(
                "rgba({}, {}, {}, {})",
                channel_to_u8(r),
                channel_to_u8(g),
                channel_to_u8(b),
                alpha
            ))
        }
    }
}

impl<'de> Deserialize<'de> for CssColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: CssColor,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: CssColor,
    pub alpha: f32,
}
