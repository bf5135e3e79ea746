use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidLength,
    InvalidHex,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ColorParseError::*;
        let msg = match self {
            Empty => "empty color string",
            InvalidLength => "invalid hex length",
            InvalidHex => "invalid hex digits",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColorParseError {}

/// A color in hue/saturation/lightness form, every component in `[0, 1]`.
///
/// Hue is circular: `Hsl::new` wraps it into `[0, 1)`. Saturation and
/// lightness are clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue: hue.rem_euclid(1.0),
            saturation: saturation.clamp(0.0, 1.0),
            lightness: lightness.clamp(0.0, 1.0),
        }
    }

    /// Standard HLS -> RGB transform. Channels are quantized by truncation,
    /// so `0.96` becomes `244`, not `245`.
    #[must_use]
    pub fn to_rgb(self) -> Color {
        let Hsl {
            hue: h,
            saturation: s,
            lightness: l,
        } = self;
        if s == 0.0 {
            let v = quantize(l);
            return Color::rgb(v, v, v);
        }

        let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - (l * s) };
        let m1 = 2.0 * l - m2;

        Color::rgb(
            quantize(channel(m1, m2, h + ONE_THIRD)),
            quantize(channel(m1, m2, h)),
            quantize(channel(m1, m2, h - ONE_THIRD)),
        )
    }
}

fn channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

#[inline]
fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// An 8-bit sRGB color. The lowercase `#rrggbb` string is its identity:
/// it is what gets displayed, serialized and compared by downstream consumers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    #[must_use]
    #[inline]
    pub fn into_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb`, `rrggbb` or the `#rgb` shorthand, in any letter case.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        use ColorParseError::*;

        let hex = hex.trim();
        if hex.is_empty() {
            return Err(Empty);
        }
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        let nibble = |c: u8| -> Result<u8, ColorParseError> {
            match c {
                b'0'..=b'9' => Ok(c - b'0'),
                b'a'..=b'f' => Ok(c - b'a' + 10),
                b'A'..=b'F' => Ok(c - b'A' + 10),
                _ => Err(InvalidHex),
            }
        };

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Ok(Self::rgb(
                nibble(bytes[0])? * 17,
                nibble(bytes[1])? * 17,
                nibble(bytes[2])? * 17,
            )),
            6 => {
                let byte = |hi: u8, lo: u8| -> Result<u8, ColorParseError> {
                    Ok(nibble(hi)? << 4 | nibble(lo)?)
                };
                Ok(Self::rgb(
                    byte(bytes[0], bytes[1])?,
                    byte(bytes[2], bytes[3])?,
                    byte(bytes[4], bytes[5])?,
                ))
            }
            _ => Err(InvalidLength),
        }
    }

    /// Inverse of [`Hsl::to_rgb`], up to 8-bit quantization.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;
        if range == 0.0 {
            return Hsl::new(0.0, 0.0, l);
        }

        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - sum)
        };
        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Hsl::new(h / 6.0, s, l)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Color::from_hex(value)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}
