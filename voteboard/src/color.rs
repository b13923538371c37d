//! HSL/RGB conversion and WCAG 2.x luminance math.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn relative_luminance(self) -> f64 {
        relative_luminance(self)
    }

    pub fn contrast_ratio(self, other: Rgb) -> f64 {
        contrast_ratio(self, other)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// HSL color with integer components: hue in degrees, saturation and
/// lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(
            f64::from(self.hue),
            f64::from(self.saturation),
            f64::from(self.lightness),
        )
    }
}

impl fmt::Display for Hsl {
    /// Formats as CSS: `hsl(h, s%, l%)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseHslError {
    #[error("expected `hsl(h, s%, l%)`, got {input:?}")]
    Syntax { input: String },
    #[error("{component} out of range: {value}")]
    OutOfRange {
        component: &'static str,
        value: u32,
    },
}

impl FromStr for Hsl {
    type Err = ParseHslError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let syntax = || ParseHslError::Syntax {
            input: input.to_string(),
        };

        let body = input
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(syntax)?;

        let mut parts = body.split(',').map(str::trim);
        let (Some(hue), Some(saturation), Some(lightness), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(syntax());
        };

        let number = |text: &str| text.parse::<u32>().map_err(|_| syntax());
        let percent = |text: &str| {
            text.strip_suffix('%')
                .ok_or_else(syntax)
                .and_then(number)
        };

        let hue = number(hue)?;
        let saturation = percent(saturation)?;
        let lightness = percent(lightness)?;

        if hue >= 360 {
            return Err(ParseHslError::OutOfRange {
                component: "hue",
                value: hue,
            });
        }
        for (component, value) in [("saturation", saturation), ("lightness", lightness)] {
            if value > 100 {
                return Err(ParseHslError::OutOfRange { component, value });
            }
        }

        Ok(Hsl::new(hue as u16, saturation as u8, lightness as u8))
    }
}

/// Converts HSL (hue in degrees, saturation and lightness in percent) to
/// 8-bit RGB, rounding each channel to the nearest integer.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// WCAG 2.x relative luminance of an sRGB color.
pub fn relative_luminance(color: Rgb) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let v = f64::from(channel) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// WCAG contrast ratio between two colors, in `[1, 21]`. Symmetric.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
