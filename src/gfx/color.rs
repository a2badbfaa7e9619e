//! Color construction and conversion helpers

use macroquad::prelude::Color;

/// Opaque color from 0-255 channels
pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba(r, g, b, 255)
}

pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color::from_rgba(r, g, b, a)
}

/// Opaque gray level 0-255
pub fn gray(level: u8) -> Color {
    Color::from_rgba(level, level, level, 255)
}

/// Same color with a different alpha (0..1)
pub fn with_alpha(c: Color, alpha: f32) -> Color {
    Color::new(c.r, c.g, c.b, alpha.clamp(0.0, 1.0))
}

/// Parse `#RRGGBB`, `#RRGGBBAA`, `#RGB` (leading `#` optional)
pub fn hex(s: &str) -> Option<Color> {
    let s = s.trim().trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
    match s.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in s.chars().enumerate() {
                let v = ch.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some(rgb(out[0], out[1], out[2]))
        }
        6 => Some(rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => Some(rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}

/// Format as `#RRGGBBAA`
pub fn to_hex(c: Color) -> String {
    let [r, g, b, a]: [u8; 4] = c.into();
    format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
}

/// Hue in degrees (0..360), saturation and brightness in 0..1
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32, alpha: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = brightness.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Color::new(r + m, g + m, b + m, alpha.clamp(0.0, 1.0))
}

/// Inverse of `hsb_to_rgb`: (hue degrees, saturation, brightness)
pub fn rgb_to_hsb(c: Color) -> (f32, f32, f32) {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;

    let hue = if delta <= f32::EPSILON {
        0.0
    } else if max == c.r {
        60.0 * ((c.g - c.b) / delta).rem_euclid(6.0)
    } else if max == c.g {
        60.0 * ((c.b - c.r) / delta + 2.0)
    } else {
        60.0 * ((c.r - c.g) / delta + 4.0)
    };
    let saturation = if max <= f32::EPSILON { 0.0 } else { delta / max };
    (hue, saturation, max)
}

/// Blend two colors channel by channel
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

/// Scale brightness; factor > 1 lightens, < 1 darkens
pub fn shade(c: Color, factor: f32) -> Color {
    Color::new(
        (c.r * factor).clamp(0.0, 1.0),
        (c.g * factor).clamp(0.0, 1.0),
        (c.b * factor).clamp(0.0, 1.0),
        c.a,
    )
}

/// Serde adapter storing colors as `#RRGGBBAA` strings
pub mod serde_hex {
    use macroquad::prelude::Color;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let s = String::deserialize(d)?;
        super::hex(&s).ok_or_else(|| D::Error::custom(format!("invalid color '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 0.01 && (a.g - b.g).abs() < 0.01 && (a.b - b.b).abs() < 0.01 && (a.a - b.a).abs() < 0.01
    }

    #[test]
    fn test_hex_parsing() {
        assert!(close(hex("#FF8000").unwrap(), rgb(255, 128, 0)));
        assert!(close(hex("f80").unwrap(), rgb(255, 136, 0)));
        assert!(close(hex("#00000080").unwrap(), rgba(0, 0, 0, 128)));
        assert!(hex("#12345").is_none());
        assert!(hex("zzzzzz").is_none());
        assert_eq!(to_hex(rgb(255, 128, 0)), "#FF8000FF");
    }

    #[test]
    fn test_hsb_primaries() {
        assert!(close(hsb_to_rgb(0.0, 1.0, 1.0, 1.0), rgb(255, 0, 0)));
        assert!(close(hsb_to_rgb(120.0, 1.0, 1.0, 1.0), rgb(0, 255, 0)));
        assert!(close(hsb_to_rgb(240.0, 1.0, 1.0, 1.0), rgb(0, 0, 255)));
        assert!(close(hsb_to_rgb(360.0, 1.0, 1.0, 1.0), rgb(255, 0, 0)));
        assert!(close(hsb_to_rgb(77.0, 0.0, 0.5, 1.0), Color::new(0.5, 0.5, 0.5, 1.0)));
    }

    #[test]
    fn test_rgb_to_hsb_inverts() {
        for &(h, s, v) in &[(10.0, 0.8, 0.9), (200.0, 0.5, 0.4), (300.0, 1.0, 1.0)] {
            let (h2, s2, v2) = rgb_to_hsb(hsb_to_rgb(h, s, v, 1.0));
            assert!((h - h2).abs() < 0.5, "hue {} -> {}", h, h2);
            assert!((s - s2).abs() < 0.01);
            assert!((v - v2).abs() < 0.01);
        }
    }
}
