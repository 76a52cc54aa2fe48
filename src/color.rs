//! `#RRGGBB` color values.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PaletteError, Result};

/// An opaque 8-bit sRGB color, written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl HexColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Draw a uniformly random color from the platform RNG.
    pub fn random() -> Result<Self> {
        let mut bytes = [0u8; 3];
        getrandom::fill(&mut bytes).map_err(PaletteError::Random)?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    /// The six hex digits without the leading `#`.
    pub fn to_hex_digits(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    pub fn to_rgb(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl FromStr for HexColor {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        // `is_ascii_hexdigit` also guarantees the byte slicing below lands on char boundaries.
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PaletteError::InvalidHex(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| PaletteError::InvalidHex(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl From<[u8; 3]> for HexColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Srgb<u8>> for HexColor {
    fn from(c: Srgb<u8>) -> Self {
        Self::new(c.red, c.green, c.blue)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a list of hex strings, failing on the first bad entry.
pub fn parse_colors<I, S>(values: I) -> Result<Vec<HexColor>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(|s| s.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!("#FF6F61".parse::<HexColor>().unwrap(), HexColor::new(0xFF, 0x6F, 0x61));
        assert_eq!("6b5b95".parse::<HexColor>().unwrap(), HexColor::new(0x6B, 0x5B, 0x95));
        assert_eq!("  #00ff00 ".parse::<HexColor>().unwrap(), HexColor::new(0, 255, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#FFF", "#FF00000", "#GG0000", "#+F0000", "#ÿÿÿ"] {
            assert!(
                matches!(bad.parse::<HexColor>(), Err(PaletteError::InvalidHex(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn test_display_is_uppercase_and_padded() {
        assert_eq!(HexColor::new(0, 10, 255).to_string(), "#000AFF");
        assert_eq!(HexColor::new(1, 2, 3).to_hex_digits(), "010203");
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let json = serde_json::to_string(&vec![HexColor::new(255, 0, 0)]).unwrap();
        assert_eq!(json, r##"["#FF0000"]"##);
        let back: Vec<HexColor> = serde_json::from_str(r##"["#ff0000"]"##).unwrap();
        assert_eq!(back, vec![HexColor::new(255, 0, 0)]);
        assert!(serde_json::from_str::<HexColor>(r#""red""#).is_err());
    }

    #[test]
    fn test_random_colors_differ_eventually() {
        let first = HexColor::random().unwrap();
        assert!((0..64).any(|_| HexColor::random().unwrap() != first));
    }

    #[test]
    fn test_parse_colors_stops_on_error() {
        assert_eq!(parse_colors(["#000000", "FFFFFF"]).unwrap().len(), 2);
        assert!(parse_colors(["#000000", "nope"]).is_err());
    }
}
