//! The editable working palette: resize, recolor, regenerate.

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::{PaletteError, Result};

/// Number of colors a fresh session starts with.
pub const DEFAULT_SIZE: usize = 10;

/// An ordered, non-empty list of colors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HexColor>", into = "Vec<HexColor>")]
pub struct Palette {
    colors: Vec<HexColor>,
}

impl Palette {
    pub fn from_colors(colors: Vec<HexColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// `n` random colors; `n` is raised to 1 when zero.
    pub fn random(n: usize) -> Result<Self> {
        let colors = (0..n.max(1)).map(|_| HexColor::random()).collect::<Result<_>>()?;
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true: palettes hold at least one color.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Change the number of colors, keeping the existing prefix and filling
    /// new slots with random colors. The size is clamped to at least 1.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        let n = n.max(1);
        if n <= self.colors.len() {
            self.colors.truncate(n);
            return Ok(());
        }
        let extra = n - self.colors.len();
        for _ in 0..extra {
            self.colors.push(HexColor::random()?);
        }
        Ok(())
    }

    pub fn set(&mut self, index: usize, color: HexColor) -> Result<()> {
        let len = self.colors.len();
        let slot = self
            .colors
            .get_mut(index)
            .ok_or(PaletteError::IndexOutOfRange { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Replace every color with a random one, keeping the length.
    pub fn regenerate(&mut self) -> Result<()> {
        *self = Self::random(self.colors.len())?;
        Ok(())
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(HexColor::to_string).collect()
    }
}

impl TryFrom<Vec<HexColor>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<HexColor>) -> Result<Self> {
        Self::from_colors(colors)
    }
}

impl From<Palette> for Vec<HexColor> {
    fn from(p: Palette) -> Self {
        p.colors
    }
}
