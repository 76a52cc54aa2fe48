//! Palette export as JSON text or as a PNG swatch strip.

use image::{ImageFormat, Rgba, RgbaImage};

use crate::editor::Palette;
use crate::error::{PaletteError, Result};

/// Side length in pixels of one swatch in the PNG strip.
pub const DEFAULT_SWATCH: u32 = 60;

/// `["#FF6F61","#6B5B95",...]`
pub fn to_json(palette: &Palette) -> Result<String> {
    Ok(serde_json::to_string(palette)?)
}

/// Render the palette as a row of `swatch × swatch` squares, left to right.
pub fn to_image(palette: &Palette, swatch: u32) -> Result<RgbaImage> {
    if swatch == 0 {
        return Err(PaletteError::invalid_parameter("swatch", swatch));
    }
    let n = u32::try_from(palette.len()).map_err(|_| PaletteError::invalid_parameter("colors", palette.len()))?;
    let width = swatch
        .checked_mul(n)
        .ok_or_else(|| PaletteError::invalid_parameter("swatch", swatch))?;

    let colors = palette.colors();
    Ok(RgbaImage::from_fn(width, swatch, |x, _| {
        let [r, g, b] = colors[(x / swatch) as usize].to_rgb();
        Rgba([r, g, b, 255])
    }))
}

/// PNG-encoded swatch strip, ready to hand to a download.
pub fn to_png(palette: &Palette, swatch: u32) -> Result<Vec<u8>> {
    let img = to_image(palette, swatch)?;
    let mut buf = Vec::new();
    {
        let mut cursor = std::io::Cursor::new(&mut buf);
        img.write_to(&mut cursor, ImageFormat::Png)
            .map_err(PaletteError::Encode)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use image::GenericImageView;

    fn two_tone() -> Palette {
        Palette::from_colors(vec![HexColor::new(255, 0, 0), HexColor::new(0, 0, 255)]).unwrap()
    }

    #[test]
    fn test_json_export() {
        assert_eq!(to_json(&two_tone()).unwrap(), r##"["#FF0000","#0000FF"]"##);
    }

    #[test]
    fn test_png_strip_layout() {
        let png = to_png(&two_tone(), DEFAULT_SWATCH).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.dimensions(), (120, 60));
        assert_eq!(img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(59, 59), Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(60, 0), Rgba([0, 0, 255, 255]));
        assert_eq!(img.get_pixel(119, 30), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_zero_swatch_rejected() {
        assert!(matches!(to_png(&two_tone(), 0), Err(PaletteError::InvalidParameter { .. })));
    }
}
