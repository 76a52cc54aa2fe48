//! Browser bindings.
//!
//! Every export takes and returns plain JS values (arrays of `#RRGGBB`
//! strings, JSON text, PNG bytes). Clipboard, downloads, `localStorage` and
//! `window.location` stay on the JS side. The exports only convert between
//! JS values and Rust ones; the work happens in the plain functions below
//! them, which run on any target.

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::color::parse_colors;
use crate::editor::Palette;
use crate::error::{PaletteError, Result as PaletteResult};
use crate::export::{self, DEFAULT_SWATCH};
use crate::extract::{self, ExtractMethod};
use crate::library::{MemoryStore, PaletteLibrary, STORAGE_KEY};
use crate::presets::{self, PresetKind};
use crate::share;

/// JS numbers arrive as `i32`; anything below zero asks for nothing.
fn count_from_js(count: i32) -> usize {
    usize::try_from(count).unwrap_or(0)
}

fn palette_from_strings(colors: &[String]) -> PaletteResult<Palette> {
    Palette::from_colors(parse_colors(colors)?)
}

fn extract_image(input: &[u8], count: i32, method: Option<&str>, downscale: Option<u32>) -> PaletteResult<Vec<String>> {
    let method = ExtractMethod::from_name(method.unwrap_or_default(), downscale)?;
    extract::extract_from_image_bytes(input, count_from_js(count), method)
}

fn resized(colors: &[String], count: i32) -> PaletteResult<Vec<String>> {
    let mut palette = palette_from_strings(colors)?;
    palette.resize(count_from_js(count))?;
    Ok(palette.to_hex_strings())
}

/// What the saved-palette exports hand back to JS.
#[derive(Debug, PartialEq)]
struct SavedPalettes {
    /// Text to write back under `localStorage["palettes"]`.
    stored: String,
    palettes: Vec<Vec<String>>,
}

/// Open the library over the text JS read from `localStorage`, apply
/// `change`, and report the result.
fn update_saved<F>(stored: Option<String>, change: F) -> PaletteResult<SavedPalettes>
where
    F: FnOnce(&mut PaletteLibrary<MemoryStore>) -> PaletteResult<()>,
{
    let store = match stored {
        Some(text) => MemoryStore::with_entry(STORAGE_KEY, text),
        None => MemoryStore::new(),
    };
    let mut lib = PaletteLibrary::open(store)?;
    change(&mut lib)?;
    Ok(SavedPalettes {
        stored: lib.to_json()?,
        palettes: lib.list().iter().map(Palette::to_hex_strings).collect(),
    })
}

// ------------------------------------------------------------
// JS conversions
// ------------------------------------------------------------

fn js_err(e: PaletteError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js_array<I, S>(values: I) -> Array
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let out = Array::new();
    for v in values {
        out.push(&JsValue::from_str(v.as_ref()));
    }
    out
}

fn strings_from_js(colors: &Array) -> Result<Vec<String>, JsValue> {
    colors
        .iter()
        .map(|val| {
            val.as_string()
                .ok_or_else(|| JsValue::from_str("Palette values must be strings"))
        })
        .collect()
}

fn palette_from_js(colors: &Array) -> Result<Palette, JsValue> {
    palette_from_strings(&strings_from_js(colors)?).map_err(js_err)
}

fn saved_to_js(saved: SavedPalettes) -> Result<Object, JsValue> {
    let palettes = Array::new();
    for p in &saved.palettes {
        palettes.push(&to_js_array(p));
    }
    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("stored"), &JsValue::from_str(&saved.stored))?;
    Reflect::set(&result, &JsValue::from_str("palettes"), &palettes)?;
    Ok(result)
}

// ------------------------------------------------------------
// Exports
// ------------------------------------------------------------

/// Most frequent colors of raw canvas pixels (`ImageData.data`).
#[wasm_bindgen(js_name = extractTopColors)]
pub fn extract_top_colors(pixels: &[u8], count: i32) -> Array {
    to_js_array(extract::top_colors_signed(pixels, count.into()))
}

/// Decode an uploaded image file and extract a palette from it.
///
/// `method` is `"frequency"` (default) or `"cluster"`.
#[wasm_bindgen(js_name = extractFromImage)]
pub fn extract_from_image(
    input: Vec<u8>,
    count: i32,
    method: Option<String>,
    downscale: Option<u32>,
) -> Result<Array, JsValue> {
    let colors = extract_image(&input, count, method.as_deref(), downscale).map_err(js_err)?;
    Ok(to_js_array(colors))
}

#[wasm_bindgen(js_name = randomPalette)]
pub fn random_palette(count: i32) -> Result<Array, JsValue> {
    let palette = Palette::random(count_from_js(count)).map_err(js_err)?;
    Ok(to_js_array(palette.to_hex_strings()))
}

/// Grow or shrink a palette, keeping existing colors and filling new slots
/// randomly.
#[wasm_bindgen(js_name = resizePalette)]
pub fn resize_palette(colors: Array, count: i32) -> Result<Array, JsValue> {
    let colors = resized(&strings_from_js(&colors)?, count).map_err(js_err)?;
    Ok(to_js_array(colors))
}

fn presets_to_js(kind: PresetKind) -> Array {
    let out = Array::new();
    for p in presets::presets(kind) {
        out.push(&to_js_array(p.iter().map(ToString::to_string)));
    }
    out
}

#[wasm_bindgen(js_name = popularPalettes)]
pub fn popular_palettes() -> Array {
    presets_to_js(PresetKind::Popular)
}

#[wasm_bindgen(js_name = monochromePalettes)]
pub fn monochrome_palettes() -> Array {
    presets_to_js(PresetKind::Monochrome)
}

#[wasm_bindgen(js_name = shareUrl)]
pub fn share_url(origin: &str, path: &str, colors: Array) -> Result<String, JsValue> {
    let palette = palette_from_js(&colors)?;
    Ok(share::share_url(origin, path, &palette))
}

/// Palette encoded in `location.search`, or `null` when there is none.
#[wasm_bindgen(js_name = paletteFromQuery)]
pub fn palette_from_query(query: &str) -> Result<JsValue, JsValue> {
    match share::palette_from_query(query).map_err(js_err)? {
        Some(p) => Ok(to_js_array(p.to_hex_strings()).into()),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen(js_name = exportJson)]
pub fn export_json(colors: Array) -> Result<String, JsValue> {
    let palette = palette_from_js(&colors)?;
    export::to_json(&palette).map_err(js_err)
}

/// PNG swatch strip; turn it into a `Blob` for download.
#[wasm_bindgen(js_name = exportPng)]
pub fn export_png(colors: Array, swatch: Option<u32>) -> Result<Uint8Array, JsValue> {
    let palette = palette_from_js(&colors)?;
    let png = export::to_png(&palette, swatch.unwrap_or(DEFAULT_SWATCH)).map_err(js_err)?;
    Ok(Uint8Array::from(png.as_slice()))
}

/// `{ stored, palettes }` for the text currently in `localStorage`.
#[wasm_bindgen(js_name = savedPalettesList)]
pub fn saved_palettes_list(stored: Option<String>) -> Result<Object, JsValue> {
    saved_to_js(update_saved(stored, |_| Ok(())).map_err(js_err)?)
}

#[wasm_bindgen(js_name = savedPalettesAdd)]
pub fn saved_palettes_add(stored: Option<String>, colors: Array) -> Result<Object, JsValue> {
    let palette = palette_from_js(&colors)?;
    saved_to_js(update_saved(stored, |lib| lib.save(palette)).map_err(js_err)?)
}

#[wasm_bindgen(js_name = savedPalettesRemove)]
pub fn saved_palettes_remove(stored: Option<String>, index: usize) -> Result<Object, JsValue> {
    saved_to_js(update_saved(stored, |lib| lib.delete(index).map(drop)).map_err(js_err)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_count_from_js() {
        assert_eq!(count_from_js(-5), 0);
        assert_eq!(count_from_js(0), 0);
        assert_eq!(count_from_js(12), 12);
    }

    #[test]
    fn test_extract_image_methods_and_counts() {
        let img = RgbaImage::from_fn(3, 1, |x, _| if x == 1 { Rgba([0, 0, 255, 255]) } else { Rgba([255, 0, 0, 255]) });
        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png).unwrap();

        assert_eq!(extract_image(&png, 5, None, None).unwrap(), vec!["#FF0000", "#0000FF"]);
        assert_eq!(extract_image(&png, 1, Some("frequency"), None).unwrap(), vec!["#FF0000"]);
        assert!(extract_image(&png, -3, None, None).unwrap().is_empty());
        assert!(matches!(
            extract_image(&png, 2, Some("octree"), None),
            Err(PaletteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_resized_keeps_prefix() {
        let out = resized(&strings(&["#FF0000", "00ff00"]), 3).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(&out[..2], &strings(&["#FF0000", "#00FF00"])[..]);

        assert_eq!(resized(&strings(&["#FF0000", "#00FF00"]), -1).unwrap(), strings(&["#FF0000"]));
        assert!(resized(&strings(&["red"]), 2).is_err());
        assert!(matches!(resized(&[], 2), Err(PaletteError::EmptyPalette)));
    }

    #[test]
    fn test_saved_palettes_shape() {
        let added = update_saved(None, |lib| lib.save(palette_from_strings(&strings(&["#22223B"]))?)).unwrap();
        assert_eq!(
            added,
            SavedPalettes {
                stored: r##"[["#22223B"]]"##.to_string(),
                palettes: vec![strings(&["#22223B"])],
            }
        );

        let listed = update_saved(Some(added.stored.clone()), |_| Ok(())).unwrap();
        assert_eq!(listed, added);

        let removed = update_saved(Some(added.stored), |lib| lib.delete(0).map(drop)).unwrap();
        assert_eq!(removed.stored, "[]");
        assert!(removed.palettes.is_empty());
    }

    #[test]
    fn test_saved_palettes_blank_and_bad_text() {
        let listed = update_saved(Some(String::new()), |_| Ok(())).unwrap();
        assert_eq!(listed.stored, "[]");
        assert!(update_saved(Some("oops".into()), |_| Ok(())).is_err());
        assert!(matches!(
            update_saved(None, |lib| lib.delete(3).map(drop)),
            Err(PaletteError::IndexOutOfRange { index: 3, len: 0 })
        ));
    }
}
