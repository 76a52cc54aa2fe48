//! Palette extraction from image data.
//!
//! [`top_colors`] is the frequency extractor: it counts every distinct RGB
//! value in a decoded RGBA buffer and returns the most common ones. The
//! image-file entry point additionally offers a k-means palette computed in
//! CIE Lab, which yields perceptual averages instead of exact pixel values.

use std::collections::HashMap;

use image::{DynamicImage, GenericImageView, RgbaImage, imageops::FilterType};
use kmeans_colors::get_kmeans;
use palette::{IntoColor, Lab, LinSrgb, Srgb};
use tracing::debug;

use crate::color::HexColor;
use crate::error::{PaletteError, Result};

const KMEANS_MAX_ITER: usize = 20;
const KMEANS_CONVERGE: f32 = 1e-4;
const KMEANS_SEED: u64 = 0;

/// How a palette is pulled out of an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtractMethod {
    /// Most frequent exact colors, see [`top_colors`].
    #[default]
    Frequency,
    /// k-means centroids in Lab space over opaque pixels, optionally after
    /// shrinking the longest side to `downscale` pixels.
    Cluster { downscale: Option<u32> },
}

impl ExtractMethod {
    /// Parse a method name as used by the CLI and the browser bindings.
    pub fn from_name(name: &str, downscale: Option<u32>) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "frequency" | "" => Ok(Self::Frequency),
            "cluster" | "kmeans" => Ok(Self::Cluster { downscale }),
            other => Err(PaletteError::invalid_parameter("method", other)),
        }
    }
}

/// Occurrence counts per RGB key, in first-seen order.
struct FrequencyTable {
    slots: HashMap<[u8; 3], usize>,
    entries: Vec<([u8; 3], u32)>,
}

impl FrequencyTable {
    fn from_rgba(pixels: &[u8]) -> Self {
        let mut table = Self {
            slots: HashMap::new(),
            entries: Vec::new(),
        };
        // `chunks_exact` drops a trailing partial pixel.
        for px in pixels.chunks_exact(4) {
            table.bump([px[0], px[1], px[2]]);
        }
        table
    }

    fn bump(&mut self, key: [u8; 3]) {
        let next = self.entries.len();
        let i = *self.slots.entry(key).or_insert(next);
        if i == next {
            self.entries.push((key, 1));
        } else {
            self.entries[i].1 += 1;
        }
    }

    /// Entries by descending count. `sort_by` is stable, so equal counts
    /// keep first-seen order.
    fn into_ranked(mut self) -> Vec<([u8; 3], u32)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries
    }
}

/// Return up to `count` of the most frequent colors in an RGBA buffer as
/// `#RRGGBB` strings.
///
/// Alpha is ignored. Colors are ordered by descending frequency; colors with
/// equal frequency appear in the order they were first met in the buffer.
/// An empty buffer or `count == 0` gives an empty result, and a trailing
/// partial pixel is ignored.
pub fn top_colors(pixels: &[u8], count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    let ranked = FrequencyTable::from_rgba(pixels).into_ranked();
    let distinct = ranked.len();

    let colors: Vec<String> = ranked
        .into_iter()
        .take(count)
        .map(|(rgb, _)| HexColor::from(rgb).to_string())
        .collect();

    debug!(
        pixels = pixels.len() / 4,
        distinct,
        returned = colors.len(),
        "extracted dominant colors"
    );
    colors
}

/// Signed-count variant of [`top_colors`]; zero or negative counts yield an
/// empty result.
pub fn top_colors_signed(pixels: &[u8], count: i64) -> Vec<String> {
    if count <= 0 {
        return Vec::new();
    }
    top_colors(pixels, usize::try_from(count).unwrap_or(usize::MAX))
}

/// Decode an encoded image (PNG, JPEG, ...) and extract `count` colors with
/// the chosen method.
pub fn extract_from_image_bytes(input: &[u8], count: usize, method: ExtractMethod) -> Result<Vec<String>> {
    let img = image::load_from_memory(input).map_err(PaletteError::Decode)?;
    let (w, h) = img.dimensions();
    debug!(width = w, height = h, ?method, "decoded image for extraction");

    match method {
        ExtractMethod::Frequency => Ok(top_colors(img.to_rgba8().as_raw(), count)),
        ExtractMethod::Cluster { downscale } => Ok(cluster_colors(&img, count, downscale)),
    }
}

/// RGBA pixels to cluster: shrunk so the longest side is `downscale` when
/// that is smaller than the image, otherwise the image as is.
fn working_rgba(img: &DynamicImage, downscale: Option<u32>) -> RgbaImage {
    let (orig_w, orig_h) = img.dimensions();
    let longest = orig_w.max(orig_h);
    match downscale {
        Some(scale) if scale > 0 && scale < longest => {
            let ratio = scale as f32 / longest as f32;
            let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
            let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
            image::imageops::resize(img, w, h, FilterType::Nearest)
        }
        _ => img.to_rgba8(),
    }
}

/// k-means palette of `n_colors` centroids in Lab space.
fn cluster_colors(img: &DynamicImage, n_colors: usize, downscale: Option<u32>) -> Vec<String> {
    if n_colors == 0 {
        return Vec::new();
    }

    let raw = working_rgba(img, downscale).into_raw();

    // Transparent pixels carry no color and stay out of the clustering.
    let lab_pixels: Vec<Lab> = raw
        .chunks_exact(4)
        .filter(|px| px[3] != 0)
        .map(|px| Srgb::<u8>::new(px[0], px[1], px[2]).into_linear::<f32>().into_color())
        .collect();

    if lab_pixels.is_empty() {
        debug!("no opaque pixels, skipping k-means");
        return Vec::new();
    }

    let kmeans = get_kmeans(n_colors, KMEANS_MAX_ITER, KMEANS_CONVERGE, false, &lab_pixels, KMEANS_SEED);

    kmeans
        .centroids
        .iter()
        .map(|&lab| {
            let linear: LinSrgb = lab.into_color();
            let rgb_f32: Srgb<f32> = Srgb::from_linear(linear);
            HexColor::from(rgb_f32.into_format::<u8>()).to_string()
        })
        .collect()
}
