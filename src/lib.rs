//! Color palette generator core, compiled to WebAssembly for the browser
//! and usable natively through `palette-cli`.
//!
//! The browser owns rendering, clipboard, downloads and `localStorage`; this
//! crate supplies the palette logic those pieces call into:
//!
//! - [`top_colors`]: dominant colors of decoded RGBA pixels
//! - [`Palette`]: the editable working palette
//! - [`share`], [`export`], [`PaletteLibrary`]: links, files, saved palettes

pub mod color;
pub mod editor;
pub mod error;
pub mod export;
pub mod extract;
pub mod library;
pub mod presets;
pub mod share;
pub mod wasm;

pub use color::{HexColor, parse_colors};
pub use editor::{DEFAULT_SIZE, Palette};
pub use error::{PaletteError, Result};
pub use extract::{ExtractMethod, extract_from_image_bytes, top_colors, top_colors_signed};
#[cfg(not(target_arch = "wasm32"))]
pub use library::FileStore;
pub use library::{KeyValueStore, MemoryStore, PaletteLibrary};
pub use presets::PresetKind;
