//! Saved palettes persisted through a pluggable key-value store.
//!
//! The browser keeps the JSON under the `palettes` key of `localStorage`;
//! here the store is injected so the same code runs against memory (wasm
//! callers hand over the stored text) or a JSON file (native CLI).

use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::editor::Palette;
use crate::error::{PaletteError, Result};

/// Storage key holding the saved-palette list.
pub const STORAGE_KEY: &str = "palettes";

/// Minimal string key-value storage, shaped after `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one entry, e.g. text read from `localStorage`.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object on disk mapping keys to string values.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(PaletteError::Storage(e)),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut all = self.read_all()?;
        all.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }
}

/// The user's saved palettes, written back to the store on every change.
#[derive(Debug)]
pub struct PaletteLibrary<S: KeyValueStore> {
    store: S,
    palettes: Vec<Palette>,
}

impl<S: KeyValueStore> PaletteLibrary<S> {
    /// Load the saved list; a missing or blank entry means no saved palettes.
    pub fn open(store: S) -> Result<Self> {
        let palettes: Vec<Palette> = match store.get(STORAGE_KEY)? {
            Some(text) if !text.trim().is_empty() => serde_json::from_str(&text)?,
            _ => Vec::new(),
        };
        debug!(count = palettes.len(), "opened palette library");
        Ok(Self { store, palettes })
    }

    pub fn list(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn get(&self, index: usize) -> Option<&Palette> {
        self.palettes.get(index)
    }

    pub fn save(&mut self, palette: Palette) -> Result<()> {
        self.palettes.push(palette);
        self.persist()?;
        info!(count = self.palettes.len(), "saved palette");
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<Palette> {
        if index >= self.palettes.len() {
            return Err(PaletteError::IndexOutOfRange {
                index,
                len: self.palettes.len(),
            });
        }
        let removed = self.palettes.remove(index);
        self.persist()?;
        info!(index, count = self.palettes.len(), "deleted palette");
        Ok(removed)
    }

    /// The stored JSON text, as written under [`STORAGE_KEY`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.palettes)?)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) -> Result<()> {
        let text = self.to_json()?;
        self.store.set(STORAGE_KEY, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{PresetKind, preset};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_store_opens_empty() {
        let lib = PaletteLibrary::open(MemoryStore::new()).unwrap();
        assert!(lib.list().is_empty());
        assert_eq!(lib.to_json().unwrap(), "[]");
    }

    #[test]
    fn test_save_and_reopen() {
        let mut lib = PaletteLibrary::open(MemoryStore::new()).unwrap();
        lib.save(preset(PresetKind::Popular, 0).unwrap()).unwrap();
        lib.save(preset(PresetKind::Monochrome, 1).unwrap()).unwrap();

        let reopened = PaletteLibrary::open(lib.into_store()).unwrap();
        assert_eq!(reopened.list().len(), 2);
        assert_eq!(reopened.get(1), preset(PresetKind::Monochrome, 1).as_ref());
    }

    #[test]
    fn test_stored_format() {
        let store = MemoryStore::with_entry(STORAGE_KEY, r##"[["#ff0000","#00FF00"]]"##);
        let mut lib = PaletteLibrary::open(store).unwrap();
        assert_eq!(lib.list()[0].to_hex_strings(), vec!["#FF0000", "#00FF00"]);

        lib.delete(0).unwrap();
        assert_eq!(lib.into_store().get(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut lib = PaletteLibrary::open(MemoryStore::new()).unwrap();
        assert!(matches!(lib.delete(0), Err(PaletteError::IndexOutOfRange { index: 0, len: 0 })));
    }

    #[test]
    fn test_blank_entry_opens_empty() {
        for blank in ["", "  \n"] {
            let mut lib = PaletteLibrary::open(MemoryStore::with_entry(STORAGE_KEY, blank)).unwrap();
            assert!(lib.list().is_empty());
            lib.save(preset(PresetKind::Popular, 0).unwrap()).unwrap();
            assert_eq!(lib.list().len(), 1);
        }
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let store = MemoryStore::with_entry(STORAGE_KEY, "{not json");
        assert!(matches!(PaletteLibrary::open(store), Err(PaletteError::Json(_))));
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("palettes.json");

        let mut lib = PaletteLibrary::open(FileStore::new(&path)).unwrap();
        lib.save(preset(PresetKind::Popular, 3).unwrap()).unwrap();
        drop(lib);

        let lib = PaletteLibrary::open(FileStore::new(&path)).unwrap();
        assert_eq!(lib.list(), &[preset(PresetKind::Popular, 3).unwrap()]);
    }
}
