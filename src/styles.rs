//! Style registry: display label and description for each style key

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Label and description shown in a style section header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleInfo {
    pub label: String,
    /// Empty means the description paragraph is not rendered
    #[serde(default)]
    pub description: String,
}

impl StyleInfo {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
        }
    }

    /// Entry synthesized for keys the registry does not know: the key with its
    /// first character upper-cased, and no description.
    pub fn fallback(key: &str) -> Self {
        let mut chars = key.chars();
        let label = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self::new(label, "")
    }
}

const BUILTIN_STYLES: &[(&str, &str, &str)] = &[
    ("oil", "Oil Paintings", "Rich textures and layered color studies in oil on canvas."),
    ("cross-hatching", "Cross Hatching", "Intricate lines built up to create depth, shadow, and energy in the scene."),
    ("pastels", "Pastels", "Soft, luminous works exploring color and atmosphere through pastel sticks."),
    ("silk-screen", "Silk Screen", "Bold, graphic impressions using layered inks and screens."),
    ("pen-ink", "Pen & Ink", "Precise line work capturing form, texture, and light in monochrome."),
    ("colored-pencil", "Colored Pencil", "Layered strokes of colored pencil bringing detail and color to everyday scenes."),
    ("charcoal", "Charcoal", "Expressive tonal drawings using soft and dramatic charcoal marks."),
    ("woodcut", "Woodcut", "Carved blocks printed in ink, creating strong contrasts and textures."),
    ("etching", "Etching", "Intaglio prints with fine lines and subtle tonal variations."),
    ("lithograph", "Lithograph", "Planographic prints using drawn imagery on stone or plate."),
    ("mezzotint", "Mezzotint", "Prints with rich, velvety blacks and delicate gradations of tone."),
    ("pencil", "Pencil", "Graphite drawings exploring form, value, and composition."),
    ("watercolor", "Watercolor", "Transparent washes of pigment capturing light and atmosphere."),
    ("sculpture", "Sculpture", "Three-dimensional work exploring form, texture, and light."),
];

/// Lookup table from style key to [`StyleInfo`].
///
/// `StyleRegistry::default()` holds the built-in styles. Extra entries can be
/// merged from a JSON object of the form
/// `{"key": {"label": "...", "description": "..."}}`; entries from the file
/// replace built-ins with the same key.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    entries: HashMap<String, StyleInfo>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        let entries = BUILTIN_STYLES
            .iter()
            .map(|(key, label, description)| (key.to_string(), StyleInfo::new(*label, *description)))
            .collect();
        Self { entries }
    }
}

impl StyleRegistry {
    /// Registry with no entries; every key resolves to its fallback
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StyleInfo> {
        self.entries.get(key)
    }

    /// Registered entry for `key`, or the synthesized fallback
    pub fn resolve(&self, key: &str) -> StyleInfo {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| StyleInfo::fallback(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, info: StyleInfo) {
        self.entries.insert(key.into(), info);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge entries from a JSON document
    pub fn extend_from_json(&mut self, json: &str) -> Result<usize> {
        let extra: HashMap<String, StyleInfo> = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Invalid styles file: {}", e)))?;
        let count = extra.len();
        self.entries.extend(extra);
        Ok(count)
    }

    /// Merge entries from a JSON file on disk
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read styles file {}: {}", path.display(), e))
        })?;
        let count = self.extend_from_json(&text)?;
        log::debug!("Loaded {} style entries from {}", count, path.display());
        Ok(count)
    }
}
