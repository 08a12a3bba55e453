//! Rendered samples and cache entries

use crate::settings::StyleSlot;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One rendered style slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSample {
    /// Identifying name of the resolved font (PostScript name)
    #[serde(rename = "psname", alias = "display_name")]
    pub display_name: String,
    /// Raw pixel artifact written by the renderer
    #[serde(rename = "path", alias = "artifact_path")]
    pub artifact_path: PathBuf,
}

impl RenderedSample {
    pub fn new(display_name: impl Into<String>, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            display_name: display_name.into(),
            artifact_path: artifact_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.artifact_path
    }
}

/// Style slot -> rendered sample for one completed render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Previews {
    samples: BTreeMap<StyleSlot, RenderedSample>,
}

impl Previews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: StyleSlot, sample: RenderedSample) {
        self.samples.insert(slot, sample);
    }

    pub fn get(&self, slot: StyleSlot) -> Option<&RenderedSample> {
        self.samples.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True only when every style slot has a sample
    pub fn is_complete(&self) -> bool {
        StyleSlot::ALL.iter().all(|slot| self.samples.contains_key(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleSlot, &RenderedSample)> {
        self.samples.iter().map(|(slot, sample)| (*slot, sample))
    }
}

impl FromIterator<(StyleSlot, RenderedSample)> for Previews {
    fn from_iter<I: IntoIterator<Item = (StyleSlot, RenderedSample)>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Previews {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Renderers may attach extra entries; only the known slots matter
        let raw: HashMap<String, RenderedSample> = HashMap::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(name, sample)| StyleSlot::from_wire(&name).map(|slot| (slot, sample)))
            .collect())
    }
}

/// State of a cache slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// A render job is in flight
    Pending,
    /// The job finished; the previews may still be incomplete if it failed
    Ready(Arc<Previews>),
}

impl CacheEntry {
    pub fn is_pending(&self) -> bool {
        matches!(self, CacheEntry::Pending)
    }

    pub fn previews(&self) -> Option<&Previews> {
        match self {
            CacheEntry::Pending => None,
            CacheEntry::Ready(previews) => Some(previews),
        }
    }

    /// Previews safe to display: finished and covering all four slots
    pub fn displayable(&self) -> Option<&Previews> {
        self.previews().filter(|previews| previews.is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Previews {
        StyleSlot::ALL
            .into_iter()
            .map(|slot| (slot, RenderedSample::new(slot.label(), format!("/tmp/{slot}.rgba"))))
            .collect()
    }

    #[test]
    fn test_complete_previews() {
        let previews = full();
        assert_eq!(previews.len(), 4);
        assert!(previews.is_complete());
    }

    #[test]
    fn test_partial_previews_not_complete() {
        let previews: Previews = [
            (StyleSlot::FontFamily, RenderedSample::new("A", "/tmp/a")),
            (StyleSlot::BoldFont, RenderedSample::new("B", "/tmp/b")),
        ]
        .into_iter()
        .collect();
        assert_eq!(previews.len(), 2);
        assert!(!previews.is_complete());
        assert!(previews.get(StyleSlot::ItalicFont).is_none());
    }

    #[test]
    fn test_deserialize_renderer_response() {
        let json = r#"{
            "font_family": {"psname": "FiraCode-Regular", "path": "/tmp/r.rgba", "style": "Regular"},
            "bold_font": {"psname": "FiraCode-Bold", "path": "/tmp/b.rgba"},
            "italic_font": {"display_name": "FiraCode-Italic", "artifact_path": "/tmp/i.rgba"},
            "bold_italic_font": {"psname": "FiraCode-BoldItalic", "path": "/tmp/bi.rgba"},
            "something_else": {"psname": "x", "path": "/tmp/x"}
        }"#;
        let previews: Previews = serde_json::from_str(json).unwrap();
        assert!(previews.is_complete());
        assert_eq!(previews.len(), 4);
        let regular = previews.get(StyleSlot::FontFamily).unwrap();
        assert_eq!(regular.display_name, "FiraCode-Regular");
        assert_eq!(regular.path(), Path::new("/tmp/r.rgba"));
        assert_eq!(
            previews.get(StyleSlot::ItalicFont).unwrap().display_name,
            "FiraCode-Italic"
        );
    }

    #[test]
    fn test_entry_displayable_gate() {
        assert!(CacheEntry::Pending.displayable().is_none());
        assert!(CacheEntry::Ready(Arc::new(Previews::new())).displayable().is_none());
        assert!(CacheEntry::Ready(Arc::new(full())).displayable().is_some());
    }
}
