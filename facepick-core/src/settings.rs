//! Font settings and preview cache keys

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value meaning "let the renderer derive this face"
pub const AUTO: &str = "auto";

/// One of the four font variants rendered per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleSlot {
    FontFamily,
    BoldFont,
    ItalicFont,
    BoldItalicFont,
}

impl StyleSlot {
    /// All slots in display order
    pub const ALL: [StyleSlot; 4] = [
        StyleSlot::FontFamily,
        StyleSlot::BoldFont,
        StyleSlot::ItalicFont,
        StyleSlot::BoldItalicFont,
    ];

    /// Name used on the wire and in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            StyleSlot::FontFamily => "font_family",
            StyleSlot::BoldFont => "bold_font",
            StyleSlot::ItalicFont => "italic_font",
            StyleSlot::BoldItalicFont => "bold_italic_font",
        }
    }

    /// Parse a wire name such as `bold_font`
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == name)
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            StyleSlot::FontFamily => "Regular",
            StyleSlot::BoldFont => "Bold",
            StyleSlot::ItalicFont => "Italic",
            StyleSlot::BoldItalicFont => "Bold-Italic",
        }
    }

    /// Lowercase key that selects this slot for fine-tuning
    pub fn key(self) -> char {
        match self {
            StyleSlot::FontFamily => 'r',
            StyleSlot::BoldFont => 'b',
            StyleSlot::ItalicFont => 'i',
            StyleSlot::BoldItalicFont => 'o',
        }
    }

    /// Split the label around the selection key so it can be highlighted.
    ///
    /// Returns `(before, key, after)`, e.g. `("B", "o", "ld-Italic")`.
    pub fn label_parts(self) -> (&'static str, &'static str, &'static str) {
        let label = self.label();
        let key = self.key();
        let idx = label
            .char_indices()
            .find(|(_, c)| c.eq_ignore_ascii_case(&key))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let end = idx + 1;
        (&label[..idx], &label[idx..end], &label[end..])
    }

    /// Map a typed character to a slot, ignoring case
    pub fn from_key(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        Self::ALL.into_iter().find(|slot| slot.key() == c)
    }

    /// Position of this slot in [`StyleSlot::ALL`]
    pub fn index(self) -> usize {
        match self {
            StyleSlot::FontFamily => 0,
            StyleSlot::BoldFont => 1,
            StyleSlot::ItalicFont => 2,
            StyleSlot::BoldItalicFont => 3,
        }
    }
}

impl fmt::Display for StyleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A font specifier: either a concrete spec or the `auto` sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontSpec {
    #[default]
    Auto,
    Named(String),
}

impl FontSpec {
    pub fn is_auto(&self) -> bool {
        matches!(self, FontSpec::Auto)
    }

    pub fn as_str(&self) -> &str {
        match self {
            FontSpec::Auto => AUTO,
            FontSpec::Named(spec) => spec,
        }
    }
}

impl From<String> for FontSpec {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == AUTO {
            FontSpec::Auto
        } else {
            FontSpec::Named(trimmed.to_string())
        }
    }
}

impl From<&str> for FontSpec {
    fn from(value: &str) -> Self {
        FontSpec::from(value.to_string())
    }
}

impl From<FontSpec> for String {
    fn from(spec: FontSpec) -> Self {
        match spec {
            FontSpec::Auto => AUTO.to_string(),
            FontSpec::Named(spec) => spec,
        }
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four per-style font specifiers a preview is rendered from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RenderSettings {
    pub font_family: FontSpec,
    pub bold_font: FontSpec,
    pub italic_font: FontSpec,
    pub bold_italic_font: FontSpec,
}

impl RenderSettings {
    pub fn get(&self, slot: StyleSlot) -> &FontSpec {
        match slot {
            StyleSlot::FontFamily => &self.font_family,
            StyleSlot::BoldFont => &self.bold_font,
            StyleSlot::ItalicFont => &self.italic_font,
            StyleSlot::BoldItalicFont => &self.bold_italic_font,
        }
    }

    /// Copy of these settings with one slot replaced
    pub fn with_slot(&self, slot: StyleSlot, spec: FontSpec) -> Self {
        let mut next = self.clone();
        match slot {
            StyleSlot::FontFamily => next.font_family = spec,
            StyleSlot::BoldFont => next.bold_font = spec,
            StyleSlot::ItalicFont => next.italic_font = spec,
            StyleSlot::BoldItalicFont => next.bold_italic_font = spec,
        }
        next
    }

    /// Configuration-file lines for these settings, one per slot
    pub fn to_conf_lines(&self) -> Vec<String> {
        StyleSlot::ALL
            .iter()
            .map(|slot| format!("{} {}", slot.as_str(), self.get(*slot)))
            .collect()
    }
}

/// Cache key: settings plus the target pixel dimensions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewKey {
    pub settings: RenderSettings,
    pub width: u32,
    pub height: u32,
}

impl PreviewKey {
    pub fn new(settings: RenderSettings, width: u32, height: u32) -> Self {
        Self {
            settings,
            width,
            height,
        }
    }
}

/// A face previously resolved from the user's configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFace {
    pub family: String,
    pub spec: String,
}

/// Per-slot faces resolved from configuration; slots may be unconfigured
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedFaces {
    pub font_family: Option<ResolvedFace>,
    pub bold_font: Option<ResolvedFace>,
    pub italic_font: Option<ResolvedFace>,
    pub bold_italic_font: Option<ResolvedFace>,
}

impl ResolvedFaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: StyleSlot, face: ResolvedFace) {
        *self.slot_mut(slot) = Some(face);
    }

    pub fn get(&self, slot: StyleSlot) -> Option<&ResolvedFace> {
        match slot {
            StyleSlot::FontFamily => self.font_family.as_ref(),
            StyleSlot::BoldFont => self.bold_font.as_ref(),
            StyleSlot::ItalicFont => self.italic_font.as_ref(),
            StyleSlot::BoldItalicFont => self.bold_italic_font.as_ref(),
        }
    }

    /// Replace slots with the ones configured in `other`
    pub fn overlay(&mut self, other: &ResolvedFaces) {
        for slot in StyleSlot::ALL {
            if let Some(face) = other.get(slot) {
                self.insert(slot, face.clone());
            }
        }
    }

    fn slot_mut(&mut self, slot: StyleSlot) -> &mut Option<ResolvedFace> {
        match slot {
            StyleSlot::FontFamily => &mut self.font_family,
            StyleSlot::BoldFont => &mut self.bold_font,
            StyleSlot::ItalicFont => &mut self.italic_font,
            StyleSlot::BoldItalicFont => &mut self.bold_italic_font,
        }
    }

    /// Settings to preview when entering `family`.
    ///
    /// A slot whose configured face belongs to `family` keeps its configured
    /// spec. Otherwise the regular slot is the family itself and the other
    /// slots are derived automatically.
    pub fn settings_for_family(&self, family: &str) -> RenderSettings {
        let pick = |slot: StyleSlot, default: FontSpec| match self.get(slot) {
            Some(face) if face.family == family => FontSpec::from(face.spec.as_str()),
            _ => default,
        };

        RenderSettings {
            font_family: pick(StyleSlot::FontFamily, FontSpec::from(family)),
            bold_font: pick(StyleSlot::BoldFont, FontSpec::Auto),
            italic_font: pick(StyleSlot::ItalicFont, FontSpec::Auto),
            bold_italic_font: pick(StyleSlot::BoldItalicFont, FontSpec::Auto),
        }
    }
}
