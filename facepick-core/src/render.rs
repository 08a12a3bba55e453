//! Contract with the external font rendering service

use crate::preview::Previews;
use crate::settings::{FontSpec, PreviewKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How sample text is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_size: f64,
    pub dpi_x: f64,
    pub dpi_y: f64,
    pub foreground: String,
    pub background: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            dpi_x: 96.0,
            dpi_y: 96.0,
            foreground: "#dddddd".to_string(),
            background: "#000000".to_string(),
        }
    }
}

/// Payload of a `render_family_samples` request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub text_style: TextStyle,
    pub font_family: FontSpec,
    pub bold_font: FontSpec,
    pub italic_font: FontSpec,
    pub bold_italic_font: FontSpec,
    pub width: u32,
    pub height: u32,
    pub output_dir: PathBuf,
}

impl RenderRequest {
    pub fn new(key: &PreviewKey, text_style: &TextStyle, output_dir: &Path) -> Self {
        let s = &key.settings;
        Self {
            text_style: text_style.clone(),
            font_family: s.font_family.clone(),
            bold_font: s.bold_font.clone(),
            italic_font: s.italic_font.clone(),
            bold_italic_font: s.bold_italic_font.clone(),
            width: key.width,
            height: key.height,
            output_dir: output_dir.to_path_buf(),
        }
    }
}

/// Failures of a render job. None of these are fatal to the UI.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start renderer `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("renderer I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("renderer exited unexpectedly")]
    RendererExited,
    #[error("malformed renderer response: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("renderer returned {got} of 4 font styles")]
    Incomplete { got: usize },
    #[error("renderer failed: {0}")]
    Backend(String),
    #[error("render job panicked: {0}")]
    Panicked(String),
    #[error("could not start render job: {0}")]
    JobSpawn(String),
}

/// Turns font settings and dimensions into rendered sample artifacts.
///
/// Calls block and are only made from background render jobs.
pub trait RenderService: Send + Sync {
    fn render_family_samples(&self, request: &RenderRequest) -> Result<Previews, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RenderSettings;

    #[test]
    fn test_request_wire_fields() {
        let settings = RenderSettings {
            font_family: FontSpec::from("Fira Code"),
            ..Default::default()
        };
        let key = PreviewKey::new(settings, 800, 400);
        let request = RenderRequest::new(&key, &TextStyle::default(), Path::new("/tmp/out"));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["font_family"], "Fira Code");
        assert_eq!(value["bold_font"], "auto");
        assert_eq!(value["italic_font"], "auto");
        assert_eq!(value["bold_italic_font"], "auto");
        assert_eq!(value["width"], 800);
        assert_eq!(value["height"], 400);
        assert_eq!(value["output_dir"], "/tmp/out");
        assert_eq!(value["text_style"]["font_size"], 11.0);
        assert_eq!(value["text_style"]["foreground"], "#dddddd");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RenderError::Incomplete { got: 2 }.to_string(),
            "renderer returned 2 of 4 font styles"
        );
        assert_eq!(RenderError::RendererExited.to_string(), "renderer exited unexpectedly");
    }
}
