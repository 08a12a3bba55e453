//! Configuration management for facepick

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::BackendCommand;
use crate::render::TextStyle;
use crate::settings::ResolvedFaces;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeVariant,
    /// Families offered by the listing pane
    pub families: Vec<String>,
    pub backend: BackendConfig,
    pub text_style: TextStyle,
    pub preview: PreviewConfig,
    /// Faces already configured for the terminal
    pub faces: ResolvedFaces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeVariant {
    Dark,
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Cell width in pixels when the terminal does not report one
    pub cell_width: u16,
    /// Cell height in pixels when the terminal does not report one
    pub cell_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Dark,
            families: Vec::new(),
            backend: BackendConfig::default(),
            text_style: TextStyle::default(),
            preview: PreviewConfig::default(),
            faces: ResolvedFaces::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            command: "kitty".to_string(),
            args: vec![
                "+runpy".to_string(),
                "from kittens.choose_fonts.backend import main; main()".to_string(),
            ],
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            cell_width: 8,
            cell_height: 16,
        }
    }
}

impl BackendConfig {
    pub fn command(&self) -> BackendCommand {
        BackendCommand {
            program: self.command.clone(),
            args: self.args.clone(),
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "facepick")
            .map(|proj_dirs| proj_dirs.config_dir().join("facepick.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        // The file names a command to run, so it must not be world-writable
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat config file: {}", path.display()))?;
            if metadata.permissions().mode() & 0o002 != 0 {
                anyhow::bail!(
                    "Config file {} is world-writable (insecure permissions)",
                    path.display()
                );
            }
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StyleSlot;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert!(config.families.is_empty());
        assert_eq!(config.backend.command, "kitty");
        assert_eq!(config.preview.cell_width, 8);
        assert_eq!(config.preview.cell_height, 16);
        assert!(config.faces.get(StyleSlot::FontFamily).is_none());
    }

    #[test]
    fn test_load_valid_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        let toml_content = "theme = \"Light\"\n\
families = [\"Fira Code\", \"Iosevka\"]\n\
\n\
[backend]\n\
command = \"/usr/local/bin/render-fonts\"\n\
args = [\"--stdio\"]\n\
\n\
[text_style]\n\
font_size = 14.0\n\
foreground = \"#ffffff\"\n\
\n\
[preview]\n\
cell_width = 10\n\
cell_height = 20\n\
\n\
[faces.font_family]\n\
family = \"Fira Code\"\n\
spec = \"family='Fira Code' style=Retina\"\n";

        file.write_all(toml_content.as_bytes())?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Light);
        assert_eq!(config.families, vec!["Fira Code", "Iosevka"]);
        assert_eq!(config.backend.command, "/usr/local/bin/render-fonts");
        assert_eq!(config.backend.args, vec!["--stdio"]);
        assert_eq!(config.text_style.font_size, 14.0);
        assert_eq!(config.text_style.foreground, "#ffffff");
        // Unset text style fields keep their defaults
        assert_eq!(config.text_style.dpi_x, 96.0);
        assert_eq!(config.preview.cell_height, 20);

        let face = config.faces.get(StyleSlot::FontFamily).unwrap();
        assert_eq!(face.family, "Fira Code");
        assert!(config.faces.get(StyleSlot::BoldFont).is_none());

        Ok(())
    }

    #[test]
    fn test_load_partial_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"families = [\"Hack\"]\n")?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.theme, ThemeVariant::Dark);
        assert_eq!(config.families, vec!["Hack"]);
        assert_eq!(config.backend.command, "kitty");
        Ok(())
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"invalid toml [[[syntax").unwrap();

        let result = Config::load_from(file.path());
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_world_writable_config_rejected() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new()?;
        file.write_all(b"theme = \"Dark\"\n")?;
        std::fs::set_permissions(file.path(), std::fs::Permissions::from_mode(0o666))?;

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("world-writable"));
        Ok(())
    }

    #[test]
    fn test_config_path_returns_some() {
        let path = Config::config_path();
        assert!(path.is_some());
        if let Some(p) = path {
            assert!(p.to_string_lossy().contains("facepick"));
            assert!(p.to_string_lossy().ends_with("facepick.toml"));
        }
    }

    #[test]
    fn test_config_serialization_round_trip() -> Result<()> {
        let config = Config {
            theme: ThemeVariant::Light,
            families: vec!["Hack".into()],
            ..Default::default()
        };

        let toml_str = toml::to_string(&config)?;
        assert!(toml_str.contains("Light"));

        let parsed: Config = toml::from_str(&toml_str)?;
        assert_eq!(parsed.theme, ThemeVariant::Light);
        assert_eq!(parsed.families, vec!["Hack"]);
        Ok(())
    }
}
