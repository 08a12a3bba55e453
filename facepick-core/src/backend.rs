//! Renderer subprocess speaking one JSON object per line

use crate::preview::Previews;
use crate::render::{RenderError, RenderRequest, RenderService};
use crate::settings::ResolvedFaces;
use parking_lot::Mutex;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A command line that starts the renderer
#[derive(Debug, Clone)]
pub struct BackendCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Request envelope: the action name next to the payload fields
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    action: &'a str,
    #[serde(flatten)]
    payload: &'a T,
}

/// Monospaced families installed on the system and the faces the terminal
/// configuration currently resolves to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontListing {
    /// Family names, sorted case-insensitively
    pub families: Vec<String>,
    pub resolved_faces: ResolvedFaces,
}

impl FontListing {
    /// Append families not already listed, keeping their order
    pub fn add_families<I>(&mut self, extra: I)
    where
        I: IntoIterator<Item = String>,
    {
        for family in extra {
            if !self.families.contains(&family) {
                self.families.push(family);
            }
        }
    }
}

#[derive(Deserialize)]
struct ListingReply {
    /// Family name to its font descriptors; only the names are used
    #[serde(default)]
    fonts: BTreeMap<String, IgnoredAny>,
    #[serde(default)]
    resolved_faces: ResolvedFaces,
}

impl From<ListingReply> for FontListing {
    fn from(reply: ListingReply) -> Self {
        let mut families: Vec<String> = reply.fonts.into_keys().collect();
        families.sort_by_key(|family| family.to_lowercase());
        Self {
            families,
            resolved_faces: reply.resolved_faces,
        }
    }
}

struct BackendProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

/// Long-lived renderer process shared by all render jobs.
///
/// Requests are answered strictly in order, so one job talks to the process
/// at a time.
pub struct JsonLinesBackend {
    command: String,
    process: Mutex<BackendProcess>,
}

impl JsonLinesBackend {
    pub fn spawn(command: &BackendCommand) -> Result<Self, RenderError> {
        let spawn_error = |source| RenderError::Spawn {
            command: command.program.clone(),
            source,
        };

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(spawn_error)?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                return Err(RenderError::RendererExited);
            }
        };

        log::info!("started renderer `{}` (pid {})", command.program, child.id());

        Ok(Self {
            command: command.program.clone(),
            process: Mutex::new(BackendProcess {
                child,
                stdin,
                stdout: BufReader::new(stdout),
            }),
        })
    }

    /// Send one action and read its single-line reply
    fn query<T: Serialize, R: DeserializeOwned>(
        &self,
        action: &str,
        payload: &T,
    ) -> Result<R, RenderError> {
        let mut line = serde_json::to_vec(&Envelope { action, payload })?;
        line.push(b'\n');

        let mut process = self.process.lock();
        process.stdin.write_all(&line)?;
        process.stdin.flush()?;

        let mut reply = String::new();
        if process.stdout.read_line(&mut reply)? == 0 {
            return Err(RenderError::RendererExited);
        }
        log::trace!("{} replied {} bytes to {action}", self.command, reply.len());

        let value: serde_json::Value = serde_json::from_str(reply.trim_end())?;
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Err(RenderError::Backend(message.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Ask the renderer for the installed monospaced families
    pub fn list_monospaced_fonts(&self) -> Result<FontListing, RenderError> {
        let reply: ListingReply = self.query("list_monospaced_fonts", &serde_json::Map::new())?;
        Ok(reply.into())
    }
}

impl RenderService for JsonLinesBackend {
    fn render_family_samples(&self, request: &RenderRequest) -> Result<Previews, RenderError> {
        self.query("render_family_samples", request)
    }
}

impl Drop for JsonLinesBackend {
    fn drop(&mut self) {
        let process = self.process.get_mut();
        let _ = process.child.kill();
        let _ = process.child.wait();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::render::TextStyle;
    use crate::settings::{PreviewKey, RenderSettings, StyleSlot};
    use std::path::Path;

    fn sh(script: &str) -> BackendCommand {
        BackendCommand {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), script.to_string()],
        }
    }

    fn request() -> RenderRequest {
        let key = PreviewKey::new(RenderSettings::default(), 640, 32);
        RenderRequest::new(&key, &TextStyle::default(), Path::new("/tmp"))
    }

    const FULL_REPLY: &str = r#"{"font_family":{"psname":"Mono-Regular","path":"/tmp/r.rgba"},"bold_font":{"psname":"Mono-Bold","path":"/tmp/b.rgba"},"italic_font":{"psname":"Mono-Italic","path":"/tmp/i.rgba"},"bold_italic_font":{"psname":"Mono-BoldItalic","path":"/tmp/bi.rgba"}}"#;

    #[test]
    fn test_render_round_trip() {
        let script = format!("while read line; do echo '{FULL_REPLY}'; done");
        let backend = JsonLinesBackend::spawn(&sh(&script)).unwrap();

        let previews = backend.render_family_samples(&request()).unwrap();
        assert!(previews.is_complete());
        assert_eq!(
            previews.get(StyleSlot::BoldFont).unwrap().display_name,
            "Mono-Bold"
        );

        // The process stays up for further requests
        let again = backend.render_family_samples(&request()).unwrap();
        assert_eq!(again, previews);
    }

    #[test]
    fn test_request_carries_action() {
        // Echo the request back inside a sample name to inspect what was sent
        let script = r#"while read line; do
            case "$line" in
              *'"action":"render_family_samples"'*'"width":640'*) echo '{"font_family":{"psname":"ok","path":"/tmp/x"}}' ;;
              *) echo '{}' ;;
            esac
        done"#;
        let backend = JsonLinesBackend::spawn(&sh(script)).unwrap();
        let previews = backend.render_family_samples(&request()).unwrap();
        assert_eq!(previews.get(StyleSlot::FontFamily).unwrap().display_name, "ok");
    }

    #[test]
    fn test_renderer_exit_is_error() {
        let backend = JsonLinesBackend::spawn(&sh("read line; exit 1")).unwrap();
        let err = backend.render_family_samples(&request()).unwrap_err();
        assert!(matches!(err, RenderError::RendererExited | RenderError::Io(_)));
    }

    #[test]
    fn test_malformed_reply_is_protocol_error() {
        let backend = JsonLinesBackend::spawn(&sh("while read line; do echo 'not json'; done")).unwrap();
        let err = backend.render_family_samples(&request()).unwrap_err();
        assert!(matches!(err, RenderError::Protocol(_)));
    }

    #[test]
    fn test_error_reply_is_backend_error() {
        let script = r#"while read line; do echo '{"error":"no such font"}'; done"#;
        let backend = JsonLinesBackend::spawn(&sh(script)).unwrap();
        let err = backend.render_family_samples(&request()).unwrap_err();
        match err {
            RenderError::Backend(message) => assert_eq!(message, "no such font"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_monospaced_fonts() {
        let script = r#"while read line; do
            case "$line" in
              *'"action":"list_monospaced_fonts"'*)
                printf '%s\n' '{"fonts":{"iosevka":[{"family":"iosevka"}],"Fira Code":[{"family":"Fira Code","style":"Regular"}],"Hack":[]},"resolved_faces":{"font_family":{"family":"Fira Code","spec":"family=\"Fira Code\" style=Retina"},"bold_font":{"family":"Fira Code","spec":"auto"}}}' ;;
              *) echo '{}' ;;
            esac
        done"#;
        let backend = JsonLinesBackend::spawn(&sh(script)).unwrap();

        let listing = backend.list_monospaced_fonts().unwrap();
        assert_eq!(listing.families, vec!["Fira Code", "Hack", "iosevka"]);

        let regular = listing.resolved_faces.get(StyleSlot::FontFamily).unwrap();
        assert_eq!(regular.family, "Fira Code");
        assert_eq!(regular.spec, "family=\"Fira Code\" style=Retina");
        assert!(listing.resolved_faces.get(StyleSlot::ItalicFont).is_none());

        let settings = listing.resolved_faces.settings_for_family("Fira Code");
        assert_eq!(settings.font_family.as_str(), "family=\"Fira Code\" style=Retina");
    }

    #[test]
    fn test_listing_add_families_skips_duplicates() {
        let mut listing = FontListing {
            families: vec!["Fira Code".to_string(), "Hack".to_string()],
            ..FontListing::default()
        };
        listing.add_families(["Hack".to_string(), "My Local Font".to_string()]);
        assert_eq!(listing.families, vec!["Fira Code", "Hack", "My Local Font"]);
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let command = BackendCommand {
            program: "/nonexistent/facepick-renderer".to_string(),
            args: Vec::new(),
        };
        assert!(matches!(
            JsonLinesBackend::spawn(&command),
            Err(RenderError::Spawn { .. })
        ));
    }
}
