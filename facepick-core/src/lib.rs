//! facepick core - preview cache, render dispatch and configuration
//!
//! This crate holds everything that does not touch the terminal:
//! - Font settings and preview cache keys
//! - The keyed preview cache and its background render dispatcher
//! - The wake-up channel and worker error slot shared with the UI loop
//! - The renderer contract and its JSON-lines subprocess backend
//! - Configuration management

pub mod backend;
pub mod cache;
pub mod config;
pub mod dispatcher;
pub mod error_sink;
pub mod preview;
pub mod render;
pub mod settings;
pub mod wakeup;

// Re-export commonly used types
pub use cache::PreviewCache;
pub use config::Config;
pub use dispatcher::RenderDispatcher;
pub use error_sink::WorkerErrorSink;
pub use preview::{CacheEntry, Previews, RenderedSample};
pub use render::{RenderError, RenderRequest, RenderService, TextStyle};
pub use settings::{FontSpec, PreviewKey, RenderSettings, StyleSlot};
pub use wakeup::{WakeReceiver, Waker};
