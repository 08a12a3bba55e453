//! Application state

use crate::display::ImagePlacement;
use crate::faces::FacePreviewState;
use crate::terminal::CellSize;
use crate::theme::Theme;
use facepick_core::{Config, FontSpec, RenderDispatcher, RenderSettings, StyleSlot, WorkerErrorSink};

/// Which pane receives input and is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    /// Font family browser
    Listing,
    /// Rendered previews of the four styles of one family
    FacePreview,
    /// Fine-tuning of a single style slot
    FaceDetail,
}

/// Family browser state
#[derive(Debug, Clone, Default)]
pub struct ListingState {
    pub families: Vec<String>,
    pub selected: usize,
}

impl ListingState {
    pub fn new(families: Vec<String>) -> Self {
        Self {
            families,
            selected: 0,
        }
    }

    pub fn selected_family(&self) -> Option<&str> {
        self.families.get(self.selected).map(String::as_str)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.families.len() {
            self.selected += 1;
        }
    }
}

/// Main application state
pub struct App {
    pub config: Config,
    pub theme: Theme,
    pub pane: ActivePane,
    pub listing: ListingState,
    pub faces: FacePreviewState,
    /// Slot being fine-tuned in the detail pane
    pub detail_slot: StyleSlot,
    pub dispatcher: RenderDispatcher,
    pub errors: WorkerErrorSink,
    pub cell_size: CellSize,
    /// Images requested by the last draw pass
    pub placements: Vec<ImagePlacement>,
    pub status_message: Option<String>,
    /// Settings picked with Enter, reported on exit
    pub chosen: Option<RenderSettings>,
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(
        config: Config,
        families: Vec<String>,
        dispatcher: RenderDispatcher,
        errors: WorkerErrorSink,
    ) -> Self {
        let theme = Theme::for_variant(config.theme);
        let cell_size = CellSize::from_config(&config.preview);
        Self {
            config,
            theme,
            pane: ActivePane::Listing,
            listing: ListingState::new(families),
            faces: FacePreviewState::default(),
            detail_slot: StyleSlot::FontFamily,
            dispatcher,
            errors,
            cell_size,
            placements: Vec::new(),
            status_message: None,
            chosen: None,
            should_quit: false,
        }
    }

    /// Show previews for `family`, starting from its configured faces
    pub fn enter_faces(&mut self, family: &str) {
        self.faces = FacePreviewState {
            family: family.to_string(),
            settings: self.config.faces.settings_for_family(family),
        };
        log::debug!("previewing {family}: {:?}", self.faces.settings);
        self.pane = ActivePane::FacePreview;
    }

    /// Go back to the previews, keeping any fine-tuning
    pub fn return_to_faces(&mut self) {
        self.pane = ActivePane::FacePreview;
    }

    pub fn back_to_listing(&mut self) {
        self.pane = ActivePane::Listing;
    }

    pub fn enter_detail(&mut self, slot: StyleSlot) {
        self.detail_slot = slot;
        self.pane = ActivePane::FaceDetail;
    }

    /// Replace the spec of the slot being fine-tuned
    pub fn set_detail_spec(&mut self, spec: FontSpec) {
        self.faces.settings = self.faces.settings.with_slot(self.detail_slot, spec);
    }

    /// Pick the current settings and exit
    pub fn choose_current(&mut self) {
        self.chosen = Some(self.faces.settings.clone());
        self.quit();
    }

    /// Move a pending worker error into the status line
    pub fn poll_worker_error(&mut self) {
        if let Some(error) = self.errors.take() {
            self.status_message = Some(error.to_string());
        }
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
