//! Shared state types for the egui UI.

use std::path::Path;

use crate::classifier::Classification;
use crate::egui_app::style::{self, StatusTone};
use crate::samples::SampleId;

/// File extensions the picker and the drop handler accept.
///
/// Native drops carry paths rather than mime types, so an extension
/// allow-list stands in for an `audio/*` wildcard.
pub const AUDIO_EXTENSIONS: &[&str] = &[
    "wav", "mp3", "flac", "ogg", "m4a", "aac", "aiff", "opus",
];

/// Lifecycle of the classification request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestState {
    /// No request has been issued yet.
    #[default]
    Idle,
    /// A request is outstanding; the trigger control is disabled.
    InFlight,
    /// The last request produced a result.
    Succeeded,
    /// The last request failed; no result is available.
    Failed,
}

/// File chosen via the picker or a drop. Replaced wholesale on a new pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Per-sample "is playing" flags owned by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackFlags {
    human: bool,
    robot: bool,
}

impl PlaybackFlags {
    pub fn get(&self, sample: SampleId) -> bool {
        match sample {
            SampleId::Human => self.human,
            SampleId::Robot => self.robot,
        }
    }

    pub fn set(&mut self, sample: SampleId, playing: bool) {
        match sample {
            SampleId::Human => self.human = playing,
            SampleId::Robot => self.robot = playing,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: egui::Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self::new("Pick or drop an audio file to get started", StatusTone::Idle)
    }

    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            badge_label: tone.label().to_string(),
            badge_color: style::status_badge_color(tone),
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub request: RequestState,
    pub selected: Option<SelectedFile>,
    pub result: Option<Classification>,
    pub playing: PlaybackFlags,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            request: RequestState::default(),
            selected: None,
            result: None,
            playing: PlaybackFlags::default(),
        }
    }
}

impl UiState {
    /// The Classify control is enabled only with a selection and no request
    /// outstanding.
    pub fn can_classify(&self) -> bool {
        self.selected.is_some() && self.request != RequestState::InFlight
    }

    /// The loading indicator is shown while a request is in flight.
    pub fn show_spinner(&self) -> bool {
        self.request == RequestState::InFlight
    }

    /// The result table is shown after a success, never alongside the spinner.
    pub fn show_result(&self) -> bool {
        self.request == RequestState::Succeeded && self.result.is_some()
    }
}

/// Format a probability for the result table: exactly three decimals,
/// zero-padded.
pub fn format_probability(value: f64) -> String {
    format!("{value:.3}")
}

/// True when the path carries a recognized audio extension.
pub fn is_audio_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lowered = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.iter().any(|known| *known == lowered)
        })
        .unwrap_or(false)
}
