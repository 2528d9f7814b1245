//! Maintains app state and bridges the classifier and player to the egui UI.

use std::path::{Path, PathBuf};

use rfd::FileDialog;

use super::jobs::{ClassifyJob, ControllerJobs};
use super::state::{
    AUDIO_EXTENSIONS, RequestState, SelectedFile, StatusBarState, UiState, is_audio_path,
};
use super::style::StatusTone;
use crate::samples::{SampleId, SamplePlayer};

pub struct Controller {
    pub ui: UiState,
    jobs: ControllerJobs,
    player: Option<SamplePlayer>,
    api_base_url: String,
}

impl Controller {
    /// Create a controller targeting the given classification endpoint.
    ///
    /// A missing output device disables sample playback but never blocks the
    /// classify flow.
    pub fn new(api_base_url: String) -> Self {
        let player = match SamplePlayer::new() {
            Ok(player) => Some(player),
            Err(error) => {
                tracing::warn!("Sample playback unavailable: {error}");
                None
            }
        };
        Self {
            ui: UiState::default(),
            jobs: ControllerJobs::new(),
            player,
            api_base_url,
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Open the native file dialog restricted to audio files.
    pub fn pick_file_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Audio", AUDIO_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        if let Err(error) = self.select_path(&path) {
            self.set_status(error, StatusTone::Error);
        }
    }

    /// Keep the first audio file of a drop; warn when the drop carried none.
    ///
    /// An empty drop, or one with only non-audio files, leaves the current
    /// selection unchanged.
    pub fn handle_dropped_paths(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        let Some(path) = paths.iter().find(|path| is_audio_path(path)) else {
            self.set_status(
                "Only audio files can be classified; drop was ignored",
                StatusTone::Warning,
            );
            return;
        };
        if let Err(error) = self.select_path(path) {
            self.set_status(error, StatusTone::Error);
        }
    }

    /// Replace the current selection with the file at `path`.
    pub fn select_path(&mut self, path: &Path) -> Result<(), String> {
        let bytes = std::fs::read(path)
            .map_err(|error| format!("Failed to read {}: {error}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.set_status(format!("Selected {name}"), StatusTone::Info);
        self.ui.selected = Some(SelectedFile { name, bytes });
        Ok(())
    }

    /// Kick off a classification of the current selection.
    ///
    /// A no-op without a selection or while a request is outstanding; the
    /// previous result is cleared before the request leaves.
    pub fn classify_selected(&mut self) {
        let Some(file) = self.ui.selected.clone() else {
            return;
        };
        if self.jobs.classify_in_flight() {
            return;
        }
        self.ui.result = None;
        self.ui.request = RequestState::InFlight;
        self.set_status(format!("Classifying {}…", file.name), StatusTone::Busy);
        self.jobs.begin_classify(ClassifyJob {
            base_url: self.api_base_url.clone(),
            file_name: file.name,
            bytes: file.bytes,
        });
    }

    /// Drain finished classify jobs; called once per frame.
    pub fn poll_jobs(&mut self) {
        while let Some(outcome) = self.jobs.try_recv() {
            match outcome.result {
                Ok(result) => {
                    tracing::info!(
                        human_prob = result.human_prob,
                        ai_prob = result.ai_prob,
                        "Classification finished"
                    );
                    self.ui.result = Some(result);
                    self.ui.request = RequestState::Succeeded;
                    self.set_status("Classification complete", StatusTone::Info);
                }
                Err(error) => {
                    tracing::error!("Classification failed: {error}");
                    self.ui.request = RequestState::Failed;
                    self.set_status(format!("Classification failed: {error}"), StatusTone::Error);
                }
            }
        }
    }

    /// Toggle playback of one of the bundled samples.
    pub fn toggle_sample(&mut self, sample: SampleId) {
        let Some(player) = self.player.as_mut() else {
            self.set_status("Audio output unavailable", StatusTone::Warning);
            return;
        };
        match player.toggle(sample) {
            Ok(playing) => self.ui.playing.set(sample, playing),
            Err(error) => self.set_status(error, StatusTone::Error),
        }
    }

    /// Reset play flags for samples whose sink ran dry; called once per frame.
    pub fn refresh_playback(&mut self) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        for sample in SampleId::ALL {
            if self.ui.playing.get(sample) && !player.is_playing(sample) {
                self.ui.playing.set(sample, false);
            }
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::new(text, tone);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn controller() -> Controller {
        Controller::new("http://127.0.0.1:9".to_string())
    }

    fn write_wav_stub(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"RIFF\x24\x00\x00\x00WAVEfmt ").unwrap();
        path
    }

    #[test]
    fn classify_without_selection_is_a_noop() {
        let mut controller = controller();
        controller.classify_selected();
        assert_eq!(controller.ui.request, RequestState::Idle);
    }

    #[test]
    fn selecting_a_file_replaces_the_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_wav_stub(dir.path(), "first.wav");
        let second = write_wav_stub(dir.path(), "second.wav");

        let mut controller = controller();
        controller.select_path(&first).unwrap();
        controller.select_path(&second).unwrap();
        assert_eq!(controller.ui.selected.as_ref().unwrap().name, "second.wav");
    }

    #[test]
    fn dropping_nothing_keeps_the_selection() {
        let dir = tempfile::tempdir().unwrap();
        let clip = write_wav_stub(dir.path(), "clip.wav");

        let mut controller = controller();
        controller.select_path(&clip).unwrap();
        controller.handle_dropped_paths(Vec::new());
        assert_eq!(controller.ui.selected.as_ref().unwrap().name, "clip.wav");
    }

    #[test]
    fn dropping_non_audio_warns_and_keeps_the_selection() {
        let dir = tempfile::tempdir().unwrap();
        let clip = write_wav_stub(dir.path(), "clip.wav");
        let notes = dir.path().join("notes.txt");
        std::fs::write(&notes, "not audio").unwrap();

        let mut controller = controller();
        controller.select_path(&clip).unwrap();
        controller.handle_dropped_paths(vec![notes]);
        assert_eq!(controller.ui.selected.as_ref().unwrap().name, "clip.wav");
        assert_eq!(controller.ui.status.badge_label, "Warning");
    }

    #[test]
    fn drop_keeps_only_the_first_audio_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_wav_stub(dir.path(), "first.wav");
        let second = write_wav_stub(dir.path(), "second.wav");

        let mut controller = controller();
        controller.handle_dropped_paths(vec![first, second]);
        assert_eq!(controller.ui.selected.as_ref().unwrap().name, "first.wav");
    }
}
