//! Playback for the two bundled demonstration clips.
//!
//! Each sample owns an independent sink: toggling one never touches the
//! other. rodio exposes no completion callback, so callers observe sink
//! exhaustion via [`SamplePlayer::is_playing`] once per frame to reset their
//! play state after a clip ends naturally.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

/// Bundled clip of a human voice.
pub const HUMAN_CLIP: &[u8] = include_bytes!("../assets/audio/human.wav");
/// Bundled clip of an AI-generated voice.
pub const ROBOT_CLIP: &[u8] = include_bytes!("../assets/audio/robot.wav");

/// Identifies one of the two demonstration samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SampleId {
    Human,
    Robot,
}

impl SampleId {
    /// Both samples, in display order.
    pub const ALL: [SampleId; 2] = [SampleId::Human, SampleId::Robot];

    /// Human-readable label used in the UI and in the result table.
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Robot => "AI",
        }
    }

    fn clip(self) -> &'static [u8] {
        match self {
            Self::Human => HUMAN_CLIP,
            Self::Robot => ROBOT_CLIP,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Human => 0,
            Self::Robot => 1,
        }
    }
}

/// Plays the embedded sample clips on the default output device.
pub struct SamplePlayer {
    stream: OutputStream,
    sinks: [Option<Sink>; 2],
}

impl SamplePlayer {
    /// Open the default output device.
    pub fn new() -> Result<Self, String> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|error| format!("Audio init failed: {error}"))?;
        Ok(Self {
            stream,
            sinks: [None, None],
        })
    }

    /// Toggle playback of the given sample and return the new playing state.
    ///
    /// A paused sample resumes; an exhausted or never-started sample starts
    /// from the top.
    pub fn toggle(&mut self, sample: SampleId) -> Result<bool, String> {
        if let Some(sink) = self.sinks[sample.index()].as_ref() {
            if !sink.empty() {
                if sink.is_paused() {
                    sink.play();
                    return Ok(true);
                }
                sink.pause();
                return Ok(false);
            }
        }

        let source = Decoder::new(Cursor::new(sample.clip()))
            .map_err(|error| format!("Audio decode failed: {error}"))?;
        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.play();
        self.sinks[sample.index()] = Some(sink);
        Ok(true)
    }

    /// True while the sample's sink still has queued audio and is not paused.
    pub fn is_playing(&self, sample: SampleId) -> bool {
        self.sinks[sample.index()]
            .as_ref()
            .map(|sink| !sink.empty() && !sink.is_paused())
            .unwrap_or(false)
    }
}
