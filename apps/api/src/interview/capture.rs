//! Speech-capture capability: the two-state machine gating when an answer
//! may be submitted.
//!
//! Capture and playback are mutually exclusive by convention: playback of a
//! model reply discards any capture left in flight, and starting capture
//! resets any pending transcript. This machine tracks states and the
//! accumulated transcript only; it performs no audio I/O itself.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    Capturing,
}

/// Voice-capture state for one session: `Idle` or `Capturing`, plus the
/// transcript accumulated from interim recognition results.
#[derive(Debug, Default)]
pub struct SpeechCapture {
    state: CaptureState,
    transcript: String,
}

impl SpeechCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        self.state == CaptureState::Capturing
    }

    /// The transcript accumulated so far.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Begins capturing. Any transcript pending from an earlier capture is
    /// reset.
    pub fn start(&mut self) {
        self.transcript.clear();
        self.state = CaptureState::Capturing;
    }

    /// Accumulates an interim recognition result. Ignored while idle, so a
    /// late recognizer callback after stop cannot resurrect a transcript.
    pub fn push_interim(&mut self, interim: &str) {
        if self.state != CaptureState::Capturing || interim.is_empty() {
            return;
        }
        if !self.transcript.is_empty() {
            self.transcript.push(' ');
        }
        self.transcript.push_str(interim);
    }

    /// Stops capturing and yields the accumulated transcript.
    pub fn stop_and_submit(&mut self) -> String {
        self.state = CaptureState::Idle;
        std::mem::take(&mut self.transcript)
    }

    /// Playback of a model reply discards any in-flight capture.
    pub fn cancel_on_playback(&mut self) {
        self.state = CaptureState::Idle;
        self.transcript.clear();
    }
}
