//! Audio playback session with segment looping
//!
//! One audio element plays one track at a time; which track and which loop
//! window depend on the active screen. Browsers refuse `play()` before the
//! first user gesture, so a blocked start is an expected outcome, not an
//! error: the session flags `needs_gesture` and the shell retries on the
//! next pointerdown anywhere.
//!
//! The session is generic over [`AudioSink`] so all looping and gating logic
//! runs in native tests against a fake element.

use serde::{Deserialize, Serialize};

/// An audio source plus the segment of it that loops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSpec {
    pub source: String,
    /// Where the loop window starts (s)
    #[serde(default)]
    pub loop_start: f64,
    /// Where it ends (s); `None` loops at end of file
    #[serde(default)]
    pub loop_end: Option<f64>,
}

impl MediaSpec {
    pub fn new(source: impl Into<String>, loop_start: f64, loop_end: Option<f64>) -> Self {
        Self {
            source: source.into(),
            loop_start,
            loop_end,
        }
    }
}

impl Default for MediaSpec {
    fn default() -> Self {
        Self::new("", 0.0, None)
    }
}

/// Why a play attempt did not start playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    /// The platform wants a user gesture first. Expected; retried silently.
    AutoplayBlocked,
    /// Decode failure, missing asset, etc. Audio is disabled for the session.
    Media(String),
}

/// The underlying playable element. Implemented over `HtmlAudioElement` in
/// the wasm shell and by a fake in tests.
pub trait AudioSink {
    /// Swap the element's source; playback stops and position resets
    fn load(&mut self, source: &str);
    fn play(&mut self) -> Result<(), PlayError>;
    fn pause(&mut self);
    fn seek(&mut self, seconds: f64);
    fn position(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
}

/// Owns the sink plus the enabled/gesture/loop state around it
#[derive(Debug)]
pub struct PlaybackSession<S: AudioSink> {
    sink: S,
    spec: MediaSpec,
    enabled: bool,
    needs_gesture: bool,
    /// Set after an unexpected media error; audio stays off, app stays up
    faulted: bool,
    /// Bumped on every spec switch so time-update callbacks queued against a
    /// previous source are ignored
    epoch: u64,
}

impl<S: AudioSink> PlaybackSession<S> {
    /// Build the session from the persisted enabled flag and the starting
    /// screen's spec. Playback is attempted immediately when enabled.
    pub fn new(mut sink: S, spec: MediaSpec, enabled: bool, volume: f64) -> Self {
        sink.set_volume(volume);
        sink.load(&spec.source);
        let mut session = Self {
            sink,
            spec,
            enabled: false,
            needs_gesture: false,
            faulted: false,
            epoch: 0,
        };
        if enabled {
            session.set_enabled(true);
        }
        session
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn needs_gesture(&self) -> bool {
        self.needs_gesture
    }

    pub fn faulted(&self) -> bool {
        self.faulted
    }

    pub fn spec(&self) -> &MediaSpec {
        &self.spec
    }

    /// Current epoch; callbacks must echo it back
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Turn playback on (seek to loop start, try to play) or off (full stop,
    /// position back to 0 so a later enable starts the segment fresh).
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.faulted {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.sink.seek(self.spec.loop_start);
            self.try_play();
        } else {
            self.sink.pause();
            self.sink.seek(0.0);
            self.needs_gesture = false;
        }
    }

    /// Flip the enabled flag; returns the new value for the caller to persist
    pub fn toggle_enabled(&mut self) -> bool {
        let next = !self.enabled;
        self.set_enabled(next);
        self.enabled
    }

    /// Swap to a new track/loop window. Stops the old source immediately;
    /// resumes (or arms the gesture fallback) when enabled.
    pub fn switch_spec(&mut self, spec: MediaSpec) {
        if spec == self.spec {
            return;
        }
        self.epoch += 1;
        self.sink.pause();
        self.sink.load(&spec.source);
        self.spec = spec;
        self.sink.seek(self.spec.loop_start);
        if self.enabled && !self.faulted {
            self.try_play();
        }
    }

    /// Playback position moved. `epoch` is the value captured when the
    /// listener was registered; a stale epoch means the event belongs to a
    /// source that is no longer current and is dropped.
    pub fn on_time_update(&mut self, epoch: u64, position: f64) {
        if epoch != self.epoch || !self.enabled {
            return;
        }
        if let Some(end) = self.spec.loop_end
            && position >= end
        {
            self.sink.seek(self.spec.loop_start);
            self.try_play();
        }
    }

    /// The track ran off the end of the file: wrap to the loop start
    pub fn on_ended(&mut self, epoch: u64) {
        if epoch != self.epoch || !self.enabled {
            return;
        }
        self.sink.seek(self.spec.loop_start);
        self.try_play();
    }

    /// First qualifying user input since a blocked start. One-shot: the shell
    /// removes the listener after calling this.
    pub fn on_user_gesture(&mut self) {
        if !self.needs_gesture {
            return;
        }
        self.needs_gesture = false;
        if self.enabled {
            self.try_play();
        }
    }

    /// A play attempt that looked fine synchronously was rejected later
    /// (the wasm sink learns about autoplay blocks from a promise).
    pub fn playback_blocked(&mut self) {
        if self.enabled {
            self.needs_gesture = true;
        }
    }

    /// The element reported a decode/load failure outside a play call.
    /// Same containment as [`PlayError::Media`]: audio off, app unaffected.
    pub fn media_failed(&mut self, message: &str) {
        log::warn!("media error, disabling audio: {message}");
        self.faulted = true;
        self.enabled = false;
        self.needs_gesture = false;
        self.sink.pause();
    }

    fn try_play(&mut self) {
        match self.sink.play() {
            Ok(()) => self.needs_gesture = false,
            Err(PlayError::AutoplayBlocked) => {
                log::info!("autoplay blocked; waiting for a user gesture");
                self.needs_gesture = true;
            }
            Err(PlayError::Media(msg)) => {
                log::warn!("media error, disabling audio: {msg}");
                self.faulted = true;
                self.enabled = false;
                self.needs_gesture = false;
                self.sink.pause();
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// Scripted sink: records calls, fails play() on demand
    #[derive(Debug, Default)]
    pub struct FakeSink {
        pub source: String,
        pub position: f64,
        pub playing: bool,
        pub volume: f64,
        pub play_result: Option<PlayError>,
        pub play_calls: u32,
    }

    impl AudioSink for FakeSink {
        fn load(&mut self, source: &str) {
            self.source = source.to_string();
            self.playing = false;
            self.position = 0.0;
        }

        fn play(&mut self) -> Result<(), PlayError> {
            self.play_calls += 1;
            match &self.play_result {
                Some(err) => Err(err.clone()),
                None => {
                    self.playing = true;
                    Ok(())
                }
            }
        }

        fn pause(&mut self) {
            self.playing = false;
        }

        fn seek(&mut self, seconds: f64) {
            self.position = seconds;
        }

        fn position(&self) -> f64 {
            self.position
        }

        fn set_volume(&mut self, volume: f64) {
            self.volume = volume;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeSink;
    use super::*;

    fn spec_a() -> MediaSpec {
        MediaSpec::new("a.mp3", 145.0, Some(300.0))
    }

    fn spec_b() -> MediaSpec {
        MediaSpec::new("b.mp3", 0.0, None)
    }

    #[test]
    fn test_enable_seeks_loop_start_and_plays() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), false, 0.75);
        assert!(!session.enabled());
        assert!(!session.sink().playing);

        session.set_enabled(true);
        assert!(session.sink().playing);
        assert_eq!(session.sink().position, 145.0);
        assert_eq!(session.sink().volume, 0.75);
    }

    #[test]
    fn test_disable_resets_to_zero_not_loop_start() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), true, 0.75);
        assert!(session.sink().playing);

        session.set_enabled(false);
        assert!(!session.sink().playing);
        // Stopped means position 0, distinct from "paused at loop point"
        assert_eq!(session.sink().position, 0.0);
    }

    #[test]
    fn test_switch_spec_seeks_before_playing() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), true, 0.75);
        session.switch_spec(spec_b());
        assert_eq!(session.sink().source, "b.mp3");
        // No stale position carried over from the old track
        assert_eq!(session.sink().position, 0.0);
        assert!(session.sink().playing);
    }

    #[test]
    fn test_switch_spec_bumps_epoch() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), true, 0.75);
        let old_epoch = session.epoch();
        session.switch_spec(spec_b());
        assert_eq!(session.epoch(), old_epoch + 1);
        // Same spec again is a no-op
        session.switch_spec(spec_b());
        assert_eq!(session.epoch(), old_epoch + 1);
    }

    #[test]
    fn test_loop_enforced_at_loop_end() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), true, 0.75);
        let epoch = session.epoch();

        // Mid-segment updates leave playback alone
        session.on_time_update(epoch, 200.0);
        assert_eq!(session.sink().position, 145.0);

        // Reaching the marker wraps within the same update
        session.on_time_update(epoch, 300.0);
        assert_eq!(session.sink().position, 145.0);
        assert!(session.sink().playing);
    }

    #[test]
    fn test_stale_epoch_ignored() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), true, 0.75);
        let stale = session.epoch();
        session.switch_spec(spec_b());
        session.sink.seek(12.0);

        // A queued callback from the old source must not touch the new one
        session.on_time_update(stale, 99999.0);
        assert_eq!(session.sink().position, 12.0);
    }

    #[test]
    fn test_natural_end_wraps_to_loop_start() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_b(), true, 0.75);
        session.sink.playing = false;
        session.on_ended(session.epoch());
        assert_eq!(session.sink().position, 0.0);
        assert!(session.sink().playing);
    }

    #[test]
    fn test_blocked_autoplay_waits_for_gesture() {
        let mut sink = FakeSink::default();
        sink.play_result = Some(PlayError::AutoplayBlocked);
        let mut session = PlaybackSession::new(sink, spec_a(), true, 0.75);
        assert!(session.needs_gesture());
        assert!(!session.sink().playing);

        // Gesture arrives; the block is gone now
        session.sink.play_result = None;
        session.on_user_gesture();
        assert!(!session.needs_gesture());
        assert!(session.sink().playing);
    }

    #[test]
    fn test_gesture_without_block_is_noop() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), false, 0.75);
        let calls = session.sink().play_calls;
        session.on_user_gesture();
        assert_eq!(session.sink().play_calls, calls);
    }

    #[test]
    fn test_media_error_faults_audio_only() {
        let mut sink = FakeSink::default();
        sink.play_result = Some(PlayError::Media("decode failed".into()));
        let mut session = PlaybackSession::new(sink, spec_a(), true, 0.75);
        assert!(session.faulted());
        assert!(!session.enabled());

        // Further toggles stay inert instead of erroring
        session.set_enabled(true);
        assert!(!session.enabled());
        session.switch_spec(spec_b());
        assert!(!session.sink().playing);
    }

    #[test]
    fn test_async_media_failure_faults_session() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), true, 0.75);
        session.media_failed("network error");
        assert!(session.faulted());
        assert!(!session.enabled());
        assert!(!session.sink().playing);
        assert!(!session.toggle_enabled());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut session = PlaybackSession::new(FakeSink::default(), spec_a(), false, 0.75);
        assert!(session.toggle_enabled());
        assert!(session.sink().playing);
        assert!(!session.toggle_enabled());
        assert!(!session.sink().playing);
    }
}
