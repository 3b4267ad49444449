//! Valentine Card - an interactive three-screen proposal page
//!
//! Core modules:
//! - `screen`: Screen state machine and intro line sequencing
//! - `evasion`: The "No" button's pointer-avoidance engine
//! - `media`: Audio playback session with segment looping
//! - `app`: Coordinator tying screens, audio and preferences together
//! - `config`: Display text, audio specs and notification settings
//! - `settings`: Persisted boolean preferences (audio, theme)
//! - `petals`: Deterministic petal field for the celebration screen
//! - `platform`: Browser event/timer/storage plumbing

pub mod app;
pub mod config;
pub mod evasion;
pub mod media;
pub mod notify;
pub mod petals;
pub mod platform;
pub mod screen;
pub mod settings;

pub use app::App;
pub use config::Content;
pub use media::{MediaSpec, PlaybackSession};
pub use screen::Screen;

use glam::Vec2;

/// Interaction tuning constants
pub mod consts {
    /// Pointer distance (px) from the No button's center that triggers evasion
    pub const TRIGGER_RADIUS: f32 = 250.0;
    /// Fixed escape step (px) per evasion, independent of pointer distance
    pub const FLEE_DISTANCE: f32 = 180.0;
    /// Minimum margin (px) kept between the button and every viewport edge
    pub const VIEWPORT_PADDING: f32 = 80.0;
    /// Minimum interval (ms) between counted tease attempts
    pub const TEASE_COOLDOWN_MS: f64 = 150.0;
    /// Duration (s) of one evasion animation (ease-out)
    pub const EVADE_DURATION_SECS: f32 = 0.8;

    /// Delay (ms) between revealed intro lines
    pub const INTRO_LINE_INTERVAL_MS: u32 = 3000;
    /// Auto-advance (ms) once the last intro line is visible
    pub const INTRO_AUTO_ADVANCE_MS: u32 = 12000;

    /// Outgoing screen animation time (s)
    pub const TRANSITION_OUT_SECS: f32 = 0.2;
    /// Full screen swap time (s), incoming animation included
    pub const TRANSITION_TOTAL_SECS: f32 = 0.75;

    /// Playback volume (0.0 - 1.0)
    pub const AUDIO_VOLUME: f64 = 0.75;

    /// Petals spawned on the celebration screen
    pub const PETAL_COUNT: usize = 60;
}

/// Axis-aligned box in viewport coordinates (origin = top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl BoxRect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Center point of the box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }
}

/// Viewport dimensions in px
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
