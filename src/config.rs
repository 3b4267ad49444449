//! Content configuration
//!
//! All display text, audio sources and the notification mode live here so the
//! card can be re-skinned without touching code. Loaded once at startup;
//! treated as read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::media::MediaSpec;
use crate::screen::Screen;

/// How (and whether) a confirmation notification is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyMode {
    /// Never attempt a notification
    #[default]
    None,
    /// Fire-and-forget POST to `webhook_url`
    Webhook,
}

/// Static content for the whole experience
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    /// Lines revealed one by one on the intro screen
    pub intro_lines: Vec<String>,
    /// Label on the intro advance button
    pub intro_button: String,
    pub question_title: String,
    pub question_subtext: String,
    pub yes_button: String,
    pub no_button: String,
    pub celebration_title: String,
    pub celebration_body: String,
    pub signature: String,
    /// Teasing lines cycled through as the No button dodges
    pub tease_lines: Vec<String>,
    /// Audio source + loop window per screen
    pub intro_audio: MediaSpec,
    pub question_audio: MediaSpec,
    pub celebration_audio: MediaSpec,
    pub notify_mode: NotifyMode,
    pub webhook_url: String,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            intro_lines: vec![
                "Hey you,".into(),
                "Pause...".into(),
                "I made something small just for you.".into(),
                "Ready?".into(),
            ],
            intro_button: "Touch Me".into(),
            question_title: "Will you be my Valentine?".into(),
            question_subtext: "No pressure. Just a soft, real, honest \u{201c}yes\u{201d} if your heart says so.".into(),
            yes_button: "Yes, I will".into(),
            no_button: "No".into(),
            celebration_title: "You said yes, I knew it...".into(),
            celebration_body: "I\u{2019}d love to steal a little time with you this Valentine\u{2019}s. Thank you for being you.".into(),
            signature: "- Yours".into(),
            tease_lines: vec![
                "Nice try \u{1f60c}".into(),
                "Not today.".into(),
                "That button has\u{2026} survival instincts.".into(),
                "Okay okay, I see you \u{1f602}".into(),
                "Only one path today, love.".into(),
            ],
            intro_audio: MediaSpec::new("./assets/theme.mp3", 145.0, Some(300.0)),
            question_audio: MediaSpec::new("./assets/theme.mp3", 145.0, Some(300.0)),
            celebration_audio: MediaSpec::new("./assets/celebration.mp3", 0.0, None),
            notify_mode: NotifyMode::None,
            webhook_url: String::new(),
        }
    }
}

impl Content {
    /// Parse a JSON override. Missing fields fall back to the defaults, so a
    /// partial config file is fine.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The audio spec that accompanies `screen`
    pub fn audio_for(&self, screen: Screen) -> &MediaSpec {
        match screen {
            Screen::Intro => &self.intro_audio,
            Screen::Question => &self.question_audio,
            Screen::Celebration => &self.celebration_audio,
        }
    }

    /// Tease line for a given attempt count; the last line repeats forever.
    /// Returns `None` before the first attempt.
    pub fn tease_line(&self, attempts: u32) -> Option<&str> {
        if attempts == 0 || self.tease_lines.is_empty() {
            return None;
        }
        let idx = (attempts as usize).min(self.tease_lines.len() - 1);
        Some(self.tease_lines[idx].as_str())
    }
}
