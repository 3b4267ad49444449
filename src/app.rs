//! App coordinator
//!
//! Single owner of all mutable state: the active screen, the playback
//! session, the evasion engine and the preferences. Everything is mutated
//! from the event loop through explicit calls here, so a transition applies
//! its screen and its MediaSpec together and callers never observe a
//! mismatched pair.

use crate::config::{Content, NotifyMode};
use crate::consts::AUDIO_VOLUME;
use crate::evasion::EvasionEngine;
use crate::media::{AudioSink, PlaybackSession};
use crate::notify::Notifier;
use crate::screen::{IntroSequence, Screen};
use crate::settings::{PrefStore, Prefs};

pub struct App<S: AudioSink> {
    content: Content,
    screen: Screen,
    session: PlaybackSession<S>,
    evasion: EvasionEngine,
    intro: IntroSequence,
    prefs: Prefs,
    store: Box<dyn PrefStore>,
    notifier: Box<dyn Notifier>,
}

impl<S: AudioSink> App<S> {
    /// Wire the app up from persisted preferences and the intro MediaSpec
    pub fn new(
        content: Content,
        sink: S,
        store: Box<dyn PrefStore>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let prefs = Prefs::load(store.as_ref());
        let session = PlaybackSession::new(
            sink,
            content.audio_for(Screen::Intro).clone(),
            prefs.audio_enabled,
            AUDIO_VOLUME,
        );
        let intro = IntroSequence::new(content.intro_lines.len());
        Self {
            content,
            screen: Screen::Intro,
            session,
            evasion: EvasionEngine::new(),
            intro,
            prefs,
            store,
            notifier,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn prefs(&self) -> Prefs {
        self.prefs
    }

    pub fn session(&self) -> &PlaybackSession<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PlaybackSession<S> {
        &mut self.session
    }

    pub fn evasion(&self) -> &EvasionEngine {
        &self.evasion
    }

    pub fn evasion_mut(&mut self) -> &mut EvasionEngine {
        &mut self.evasion
    }

    pub fn intro(&self) -> &IntroSequence {
        &self.intro
    }

    pub fn intro_mut(&mut self) -> &mut IntroSequence {
        &mut self.intro
    }

    /// Tease line for the current attempt count (None before any attempt)
    pub fn tease_line(&self) -> Option<&str> {
        self.content.tease_line(self.evasion.attempts())
    }

    /// Intro -> Question. Returns true when the transition happened.
    pub fn advance(&mut self) -> bool {
        match self.screen.advanced() {
            Some(next) => {
                self.enter(next);
                true
            }
            None => false,
        }
    }

    /// Question -> Celebration, plus the best-effort notification
    pub fn confirm(&mut self) -> bool {
        match self.screen.confirmed() {
            Some(next) => {
                if self.content.notify_mode == NotifyMode::Webhook {
                    // Fire-and-forget; the transition below happens regardless
                    self.notifier.notify("confirmed");
                }
                self.enter(next);
                true
            }
            None => false,
        }
    }

    /// Celebration -> Intro
    pub fn restart(&mut self) -> bool {
        match self.screen.restarted() {
            Some(next) => {
                self.enter(next);
                true
            }
            None => false,
        }
    }

    /// Audio toggle: flips playback, persists the flag
    pub fn toggle_audio(&mut self) -> bool {
        self.prefs.audio_enabled = self.session.toggle_enabled();
        self.prefs.save_audio(self.store.as_mut());
        self.prefs.audio_enabled
    }

    /// Theme toggle: persists and returns the new dark flag
    pub fn toggle_theme(&mut self) -> bool {
        self.prefs.dark_theme = !self.prefs.dark_theme;
        self.prefs.save_theme(self.store.as_mut());
        self.prefs.dark_theme
    }

    fn enter(&mut self, next: Screen) {
        log::info!("screen: {:?} -> {:?}", self.screen, next);
        self.screen = next;
        match next {
            // Fresh counter and offset each time the question mounts
            Screen::Question => self.evasion = EvasionEngine::new(),
            Screen::Intro => self.intro = IntroSequence::new(self.content.intro_lines.len()),
            Screen::Celebration => {}
        }
        // New MediaSpec applies with the screen, and every transition turns
        // audio on (without touching the persisted preference)
        self.session.switch_spec(self.content.audio_for(next).clone());
        if !self.session.enabled() {
            self.session.set_enabled(true);
        }
    }
}
