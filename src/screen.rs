//! Screen state machine
//!
//! Three screens, three one-way edges, and the whole thing is a cycle:
//! Intro -> Question -> Celebration -> (restart) -> Intro. Nothing else.

use serde::{Deserialize, Serialize};

use crate::consts::{INTRO_AUTO_ADVANCE_MS, INTRO_LINE_INTERVAL_MS};

/// Which screen is live right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Line-by-line teaser, "touch me" to continue
    Intro,
    /// The question, the Yes button, and the button that will not be caught
    Question,
    /// Petals, the message, and a restart link
    Celebration,
}

impl Screen {
    /// The screen `advance()` leads to, if legal from here
    pub fn advanced(self) -> Option<Screen> {
        match self {
            Screen::Intro => Some(Screen::Question),
            _ => None,
        }
    }

    /// The screen `confirm()` leads to, if legal from here
    pub fn confirmed(self) -> Option<Screen> {
        match self {
            Screen::Question => Some(Screen::Celebration),
            _ => None,
        }
    }

    /// The screen `restart()` leads to, if legal from here
    pub fn restarted(self) -> Option<Screen> {
        match self {
            Screen::Celebration => Some(Screen::Intro),
            _ => None,
        }
    }
}

/// Timed reveal of the intro lines.
///
/// One line appears per interval; once all are visible the advance button
/// shows and an auto-advance timer takes over. The shell drives this with
/// timeouts and drops them (via the screen's timer registry) on unmount.
#[derive(Debug, Clone)]
pub struct IntroSequence {
    line_count: usize,
    /// Lines currently visible (1-based; the first line shows immediately)
    revealed: usize,
}

impl IntroSequence {
    pub fn new(line_count: usize) -> Self {
        Self {
            line_count,
            revealed: line_count.min(1),
        }
    }

    /// Lines to render right now
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// All lines visible; show the advance button
    pub fn complete(&self) -> bool {
        self.revealed >= self.line_count
    }

    /// Reveal the next line. Returns false once there is nothing left.
    pub fn reveal_next(&mut self) -> bool {
        if self.complete() {
            return false;
        }
        self.revealed += 1;
        true
    }

    /// Delay before the next timer tick: per-line interval while revealing,
    /// then the auto-advance window, then nothing.
    pub fn next_delay_ms(&self) -> Option<u32> {
        if self.complete() {
            if self.line_count > 0 {
                Some(INTRO_AUTO_ADVANCE_MS)
            } else {
                None
            }
        } else {
            Some(INTRO_LINE_INTERVAL_MS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_legal_edges_exist() {
        assert_eq!(Screen::Intro.advanced(), Some(Screen::Question));
        assert_eq!(Screen::Intro.confirmed(), None);
        assert_eq!(Screen::Intro.restarted(), None);

        assert_eq!(Screen::Question.confirmed(), Some(Screen::Celebration));
        assert_eq!(Screen::Question.advanced(), None);
        assert_eq!(Screen::Question.restarted(), None);

        assert_eq!(Screen::Celebration.restarted(), Some(Screen::Intro));
        assert_eq!(Screen::Celebration.advanced(), None);
        assert_eq!(Screen::Celebration.confirmed(), None);
    }

    #[test]
    fn test_machine_is_cyclic() {
        let s = Screen::Intro.advanced().unwrap();
        let s = s.confirmed().unwrap();
        assert_eq!(s.restarted(), Some(Screen::Intro));
    }

    #[test]
    fn test_intro_reveals_then_completes() {
        let mut seq = IntroSequence::new(4);
        assert_eq!(seq.revealed(), 1);
        assert!(!seq.complete());
        assert_eq!(seq.next_delay_ms(), Some(INTRO_LINE_INTERVAL_MS));

        assert!(seq.reveal_next());
        assert!(seq.reveal_next());
        assert!(seq.reveal_next());
        assert!(seq.complete());
        assert_eq!(seq.revealed(), 4);

        // Last line up: the remaining timer is the auto-advance
        assert_eq!(seq.next_delay_ms(), Some(INTRO_AUTO_ADVANCE_MS));
        assert!(!seq.reveal_next());
        assert_eq!(seq.revealed(), 4);
    }

    #[test]
    fn test_empty_intro_has_no_timers() {
        let seq = IntroSequence::new(0);
        assert!(seq.complete());
        assert_eq!(seq.next_delay_ms(), None);
    }
}
