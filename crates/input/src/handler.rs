//! Stateful input handler.
//!
//! Resolves the two-key force-next chord (`n` then a piece letter). Every
//! other key maps straight through [`handle_key_event`].

use crossterm::event::{KeyCode, KeyEvent};

use crate::map::{handle_key_event, piece_for_key, should_quit, Intent};

#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    awaiting_piece: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the next key will be read as a piece letter
    pub fn awaiting_piece(&self) -> bool {
        self.awaiting_piece
    }

    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Intent> {
        if self.awaiting_piece {
            if should_quit(key) {
                self.awaiting_piece = false;
                return Some(Intent::Quit);
            }
            // Esc and unknown letters cancel; the prefix is never sticky
            self.awaiting_piece = false;
            if key.code == KeyCode::Esc {
                return None;
            }
            return piece_for_key(key).map(Intent::ForceNext);
        }

        match handle_key_event(key)? {
            Intent::ForceNextPrefix => {
                self.awaiting_piece = true;
                None
            }
            intent => Some(intent),
        }
    }
}
