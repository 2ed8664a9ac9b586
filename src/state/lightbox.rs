//! Lightbox navigation and focus trapping
//!
//! The lightbox is a circular cursor over the gallery sequence. While it is
//! open, keyboard focus is confined to its controls by a `FocusTrap`.

use super::route::Route;

/// Keys the gallery reacts to. Other keys never reach the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Escape,
    Tab,
    ShiftTab,
    Enter,
}

/// Result of offering a key to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Handled,
    Ignored,
    /// The key activated a link; the caller starts the navigation
    Navigate(Route),
}

/// Cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lightbox {
    #[default]
    Closed,
    Open { index: usize },
}

impl Lightbox {
    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Lightbox::Open { index } => Some(*index),
            Lightbox::Closed => None,
        }
    }

    /// Open on `index`. Refused when it is not a valid position in a sequence of `len`.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        *self = Lightbox::Open { index };
        true
    }

    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    /// Advance with wrap-around. No-op when closed or when the sequence is empty.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        self.step(len, |index| (index + 1) % len)
    }

    /// Step back with wrap-around. No-op when closed or when the sequence is empty.
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        self.step(len, |index| (index + len - 1) % len)
    }

    fn step(&mut self, len: usize, advance: impl FnOnce(usize) -> usize) -> Option<usize> {
        let Lightbox::Open { index } = *self else {
            return None;
        };
        if len == 0 {
            return None;
        }
        // A shrunken sequence may have left the cursor past the end
        let next = advance(index.min(len - 1));
        *self = Lightbox::Open { index: next };
        Some(next)
    }
}

/// Interactive elements inside the open lightbox, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxControl {
    Close,
    Previous,
    Next,
}

impl LightboxControl {
    pub const TAB_ORDER: [LightboxControl; 3] = [
        LightboxControl::Close,
        LightboxControl::Previous,
        LightboxControl::Next,
    ];
}

/// Confines Tab cycling to a fixed ring of controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap<T> {
    ring: Vec<T>,
    /// `None` until something in the ring takes focus
    position: Option<usize>,
}

impl<T: Copy + PartialEq> FocusTrap<T> {
    /// Trap focus on `ring`, starting on its first element
    pub fn new(ring: &[T]) -> Self {
        Self {
            ring: ring.to_vec(),
            position: (!ring.is_empty()).then_some(0),
        }
    }

    /// A ring nothing is focused in yet. The first Tab lands on the first element,
    /// the first Shift+Tab on the last.
    pub fn unfocused(ring: &[T]) -> Self {
        Self {
            ring: ring.to_vec(),
            position: None,
        }
    }

    pub fn current(&self) -> Option<T> {
        self.position.and_then(|position| self.ring.get(position)).copied()
    }

    /// Tab: move forward, wrapping from the last element to the first
    pub fn forward(&mut self) -> Option<T> {
        let len = self.ring.len();
        if len > 0 {
            self.position = Some(self.position.map_or(0, |position| (position + 1) % len));
        }
        self.current()
    }

    /// Shift+Tab: move backward, wrapping from the first element to the last
    pub fn backward(&mut self) -> Option<T> {
        let len = self.ring.len();
        if len > 0 {
            self.position = Some(self.position.map_or(len - 1, |position| (position + len - 1) % len));
        }
        self.current()
    }

    /// Move focus to `target` if it belongs to the ring
    pub fn focus(&mut self, target: T) -> bool {
        match self.ring.iter().position(|item| *item == target) {
            Some(position) => {
                self.position = Some(position);
                true
            }
            None => false,
        }
    }
}
