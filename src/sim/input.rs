//! Engine-facing input and dialog seams
//!
//! The simulation never polls a keyboard or opens a window. It asks these
//! traits, and the host (native runner, tests) answers.

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Debug: jump straight to the win prompt
    ForceWin,
}

impl Key {
    pub const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::ForceWin => 2,
        }
    }
}

/// Boolean key-state queries
pub trait KeyInput {
    /// Key is held this frame
    fn is_key_pressed(&self, key: Key) -> bool;
    /// Key went down this frame (edge-triggered, not on release or hold)
    fn was_key_pressed_this_frame(&self, key: Key) -> bool;
}

/// Modal yes/no confirmation
pub trait Prompt {
    fn ask_yes_no(&mut self, message: &str) -> bool;
}

/// Key states for a single tick, with the previous tick kept for edge detection
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    held: [bool; Key::COUNT],
    previous: [bool; Key::COUNT],
}

impl TickInput {
    pub fn set(&mut self, key: Key, down: bool) {
        self.held[key.index()] = down;
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Roll this frame's states into the previous frame. Call after each tick.
    pub fn next_frame(&mut self) {
        self.previous = self.held;
    }
}

impl KeyInput for TickInput {
    fn is_key_pressed(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    fn was_key_pressed_this_frame(&self, key: Key) -> bool {
        self.held[key.index()] && !self.previous[key.index()]
    }
}
