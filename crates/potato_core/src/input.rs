//! Key transitions queued between simulation ticks.
//!
//! The host event loop may deliver key events at any point relative to the
//! tick. Transitions are queued here and drained at the start of the next
//! tick, so every down/up pair reaches the simulation exactly once, in
//! delivery order, no matter how the host interleaves events with ticks.

/// The closed set of simulation inputs. The host is responsible for mapping
/// raw platform key codes onto these before they reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    MoveLeft,
    MoveRight,
    Jump,
}

/// A single key edge: pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    pub key: GameKey,
    pub pressed: bool,
}

#[derive(Debug)]
pub struct InputQueue {
    queued: Vec<KeyTransition>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { queued: Vec::new() }
    }

    pub fn key_down(&mut self, key: GameKey) {
        self.queued.push(KeyTransition { key, pressed: true });
    }

    pub fn key_up(&mut self, key: GameKey) {
        self.queued.push(KeyTransition {
            key,
            pressed: false,
        });
    }

    /// Takes every transition delivered since the last drain, oldest first.
    pub fn drain(&mut self) -> Vec<KeyTransition> {
        std::mem::take(&mut self.queued)
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
