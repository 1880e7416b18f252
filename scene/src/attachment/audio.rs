use std::cell::Cell;

use super::{Attachment, NodeBinding};

/// A positional sound emitter. Playback itself happens elsewhere; the node
/// only supplies the position.
#[derive(Debug)]
pub struct AudioSource {
    gain: Cell<f32>,
    pitch: Cell<f32>,
    looped: Cell<bool>,
    binding: NodeBinding,
}

impl Default for AudioSource {
    fn default() -> Self {
        Self::new(1.0, 1.0, false)
    }
}

impl AudioSource {
    pub fn new(gain: f32, pitch: f32, looped: bool) -> Self {
        Self {
            gain: Cell::new(gain),
            pitch: Cell::new(pitch),
            looped: Cell::new(looped),
            binding: NodeBinding::new(),
        }
    }

    /// A copy of the source's settings that is not attached to any node.
    pub fn duplicate(&self) -> Self {
        Self::new(self.gain.get(), self.pitch.get(), self.looped.get())
    }

    pub fn gain(&self) -> f32 {
        self.gain.get()
    }

    pub fn set_gain(&self, gain: f32) {
        self.gain.set(gain);
    }

    pub fn pitch(&self) -> f32 {
        self.pitch.get()
    }

    pub fn set_pitch(&self, pitch: f32) {
        self.pitch.set(pitch);
    }

    pub fn is_looped(&self) -> bool {
        self.looped.get()
    }

    pub fn set_looped(&self, looped: bool) {
        self.looped.set(looped);
    }
}

impl Attachment for AudioSource {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}
