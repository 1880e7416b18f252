use std::cell::Cell;

use super::{Attachment, NodeBinding};

/// Emits particles from its node's world position. The simulation is
/// external; only emission state lives here.
#[derive(Debug)]
pub struct ParticleEmitter {
    emission_rate: Cell<f32>,
    started: Cell<bool>,
    binding: NodeBinding,
}

impl ParticleEmitter {
    /// `emission_rate` is in particles per second.
    pub fn new(emission_rate: f32) -> Self {
        Self {
            emission_rate: Cell::new(emission_rate),
            started: Cell::new(false),
            binding: NodeBinding::new(),
        }
    }

    pub fn emission_rate(&self) -> f32 {
        self.emission_rate.get()
    }

    pub fn set_emission_rate(&self, rate: f32) {
        self.emission_rate.set(rate);
    }

    pub fn start(&self) {
        self.started.set(true);
    }

    pub fn stop(&self) {
        self.started.set(false);
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }
}

impl Attachment for ParticleEmitter {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}
