use std::cell::{Cell, RefCell};

use super::{Attachment, NodeBinding};

/// An AI agent driving its node. The state machine is external; the agent
/// records which state it is in.
#[derive(Debug)]
pub struct AiAgent {
    id: String,
    enabled: Cell<bool>,
    state: RefCell<Option<String>>,
    binding: NodeBinding,
}

impl AiAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: Cell::new(true),
            state: RefCell::new(None),
            binding: NodeBinding::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    pub fn state(&self) -> Option<String> {
        self.state.borrow().clone()
    }

    pub fn set_state(&self, state: Option<&str>) {
        *self.state.borrow_mut() = state.map(str::to_string);
    }
}

impl Attachment for AiAgent {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}
