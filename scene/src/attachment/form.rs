use std::cell::Cell;

use super::{Attachment, NodeBinding};

/// A UI form rendered in 3D at its node's placement. Layout is external;
/// only the form's size in world units is tracked.
#[derive(Debug)]
pub struct Form {
    width: Cell<f32>,
    height: Cell<f32>,
    binding: NodeBinding,
}

impl Form {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
            binding: NodeBinding::new(),
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width.get(), self.height.get())
    }

    pub fn set_size(&self, width: f32, height: f32) {
        self.width.set(width);
        self.height.set(height);
    }
}

impl Attachment for Form {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}
