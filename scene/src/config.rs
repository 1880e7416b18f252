use serde::{Deserialize, Serialize};

use crate::common::RgbaColor;
use crate::error::Result;

/// A rectangular region of the render target, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Width over height, or 1.0 for a degenerate viewport.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Scene-wide settings applied when a [`Scene`](crate::Scene) is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Identifier of the scene. Not required to be unique.
    pub id: String,
    /// Ambient light color.
    /// Default: black.
    pub ambient_color: RgbaColor,
    /// Viewport the scene renders into.
    /// Default: 1280x720 at the origin.
    pub viewport: Viewport,
    /// When true, the audio listener follows the active camera.
    /// Default: true.
    pub bind_audio_listener_to_camera: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            ambient_color: RgbaColor::BLACK,
            viewport: Viewport::new(0.0, 0.0, 1280.0, 720.0),
            bind_audio_listener_to_camera: true,
        }
    }
}

impl SceneConfig {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_ambient_color(mut self, color: RgbaColor) -> Self {
        self.ambient_color = color;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_audio_listener_bound_to_camera(mut self, bind: bool) -> Self {
        self.bind_audio_listener_to_camera = bind;
        self
    }

    /// Encodes the config with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decodes a config previously produced by [`SceneConfig::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
