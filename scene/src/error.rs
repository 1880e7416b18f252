use thiserror::Error;

/// Errors raised at setup-time boundaries of the scene graph.
///
/// Per-frame queries never fail; they fall back to empty or identity values.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Invalid rigid body parameter `{parameter}`: {value}")]
    InvalidRigidBody { parameter: &'static str, value: f32 },

    #[error("Unknown collision object type: {0}")]
    UnknownCollisionType(String),

    #[error("Config encoding error: {0}")]
    ConfigEncoding(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;
