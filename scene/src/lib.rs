//! A retained-mode scene graph.
//!
//! [`Node`]s form a parent/child hierarchy with lazily cached world
//! transforms and aggregated bounding volumes. Components such as cameras,
//! lights and models attach to nodes through typed slots. A [`Scene`] holds
//! the root nodes and the active camera.

pub use arbor_common as common;

pub mod attachment;
mod config;
mod dirty;
mod error;
mod listener;
mod node;
mod scene;
mod transform;
mod tree;


pub use attachment::{
    AiAgent, Attachment, AudioSource, Camera, CollisionObjectType, Form, Light, LightKind, Mesh,
    Model, NodeBinding, ParticleEmitter, PhysicsCollisionObject, Projection, RigidBodyParameters,
};
pub use config::{SceneConfig, Viewport};
pub use dirty::DirtyFlags;
pub use error::{Result, SceneError};
pub use listener::NodeListener;
pub use node::{Children, Node, NodeType};
pub use scene::Scene;
pub use transform::Transform;
pub use tree::{walk_tree, TreeVisitor};
