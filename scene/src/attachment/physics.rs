use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use cgmath::Matrix4;

use super::{Attachment, NodeBinding};
use crate::error::{Result, SceneError};

/// The kind of physics object attached to a node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum CollisionObjectType {
    /// No collision object; setting this type empties the slot.
    #[default]
    None,
    RigidBody,
    GhostObject,
    Character,
}

impl CollisionObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::RigidBody => "RIGID_BODY",
            Self::GhostObject => "GHOST_OBJECT",
            Self::Character => "CHARACTER",
        }
    }
}

impl fmt::Display for CollisionObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollisionObjectType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "RIGID_BODY" => Ok(Self::RigidBody),
            "GHOST_OBJECT" => Ok(Self::GhostObject),
            "CHARACTER" => Ok(Self::Character),
            _ => Err(SceneError::UnknownCollisionType(s.to_string())),
        }
    }
}

/// Simulation parameters of a rigid body.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RigidBodyParameters {
    /// Zero mass makes a non-kinematic body static.
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    /// In `[0, 1]`.
    pub linear_damping: f32,
    /// In `[0, 1]`.
    pub angular_damping: f32,
    /// A kinematic body is driven by its node rather than by the simulation.
    pub kinematic: bool,
}

impl Default for RigidBodyParameters {
    fn default() -> Self {
        Self {
            mass: 0.0,
            friction: 0.5,
            restitution: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            kinematic: false,
        }
    }
}

impl RigidBodyParameters {
    pub fn new(
        mass: f32,
        friction: f32,
        restitution: f32,
        linear_damping: f32,
        angular_damping: f32,
    ) -> Self {
        Self {
            mass,
            friction,
            restitution,
            linear_damping,
            angular_damping,
            kinematic: false,
        }
    }

    pub fn with_kinematic(mut self, kinematic: bool) -> Self {
        self.kinematic = kinematic;
        self
    }

    /// Rejects negative mass, friction or restitution and damping outside
    /// `[0, 1]`. NaN is rejected everywhere.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("mass", self.mass),
            ("friction", self.friction),
            ("restitution", self.restitution),
        ];
        for (parameter, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(SceneError::InvalidRigidBody { parameter, value });
            }
        }

        let unit = [
            ("linear_damping", self.linear_damping),
            ("angular_damping", self.angular_damping),
        ];
        for (parameter, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(SceneError::InvalidRigidBody { parameter, value });
            }
        }

        Ok(())
    }
}

/// A physics object attached to a node.
///
/// The simulation pushes its result through
/// [`set_world_transform`](Self::set_world_transform). For a non-kinematic
/// rigid body that matrix is authoritative: the node reports it as its world
/// matrix instead of composing its local transform.
#[derive(Debug)]
pub struct PhysicsCollisionObject {
    object_type: CollisionObjectType,
    parameters: Cell<RigidBodyParameters>,
    world_transform: Cell<Matrix4<f32>>,
    binding: NodeBinding,
}

impl PhysicsCollisionObject {
    /// Creates an unattached object placed at `initial_transform`.
    pub fn new(
        object_type: CollisionObjectType,
        parameters: RigidBodyParameters,
        initial_transform: Matrix4<f32>,
    ) -> Self {
        Self {
            object_type,
            parameters: Cell::new(parameters),
            world_transform: Cell::new(initial_transform),
            binding: NodeBinding::new(),
        }
    }

    pub fn object_type(&self) -> CollisionObjectType {
        self.object_type
    }

    pub fn parameters(&self) -> RigidBodyParameters {
        self.parameters.get()
    }

    pub fn is_kinematic(&self) -> bool {
        self.parameters.get().kinematic
    }

    /// Switches between simulation-driven and node-driven placement.
    pub fn set_kinematic(&self, kinematic: bool) {
        let parameters = self.parameters.get();
        if parameters.kinematic == kinematic {
            return;
        }
        self.parameters.set(parameters.with_kinematic(kinematic));
        if let Some(node) = self.node() {
            node.transform_changed();
        }
    }

    /// True when this object's world transform overrides its node's.
    pub fn is_authoritative(&self) -> bool {
        self.object_type == CollisionObjectType::RigidBody && !self.is_kinematic()
    }

    /// A non-kinematic rigid body with zero mass never moves.
    pub fn is_static(&self) -> bool {
        self.is_authoritative() && self.parameters.get().mass == 0.0
    }

    pub fn world_transform(&self) -> Matrix4<f32> {
        self.world_transform.get()
    }

    /// Stores the simulation's latest placement and invalidates the owning
    /// node's cached transforms.
    pub fn set_world_transform(&self, transform: Matrix4<f32>) {
        self.world_transform.set(transform);
        if let Some(node) = self.node() {
            node.transform_changed();
        }
    }
}

impl Attachment for PhysicsCollisionObject {
    fn binding(&self) -> &NodeBinding {
        &self.binding
    }
}
