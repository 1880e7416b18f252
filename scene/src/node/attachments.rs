use std::cell::RefCell;
use std::rc::Rc;

use super::Node;
use crate::attachment::{
    AiAgent, Attachment, AudioSource, Camera, CollisionObjectType, Form, Light, Model,
    ParticleEmitter, PhysicsCollisionObject, RigidBodyParameters,
};
use crate::error::Result;

impl Node {
    /// Swaps the component in `slot`, rebinding back-references. Returns
    /// false when `value` is already the current component.
    fn replace_slot<T: Attachment>(
        &self,
        slot: &RefCell<Option<Rc<T>>>,
        value: Option<Rc<T>>,
    ) -> bool {
        let unchanged = match (slot.borrow().as_ref(), value.as_ref()) {
            (Some(current), Some(new)) => Rc::ptr_eq(current, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        if let Some(new) = &value {
            new.binding().bind(self.self_ref.clone());
        }
        let old = slot.replace(value);
        if let Some(old) = old {
            old.binding().unbind_from(self);
        }
        true
    }

    pub(super) fn unbind_attachments(&mut self) {
        let this: *const Node = self;
        fn release<T: Attachment>(slot: &mut RefCell<Option<Rc<T>>>, node: *const Node) {
            if let Some(component) = slot.get_mut().take() {
                component.binding().unbind_from(node);
            }
        }
        release(&mut self.camera, this);
        release(&mut self.light, this);
        release(&mut self.model, this);
        release(&mut self.audio_source, this);
        release(&mut self.particle_emitter, this);
        release(&mut self.collision_object, this);
        release(&mut self.agent, this);
        release(&mut self.form, this);
    }

    // ========== Camera ==========

    pub fn camera(&self) -> Option<Rc<Camera>> {
        self.camera.borrow().clone()
    }

    pub fn set_camera(&self, camera: Option<Rc<Camera>>) {
        self.replace_slot(&self.camera, camera);
    }

    // ========== Light ==========

    pub fn light(&self) -> Option<Rc<Light>> {
        self.light.borrow().clone()
    }

    /// Attaches a light. Point lights contribute to bounds, so the aggregate
    /// bounds of this node and its ancestors are invalidated.
    pub fn set_light(&self, light: Option<Rc<Light>>) {
        if self.replace_slot(&self.light, light) {
            self.set_bounds_dirty();
        }
    }

    // ========== Model ==========

    pub fn model(&self) -> Option<Rc<Model>> {
        self.model.borrow().clone()
    }

    pub fn set_model(&self, model: Option<Rc<Model>>) {
        if self.replace_slot(&self.model, model) {
            self.transform_changed();
        }
    }

    // ========== Audio ==========

    pub fn audio_source(&self) -> Option<Rc<AudioSource>> {
        self.audio_source.borrow().clone()
    }

    pub fn set_audio_source(&self, source: Option<Rc<AudioSource>>) {
        self.replace_slot(&self.audio_source, source);
    }

    // ========== Particles ==========

    pub fn particle_emitter(&self) -> Option<Rc<ParticleEmitter>> {
        self.particle_emitter.borrow().clone()
    }

    pub fn set_particle_emitter(&self, emitter: Option<Rc<ParticleEmitter>>) {
        if self.replace_slot(&self.particle_emitter, emitter) {
            self.transform_changed();
        }
    }

    // ========== AI ==========

    pub fn agent(&self) -> Option<Rc<AiAgent>> {
        self.agent.borrow().clone()
    }

    pub fn set_agent(&self, agent: Option<Rc<AiAgent>>) {
        self.replace_slot(&self.agent, agent);
    }

    // ========== Form ==========

    pub fn form(&self) -> Option<Rc<Form>> {
        self.form.borrow().clone()
    }

    pub fn set_form(&self, form: Option<Rc<Form>>) {
        if self.replace_slot(&self.form, form) {
            self.transform_changed();
        }
    }

    // ========== Physics ==========

    pub fn collision_object(&self) -> Option<Rc<PhysicsCollisionObject>> {
        self.collision_object.borrow().clone()
    }

    /// Replaces the collision object with a new one of the given type,
    /// placed at the node's local matrix.
    ///
    /// Invalid parameters leave the current object in place. A type of
    /// [`CollisionObjectType::None`] empties the slot and returns `None`.
    pub fn set_collision_object(
        &self,
        object_type: CollisionObjectType,
        parameters: RigidBodyParameters,
    ) -> Result<Option<Rc<PhysicsCollisionObject>>> {
        if let Err(err) = parameters.validate() {
            log::warn!("Rejected collision object for node '{}': {}", self.id(), err);
            return Err(err);
        }

        let object = match object_type {
            CollisionObjectType::None => None,
            _ => Some(Rc::new(PhysicsCollisionObject::new(
                object_type,
                parameters,
                self.local_matrix(),
            ))),
        };
        if self.collision_object.borrow().is_some() || object.is_some() {
            log::debug!("Node '{}' collision object set to {}", self.id(), object_type);
        }

        self.replace_slot(&self.collision_object, object.clone());
        self.transform_changed();
        Ok(object)
    }

    /// Convenience form of [`Node::set_collision_object`] for a
    /// non-kinematic body.
    pub fn set_physics_rigid_body(
        &self,
        object_type: CollisionObjectType,
        mass: f32,
        friction: f32,
        restitution: f32,
        linear_damping: f32,
        angular_damping: f32,
    ) -> Result<Option<Rc<PhysicsCollisionObject>>> {
        self.set_collision_object(
            object_type,
            RigidBodyParameters::new(mass, friction, restitution, linear_damping, angular_damping),
        )
    }

    /// True when a non-kinematic rigid body with zero mass is attached.
    pub fn is_static(&self) -> bool {
        self.collision_object
            .borrow()
            .as_ref()
            .is_some_and(|object| object.is_static())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BoundingBox, RgbaColor};
    use crate::attachment::Mesh;
    use crate::{DirtyFlags, SceneError};
    use cgmath::Point3;

    fn model() -> Rc<Model> {
        Rc::new(Model::new(Rc::new(Mesh::from_box(BoundingBox::new(
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(1.0, 1.0, 1.0),
        )))))
    }

    #[test]
    fn test_set_model_binds_back_reference() {
        let node = Node::create("n");
        let model = model();
        node.set_model(Some(model.clone()));

        assert!(Rc::ptr_eq(&model.node().unwrap(), &node));
        assert!(Rc::ptr_eq(&node.model().unwrap(), &model));
    }

    #[test]
    fn test_replacing_component_unbinds_old() {
        let node = Node::create("n");
        let first = Rc::new(Camera::perspective(60.0, 1.0, 0.1, 10.0));
        let second = Rc::new(Camera::perspective(45.0, 1.0, 0.1, 10.0));

        node.set_camera(Some(first.clone()));
        node.set_camera(Some(second.clone()));

        assert!(first.node().is_none());
        assert!(Rc::ptr_eq(&second.node().unwrap(), &node));

        node.set_camera(None);
        assert!(second.node().is_none());
        assert!(node.camera().is_none());
    }

    #[test]
    fn test_setting_same_component_is_noop() {
        let node = Node::create("n");
        let model = model();
        node.set_model(Some(model.clone()));
        node.world_matrix();

        node.set_model(Some(model.clone()));
        assert!(!node.dirty_flags().contains(DirtyFlags::WORLD));
        assert_eq!(Rc::strong_count(&model), 2);
    }

    #[test]
    fn test_component_moved_to_other_node_keeps_new_binding() {
        let a = Node::create("a");
        let b = Node::create("b");
        let light = Rc::new(Light::point(RgbaColor::WHITE, 1.0));

        a.set_light(Some(light.clone()));
        b.set_light(Some(light.clone()));
        a.set_light(None);

        assert!(Rc::ptr_eq(&light.node().unwrap(), &b));
    }

    #[test]
    fn test_node_does_not_outlive_owner_through_component() {
        let node = Node::create("n");
        let weak = Rc::downgrade(&node);
        let model = model();
        node.set_model(Some(model.clone()));

        drop(node);
        assert!(weak.upgrade().is_none());
        assert!(model.node().is_none());
    }

    #[test]
    fn test_all_slots_round_trip() {
        let node = Node::create("n");
        node.set_audio_source(Some(Rc::new(AudioSource::default())));
        node.set_particle_emitter(Some(Rc::new(ParticleEmitter::new(10.0))));
        node.set_agent(Some(Rc::new(AiAgent::new("guard"))));
        node.set_form(Some(Rc::new(Form::new(2.0, 1.0))));

        assert!(Rc::ptr_eq(&node.audio_source().unwrap().node().unwrap(), &node));
        assert!(Rc::ptr_eq(&node.particle_emitter().unwrap().node().unwrap(), &node));
        assert_eq!(node.agent().unwrap().id(), "guard");
        assert_eq!(node.form().unwrap().size(), (2.0, 1.0));
    }

    #[test]
    fn test_set_rigid_body() {
        let node = Node::create("n");
        let body = node
            .set_physics_rigid_body(CollisionObjectType::RigidBody, 5.0, 0.5, 0.1, 0.2, 0.3)
            .unwrap()
            .unwrap();

        assert_eq!(body.object_type(), CollisionObjectType::RigidBody);
        assert_eq!(body.parameters().mass, 5.0);
        assert!(Rc::ptr_eq(&body.node().unwrap(), &node));
        assert!(!node.is_static());
    }

    #[test]
    fn test_replacing_rigid_body_releases_prior() {
        let node = Node::create("n");
        let first = node
            .set_physics_rigid_body(CollisionObjectType::RigidBody, 1.0, 0.5, 0.0, 0.0, 0.0)
            .unwrap()
            .unwrap();
        let second = node
            .set_physics_rigid_body(CollisionObjectType::GhostObject, 1.0, 0.5, 0.0, 0.0, 0.0)
            .unwrap()
            .unwrap();

        assert!(first.node().is_none());
        assert_eq!(Rc::strong_count(&first), 1);
        assert!(Rc::ptr_eq(&node.collision_object().unwrap(), &second));
    }

    #[test]
    fn test_none_type_empties_slot() {
        let node = Node::create("n");
        node.set_physics_rigid_body(CollisionObjectType::RigidBody, 1.0, 0.5, 0.0, 0.0, 0.0)
            .unwrap();

        let result = node
            .set_physics_rigid_body(CollisionObjectType::None, 0.0, 0.0, 0.0, 0.0, 0.0)
            .unwrap();

        assert!(result.is_none());
        assert!(node.collision_object().is_none());
    }

    #[test]
    fn test_invalid_parameters_keep_current_body() {
        let node = Node::create("n");
        let body = node
            .set_physics_rigid_body(CollisionObjectType::RigidBody, 1.0, 0.5, 0.0, 0.0, 0.0)
            .unwrap()
            .unwrap();

        let err = node
            .set_physics_rigid_body(CollisionObjectType::RigidBody, -2.0, 0.5, 0.0, 0.0, 0.0)
            .unwrap_err();

        assert!(matches!(err, SceneError::InvalidRigidBody { parameter: "mass", .. }));
        assert!(Rc::ptr_eq(&node.collision_object().unwrap(), &body));
    }

    #[test]
    fn test_static_body() {
        let node = Node::create("ground");
        node.set_physics_rigid_body(CollisionObjectType::RigidBody, 0.0, 0.5, 0.0, 0.0, 0.0)
            .unwrap();
        assert!(node.is_static());
    }
}
