use slotmap::SlotMap;

use crate::scene::ObjectKey;
use crate::scene::object::{ObjectKind, SceneObject};

/// Scene container
///
/// Flat, mutable collection of the objects and lights of one mounted
/// surface. Objects are exclusively owned while attached; removing one hands
/// it back to the caller (or drops it), which is the only disposal there is.
///
/// The camera is not part of the object set: each surface owns exactly one
/// and passes it alongside the scene.
pub struct Scene {
    objects: SlotMap<ObjectKey, SceneObject>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Attaches an object and returns its key.
    pub fn add(&mut self, object: SceneObject) -> ObjectKey {
        log::trace!("Scene: add '{}'", object.name);
        self.objects.insert(object)
    }

    /// Detaches an object. Returns `None` when the key is stale.
    pub fn remove(&mut self, key: ObjectKey) -> Option<SceneObject> {
        self.objects.remove(key)
    }

    #[must_use]
    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &SceneObject)> {
        self.objects.iter()
    }

    /// Number of attached point clouds.
    #[must_use]
    pub fn point_cloud_count(&self) -> usize {
        self.count_where(|kind| matches!(kind, ObjectKind::Points(_)))
    }

    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.count_where(|kind| matches!(kind, ObjectKind::Solid(_)))
    }

    #[must_use]
    pub fn light_count(&self) -> usize {
        self.count_where(|kind| matches!(kind, ObjectKind::Light(_)))
    }

    fn count_where(&self, pred: impl Fn(&ObjectKind) -> bool) -> usize {
        self.objects.values().filter(|o| pred(&o.kind)).count()
    }

    /// Rebuilds dirty local matrices. Called by the surface once per tick.
    pub fn update_matrices(&mut self) {
        for object in self.objects.values_mut() {
            object.transform.update_local_matrix();
        }
    }
}
