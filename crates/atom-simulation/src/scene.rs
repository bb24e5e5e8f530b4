//! Render-side contract
//!
//! The simulation only creates meshes, moves them and removes them. Drawing is
//! left to whoever owns the [`Scene`]. [`InstanceScene`] keeps every visual as
//! a packed [`Instance`] so a renderer can upload the whole list at once.

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

/// Opaque reference to a mesh owned by a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualHandle(u32);

/// What a visual represents (stored as `u32` in [`Instance::kind`])
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Proton = 0,
    Neutron = 1,
    Electron = 2,
    Ring = 3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Torus in its local XY plane
    Torus { radius: f32, tube: f32 },
}

/// Geometry plus flat material color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub kind: VisualKind,
    pub shape: Shape,
    pub color: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };
}

/// Scene graph operations the simulation relies on
pub trait Scene {
    fn add(&mut self, mesh: Mesh) -> VisualHandle;

    /// Returns false if the handle was unknown
    fn remove(&mut self, handle: VisualHandle) -> bool;

    /// Returns false if the handle was unknown
    fn set_transform(&mut self, handle: VisualHandle, transform: Transform) -> bool;
}

/// GPU-ready instance record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub position: [f32; 3],
    /// Sphere radius or torus major radius
    pub radius: f32,
    /// Rotation quaternion (x, y, z, w)
    pub rotation: [f32; 4],
    pub color: [f32; 3],
    /// `VisualKind` as u32
    pub kind: u32,
    /// Torus tube radius, zero for spheres
    pub tube: f32,
}

impl Instance {
    fn from_mesh(mesh: &Mesh) -> Self {
        let (radius, tube) = match mesh.shape {
            Shape::Sphere { radius } => (radius, 0.0),
            Shape::Torus { radius, tube } => (radius, tube),
        };
        Self {
            position: [0.0; 3],
            radius,
            rotation: Quat::IDENTITY.to_array(),
            color: mesh.color,
            kind: mesh.kind as u32,
            tube,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.rotation)
    }
}

/// Scene storing instances densely for upload
///
/// Handles are never reused, so a stale handle can never move another mesh.
#[derive(Debug, Default)]
pub struct InstanceScene {
    instances: Vec<Instance>,
    /// Dense index -> handle id
    owners: Vec<u32>,
    /// Handle id -> dense index
    slots: Vec<Option<usize>>,
}

impl InstanceScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, handle: VisualHandle) -> Option<&Instance> {
        let index = (*self.slots.get(handle.0 as usize)?)?;
        self.instances.get(index)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Instance list as raw bytes, ready for a vertex/storage buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn count_of(&self, kind: VisualKind) -> usize {
        self.instances
            .iter()
            .filter(|i| i.kind == kind as u32)
            .count()
    }
}

impl Scene for InstanceScene {
    fn add(&mut self, mesh: Mesh) -> VisualHandle {
        let id = self.slots.len() as u32;
        self.slots.push(Some(self.instances.len()));
        self.owners.push(id);
        self.instances.push(Instance::from_mesh(&mesh));
        VisualHandle(id)
    }

    fn remove(&mut self, handle: VisualHandle) -> bool {
        let Some(index) = self.slots.get_mut(handle.0 as usize).and_then(Option::take) else {
            return false;
        };

        self.instances.swap_remove(index);
        self.owners.swap_remove(index);
        // The former last instance now lives at `index`
        if let Some(&moved) = self.owners.get(index) {
            self.slots[moved as usize] = Some(index);
        }
        true
    }

    fn set_transform(&mut self, handle: VisualHandle, transform: Transform) -> bool {
        let Some(Some(index)) = self.slots.get(handle.0 as usize).copied() else {
            return false;
        };
        let instance = &mut self.instances[index];
        instance.position = transform.position.to_array();
        instance.rotation = transform.rotation.to_array();
        true
    }
}
