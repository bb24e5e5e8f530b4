//! Electron rings
//!
//! In ring mode electrons are not simulated. Each occupied shell becomes a
//! torus hanging off the atom center, tilted into the horizontal plane, with
//! its electrons spaced evenly along it. Every frame each ring turns about its
//! local Y and Z axes by a fixed amount that shrinks with shell index.

use crate::atom::AtomCenter;
use crate::params::{ParticleParams, RingLayout};
use crate::scene::{Mesh, Scene, Shape, Transform, VisualHandle, VisualKind};
use atom_chemistry::MAX_SHELLS;
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Electrons of one principal shell and where they are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shell {
    /// Zero-based: index 0 is the K shell
    pub index: usize,
    pub electron_count: u32,
    pub ring_radius: f32,
}

/// Angle of the `i`-th of `n` electrons on a ring
pub fn electron_angle(i: u32, n: u32) -> f32 {
    i as f32 * (TAU / n as f32)
}

/// Occupied shells in index order; empty shells are left out
pub fn occupied_shells(distribution: &[u32; MAX_SHELLS], layout: &RingLayout) -> Vec<Shell> {
    distribution
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .map(|(index, &electron_count)| Shell {
            index,
            electron_count,
            ring_radius: layout.ring_radius(index),
        })
        .collect()
}

/// One drawn shell
#[derive(Debug)]
pub struct Ring {
    pub shell: Shell,
    /// Accumulated spin about the local Y and Z axes
    pub spin: f32,
    spin_rate: f32,
    torus: VisualHandle,
    electrons: Vec<VisualHandle>,
}

impl Ring {
    pub fn electrons(&self) -> &[VisualHandle] {
        &self.electrons
    }

    /// Ring orientation relative to the atom center
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(FRAC_PI_2)
            * Quat::from_rotation_y(self.spin)
            * Quat::from_rotation_z(self.spin)
    }

    /// Electron positions in the ring's own plane
    pub fn electron_offsets(&self) -> impl Iterator<Item = Vec3> + '_ {
        let n = self.shell.electron_count;
        let radius = self.shell.ring_radius;
        (0..n).map(move |i| {
            let angle = electron_angle(i, n);
            Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
        })
    }
}

/// Rings for every shell slot, with gaps for unoccupied shells
#[derive(Debug)]
pub struct ElectronRings {
    slots: [Option<Ring>; MAX_SHELLS],
}

impl ElectronRings {
    /// Create a torus and electron visuals for every shell.
    pub fn build<S: Scene>(
        shells: &[Shell],
        layout: &RingLayout,
        electron: &ParticleParams,
        scene: &mut S,
    ) -> Self {
        let mut slots: [Option<Ring>; MAX_SHELLS] = Default::default();

        for shell in shells {
            if shell.index >= MAX_SHELLS || shell.electron_count == 0 {
                log::warn!("Skipping ring for shell {}", shell.index);
                continue;
            }

            let torus = scene.add(Mesh {
                kind: VisualKind::Ring,
                shape: Shape::Torus {
                    radius: shell.ring_radius,
                    tube: layout.tube_radius,
                },
                color: layout.ring_color,
            });
            let electrons = (0..shell.electron_count)
                .map(|_| {
                    scene.add(Mesh {
                        kind: VisualKind::Electron,
                        shape: Shape::Sphere {
                            radius: electron.visual_radius,
                        },
                        color: electron.color,
                    })
                })
                .collect();

            log::debug!(
                "Ring {}: {} electrons at radius {:.1}",
                shell.index,
                shell.electron_count,
                shell.ring_radius
            );

            slots[shell.index] = Some(Ring {
                shell: *shell,
                spin: 0.0,
                spin_rate: layout.spin_rate(shell.index),
                torus,
                electrons,
            });
        }

        Self { slots }
    }

    /// The ring for a shell index, or `None` when that shell is empty or out of range
    pub fn ring(&self, shell_index: usize) -> Option<&Ring> {
        self.slots.get(shell_index)?.as_ref()
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.slots.iter().flatten()
    }

    pub fn electron_count(&self) -> usize {
        self.rings().map(|r| r.electrons.len()).sum()
    }

    /// Advance every present ring by one frame of spin
    pub fn advance(&mut self) {
        for ring in self.slots.iter_mut().flatten() {
            ring.spin += ring.spin_rate;
        }
    }

    /// World transforms of a ring's electrons
    pub fn electron_transforms(&self, shell_index: usize, center: &AtomCenter) -> Option<Vec<Transform>> {
        let ring = self.ring(shell_index)?;
        let rotation = center.rotation * ring.local_rotation();
        Some(
            ring.electron_offsets()
                .map(|offset| Transform {
                    position: center.position + rotation * offset,
                    rotation,
                })
                .collect(),
        )
    }

    /// Push ring and electron transforms to the scene.
    pub fn sync_visuals<S: Scene>(&self, center: &AtomCenter, scene: &mut S) {
        for ring in self.rings() {
            let rotation = center.rotation * ring.local_rotation();
            scene.set_transform(
                ring.torus,
                Transform {
                    position: center.position,
                    rotation,
                },
            );
            for (handle, offset) in ring.electrons.iter().zip(ring.electron_offsets()) {
                scene.set_transform(
                    *handle,
                    Transform {
                        position: center.position + rotation * offset,
                        rotation,
                    },
                );
            }
        }
    }

    /// Remove every ring and electron visual.
    pub fn teardown<S: Scene>(self, scene: &mut S) {
        for ring in self.slots.into_iter().flatten() {
            scene.remove(ring.torus);
            for handle in ring.electrons {
                scene.remove(handle);
            }
        }
    }
}
