//! The particle pool and its render attributes.

use kinetype_core::{Canvas, Rgb, Vec2};

use crate::{Particle, ParticleId, ParticleSystem, Result, StepReport};

/// A particle together with what the renderer needs to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub particle: Particle,
    /// Formation color, or `None` while the particle belongs to no formation.
    pub color: Option<Rgb>,
    /// Edge length of the drawn square.
    pub size: f32,
}

/// Owns the particle pool, in a stable order, and the canvas it lives on.
#[derive(Debug, Clone)]
pub struct World {
    objects: Vec<WorldObject>,
    canvas: Canvas,
    system: ParticleSystem,
}

impl World {
    pub fn new(canvas: Canvas) -> Self {
        Self::with_system(canvas, ParticleSystem::default())
    }

    pub fn with_system(canvas: Canvas, system: ParticleSystem) -> Self {
        Self {
            objects: Vec::new(),
            canvas,
            system,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Update the canvas size.
    ///
    /// Every destination moves with the canvas center, so a centered
    /// formation stays centered and scattered particles keep heading for the
    /// middle.
    pub fn resize(&mut self, canvas: Canvas) {
        let shift = canvas.center() - self.canvas.center();
        for object in &mut self.objects {
            object.particle.destination += shift;
        }
        self.canvas = canvas;
    }

    /// Create a particle at a render-space position and append it to the pool.
    ///
    /// # Errors
    /// Returns [`crate::EngineError::InvalidMass`] for a non-positive mass.
    pub fn create_particle(
        &mut self,
        position: Vec2,
        size: f32,
        mass: f32,
        color: Option<Rgb>,
    ) -> Result<ParticleId> {
        let particle = Particle::new(position).with_mass(mass)?;
        let id = particle.id();
        self.objects.push(WorldObject {
            particle,
            color,
            size,
        });
        Ok(id)
    }

    /// Append objects to the end of the pool.
    pub fn add(&mut self, objects: impl IntoIterator<Item = WorldObject>) {
        self.objects.extend(objects);
    }

    /// Remove the particles with the given ids. Returns how many were removed.
    pub fn remove(&mut self, ids: &[ParticleId]) -> usize {
        let before = self.objects.len();
        self.objects.retain(|o| !ids.contains(&o.particle.id()));
        before - self.objects.len()
    }

    /// Drop every particle. Safe to call at any time, any number of times.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [WorldObject] {
        &mut self.objects
    }

    /// Advance every particle by one integration step.
    pub fn update(&mut self) -> StepReport {
        self.system
            .update(self.objects.iter_mut().map(|o| &mut o.particle), self.canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_with(n: usize) -> (World, Vec<ParticleId>) {
        let mut world = World::new(Canvas::new(200.0, 100.0));
        let ids = (0..n)
            .map(|i| {
                world
                    .create_particle(Vec2::new(i as f32, 0.0), 4.0, 0.1, None)
                    .unwrap()
            })
            .collect();
        (world, ids)
    }

    #[test]
    fn test_create_keeps_insertion_order() {
        let (world, ids) = world_with(3);
        let order: Vec<ParticleId> = world.objects().iter().map(|o| o.particle.id()).collect();
        assert_eq!(order, ids);
        assert_eq!(world.objects()[2].particle.position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_create_rejects_bad_mass() {
        let (mut world, _) = world_with(0);
        assert!(world.create_particle(Vec2::ZERO, 4.0, 0.0, None).is_err());
        assert!(world.is_empty());
    }

    #[test]
    fn test_remove_by_identity() {
        let (mut world, ids) = world_with(4);
        assert_eq!(world.remove(&[ids[1], ids[3]]), 2);
        let left: Vec<ParticleId> = world.objects().iter().map(|o| o.particle.id()).collect();
        assert_eq!(left, vec![ids[0], ids[2]]);
        assert_eq!(world.remove(&[ids[1]]), 0);
    }

    #[test]
    fn test_add_appends() {
        let (mut world, _) = world_with(1);
        let extra = WorldObject {
            particle: Particle::new(Vec2::ZERO),
            color: Some(Rgb::WHITE),
            size: 2.0,
        };
        let id = extra.particle.id();
        world.add([extra]);
        assert_eq!(world.len(), 2);
        assert_eq!(world.objects()[1].particle.id(), id);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (mut world, _) = world_with(5);
        world.clear();
        world.clear();
        assert!(world.is_empty());
        assert_eq!(world.update(), StepReport::default());
    }

    #[test]
    fn test_resize_moves_destinations_with_center() {
        let (mut world, _) = world_with(2);
        world.objects_mut()[0].particle.destination = Vec2::new(110.0, 60.0);
        world.objects_mut()[1].particle.destination = world.canvas().center();
        let positions: Vec<Vec2> = world.objects().iter().map(|o| o.particle.position).collect();

        world.resize(Canvas::new(300.0, 140.0));
        assert_eq!(world.canvas(), Canvas::new(300.0, 140.0));
        assert_eq!(world.objects()[0].particle.destination, Vec2::new(160.0, 80.0));
        assert_eq!(world.objects()[1].particle.destination, world.canvas().center());
        // Render space is centered, so positions need no change
        let after: Vec<Vec2> = world.objects().iter().map(|o| o.particle.position).collect();
        assert_eq!(after, positions);
    }

    #[test]
    fn test_update_integrates_pool() {
        let (mut world, _) = world_with(2);
        for o in world.objects_mut() {
            o.particle.destination = Vec2::new(190.0, 50.0);
        }
        let report = world.update();
        assert_eq!(report.moved, 2);
    }
}
