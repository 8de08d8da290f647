//! Assigns pool particles to the cells of a formation.

use kinetype_core::Vec2;
use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Cell, MotionMode, Result, Word, World};

/// Mass of particles taking part in a formation.
const FORMATION_MASS: f32 = 0.1;

/// How particles beyond a formation's cell count pick a target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurplusAssignment {
    /// A uniformly random cell, re-rolled for every particle on every load.
    #[default]
    Random,
    /// Cell `index mod cell_count`.
    Cyclic,
}

/// Settings for a [`FormationController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationOptions {
    /// Render-space point where new particles appear.
    pub origin: Vec2,
    /// Drawn size of new particles.
    pub particle_size: f32,
    pub surplus: SurplusAssignment,
}

impl Default for FormationOptions {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            particle_size: 12.0,
            surplus: SurplusAssignment::Random,
        }
    }
}

/// Moves the particle pool into formations, or scatters it.
#[derive(Debug, Clone)]
pub struct FormationController {
    options: FormationOptions,
    rng: StdRng,
}

impl FormationController {
    pub fn new(options: FormationOptions) -> Self {
        Self {
            options,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Controller with a fixed random seed, for reproducible runs.
    pub fn with_seed(options: FormationOptions, seed: u64) -> Self {
        Self {
            options,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn options(&self) -> &FormationOptions {
        &self.options
    }

    /// Center `word` on the canvas and send every particle to one of its cells.
    ///
    /// The pool grows to the word's cell count if needed but never shrinks.
    /// The first `total_cell_count` particles take the cells in order; the
    /// rest share cells according to [`SurplusAssignment`]. Returns the number
    /// of particles created.
    pub fn load(&mut self, world: &mut World, word: &mut Word) -> Result<usize> {
        let total = word.total_cell_count();
        let missing = total.saturating_sub(world.len());
        for _ in 0..missing {
            world.create_particle(
                self.options.origin,
                self.options.particle_size,
                FORMATION_MASS,
                None,
            )?;
        }
        if missing > 0 {
            debug!("grew particle pool by {missing} to {}", world.len());
        }

        let canvas = world.canvas();
        word.set_position(Vec2::new(
            canvas.width / 2.0 - word.width() / 2.0,
            canvas.height / 2.0 - word.height() / 2.0,
        ));

        let cells: Vec<Cell> = word.cells().copied().collect();
        if cells.is_empty() {
            return Ok(missing);
        }

        for (i, object) in world.objects_mut().iter_mut().enumerate() {
            let cell = if i < total {
                cells[i]
            } else {
                match self.options.surplus {
                    SurplusAssignment::Random => cells[self.rng.random_range(0..cells.len())],
                    SurplusAssignment::Cyclic => cells[i % cells.len()],
                }
            };

            object.color = Some(cell.color);
            object.particle.set_mass(FORMATION_MASS)?;
            object.particle.motion_mode = MotionMode::LinearApproach;
            object.particle.set_destination(cell.position());
        }

        debug!("loaded formation of {total} cells onto {} particles", world.len());
        Ok(missing)
    }

    /// Scatter every particle: no color, random mass, pushed towards the center.
    pub fn disperse(&mut self, world: &mut World) -> Result<()> {
        let center = world.canvas().center();
        for object in world.objects_mut() {
            let mass = self.rng.random_range(1..=5) as f32;
            object.color = None;
            object.particle.set_mass(mass)?;
            object.particle.motion_mode = MotionMode::Forces;
            object.particle.set_destination(center);
        }
        debug!("dispersed {} particles", world.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kinetype_core::{Canvas, Rgb};
    use kinetype_fonts::{GlyphMatrix, GlyphRegistry};

    use super::*;
    use crate::{WordSource, WordStyle, build_word};

    fn word(text: &str) -> Word {
        let mut registry = GlyphRegistry::new();
        registry.register('A', GlyphMatrix::from_art('A', &["██", "██"]).unwrap());
        registry.register('B', GlyphMatrix::from_art('B', &["█", "█", "█"]).unwrap());
        let style = WordStyle {
            box_size: 10.0,
            box_spacing: 0.0,
            letter_spacing: 0.0,
            color: Rgb(0xABCDEF),
            sign_box_spacing: 0.0,
        };
        build_word(&WordSource::Glyph(text.to_string()), &registry, &style).unwrap()
    }

    fn controller(surplus: SurplusAssignment) -> FormationController {
        FormationController::with_seed(
            FormationOptions {
                origin: Vec2::new(-5.0, 7.0),
                particle_size: 3.0,
                surplus,
            },
            7,
        )
    }

    #[test]
    fn test_pool_grows_by_missing_count() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        world.create_particle(Vec2::ZERO, 3.0, 1.0, None).unwrap();
        let existing = world.objects()[0].particle.id();

        let mut w = word("AB");
        let created = controller(SurplusAssignment::Random).load(&mut world, &mut w).unwrap();

        assert_eq!(created, 7 - 1);
        assert_eq!(world.len(), 7);
        assert_eq!(world.objects()[0].particle.id(), existing);
        assert!(world.objects()[1..].iter().all(|o| o.particle.position == Vec2::new(-5.0, 7.0)));
        assert!(world.objects()[1..].iter().all(|o| o.size == 3.0));
    }

    #[test]
    fn test_pool_never_shrinks() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut ctl = controller(SurplusAssignment::Random);
        ctl.load(&mut world, &mut word("AAB")).unwrap();
        assert_eq!(world.len(), 11);
        assert_eq!(ctl.load(&mut world, &mut word("B")).unwrap(), 0);
        assert_eq!(world.len(), 11);
    }

    #[test]
    fn test_word_centered_and_prefix_assigned_in_order() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut w = word("AB");
        controller(SurplusAssignment::Random).load(&mut world, &mut w).unwrap();

        // Word is 30 wide and 30 tall
        assert_eq!(w.position(), Vec2::new(185.0, 135.0));

        for (object, cell) in world.objects().iter().zip(w.cells()) {
            assert_eq!(object.particle.destination, cell.position());
            assert_eq!(object.color, Some(Rgb(0xABCDEF)));
            assert_eq!(object.particle.mass(), 0.1);
            assert_eq!(object.particle.motion_mode, MotionMode::LinearApproach);
        }
    }

    #[test]
    fn test_surplus_targets_are_word_cells() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut ctl = controller(SurplusAssignment::Random);
        ctl.load(&mut world, &mut word("AAB")).unwrap();

        let mut w = word("B");
        ctl.load(&mut world, &mut w).unwrap();
        let targets: Vec<Vec2> = w.cells().map(|c| c.position()).collect();
        assert!(world
            .objects()
            .iter()
            .all(|o| targets.contains(&o.particle.destination)));
    }

    #[test]
    fn test_cyclic_surplus_is_deterministic() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut ctl = controller(SurplusAssignment::Cyclic);
        ctl.load(&mut world, &mut word("AAB")).unwrap();

        let mut w = word("B");
        ctl.load(&mut world, &mut w).unwrap();
        let cells: Vec<Vec2> = w.cells().map(|c| c.position()).collect();
        for (i, object) in world.objects().iter().enumerate() {
            assert_eq!(object.particle.destination, cells[i % 3]);
        }
    }

    #[test]
    fn test_empty_word_only_recenters() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut ctl = controller(SurplusAssignment::Random);
        ctl.load(&mut world, &mut word("A")).unwrap();
        let before: Vec<Vec2> = world.objects().iter().map(|o| o.particle.destination).collect();

        ctl.load(&mut world, &mut word("")).unwrap();
        let after: Vec<Vec2> = world.objects().iter().map(|o| o.particle.destination).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_formation_recentered_after_resize() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut w = word("AB");
        controller(SurplusAssignment::Random).load(&mut world, &mut w).unwrap();

        world.resize(Canvas::new(600.0, 500.0));

        // Same word centered on the new canvas from scratch
        w.set_position(Vec2::new(300.0 - w.width() / 2.0, 250.0 - w.height() / 2.0));
        let expected: Vec<Vec2> = w.cells().map(|c| c.position()).collect();
        let actual: Vec<Vec2> = world.objects().iter().map(|o| o.particle.destination).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_disperse_scatters_pool() {
        let mut world = World::new(Canvas::new(400.0, 300.0));
        let mut ctl = controller(SurplusAssignment::Random);
        ctl.load(&mut world, &mut word("AB")).unwrap();
        ctl.disperse(&mut world).unwrap();

        for object in world.objects() {
            assert_eq!(object.color, None);
            assert_eq!(object.particle.motion_mode, MotionMode::Forces);
            assert_eq!(object.particle.destination, Vec2::new(200.0, 150.0));
            let mass = object.particle.mass();
            assert!((1.0..=5.0).contains(&mass) && mass.fract() == 0.0);
        }
    }
}
