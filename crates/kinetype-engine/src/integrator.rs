//! Particle motion integrator.
//!
//! One call to [`ParticleSystem::update`] advances every particle by a single
//! semi-implicit Euler step. Particles in [`MotionMode::LinearApproach`] steer
//! towards their destination with artificial friction and snap onto it once
//! close; particles in [`MotionMode::Forces`] are pushed by a unit force
//! scaled by their mass.

use kinetype_core::{Canvas, Vec2};
use log::warn;
use thiserror::Error;

use crate::{MotionMode, Particle, ParticleId};

/// Upper bound on particle speed, in canvas units per step.
pub const MAX_SPEED: f32 = 10.0;

/// Magnitude of the friction force opposing motion.
pub const FRICTION: f32 = 0.5;

/// Distance below which a particle jumps onto its destination.
pub const SNAP_DISTANCE: f32 = 20.0;

// Distance range remapped onto [0, max_speed] when steering.
const APPROACH_NEAR: f32 = 10.0;
const APPROACH_FAR: f32 = 100.0;

/// A particle skipped during a step.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("{id:?} has non-finite state at {position}")]
pub struct ParticleFault {
    pub id: ParticleId,
    pub position: Vec2,
}

/// What happened during one integration step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Particles that were integrated.
    pub moved: usize,
    /// Particles already resting on their destination.
    pub parked: usize,
    /// Particles that jumped onto their destination.
    pub snapped: usize,
    /// Particles left untouched because their state was corrupt.
    pub faults: Vec<ParticleFault>,
}

enum StepOutcome {
    Moved,
    Parked,
    Snapped,
}

/// Integrates particle motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSystem {
    pub max_speed: f32,
    pub friction: f32,
    pub snap_distance: f32,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            friction: FRICTION,
            snap_distance: SNAP_DISTANCE,
        }
    }
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every particle by one step on a canvas of the given size.
    ///
    /// A particle whose state is, or would become, non-finite is left as it
    /// was and reported; the rest of the pool is still integrated.
    pub fn update<'a>(
        &self,
        particles: impl IntoIterator<Item = &'a mut Particle>,
        canvas: Canvas,
    ) -> StepReport {
        let mut report = StepReport::default();

        for particle in particles {
            let mut next = *particle;
            match self.step(&mut next, canvas) {
                Some(outcome) => {
                    *particle = next;
                    match outcome {
                        StepOutcome::Moved => report.moved += 1,
                        StepOutcome::Parked => report.parked += 1,
                        StepOutcome::Snapped => report.snapped += 1,
                    }
                }
                None => {
                    let fault = ParticleFault {
                        id: particle.id(),
                        position: particle.position,
                    };
                    warn!("skipping particle: {fault}");
                    report.faults.push(fault);
                }
            }
        }

        report
    }

    /// Integrate one particle. Returns `None` if its state is not finite.
    fn step(&self, p: &mut Particle, canvas: Canvas) -> Option<StepOutcome> {
        if !p.is_finite() {
            return None;
        }

        let mut diff = p.destination - canvas.to_canvas(p.position);

        match p.motion_mode {
            MotionMode::LinearApproach => {
                // Snapping rounds X, so a fractional destination is only
                // reachable in render space
                if diff == Vec2::ZERO || p.position == canvas.to_render(p.destination) {
                    return Some(StepOutcome::Parked);
                }

                let d = diff.length();
                if d < self.snap_distance {
                    p.position = canvas.to_render(p.destination);
                    p.rotation = 0.0;
                    return p.is_finite().then_some(StepOutcome::Snapped);
                }

                diff = diff / d
                    * remap(d, APPROACH_NEAR, APPROACH_FAR, 0.0, self.max_speed);
                diff -= p.acceleration;

                let friction = sign_or_zero(-p.velocity) * self.friction;
                p.apply_force(friction);
            }
            MotionMode::Forces => {
                diff = diff.normalize_or_zero();
            }
        }

        p.apply_force(diff);

        p.rotation = p.velocity.y.atan2(p.velocity.x);

        // Canvas Y grows downwards, render Y upwards
        p.acceleration.y = -p.acceleration.y;

        p.velocity += p.acceleration;
        p.velocity = p.velocity.clamp_length_max(self.max_speed);
        p.position += p.velocity;
        p.acceleration = Vec2::ZERO;

        p.is_finite().then_some(StepOutcome::Moved)
    }
}

/// Linear remap of `n` from `[start1, stop1]` to `[start2, stop2]`, unclamped.
fn remap(n: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    (n - start1) / (stop1 - start1) * (stop2 - start2) + start2
}

/// Per-axis sign, with zero (of either sign) staying zero.
fn sign_or_zero(v: Vec2) -> Vec2 {
    let axis = |a: f32| if a == 0.0 { 0.0 } else { a.signum() };
    Vec2::new(axis(v.x), axis(v.y))
}
