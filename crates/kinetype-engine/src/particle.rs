//! Simulated particles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use kinetype_core::Vec2;

use crate::{EngineError, Result};

/// Global counter for particle identities
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a particle, used to remove it from a pool.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct ParticleId(u64);

impl ParticleId {
    /// Allocate a new unique id.
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ParticleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({})", self.0)
    }
}

/// How a particle moves towards its destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MotionMode {
    /// Steer with friction and snap once close; forces ignore mass.
    #[default]
    LinearApproach,
    /// Pushed by unit forces scaled by mass; never snaps.
    Forces,
}

/// A point mass steered towards a destination.
///
/// `position` is in render space, `destination` in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    id: ParticleId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    mass: f32,
    /// Heading in radians.
    pub rotation: f32,
    pub destination: Vec2,
    pub motion_mode: MotionMode,
}

impl Particle {
    /// Mass given to particles that don't specify one.
    pub const DEFAULT_MASS: f32 = 10.0;

    /// A particle at rest at `position`, heading for the canvas origin.
    pub fn new(position: Vec2) -> Self {
        Self {
            id: ParticleId::new(),
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: Self::DEFAULT_MASS,
            rotation: 0.0,
            destination: Vec2::ZERO,
            motion_mode: MotionMode::LinearApproach,
        }
    }

    /// Builder-style mass setter.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidMass`] unless `mass` is finite and positive.
    pub fn with_mass(mut self, mass: f32) -> Result<Self> {
        self.set_mass(mass)?;
        Ok(self)
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Set the mass used by [`MotionMode::Forces`].
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidMass`] unless `mass` is finite and positive.
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EngineError::InvalidMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    pub fn set_destination(&mut self, destination: Vec2) {
        self.destination = destination;
    }

    /// Accumulate a force. Only [`MotionMode::Forces`] divides it by mass.
    pub fn apply_force(&mut self, force: Vec2) {
        match self.motion_mode {
            MotionMode::LinearApproach => self.acceleration += force,
            MotionMode::Forces => self.acceleration += force / self.mass,
        }
    }

    /// Whether every component of the kinematic state is finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.destination.is_finite()
            && self.rotation.is_finite()
    }
}
