//! Particle formation engine for kinetype.
//!
//! This crate turns words and pixel-art signs into grid formations, moves a
//! pool of particles between them and sequences which formation is shown.
//! Nothing here draws or sleeps: callers own the frame loop (see [`Runner`])
//! and read particle state back from the [`World`] to render it.

mod error;
mod events;
mod formation;
mod grid;
mod integrator;
mod particle;
mod runner;
mod sequencer;
mod world;

pub use error::{EngineError, Result};
pub use events::{FinishEvent, Publisher, Subscription};
pub use formation::{FormationController, FormationOptions, SurplusAssignment};
pub use grid::{
    Cell, CellGrid, Letter, Margin, Word, WordSource, WordStyle, build_letter, build_sign_word,
    build_word, decompose_glyph,
};
pub use integrator::{
    FRICTION, MAX_SPEED, ParticleFault, ParticleSystem, SNAP_DISTANCE, StepReport,
};
pub use particle::{MotionMode, Particle, ParticleId};
pub use runner::{FrameHooks, Runner, RunnerState};
pub use sequencer::{Advance, Section, SectionKind, Sequencer, SequencerState};
pub use world::{World, WorldObject};
