//! Section sequencing.
//!
//! A [`Sequencer`] walks an ordered list of [`Section`]s. Every call to
//! [`Sequencer::advance`] shows the next word of the active section, moves on
//! to the next section once one runs dry, and either stops or starts over
//! after the last one. Tag sections alternate between showing a word and
//! scattering the particles.

use std::collections::VecDeque;

use kinetype_fonts::GlyphRegistry;
use log::{debug, info};

use crate::{
    EngineError, FinishEvent, FormationController, Publisher, Result, Subscription, Word,
    WordSource, WordStyle, World, build_word,
};

/// How a section's words are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// One word per advance.
    Words,
    /// A scatter between every word.
    Tags,
    /// Pixel-art signs, one per advance.
    Sign,
}

/// A queue of prebuilt words of one kind.
#[derive(Debug, Clone)]
pub struct Section {
    kind: SectionKind,
    pending: VecDeque<Word>,
    used: Vec<Word>,
    tag_toggle_counter: u32,
}

impl Section {
    /// # Errors
    /// Returns [`EngineError::EmptySection`] when `words` is empty.
    pub fn new(kind: SectionKind, words: Vec<Word>) -> Result<Self> {
        if words.is_empty() {
            return Err(EngineError::EmptySection(kind));
        }
        Ok(Self {
            kind,
            pending: words.into(),
            used: Vec::new(),
            tag_toggle_counter: 0,
        })
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Take the next pending word, remembering it as used.
    pub fn next(&mut self) -> Option<&mut Word> {
        let word = self.pending.pop_front()?;
        self.used.push(word);
        self.used.last_mut()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Put used words back in front of the queue, in their original order,
    /// and restart tag alternation.
    pub fn reset(&mut self) {
        for word in self.used.drain(..).rev() {
            self.pending.push_front(word);
        }
        self.tag_toggle_counter = 0;
    }

    pub fn tag_toggle_counter(&self) -> u32 {
        self.tag_toggle_counter
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// Where the sequencer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Nothing shown yet.
    Idle,
    SectionActive(SectionKind),
    /// All sections shown and looping is off. Further advances do nothing.
    Finished,
}

/// Result of one [`Sequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A word of `cells` cells from a `kind` section was loaded.
    Loaded { kind: SectionKind, cells: usize },
    /// The particles were scattered.
    Dispersed,
    /// Nothing left to show.
    Finished,
}

/// Walks sections and drives the formation controller.
#[derive(Debug)]
pub struct Sequencer {
    registry: GlyphRegistry,
    style: WordStyle,
    controller: FormationController,
    pending: VecDeque<Section>,
    finished: Vec<Section>,
    active: Option<Section>,
    looping: bool,
    halted: bool,
    free: bool,
    on_finish: Publisher<FinishEvent>,
}

impl Sequencer {
    /// Create a sequencer that builds words with `registry` and `style`.
    pub fn new(registry: GlyphRegistry, style: WordStyle, controller: FormationController) -> Self {
        Self {
            registry,
            style,
            controller,
            pending: VecDeque::new(),
            finished: Vec::new(),
            active: None,
            looping: false,
            halted: false,
            free: false,
            on_finish: Publisher::new(),
        }
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn registry(&self) -> &GlyphRegistry {
        &self.registry
    }

    /// Build every word of a section up front and queue it.
    ///
    /// # Errors
    /// Fails on the first word that can't be built, or when `sources` is empty.
    /// Nothing is queued on failure.
    pub fn add_section(&mut self, kind: SectionKind, sources: &[WordSource]) -> Result<()> {
        let words = sources
            .iter()
            .map(|source| build_word(source, &self.registry, &self.style))
            .collect::<Result<Vec<_>>>()?;
        self.pending.push_back(Section::new(kind, words)?);
        debug!("queued {kind:?} section with {} entries", sources.len());
        Ok(())
    }

    /// Convenience wrapper around [`Sequencer::add_section`] for plain text.
    pub fn add_text_section(&mut self, kind: SectionKind, texts: &[&str]) -> Result<()> {
        let sources: Vec<WordSource> = texts
            .iter()
            .map(|t| WordSource::Glyph((*t).to_string()))
            .collect();
        self.add_section(kind, &sources)
    }

    pub fn state(&self) -> SequencerState {
        if self.halted {
            return SequencerState::Finished;
        }
        match &self.active {
            Some(section) => SequencerState::SectionActive(section.kind()),
            None => SequencerState::Idle,
        }
    }

    /// Whether the particles are currently scattered rather than in formation.
    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Listen for the end of the sequence.
    pub fn on_finish(&self, listener: impl Fn(&FinishEvent) + 'static) -> Subscription {
        self.on_finish.subscribe(listener)
    }

    /// Show the next word, or scatter, or finish.
    ///
    /// # Errors
    /// [`EngineError::EmptySequencer`] if no section was ever added.
    pub fn advance(&mut self, world: &mut World) -> Result<Advance> {
        if self.halted {
            return Ok(Advance::Finished);
        }

        let mut active = match self.active.take() {
            Some(section) => section,
            None => self.pending.pop_front().ok_or(EngineError::EmptySequencer)?,
        };

        if active.is_finished() {
            if self.pending.is_empty() {
                info!("sequence finished");
                self.on_finish.emit(&FinishEvent);

                if !self.looping {
                    self.active = Some(active);
                    self.halted = true;
                    return Ok(Advance::Finished);
                }

                self.finished.push(active);
                self.rewind_finished();
            } else {
                self.finished.push(active);
            }
            active = self.pending.pop_front().ok_or(EngineError::EmptySequencer)?;
            debug!("switched to {:?} section", active.kind());
        }

        let outcome = self.dispatch(&mut active, world);
        self.active = Some(active);
        outcome
    }

    /// Put every section back in its original order, as if nothing was shown.
    pub fn restart(&mut self) {
        if let Some(active) = self.active.take() {
            self.finished.push(active);
        }
        let rest: Vec<Section> = self.pending.drain(..).collect();
        self.finished.extend(rest);
        self.rewind_finished();
        self.halted = false;
        self.free = false;
    }

    fn rewind_finished(&mut self) {
        for mut section in self.finished.drain(..) {
            section.reset();
            self.pending.push_back(section);
        }
    }

    fn dispatch(&mut self, section: &mut Section, world: &mut World) -> Result<Advance> {
        match section.kind() {
            SectionKind::Words | SectionKind::Sign => self.load_next(section, world),
            SectionKind::Tags => {
                let outcome = if section.tag_toggle_counter % 2 == 1 {
                    self.load_next(section, world)
                } else {
                    self.controller.disperse(world).map(|()| {
                        self.free = true;
                        Advance::Dispersed
                    })
                };
                section.tag_toggle_counter += 1;
                outcome
            }
        }
    }

    fn load_next(&mut self, section: &mut Section, world: &mut World) -> Result<Advance> {
        let kind = section.kind();
        let word = section.next().ok_or(EngineError::EmptySection(kind))?;
        let cells = word.total_cell_count();
        self.controller.load(world, word)?;
        self.free = false;
        Ok(Advance::Loaded { kind, cells })
    }
}
