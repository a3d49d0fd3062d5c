pub mod conjugation;
pub mod english;
pub mod frame;
pub mod frames;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::generator::frame::{Binding, Difficulty, Frame, FrameKind};
use crate::generator::frames::FrameLibrary;
use crate::lexicon::Lexicon;
use crate::session::card::Card;

pub const DEFAULT_MIN_LEXICON_ENTRIES: usize = 10;
pub const DEFAULT_RETRY_BUDGET: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Below this many entries (but above zero) the seed lexicon and seed
    /// frames are used instead of the caller's snapshot.
    pub min_lexicon_entries: usize,
    /// Frame attempts per card before the iteration is skipped.
    pub retry_budget: usize,
    pub difficulty: Difficulty,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            min_lexicon_entries: DEFAULT_MIN_LEXICON_ENTRIES,
            retry_budget: DEFAULT_RETRY_BUDGET,
            difficulty: Difficulty::default(),
        }
    }
}

pub struct SentenceGenerator {
    library: FrameLibrary,
    seed_library: FrameLibrary,
    seed_lexicon: Lexicon,
    options: GeneratorOptions,
    rng: SmallRng,
    next_card: u64,
}

impl SentenceGenerator {
    pub fn new(options: GeneratorOptions, rng: SmallRng) -> Self {
        Self {
            library: FrameLibrary::standard(),
            seed_library: FrameLibrary::seed(),
            seed_lexicon: Lexicon::seed(),
            options,
            rng,
            next_card: 0,
        }
    }

    pub fn seeded(options: GeneratorOptions, seed: u64) -> Self {
        Self::new(options, SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy(options: GeneratorOptions) -> Self {
        Self::new(options, SmallRng::from_entropy())
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GeneratorOptions) {
        self.options = options;
    }

    pub fn library(&self) -> &FrameLibrary {
        &self.library
    }

    /// Up to `count` cards from the snapshot. Iterations whose every frame
    /// attempt fails are skipped, so the result may be shorter.
    pub fn generate(&mut self, lexicon: &Lexicon, count: usize) -> Vec<Card> {
        if count == 0 || lexicon.is_empty() {
            return Vec::new();
        }

        let (library, lexicon) = if lexicon.len() < self.options.min_lexicon_entries {
            tracing::debug!(
                entries = lexicon.len(),
                min = self.options.min_lexicon_entries,
                "lexicon below minimum, using seed lexicon"
            );
            (&self.seed_library, &self.seed_lexicon)
        } else {
            (&self.library, lexicon)
        };

        let kinds = satisfiable_kinds(library, lexicon, self.options.difficulty);
        if kinds.is_empty() {
            tracing::debug!(difficulty = %self.options.difficulty, "no satisfiable frames");
            return Vec::new();
        }

        let mut cards = Vec::with_capacity(count);
        for iteration in 0..count {
            let card = (0..self.options.retry_budget.max(1)).find_map(|_| {
                let kind = *kinds.choose(&mut self.rng)?;
                let variants: Vec<&Frame> = library
                    .variants(kind)
                    .filter(|f| f.is_satisfiable(lexicon))
                    .collect();
                let frame = *variants.choose(&mut self.rng)?;
                let binding = bind_frame(frame, lexicon, &mut self.rng)?;
                let rendered = frame.render(&binding)?;
                Some((frame, rendered))
            });

            match card {
                Some((frame, rendered)) => {
                    let id = format!("c{}", self.next_card);
                    self.next_card += 1;
                    cards.push(Card::assemble(
                        id,
                        rendered.tokens,
                        rendered.target,
                        frame.kind,
                        frame.hint.clone(),
                    ));
                }
                None => tracing::debug!(iteration, "retry budget exhausted, skipping"),
            }
        }
        cards
    }

    /// Sample one binding for `frame` from `lexicon`, or `None` when a slot
    /// has no admissible entry left after distinctness.
    pub fn bind<'a>(&mut self, frame: &Frame, lexicon: &'a Lexicon) -> Option<Binding<'a>> {
        bind_frame(frame, lexicon, &mut self.rng)
    }
}

fn satisfiable_kinds(
    library: &FrameLibrary,
    lexicon: &Lexicon,
    difficulty: Difficulty,
) -> Vec<FrameKind> {
    library
        .kinds()
        .into_iter()
        .filter(|kind| kind.difficulty() <= difficulty)
        .filter(|&kind| library.variants(kind).any(|f| f.is_satisfiable(lexicon)))
        .collect()
}

fn bind_frame<'a>(frame: &Frame, lexicon: &'a Lexicon, rng: &mut SmallRng) -> Option<Binding<'a>> {
    let modifier = match frame.modifier {
        Some(kind) => Some(kind.choices().choose(rng)?),
        None => None,
    };
    let mut binding = Binding::new()
        .with_verb(frame.verb)
        .with_modifier(modifier);

    for spec in &frame.slots {
        let taken = spec.distinct_from.and_then(|other| binding.get(other));
        let candidates: Vec<_> = spec
            .candidates(lexicon)
            .into_iter()
            .filter(|entry| taken.is_none_or(|t| t.surface != entry.surface))
            .collect();
        let entry = *candidates.choose(rng)?;
        binding.bind(spec.slot, entry);
    }

    debug_assert!(frame.accepts(&binding));
    Some(binding)
}
