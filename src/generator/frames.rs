use crate::generator::conjugation::{GO, Governs, SEE, STUDY, TRANSITIVE, VERBS, VerbForm, VerbForms};
use crate::generator::english;
use crate::generator::frame::{
    Binding, Frame, FrameKind, ModifierKind, Rendered, Slot, SlotSpec,
};
use crate::lexicon::Category;
use crate::session::card::{PartOfSpeech, TokenDraft};

const PERSON: &[Category] = &[Category::Person];
const PLACE: &[Category] = &[Category::Place];
const OBJECT: &[Category] = &[Category::Object];
const ANY_NOUN: &[Category] = &[Category::Person, Category::Place, Category::Object];

/// The fixed set of grammar frames a generator draws from.
#[derive(Debug)]
pub struct FrameLibrary {
    frames: Vec<Frame>,
}

impl FrameLibrary {
    /// Every frame kind, with verb-governed kinds expanded into one variant
    /// per verb.
    pub fn standard() -> Self {
        let mut frames = vec![
            predicate_frame(FrameKind::GoTo, &GO, VerbForm::Polite, None),
            predicate_frame(FrameKind::StudyAt, &STUDY, VerbForm::Polite, None),
            predicate_frame(FrameKind::SawObject, &SEE, VerbForm::PolitePast, None),
            copula_frame(),
            adjective_topic_frame(),
            demonstrative_adjective_frame(),
        ];
        for verb in TRANSITIVE {
            frames.push(predicate_frame(
                FrameKind::TransitiveAction,
                verb,
                VerbForm::Polite,
                None,
            ));
        }
        for verb in VERBS {
            frames.push(predicate_frame(
                FrameKind::FrequencyAdverbAction,
                verb,
                VerbForm::Polite,
                Some(ModifierKind::FrequencyAdverb),
            ));
        }
        for verb in [&GO, &STUDY] {
            frames.push(predicate_frame(
                FrameKind::PastAffirmative,
                verb,
                VerbForm::PolitePast,
                None,
            ));
            frames.push(predicate_frame(
                FrameKind::PastNegative,
                verb,
                VerbForm::PolitePastNegative,
                None,
            ));
        }
        Self { frames }
    }

    /// Reduced set used with the seed lexicon when the learner's own is too
    /// small to bind reliably.
    pub fn seed() -> Self {
        Self {
            frames: vec![
                predicate_frame(FrameKind::GoTo, &GO, VerbForm::Polite, None),
                predicate_frame(FrameKind::StudyAt, &STUDY, VerbForm::Polite, None),
                predicate_frame(FrameKind::SawObject, &SEE, VerbForm::PolitePast, None),
            ],
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Distinct kinds, in library order.
    pub fn kinds(&self) -> Vec<FrameKind> {
        let mut kinds: Vec<FrameKind> = Vec::new();
        for frame in &self.frames {
            if !kinds.contains(&frame.kind) {
                kinds.push(frame.kind);
            }
        }
        kinds
    }

    pub fn variants(&self, kind: FrameKind) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(move |f| f.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn complement_slot(governs: Governs) -> (Slot, &'static str, &'static str) {
    match governs {
        Governs::Destination => (Slot::Destination, "に", "to"),
        Governs::Location => (Slot::Location, "で", "at"),
        Governs::Object => (Slot::Object, "を", "(object)"),
    }
}

/// Only SawObject admits people and places as its object.
fn complement_categories(kind: FrameKind, governs: Governs) -> &'static [Category] {
    match governs {
        Governs::Destination | Governs::Location => PLACE,
        Governs::Object if kind == FrameKind::SawObject => ANY_NOUN,
        Governs::Object => OBJECT,
    }
}

fn predicate_hint(verb: &VerbForms, form: VerbForm, adverb: bool) -> String {
    let (_, particle, _) = complement_slot(verb.governs);
    let conjugated = verb.surface(verb.lemma, form);
    if adverb {
        format!("〜は [よく] 〜{particle} {conjugated}")
    } else {
        format!("〜は 〜{particle} {conjugated}")
    }
}

fn predicate_frame(
    kind: FrameKind,
    verb: &'static VerbForms,
    form: VerbForm,
    modifier: Option<ModifierKind>,
) -> Frame {
    let (slot, _, _) = complement_slot(verb.governs);
    let allowed = complement_categories(kind, verb.governs);
    let render: fn(&Binding<'_>) -> Option<Rendered> = match form {
        VerbForm::Polite => render_polite,
        VerbForm::PoliteNegative => render_negative,
        VerbForm::PolitePast => render_past,
        VerbForm::PolitePastNegative => render_past_negative,
    };
    let mut slots = vec![
        SlotSpec::new(Slot::Subject, PERSON),
        SlotSpec::new(slot, allowed).distinct_from(Slot::Subject),
    ];
    // GoTo binds no verb entry.
    if kind != FrameKind::GoTo {
        slots.push(SlotSpec::verb(verb.lemma));
    }
    let frame = Frame::new(
        kind,
        slots,
        predicate_hint(verb, form, modifier.is_some()),
        render,
    )
    .with_verb(verb);
    match modifier {
        Some(modifier) => frame.with_modifier(modifier),
        None => frame,
    }
}

fn render_polite(binding: &Binding<'_>) -> Option<Rendered> {
    render_predicate(binding, VerbForm::Polite)
}

fn render_negative(binding: &Binding<'_>) -> Option<Rendered> {
    render_predicate(binding, VerbForm::PoliteNegative)
}

fn render_past(binding: &Binding<'_>) -> Option<Rendered> {
    render_predicate(binding, VerbForm::PolitePast)
}

fn render_past_negative(binding: &Binding<'_>) -> Option<Rendered> {
    render_predicate(binding, VerbForm::PolitePastNegative)
}

/// `S は [ADV] C particle V 。` with the English clause agreeing with S.
fn render_predicate(binding: &Binding<'_>, form: VerbForm) -> Option<Rendered> {
    let verb = binding.verb()?;
    let subject = binding.get(Slot::Subject)?;
    let verb_surface = binding
        .get(Slot::Verb)
        .map_or(verb.lemma, |entry| entry.surface.as_str());
    let (slot, particle, particle_gloss) = complement_slot(verb.governs);
    let complement = binding.get(slot)?;
    let adverb = binding.modifier();

    let mut tokens = vec![
        TokenDraft::entry(subject, PartOfSpeech::Noun),
        TokenDraft::particle("は", "(topic)"),
    ];
    if let Some(adverb) = adverb {
        tokens.push(
            TokenDraft::new(adverb.surface, adverb.english, PartOfSpeech::Other)
                .with_reading(Some(adverb.reading.to_string())),
        );
    }
    tokens.push(TokenDraft::entry(complement, PartOfSpeech::Noun));
    tokens.push(TokenDraft::particle(particle, particle_gloss));
    tokens.push(
        TokenDraft::new(
            verb.surface(verb_surface, form),
            &verb.gloss(form),
            PartOfSpeech::Verb,
        )
        .with_reading(verb.reading(verb_surface, form)),
    );
    tokens.push(TokenDraft::period());

    let complement_phrase = match verb.governs {
        Governs::Destination => english::to_destination(complement),
        Governs::Location => english::at_location(complement),
        Governs::Object => english::object(complement),
    };
    let verb_phrase = verb.english(form, english::is_first_person(subject));
    let predicate = match adverb {
        Some(adverb) => format!("{} {verb_phrase}", adverb.english),
        None => verb_phrase,
    };
    let target = format!(
        "{} {predicate} {complement_phrase}.",
        english::subject(subject)
    );
    Some(Rendered { tokens, target })
}

fn copula_frame() -> Frame {
    Frame::new(
        FrameKind::CopulaDemonstrative,
        vec![SlotSpec::new(Slot::Object, OBJECT)],
        "これは 〜です",
        render_copula,
    )
}

fn render_copula(binding: &Binding<'_>) -> Option<Rendered> {
    let object = binding.get(Slot::Object)?;
    let tokens = vec![
        TokenDraft::new("これ", "this", PartOfSpeech::Noun),
        TokenDraft::particle("は", "(topic)"),
        TokenDraft::entry(object, PartOfSpeech::Noun),
        TokenDraft::new("です", "is", PartOfSpeech::Verb),
        TokenDraft::period(),
    ];
    Some(Rendered {
        tokens,
        target: format!("This is {}.", english::object(object)),
    })
}

fn adjective_topic_frame() -> Frame {
    Frame::new(
        FrameKind::AdjectiveTopic,
        vec![SlotSpec::new(Slot::Noun, OBJECT)],
        "〜は [形容詞]です",
        render_adjective_topic,
    )
    .with_modifier(ModifierKind::Adjective)
}

fn render_adjective_topic(binding: &Binding<'_>) -> Option<Rendered> {
    let noun = binding.get(Slot::Noun)?;
    let adjective = binding.modifier()?;
    let tokens = vec![
        TokenDraft::entry(noun, PartOfSpeech::Noun),
        TokenDraft::particle("は", "(topic)"),
        TokenDraft::new(adjective.surface, adjective.english, PartOfSpeech::Adjective)
            .with_reading(Some(adjective.reading.to_string())),
        TokenDraft::new("です", "is", PartOfSpeech::Verb),
        TokenDraft::period(),
    ];
    let subject = english::capitalize(&english::definite(&english::bare_noun(noun)));
    Some(Rendered {
        tokens,
        target: format!("{subject} is {}.", adjective.english),
    })
}

fn demonstrative_adjective_frame() -> Frame {
    Frame::new(
        FrameKind::DemonstrativeAdjective,
        vec![SlotSpec::new(Slot::Noun, OBJECT)],
        "この 〜は [形容詞]です",
        render_demonstrative_adjective,
    )
    .with_modifier(ModifierKind::Adjective)
}

fn render_demonstrative_adjective(binding: &Binding<'_>) -> Option<Rendered> {
    let noun = binding.get(Slot::Noun)?;
    let adjective = binding.modifier()?;
    let tokens = vec![
        TokenDraft::new("この", "this", PartOfSpeech::Connector),
        TokenDraft::entry(noun, PartOfSpeech::Noun),
        TokenDraft::particle("は", "(topic)"),
        TokenDraft::new(adjective.surface, adjective.english, PartOfSpeech::Adjective)
            .with_reading(Some(adjective.reading.to_string())),
        TokenDraft::new("です", "is", PartOfSpeech::Verb),
        TokenDraft::period(),
    ];
    Some(Rendered {
        tokens,
        target: format!(
            "This {} is {}.",
            english::bare_noun(noun),
            adjective.english
        ),
    })
}
