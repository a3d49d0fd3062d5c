use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generator::conjugation::VerbForms;
use crate::lexicon::{Category, Lexicon, LexiconEntry};
use crate::session::card::TokenDraft;

/// Frame tiers. A generator configured for a tier uses every frame at or
/// below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    #[default]
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("unknown difficulty '{s}' (expected beginner, intermediate or advanced)")
            })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    GoTo,
    StudyAt,
    SawObject,
    CopulaDemonstrative,
    AdjectiveTopic,
    DemonstrativeAdjective,
    TransitiveAction,
    FrequencyAdverbAction,
    PastAffirmative,
    PastNegative,
}

impl FrameKind {
    pub fn difficulty(self) -> Difficulty {
        match self {
            FrameKind::GoTo
            | FrameKind::StudyAt
            | FrameKind::CopulaDemonstrative
            | FrameKind::AdjectiveTopic
            | FrameKind::DemonstrativeAdjective => Difficulty::Beginner,
            FrameKind::SawObject
            | FrameKind::TransitiveAction
            | FrameKind::FrequencyAdverbAction => Difficulty::Intermediate,
            FrameKind::PastAffirmative | FrameKind::PastNegative => Difficulty::Advanced,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FrameKind::GoTo => "go_to",
            FrameKind::StudyAt => "study_at",
            FrameKind::SawObject => "saw_object",
            FrameKind::CopulaDemonstrative => "copula_demonstrative",
            FrameKind::AdjectiveTopic => "adjective_topic",
            FrameKind::DemonstrativeAdjective => "demonstrative_adjective",
            FrameKind::TransitiveAction => "transitive_action",
            FrameKind::FrequencyAdverbAction => "frequency_adverb_action",
            FrameKind::PastAffirmative => "past_affirmative",
            FrameKind::PastNegative => "past_negative",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Subject,
    Destination,
    Location,
    Object,
    Noun,
    Verb,
}

/// Category constraint for one slot, plus an optional lemma (for verb
/// slots) and an optional earlier slot it must differ from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotSpec {
    pub slot: Slot,
    pub allowed: &'static [Category],
    pub lemma: Option<&'static str>,
    pub distinct_from: Option<Slot>,
}

impl SlotSpec {
    pub fn new(slot: Slot, allowed: &'static [Category]) -> Self {
        Self {
            slot,
            allowed,
            lemma: None,
            distinct_from: None,
        }
    }

    pub fn verb(lemma: &'static str) -> Self {
        Self {
            lemma: Some(lemma),
            ..Self::new(Slot::Verb, &[Category::Verb])
        }
    }

    pub fn distinct_from(mut self, other: Slot) -> Self {
        self.distinct_from = Some(other);
        self
    }

    pub fn admits(&self, entry: &LexiconEntry) -> bool {
        self.allowed.contains(&entry.category)
            && self.lemma.is_none_or(|lemma| entry.surface.ends_with(lemma))
    }

    /// Every entry in the snapshot this slot could take, before distinctness.
    pub fn candidates<'a>(&self, lexicon: &'a Lexicon) -> Vec<&'a LexiconEntry> {
        self.allowed
            .iter()
            .flat_map(|&category| lexicon.pool(category))
            .filter(|entry| self.admits(entry))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifierKind {
    Adjective,
    FrequencyAdverb,
}

/// Static word inserted by a frame rather than drawn from the lexicon.
#[derive(Debug, PartialEq, Eq)]
pub struct Modifier {
    pub surface: &'static str,
    pub reading: &'static str,
    pub english: &'static str,
}

pub static ADJECTIVES: [Modifier; 6] = [
    Modifier { surface: "大きい", reading: "おおきい", english: "big" },
    Modifier { surface: "小さい", reading: "ちいさい", english: "small" },
    Modifier { surface: "新しい", reading: "あたらしい", english: "new" },
    Modifier { surface: "古い", reading: "ふるい", english: "old" },
    Modifier { surface: "いい", reading: "いい", english: "good" },
    Modifier { surface: "きれい", reading: "きれい", english: "clean" },
];

pub static FREQUENCY_ADVERBS: [Modifier; 3] = [
    Modifier { surface: "よく", reading: "よく", english: "often" },
    Modifier { surface: "たいてい", reading: "たいてい", english: "usually" },
    Modifier { surface: "ときどき", reading: "ときどき", english: "sometimes" },
];

impl ModifierKind {
    pub fn choices(self) -> &'static [Modifier] {
        match self {
            ModifierKind::Adjective => &ADJECTIVES,
            ModifierKind::FrequencyAdverb => &FREQUENCY_ADVERBS,
        }
    }
}

/// One lexicon entry per slot, plus the frame's verb and modifier if any.
#[derive(Clone, Debug, Default)]
pub struct Binding<'a> {
    entries: Vec<(Slot, &'a LexiconEntry)>,
    verb: Option<&'static VerbForms>,
    modifier: Option<&'static Modifier>,
}

impl<'a> Binding<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, slot: Slot, entry: &'a LexiconEntry) {
        self.entries.retain(|(s, _)| *s != slot);
        self.entries.push((slot, entry));
    }

    pub fn with_verb(mut self, verb: Option<&'static VerbForms>) -> Self {
        self.verb = verb;
        self
    }

    pub fn with_modifier(mut self, modifier: Option<&'static Modifier>) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn get(&self, slot: Slot) -> Option<&'a LexiconEntry> {
        self.entries
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, entry)| *entry)
    }

    pub fn verb(&self) -> Option<&'static VerbForms> {
        self.verb
    }

    pub fn modifier(&self) -> Option<&'static Modifier> {
        self.modifier
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub tokens: Vec<TokenDraft>,
    pub target: String,
}

pub type RenderFn = fn(&Binding<'_>) -> Option<Rendered>;

pub struct Frame {
    pub kind: FrameKind,
    pub slots: Vec<SlotSpec>,
    pub verb: Option<&'static VerbForms>,
    pub modifier: Option<ModifierKind>,
    pub hint: String,
    render: RenderFn,
}

impl Frame {
    pub fn new(kind: FrameKind, slots: Vec<SlotSpec>, hint: impl Into<String>, render: RenderFn) -> Self {
        Self {
            kind,
            slots,
            verb: None,
            modifier: None,
            hint: hint.into(),
            render,
        }
    }

    pub fn with_verb(mut self, verb: &'static VerbForms) -> Self {
        self.verb = Some(verb);
        self
    }

    pub fn with_modifier(mut self, modifier: ModifierKind) -> Self {
        self.modifier = Some(modifier);
        self
    }

    pub fn spec(&self, slot: Slot) -> Option<&SlotSpec> {
        self.slots.iter().find(|s| s.slot == slot)
    }

    /// Every slot has at least one candidate. Distinctness may still make
    /// binding fail.
    pub fn is_satisfiable(&self, lexicon: &Lexicon) -> bool {
        self.slots
            .iter()
            .all(|spec| lexicon.any_in(spec.allowed, |e| spec.admits(e)))
    }

    /// Whether a binding honors every slot constraint of this frame.
    pub fn accepts(&self, binding: &Binding<'_>) -> bool {
        self.slots.iter().all(|spec| {
            let Some(entry) = binding.get(spec.slot) else {
                return false;
            };
            let distinct = spec
                .distinct_from
                .and_then(|other| binding.get(other))
                .is_none_or(|other| other.surface != entry.surface);
            spec.admits(entry) && distinct
        })
    }

    /// Pure: the same binding always renders the same tokens and text.
    pub fn render(&self, binding: &Binding<'_>) -> Option<Rendered> {
        (self.render)(binding)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("kind", &self.kind)
            .field("verb", &self.verb.map(|v| v.lemma))
            .field("hint", &self.hint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::conjugation::GO;

    fn go_frame() -> Frame {
        Frame::new(
            FrameKind::GoTo,
            vec![
                SlotSpec::new(Slot::Subject, &[Category::Person]),
                SlotSpec::new(Slot::Destination, &[Category::Place]).distinct_from(Slot::Subject),
                SlotSpec::verb("行く"),
            ],
            "〜は 〜に 行きます",
            |_| None,
        )
        .with_verb(&GO)
    }

    #[test]
    fn verb_slot_requires_matching_lemma() {
        let spec = SlotSpec::verb("行く");
        assert!(spec.admits(&LexiconEntry::new("行く", Category::Verb)));
        assert!(!spec.admits(&LexiconEntry::new("見る", Category::Verb)));
        assert!(!spec.admits(&LexiconEntry::new("行く", Category::Object)));
    }

    #[test]
    fn satisfiable_only_when_every_slot_has_candidates() {
        let frame = go_frame();
        let mut lexicon = Lexicon::from_entries([
            LexiconEntry::new("私", Category::Person),
            LexiconEntry::new("学校", Category::Place),
        ]);
        assert!(!frame.is_satisfiable(&lexicon));
        lexicon.push(LexiconEntry::new("見る", Category::Verb));
        assert!(!frame.is_satisfiable(&lexicon));
        lexicon.push(LexiconEntry::new("行く", Category::Verb));
        assert!(frame.is_satisfiable(&lexicon));
    }

    #[test]
    fn accepts_checks_categories_and_distinctness() {
        let frame = go_frame();
        let me = LexiconEntry::new("私", Category::Person);
        let school = LexiconEntry::new("学校", Category::Place);
        let go = LexiconEntry::new("行く", Category::Verb);

        let mut binding = Binding::new();
        binding.bind(Slot::Subject, &me);
        binding.bind(Slot::Destination, &school);
        assert!(!frame.accepts(&binding), "verb slot unbound");
        binding.bind(Slot::Verb, &go);
        assert!(frame.accepts(&binding));

        binding.bind(Slot::Destination, &me);
        assert!(!frame.accepts(&binding));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Beginner".parse::<Difficulty>(), Ok(Difficulty::Beginner));
        assert!("expert".parse::<Difficulty>().is_err());
        assert!(Difficulty::Beginner < Difficulty::Advanced);
    }
}
