use std::collections::HashSet;

use jpdrills::generator::frame::{Difficulty, FrameKind, Slot};
use jpdrills::generator::frames::FrameLibrary;
use jpdrills::generator::{GeneratorOptions, SentenceGenerator};
use jpdrills::lexicon::{Category, Lexicon, LexiconEntry};

fn entry(surface: &str, translation: &str, category: Category) -> LexiconEntry {
    LexiconEntry::new(surface, category).with_translation(translation)
}

fn rich_lexicon() -> Lexicon {
    Lexicon::from_entries([
        entry("私", "I", Category::Person),
        entry("友だち", "friend", Category::Person),
        entry("先生", "teacher", Category::Person),
        entry("学校", "school", Category::Place),
        entry("家", "house", Category::Place),
        entry("図書館", "library", Category::Place),
        entry("駅", "station", Category::Place),
        entry("本", "book", Category::Object),
        entry("りんご", "apple", Category::Object),
        entry("映画", "movie", Category::Object),
        LexiconEntry::new("行く", Category::Verb),
        LexiconEntry::new("勉強する", Category::Verb),
        LexiconEntry::new("見る", Category::Verb),
        LexiconEntry::new("読む", Category::Verb),
        LexiconEntry::new("食べる", Category::Verb),
    ])
}

fn options(difficulty: Difficulty, min_lexicon_entries: usize) -> GeneratorOptions {
    GeneratorOptions {
        min_lexicon_entries,
        difficulty,
        ..GeneratorOptions::default()
    }
}

#[test]
fn bindings_satisfy_categories_and_distinctness() {
    let lexicon = rich_lexicon();
    let library = FrameLibrary::standard();
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 17);

    for frame in library.frames() {
        for _ in 0..25 {
            let Some(binding) = generator.bind(frame, &lexicon) else {
                panic!("{:?} failed to bind against a full lexicon", frame.kind);
            };
            assert!(frame.accepts(&binding), "{:?}", frame.kind);
            for spec in &frame.slots {
                let bound = binding.get(spec.slot).unwrap();
                assert!(spec.allowed.contains(&bound.category));
                if let Some(other) = spec.distinct_from {
                    assert_ne!(bound.surface, binding.get(other).unwrap().surface);
                }
            }
        }
    }
}

#[test]
fn subject_tokens_come_from_person_pool() {
    let lexicon = rich_lexicon();
    let persons: HashSet<&str> = lexicon.persons.iter().map(|e| e.surface.as_str()).collect();
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 3);

    let predicate_kinds = [
        FrameKind::GoTo,
        FrameKind::StudyAt,
        FrameKind::SawObject,
        FrameKind::TransitiveAction,
        FrameKind::FrequencyAdverbAction,
        FrameKind::PastAffirmative,
        FrameKind::PastNegative,
    ];
    let cards = generator.generate(&lexicon, 100);
    assert_eq!(cards.len(), 100);
    for card in cards.iter().filter(|c| predicate_kinds.contains(&c.frame)) {
        assert!(persons.contains(card.tokens[0].surface.as_str()), "{card:?}");
        assert_eq!(card.tokens[1].surface, "は");
    }
}

#[test]
fn duplicate_rows_never_fill_both_sides() {
    // The only non-subject candidate for SawObject is a second copy of the subject.
    let lexicon = Lexicon::from_entries([
        entry("友だち", "friend", Category::Person),
        entry("友だち", "friend", Category::Person),
        LexiconEntry::new("見る", Category::Verb),
    ]);
    let mut generator = SentenceGenerator::seeded(options(Difficulty::Intermediate, 1), 8);
    let cards = generator.generate(&lexicon, 10);
    assert!(cards.is_empty(), "{cards:?}");
}

#[test]
fn zero_count_and_empty_lexicon() {
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 1);
    assert!(generator.generate(&rich_lexicon(), 0).is_empty());
    assert!(generator.generate(&Lexicon::default(), 5).is_empty());
}

#[test]
fn sparse_lexicon_always_goes_to_the_school() {
    let lexicon = Lexicon::from_entries([
        entry("私", "I", Category::Person),
        entry("学校", "school", Category::Place),
        LexiconEntry::new("行く", Category::Verb),
    ]);

    for seed in 0..20 {
        let mut generator = SentenceGenerator::seeded(options(Difficulty::Beginner, 3), seed);
        let cards = generator.generate(&lexicon, 5);
        assert_eq!(cards.len(), 5);
        for card in &cards {
            assert_eq!(card.frame, FrameKind::GoTo);
            assert!(card.target.starts_with("I go"), "{}", card.target);
            assert!(card.target.ends_with("to the school."), "{}", card.target);
        }
    }
}

#[test]
fn home_override_in_sparse_lexicon() {
    let lexicon = Lexicon::from_entries([
        entry("私", "I", Category::Person),
        entry("家", "house", Category::Place),
        LexiconEntry::new("行く", Category::Verb),
    ]);
    let mut generator = SentenceGenerator::seeded(options(Difficulty::Beginner, 3), 2);
    let cards = generator.generate(&lexicon, 3);
    assert!(cards.iter().all(|c| c.target == "I go home."));
}

#[test]
fn same_seed_same_cards() {
    let lexicon = rich_lexicon();
    let mut a = SentenceGenerator::seeded(GeneratorOptions::default(), 99);
    let mut b = SentenceGenerator::seeded(GeneratorOptions::default(), 99);
    assert_eq!(a.generate(&lexicon, 30), b.generate(&lexicon, 30));
}

#[test]
fn cards_are_well_formed_with_unique_token_ids() {
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 5);
    let cards = generator.generate(&rich_lexicon(), 60);

    let mut token_ids = HashSet::new();
    for card in &cards {
        assert!(card.is_well_formed(), "{card:?}");
        assert!(!card.hint.is_empty());
        for token in &card.tokens {
            assert!(token_ids.insert(token.id.clone()), "duplicate id {}", token.id);
        }
    }
}

#[test]
fn every_difficulty_tier_is_reachable() {
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 21);
    let kinds: HashSet<FrameKind> = generator
        .generate(&rich_lexicon(), 400)
        .into_iter()
        .map(|c| c.frame)
        .collect();
    assert_eq!(kinds.len(), FrameLibrary::standard().kinds().len());
}

#[test]
fn object_slot_may_bind_people_and_places() {
    let lexicon = Lexicon::from_entries([
        entry("私", "I", Category::Person),
        entry("友だち", "friend", Category::Person),
        entry("駅", "station", Category::Place),
        LexiconEntry::new("見る", Category::Verb),
    ]);
    let library = FrameLibrary::standard();
    let frame = library.variants(FrameKind::SawObject).next().unwrap();
    let mut generator = SentenceGenerator::seeded(options(Difficulty::Advanced, 1), 4);

    let mut seen = HashSet::new();
    for _ in 0..200 {
        let binding = generator.bind(frame, &lexicon).unwrap();
        seen.insert(binding.get(Slot::Object).unwrap().category);
    }
    assert!(seen.contains(&Category::Person));
    assert!(seen.contains(&Category::Place));
}

#[test]
fn go_to_without_any_verb_entries() {
    let lexicon = Lexicon::from_entries([
        entry("私", "I", Category::Person),
        entry("友だち", "friend", Category::Person),
        entry("先生", "teacher", Category::Person),
        entry("学校", "school", Category::Place),
        entry("図書館", "library", Category::Place),
        entry("駅", "station", Category::Place),
        entry("本", "book", Category::Object),
        entry("りんご", "apple", Category::Object),
        entry("映画", "movie", Category::Object),
        entry("車", "car", Category::Object),
        entry("水", "water", Category::Object),
        entry("パン", "bread", Category::Object),
    ]);
    let mut generator = SentenceGenerator::seeded(GeneratorOptions::default(), 12);
    let cards = generator.generate(&lexicon, 300);

    let go_to: Vec<_> = cards.iter().filter(|c| c.frame == FrameKind::GoTo).collect();
    assert!(!go_to.is_empty());
    for card in go_to {
        assert!(card.tokens.iter().any(|t| t.surface == "行きます"), "{card:?}");
    }
    assert!(cards.iter().all(|c| c.frame != FrameKind::StudyAt));
}

#[test]
fn transitive_frames_bind_only_objects() {
    let lexicon = Lexicon::from_entries([
        entry("私", "I", Category::Person),
        entry("友だち", "friend", Category::Person),
        entry("先生", "teacher", Category::Person),
        entry("学校", "school", Category::Place),
        entry("駅", "station", Category::Place),
        entry("本", "book", Category::Object),
        entry("りんご", "apple", Category::Object),
        entry("パン", "bread", Category::Object),
        LexiconEntry::new("食べる", Category::Verb),
        LexiconEntry::new("読む", Category::Verb),
    ]);
    let objects: HashSet<&str> = lexicon.objects.iter().map(|e| e.surface.as_str()).collect();
    let mut generator = SentenceGenerator::seeded(options(Difficulty::Intermediate, 1), 6);

    let cards = generator.generate(&lexicon, 300);
    let transitive: Vec<_> = cards
        .iter()
        .filter(|c| {
            matches!(
                c.frame,
                FrameKind::TransitiveAction | FrameKind::FrequencyAdverbAction
            )
        })
        .collect();
    assert!(!transitive.is_empty());
    for card in transitive {
        let object = card
            .tokens
            .iter()
            .position(|t| t.surface == "を")
            .map(|i| card.tokens[i - 1].surface.as_str());
        assert!(object.is_some_and(|o| objects.contains(o)), "{}", card.target);
    }
}
