//! Target-language rendering helpers: subject agreement, articles and
//! destination phrasing.

use crate::lexicon::{Category, LexiconEntry};

const FIRST_PERSON: &[&str] = &["私", "わたし", "僕", "ぼく", "俺", "おれ"];

/// Places with a fixed phrasing as a destination or a location.
const PLACE_OVERRIDES: &[(&str, &str)] = &[("家", "home"), ("うち", "home")];

const ARTICLES: &[&str] = &["a", "an", "the"];

pub fn is_first_person(entry: &LexiconEntry) -> bool {
    entry.category == Category::Person
        && (FIRST_PERSON.iter().any(|p| entry.surface.contains(p))
            || entry
                .translation
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("i")))
}

/// Lower-cased head translation, or `fallback` when the entry has none.
/// Only the first sense of a multi-sense translation ("school; academy") is used.
pub fn gloss(entry: &LexiconEntry, fallback: &str) -> String {
    entry
        .translation
        .as_deref()
        .and_then(|t| t.split([';', ',', '/']).next())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn starts_with_article(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .next()
        .is_some_and(|first| phrase.contains(' ') && ARTICLES.contains(&first))
}

fn strip_article(phrase: &str) -> &str {
    if starts_with_article(phrase) {
        phrase
            .split_once(' ')
            .map(|(_, rest)| rest.trim_start())
            .unwrap_or(phrase)
    } else {
        phrase
    }
}

pub fn indefinite(noun: &str) -> String {
    if starts_with_article(noun) {
        return noun.to_string();
    }
    let article = match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    };
    format!("{article} {noun}")
}

pub fn definite(noun: &str) -> String {
    if starts_with_article(noun) {
        noun.to_string()
    } else {
        format!("the {noun}")
    }
}

pub fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Third-person singular present of a base verb.
pub fn third_person(base: &str) -> String {
    let bytes = base.as_bytes();
    let consonant_y = base.ends_with('y')
        && bytes.len() >= 2
        && !matches!(bytes[bytes.len() - 2], b'a' | b'e' | b'i' | b'o' | b'u');
    if consonant_y {
        format!("{}ies", &base[..base.len() - 1])
    } else if ["o", "s", "x", "z", "sh", "ch"].iter().any(|end| base.ends_with(end)) {
        format!("{base}es")
    } else {
        format!("{base}s")
    }
}

/// Sentence-initial subject: "I" for the first person, otherwise an
/// indefinite noun phrase ("A friend").
pub fn subject(entry: &LexiconEntry) -> String {
    if is_first_person(entry) {
        return "I".to_string();
    }
    let noun = gloss(entry, "");
    if noun.is_empty() {
        "Someone".to_string()
    } else {
        capitalize(&indefinite(&noun))
    }
}

fn place_override(entry: &LexiconEntry) -> Option<&'static str> {
    PLACE_OVERRIDES
        .iter()
        .find(|(surface, _)| *surface == entry.surface)
        .map(|(_, phrase)| *phrase)
}

pub fn destination(entry: &LexiconEntry) -> String {
    place_override(entry)
        .map(str::to_string)
        .unwrap_or_else(|| definite(&gloss(entry, "place")))
}

pub fn location(entry: &LexiconEntry) -> String {
    destination(entry)
}

/// "to the school", or the bare override ("home") which takes no preposition.
pub fn to_destination(entry: &LexiconEntry) -> String {
    match place_override(entry) {
        Some(phrase) => phrase.to_string(),
        None => format!("to {}", destination(entry)),
    }
}

/// "at the library", "at home".
pub fn at_location(entry: &LexiconEntry) -> String {
    format!("at {}", location(entry))
}

/// Grammatical object. Places are definite; people and things take
/// "a"/"an" unless the translation already carries an article.
pub fn object(entry: &LexiconEntry) -> String {
    match entry.category {
        Category::Person if is_first_person(entry) => "me".to_string(),
        Category::Place => definite(&gloss(entry, "place")),
        _ => indefinite(&gloss(entry, "thing")),
    }
}

/// Bare noun for "This X is ..." phrasing.
pub fn bare_noun(entry: &LexiconEntry) -> String {
    strip_article(&gloss(entry, "thing")).to_string()
}
