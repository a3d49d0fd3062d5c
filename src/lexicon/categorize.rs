use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::Category;

// Dictionary-form endings: する verbs, ichidan/godan る, and a kanji stem
// followed by a godan ending.
static VERB_ENDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(する$)|([一-龥ぁ-んァ-ン]る$)|([一-龥][くむぶうすつぐ]$)")
        .expect("verb ending pattern is valid")
});

const PLACE_HINTS: &[&str] = &[
    "学校",
    "会社",
    "駅",
    "家",
    "うち",
    "病院",
    "図書館",
    "公園",
    "デパート",
    "スーパー",
    "店",
    "空港",
    "市役所",
    "コンビニ",
];

const PERSON_HINTS: &[&str] = &[
    "私",
    "わたし",
    "僕",
    "ぼく",
    "友だち",
    "友達",
    "先生",
    "子ども",
    "人",
    "彼",
    "彼女",
];

/// Assign a term to a lexicon category. Verb endings win over keyword hints;
/// anything unrecognized is an object. Blank terms are not categorized.
pub fn categorize(term: &str) -> Option<Category> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    if VERB_ENDING.is_match(term) {
        return Some(Category::Verb);
    }
    if PLACE_HINTS.iter().any(|hint| term.contains(hint)) {
        return Some(Category::Place);
    }
    if PERSON_HINTS.iter().any(|hint| term.contains(hint)) {
        return Some(Category::Person);
    }
    Some(Category::Object)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_verb_endings() {
        for verb in ["行く", "勉強する", "見る", "読む", "食べる", "遊ぶ", "買う", "話す", "待つ", "泳ぐ"] {
            assert_eq!(categorize(verb), Some(Category::Verb), "{verb}");
        }
    }

    #[test]
    fn recognizes_places_and_persons() {
        assert_eq!(categorize("学校"), Some(Category::Place));
        assert_eq!(categorize("図書館"), Some(Category::Place));
        assert_eq!(categorize("家"), Some(Category::Place));
        assert_eq!(categorize("私"), Some(Category::Person));
        assert_eq!(categorize("友だち"), Some(Category::Person));
        assert_eq!(categorize("先生"), Some(Category::Person));
    }

    #[test]
    fn falls_back_to_object() {
        assert_eq!(categorize("本"), Some(Category::Object));
        assert_eq!(categorize("映画"), Some(Category::Object));
        assert_eq!(categorize("コーヒー"), Some(Category::Object));
    }

    #[test]
    fn blank_term_is_uncategorized() {
        assert_eq!(categorize(""), None);
        assert_eq!(categorize("   "), None);
    }

    #[test]
    fn kana_godan_ending_alone_is_not_a_verb() {
        // Only a kanji stem qualifies for the godan endings.
        assert_eq!(categorize("いく"), Some(Category::Object));
    }
}
